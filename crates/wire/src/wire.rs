// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line framing: one JSON document per `\n`-terminated line.

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::{Request, ResponseEnvelope};

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Encode a request as JSON followed by a newline.
pub fn encode(request: &Request) -> Result<Vec<u8>, ProtocolError> {
    let mut bytes = serde_json::to_vec(request).map_err(ProtocolError::Encode)?;
    bytes.push(b'\n');
    Ok(bytes)
}

pub fn decode(line: &str) -> Result<ResponseEnvelope, ProtocolError> {
    serde_json::from_str(line).map_err(ProtocolError::Decode)
}

/// Write an already-encoded line in a single write, then flush.
pub async fn write_line<W>(writer: &mut W, line: &[u8]) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    writer.write_all(line).await?;
    writer.flush().await
}

/// Read the next line without its terminator; `None` at end of stream.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD, so a corrupt
/// line reaches the decoder instead of failing the read.
pub async fn read_line<R>(reader: &mut R) -> Result<Option<String>, std::io::Error>
where
    R: AsyncBufRead + Unpin + ?Sized,
{
    let mut bytes = Vec::new();
    if reader.read_until(b'\n', &mut bytes).await? == 0 {
        return Ok(None);
    }
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
    }
    let line = match String::from_utf8(bytes) {
        Ok(line) => line,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    };
    Ok(Some(line))
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
