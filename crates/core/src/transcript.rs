// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Saved conversation transcripts.
//!
//! A transcript is the message list of a finished session written as an
//! indented JSON array. It is the only input accepted when continuing a
//! thread.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::message::ConversationMessage;

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("failed to read transcript {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write transcript {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid transcript {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode transcript: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Encode messages as a 2-space indented JSON array.
pub fn to_json(messages: &[ConversationMessage]) -> Result<String, TranscriptError> {
    Ok(serde_json::to_string_pretty(messages)?)
}

pub fn from_json(json: &str) -> Result<Vec<ConversationMessage>, serde_json::Error> {
    serde_json::from_str(json)
}

pub fn save(path: &Path, messages: &[ConversationMessage]) -> Result<(), TranscriptError> {
    let json = to_json(messages)?;
    std::fs::write(path, json).map_err(|source| TranscriptError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load(path: &Path) -> Result<Vec<ConversationMessage>, TranscriptError> {
    let json = std::fs::read_to_string(path).map_err(|source| TranscriptError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    from_json(&json).map_err(|source| TranscriptError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "transcript_tests.rs"]
mod tests;
