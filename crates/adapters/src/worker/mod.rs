// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker process handle and line RPC calls.
//!
//! A [`WorkerHandle`] exclusively owns one worker: its input writer, its
//! output reader, and the process itself (behind [`WorkerControl`]). Calls
//! are strictly sequential; each writes one request line and reads exactly
//! one response line.

mod process;

#[cfg(any(test, feature = "test-support"))]
mod fake;

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use sd_wire::{Method, Request};

use crate::error::{WorkerError, WorkerExitStatus};

pub use process::{spawn, WorkerCommand};

#[cfg(any(test, feature = "test-support"))]
pub use fake::{fake_worker, FakeControl, FakeWorkerEnd};

/// Buffered reader over a worker's output stream.
pub type WorkerOutput = BufReader<Box<dyn AsyncRead + Send + Unpin>>;

/// Writer into a worker's input stream.
pub type WorkerInput = Box<dyn AsyncWrite + Send + Unpin>;

/// Process-level control of a worker, separate from its byte streams.
#[async_trait]
pub trait WorkerControl: Send {
    /// Wait for the process to exit.
    async fn wait(&mut self) -> Result<WorkerExitStatus, WorkerError>;

    /// Forcefully terminate the process and reap it.
    async fn kill(&mut self) -> Result<(), WorkerError>;

    /// OS process id, if there is one.
    fn pid(&self) -> Option<u32>;
}

/// Timeouts applied to a handle's calls and shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerTimeouts {
    /// Bound on the read of a single call's response; `None` waits forever
    pub call: Option<Duration>,
    /// How long shutdown waits for a clean exit before killing
    pub shutdown_grace: Duration,
}

impl Default for WorkerTimeouts {
    fn default() -> Self {
        Self {
            call: Some(Duration::from_secs(30)),
            shutdown_grace: Duration::from_secs(5),
        }
    }
}

pub struct WorkerHandle {
    input: Option<WorkerInput>,
    output: Option<WorkerOutput>,
    control: Box<dyn WorkerControl>,
    timeouts: WorkerTimeouts,
    next_stream_id: u64,
    stopped: bool,
}

impl WorkerHandle {
    pub fn from_parts(
        input: WorkerInput,
        output: Box<dyn AsyncRead + Send + Unpin>,
        control: Box<dyn WorkerControl>,
        timeouts: WorkerTimeouts,
    ) -> Self {
        Self {
            input: Some(input),
            output: Some(BufReader::new(output)),
            control,
            timeouts,
            next_stream_id: 1,
            stopped: false,
        }
    }

    /// Identifier the next call will carry.
    pub fn next_stream_id(&self) -> u64 {
        self.next_stream_id
    }

    pub fn pid(&self) -> Option<u32> {
        self.control.pid()
    }

    /// Send one request and return the raw response line.
    ///
    /// The stream id advances on every call, whether or not it succeeds.
    pub async fn call(&mut self, method: Method, args: Vec<Value>) -> Result<String, WorkerError> {
        let stream_id = self.next_stream_id;
        self.next_stream_id += 1;
        tracing::debug!(stream_id, %method, "worker call");

        let request = Request::new(stream_id, method, args);
        let line = sd_wire::encode(&request)
            .map_err(|source| WorkerError::RequestEncode { method, source })?;

        let input = self.input.as_mut().ok_or_else(|| WorkerError::Write {
            method,
            source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "worker input is closed"),
        })?;
        sd_wire::write_line(input, &line)
            .await
            .map_err(|source| WorkerError::Write { method, source })?;

        let output = self.output.as_mut().ok_or(WorkerError::UnexpectedEof { method })?;
        let read = sd_wire::read_line(output);
        let result = match self.timeouts.call {
            Some(limit) => tokio::time::timeout(limit, read)
                .await
                .map_err(|_| WorkerError::CallTimeout {
                    method,
                    timeout: limit,
                })?,
            None => read.await,
        };
        match result {
            Ok(Some(response)) => Ok(response),
            Ok(None) => Err(WorkerError::UnexpectedEof { method }),
            Err(source) => Err(WorkerError::Read { method, source }),
        }
    }

    /// Hand the output stream to a consumer. Later calls will see EOF.
    pub fn take_output(&mut self) -> Option<WorkerOutput> {
        self.output.take()
    }

    /// Close input, then wait for the worker to exit.
    ///
    /// A worker still running after the grace period is killed and
    /// reported as [`WorkerError::WorkerExit`]. Calling this again is a no-op.
    pub async fn shutdown(&mut self) -> Result<(), WorkerError> {
        if self.stopped {
            return Ok(());
        }
        self.stopped = true;

        if let Some(mut input) = self.input.take() {
            // Broken pipe here just means the worker is already gone
            let _ = input.shutdown().await;
        }

        let grace = self.timeouts.shutdown_grace;
        let waited = tokio::time::timeout(grace, self.control.wait()).await;
        let status = match waited {
            Ok(result) => result?,
            Err(_) => {
                tracing::warn!(pid = ?self.control.pid(), ?grace, "worker did not exit, killing");
                self.control.kill().await?;
                WorkerExitStatus::KILLED
            }
        };

        if status.success() {
            tracing::debug!(pid = ?self.control.pid(), "worker exited");
            Ok(())
        } else {
            Err(WorkerError::WorkerExit { status })
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
