// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;
use std::time::Duration;

use sd_wire::{Method, ProtocolError};
use thiserror::Error;

/// How a worker process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerExitStatus {
    /// Exit code; `None` when terminated by a signal or killed
    pub code: Option<i32>,
}

impl WorkerExitStatus {
    pub const SUCCESS: Self = Self { code: Some(0) };
    pub const KILLED: Self = Self { code: None };

    pub fn success(self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for WorkerExitStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for WorkerExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => f.write_str("terminated by signal"),
        }
    }
}

/// Errors from driving a worker process
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("failed to start worker {program}: {source}")]
    ProcessSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("worker exited abnormally: {status}")]
    WorkerExit { status: WorkerExitStatus },

    #[error("failed to wait for worker: {0}")]
    Wait(#[source] std::io::Error),

    #[error("failed to encode {method} request: {source}")]
    RequestEncode {
        method: Method,
        #[source]
        source: ProtocolError,
    },

    #[error("failed to write {method} request: {source}")]
    Write {
        method: Method,
        #[source]
        source: std::io::Error,
    },

    #[error("worker closed its output before answering {method}")]
    UnexpectedEof { method: Method },

    #[error("failed to read {method} response: {source}")]
    Read {
        method: Method,
        #[source]
        source: std::io::Error,
    },

    #[error("{method} got no response within {timeout:?}")]
    CallTimeout { method: Method, timeout: Duration },

    #[error("unexpected {method} response: {response}")]
    Handshake { method: Method, response: String },
}
