// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error carrying the process exit code.
//!
//! Commands return `ExitError` and leave termination to `main()`.

use std::fmt;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Exit code for an arbitrary command error (1 unless it is an `ExitError`).
    pub fn code_of(err: &anyhow::Error) -> i32 {
        err.downcast_ref::<ExitError>().map(|e| e.code).unwrap_or(1)
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}
