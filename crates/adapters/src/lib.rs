// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sd-adapters: worker process I/O and thread sessions

pub mod error;
pub mod session;
pub mod worker;

pub use error::{WorkerError, WorkerExitStatus};
pub use session::{
    continue_session, open, start_session, SessionConfig, SessionPhase, StreamOutcome,
    ThreadSession,
};
pub use worker::{spawn, WorkerCommand, WorkerControl, WorkerHandle, WorkerTimeouts};
#[cfg(any(test, feature = "test-support"))]
pub use worker::{fake_worker, FakeControl, FakeWorkerEnd};
