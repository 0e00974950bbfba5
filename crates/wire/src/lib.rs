// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker RPC protocol.
//!
//! Wire format: one JSON document per line. Requests are
//! `{"streamId", "method", "args"}`; responses are
//! `{"streamId"?, "streamEvent", "data"?}`.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod classify;
mod request;
mod response;
mod wire;

pub use classify::{classify_data, classify_line, shape_priority};
pub use request::{
    handle_thread_delta_args, observe_thread_args, start_thread_worker_args, Method, Request,
};
pub use response::{ResponseEnvelope, NEXT_EVENT};
pub use wire::{decode, encode, read_line, write_line, ProtocolError};
