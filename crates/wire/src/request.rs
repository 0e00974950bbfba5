// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use sd_core::{ThreadDelta, ThreadId};

/// Methods the worker serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Bring up the worker-side state for a thread
    StartThreadWorker,
    /// Apply a delta (e.g. a user turn) to a thread
    HandleThreadDelta,
    /// Subscribe to the thread's output stream
    ObserveThread,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::StartThreadWorker => "startThreadWorker",
            Method::HandleThreadDelta => "handleThreadDelta",
            Method::ObserveThread => "observeThread",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One RPC call, sent as a single line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(rename = "streamId")]
    pub stream_id: u64,
    pub method: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

impl Request {
    pub fn new(stream_id: u64, method: Method, args: Vec<Value>) -> Self {
        Self {
            stream_id,
            method: method.as_str().to_string(),
            args,
        }
    }
}

/// Arguments for `startThreadWorker`.
pub fn start_thread_worker_args(thread_id: &ThreadId) -> Vec<Value> {
    vec![Value::from(thread_id.as_str())]
}

/// Arguments for `handleThreadDelta`.
pub fn handle_thread_delta_args(
    thread_id: &ThreadId,
    delta: &ThreadDelta,
) -> Result<Vec<Value>, serde_json::Error> {
    Ok(vec![Value::from(thread_id.as_str()), serde_json::to_value(delta)?])
}

/// Arguments for `observeThread`.
pub fn observe_thread_args(thread_id: &ThreadId) -> Vec<Value> {
    vec![Value::from(thread_id.as_str())]
}
