// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The only stream event that carries usable data.
pub const NEXT_EVENT: &str = "next";

/// One line of worker output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ResponseEnvelope {
    pub fn is_next(&self) -> bool {
        self.stream_event.as_deref() == Some(NEXT_EVENT)
    }

    /// Data of a `next` event, if it carries any (JSON `null` counts as none).
    pub fn payload(&self) -> Option<&Value> {
        if !self.is_next() {
            return None;
        }
        self.data.as_ref().filter(|data| !data.is_null())
    }
}
