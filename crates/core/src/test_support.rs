// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use serde_json::{json, Value};

use crate::message::ConversationMessage;
use crate::thread::ThreadSnapshot;

// ── Proptest strategies ─────────────────────────────────────────────────

pub mod strategies {
    use crate::content::ContentBlock;
    use crate::message::{ConversationMessage, Role};
    use proptest::prelude::*;
    use serde_json::Map;

    pub fn arb_content_block() -> impl Strategy<Value = ContentBlock> {
        prop_oneof![
            "[a-z ]{0,12}".prop_map(ContentBlock::text),
            "[a-z ]{0,12}".prop_map(ContentBlock::thinking),
            "[a-z_]{1,8}".prop_map(|name| ContentBlock::tool_use(name, Map::new())),
        ]
    }

    pub fn arb_message() -> impl Strategy<Value = ConversationMessage> {
        (
            prop_oneof![Just(Role::User), Just(Role::Assistant)],
            prop::collection::vec(arb_content_block(), 0..5),
        )
            .prop_map(|(role, content)| ConversationMessage::new(role, content))
    }
}

// ── Snapshot and wire line factories ────────────────────────────────────

/// Snapshot with the given id and status, plus the supplied messages.
pub fn snapshot(
    id: &str,
    state: &str,
    inference_state: &str,
    messages: Vec<ConversationMessage>,
) -> ThreadSnapshot {
    ThreadSnapshot {
        id: id.to_string(),
        version: 1,
        messages,
        state: Some(state.to_string()),
        inference_state: Some(inference_state.to_string()),
        ..ThreadSnapshot::default()
    }
}

/// A worker output line carrying `data` as a `next` event.
pub fn next_line(stream_id: u64, data: Value) -> String {
    json!({"streamId": stream_id, "streamEvent": "next", "data": data}).to_string()
}

/// A bare `next` acknowledgement, as sent for handshake calls.
pub fn ack_line(stream_id: u64) -> String {
    json!({"streamId": stream_id, "streamEvent": "next"}).to_string()
}

pub fn state_line(stream_id: u64, state: &str, inference_state: &str) -> String {
    next_line(stream_id, json!({"state": state, "inferenceState": inference_state}))
}

pub fn snapshot_line(stream_id: u64, snapshot: &ThreadSnapshot) -> String {
    next_line(stream_id, serde_json::to_value(snapshot).unwrap_or_default())
}
