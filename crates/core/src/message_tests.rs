// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use yare::parameterized;

#[parameterized(
    user = { "user", Role::User },
    assistant = { "assistant", Role::Assistant },
    system = { "system", Role::Other("system".to_string()) },
)]
fn role_from_str(raw: &str, expected: Role) {
    assert_eq!(Role::from(raw), expected);
    assert_eq!(Role::from(raw).to_string(), raw);
}

#[test]
fn unknown_role_round_trips() {
    let raw = json!({"role": "tool", "content": [{"type": "text", "text": "ok"}]});
    let message: ConversationMessage = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(message.role, Role::Other("tool".to_string()));
    assert_eq!(serde_json::to_value(&message).unwrap(), raw);
}

#[test]
fn state_is_kept_when_present() {
    let raw = json!({
        "role": "assistant",
        "content": [],
        "state": {"type": "complete", "stopReason": "end_turn"}
    });
    let message: ConversationMessage = serde_json::from_value(raw.clone()).unwrap();
    let state = message.state.as_ref().unwrap();
    assert_eq!(state.state_type, "complete");
    assert_eq!(serde_json::to_value(&message).unwrap(), raw);
}

#[test]
fn missing_content_decodes_as_empty() {
    let message: ConversationMessage = serde_json::from_value(json!({"role": "user"})).unwrap();
    assert!(message.content.is_empty());
}

#[test]
fn thinking_only_detection() {
    let thinking = ConversationMessage::assistant(vec![ContentBlock::thinking("hmm")]);
    let mixed = ConversationMessage::assistant(vec![
        ContentBlock::thinking("hmm"),
        ContentBlock::text("answer"),
    ]);
    assert!(thinking.is_thinking_only());
    assert!(!mixed.is_thinking_only());
}

#[test]
fn null_content_decodes_as_empty() {
    let message: ConversationMessage =
        serde_json::from_value(json!({"role": "assistant", "content": null})).unwrap();
    assert!(message.content.is_empty());
}
