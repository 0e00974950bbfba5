// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::content::ContentBlock;
use serde_json::{json, Map};

fn conversation() -> Vec<ConversationMessage> {
    let mut input = Map::new();
    input.insert("path".into(), json!("Cargo.toml"));
    vec![
        ConversationMessage::user_text("what crates do we use?"),
        ConversationMessage::assistant(vec![
            ContentBlock::thinking("look at the manifest"),
            ContentBlock::tool_use("read_file", input),
            serde_json::from_value(json!({"type": "redacted_thinking", "data": "opaque"})).unwrap(),
        ]),
    ]
}

#[test]
fn save_then_load_is_field_for_field_equal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("messages.json");
    save(&path, &conversation()).unwrap();
    assert_eq!(load(&path).unwrap(), conversation());
}

#[test]
fn saved_file_is_indented_array() {
    let json = to_json(&[ConversationMessage::user_text("hi")]).unwrap();
    assert!(json.starts_with("[\n  {\n    \"role\": \"user\""), "got: {json}");
}

#[test]
fn empty_transcript_round_trips() {
    let json = to_json(&[]).unwrap();
    assert_eq!(json, "[]");
    assert!(from_json(&json).unwrap().is_empty());
}

#[test]
fn load_missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, TranscriptError::Read { .. }), "got: {err}");
}

#[test]
fn load_garbage_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{not json").unwrap();
    let err = load(&path).unwrap_err();
    assert!(matches!(err, TranscriptError::Parse { .. }), "got: {err}");
    assert!(err.to_string().contains("bad.json"));
}
