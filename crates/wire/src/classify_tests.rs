// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use sd_core::test_support::{ack_line, next_line, snapshot, snapshot_line, state_line};
use sd_core::ThreadStatus;
use serde_json::json;
use yare::parameterized;

#[test]
fn priority_order_is_state_then_snapshot() {
    assert_eq!(shape_priority().collect::<Vec<_>>(), vec!["state_update", "snapshot"]);
}

#[test]
fn state_and_id_together_classify_as_state_update() {
    let data = json!({"id": "thread_1", "state": "active", "inferenceState": "running"});
    let item = classify_data(&data);
    let ThreadItem::State(update) = &item else {
        panic!("expected state update, got {item:?}");
    };
    assert_eq!(update.state, "active");
}

#[test]
fn id_without_state_is_snapshot() {
    let line = snapshot_line(4, &{
        let mut s = snapshot("thread_2", "", "", vec![]);
        s.state = None;
        s.inference_state = None;
        s
    });
    let item = classify_line(&line).unwrap();
    assert_eq!(item.as_snapshot().map(|s| s.id.as_str()), Some("thread_2"));
}

#[test]
fn snapshot_with_empty_state_string_is_snapshot() {
    let item = classify_data(&json!({"id": "thread_3", "state": "", "v": 5}));
    let snapshot = item.as_snapshot().unwrap();
    assert_eq!(snapshot.version, 5);
    assert!(!snapshot.is_complete());
}

#[parameterized(
    empty_object = { json!({}) },
    unrelated_object = { json!({"type": "title", "title": "x"}) },
    string = { json!("hello") },
    number = { json!(42) },
    array = { json!([1, 2]) },
    wrong_state_type = { json!({"state": {"nested": true}}) },
)]
fn unmatched_payloads_are_generic(data: serde_json::Value) {
    assert_eq!(classify_data(&data), ThreadItem::Generic(GenericItem::new(data.clone())));
}

#[parameterized(
    ack = { ack_line(1) },
    null_data = { r#"{"streamId":1,"streamEvent":"next","data":null}"#.to_string() },
    error_event = { r#"{"streamId":1,"streamEvent":"error","data":{"state":"active"}}"#.to_string() },
    complete_event = { r#"{"streamEvent":"complete"}"#.to_string() },
    no_event = { r#"{"data":{"id":"thread_1"}}"#.to_string() },
)]
fn lines_without_payload_are_skipped(line: String) {
    assert_eq!(classify_line(&line), None);
}

#[test]
fn undecodable_line_is_diagnostic() {
    let item = classify_line("worker starting...").unwrap();
    let ThreadItem::Generic(generic) = &item else {
        panic!("expected generic diagnostic");
    };
    let message = generic.data.as_str().unwrap();
    assert!(message.starts_with("Error parsing response: "), "got: {message}");
}

#[test]
fn completion_is_seen_through_state_lines() {
    assert!(classify_line(&state_line(9, "active", "idle")).unwrap().is_complete());
    assert!(!classify_line(&state_line(9, "active", "running")).unwrap().is_complete());
}

#[test]
fn state_line_with_messages_stays_a_state_update() {
    let line = next_line(
        2,
        json!({"id": "thread_5", "state": "active", "inferenceState": "idle", "messages": []}),
    );
    assert!(matches!(classify_line(&line), Some(ThreadItem::State(_))));
}

#[test]
fn null_file_changes_still_classify_as_complete_state() {
    let line = next_line(
        3,
        json!({"state": "active", "inferenceState": "idle", "fileChanges": null}),
    );
    let item = classify_line(&line).unwrap();
    assert!(matches!(item, ThreadItem::State(_)), "got {item:?}");
    assert!(item.is_complete());
}

#[parameterized(
    null_messages = { json!({"id": "thread_x", "messages": null, "v": 2}) },
    null_version = { json!({"id": "thread_x", "messages": [], "v": null}) },
    null_created = { json!({"id": "thread_x", "created": null}) },
)]
fn null_snapshot_fields_keep_snapshot_shape(data: serde_json::Value) {
    let item = classify_data(&data);
    assert_eq!(item.as_snapshot().map(|s| s.id.as_str()), Some("thread_x"), "got {item:?}");
}
