// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use sd_core::{test_support, ConversationMessage, GenericItem, ThreadItem};
use serde_json::{json, Value};
use serial_test::serial;
use yare::parameterized;

use super::{write_item, write_summary, OutputFormat, ThreadSummary};

fn text_of(item: &ThreadItem, format: OutputFormat) -> String {
    let mut buf = Vec::new();
    write_item(&mut buf, item, format).unwrap();
    String::from_utf8(buf).unwrap()
}

fn summary(complete: bool) -> ThreadSummary {
    ThreadSummary {
        thread_id: "thread_1700000000".to_string(),
        messages: 2,
        outcome: if complete { "completed" } else { "timed out" }.to_string(),
        complete,
        output: PathBuf::from("out.json"),
    }
}

#[test]
fn text_item_uses_render() {
    let snapshot = test_support::snapshot(
        "T-1",
        "active",
        "idle",
        vec![ConversationMessage::user_text("hi")],
    );
    let item = ThreadItem::Snapshot(snapshot);
    assert_eq!(text_of(&item, OutputFormat::Text), item.render());
}

#[parameterized(
    number = { json!(42), "Unknown: 42\n" },
    string = { json!("x"), "Unknown: \"x\"\n" },
    null = { Value::Null, "Unknown: null\n" },
)]
fn generic_text_item_ends_with_newline(data: Value, expected: &str) {
    let item = ThreadItem::Generic(GenericItem::new(data));
    assert_eq!(text_of(&item, OutputFormat::Text), expected);
}

#[test]
fn json_item_is_one_tagged_line() {
    let item = ThreadItem::Generic(GenericItem::diagnostic("Error parsing response: eof"));
    let out = text_of(&item, OutputFormat::Json);
    assert_eq!(out.lines().count(), 1);
    let parsed: Value = serde_json::from_str(out.trim_end()).unwrap();
    assert_eq!(parsed["kind"], "generic");
    assert_eq!(parsed["data"], "Error parsing response: eof");
}

#[test]
#[serial]
fn text_summary_lists_thread_and_count() {
    std::env::set_var("NO_COLOR", "1");
    let mut buf = Vec::new();
    write_summary(&mut buf, &summary(true), OutputFormat::Text).unwrap();
    let out = String::from_utf8(buf).unwrap();
    std::env::remove_var("NO_COLOR");

    assert_eq!(
        out,
        "\nThread completed!\nThread ID: thread_1700000000\nTotal messages: 2\nMessages saved to out.json\n"
    );
}

#[test]
#[serial]
fn text_summary_reports_incomplete_outcome() {
    std::env::set_var("NO_COLOR", "1");
    let mut buf = Vec::new();
    write_summary(&mut buf, &summary(false), OutputFormat::Text).unwrap();
    let out = String::from_utf8(buf).unwrap();
    std::env::remove_var("NO_COLOR");

    assert!(out.contains("Thread stopped: timed out"));
    assert!(!out.contains("Thread completed!"));
}

#[test]
fn json_summary_nests_fields() {
    let mut buf = Vec::new();
    write_summary(&mut buf, &summary(true), OutputFormat::Json).unwrap();
    let parsed: Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(parsed["summary"]["thread_id"], "thread_1700000000");
    assert_eq!(parsed["summary"]["messages"], 2);
    assert_eq!(parsed["summary"]["complete"], true);
    assert_eq!(parsed["summary"]["output"], "out.json");
}
