// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::FakeClock;
use std::time::Duration;

#[test]
fn generated_id_uses_epoch_seconds() {
    let clock = FakeClock::new(1_717_171_717);
    assert_eq!(ThreadId::generate(&clock), "thread_1717171717");
}

#[test]
fn ids_follow_the_clock() {
    let clock = FakeClock::new(10);
    let first = ThreadId::generate(&clock);
    clock.advance(Duration::from_secs(1));
    let second = ThreadId::generate(&clock);
    assert_ne!(first, second);
}

#[test]
fn serializes_as_plain_string() {
    let id = ThreadId::from("thread_9");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"thread_9\"");
    let back: ThreadId = serde_json::from_str("\"thread_9\"").unwrap();
    assert_eq!(back, id);
    assert_eq!(back.to_string(), "thread_9");
}
