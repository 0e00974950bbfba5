// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turning worker output lines into typed thread items.
//!
//! The worker sends every payload in the same untyped `data` slot, and one
//! payload can satisfy more than one shape (a state update and a snapshot
//! both may carry `state`). Shapes are therefore tried in a fixed order,
//! each accepted only when its discriminating field is non-empty.

use serde::Deserialize;
use serde_json::Value;

use sd_core::{GenericItem, ThreadItem, ThreadSnapshot, ThreadStateUpdate};

use crate::ResponseEnvelope;

type ShapeValidator = fn(&Value) -> Option<ThreadItem>;

/// Shapes in the order they are tried. Anything left over is generic.
const SHAPE_PRIORITY: [(&str, ShapeValidator); 2] =
    [("state_update", as_state_update), ("snapshot", as_snapshot)];

fn as_state_update(data: &Value) -> Option<ThreadItem> {
    let update = ThreadStateUpdate::deserialize(data).ok()?;
    (!update.state.is_empty()).then_some(ThreadItem::State(update))
}

fn as_snapshot(data: &Value) -> Option<ThreadItem> {
    let snapshot = ThreadSnapshot::deserialize(data).ok()?;
    (!snapshot.id.is_empty()).then_some(ThreadItem::Snapshot(snapshot))
}

/// Classify a `data` payload. Always yields exactly one item.
pub fn classify_data(data: &Value) -> ThreadItem {
    SHAPE_PRIORITY
        .iter()
        .find_map(|(_, validator)| validator(data))
        .unwrap_or_else(|| ThreadItem::Generic(GenericItem::new(data.clone())))
}

/// Classify one raw output line.
///
/// Returns `None` for lines that carry nothing (non-`next` events, absent
/// or null data). An undecodable line becomes a diagnostic generic item.
pub fn classify_line(line: &str) -> Option<ThreadItem> {
    let envelope = match serde_json::from_str::<ResponseEnvelope>(line) {
        Ok(envelope) => envelope,
        Err(e) => {
            return Some(ThreadItem::Generic(GenericItem::diagnostic(format!(
                "Error parsing response: {e}"
            ))))
        }
    };
    envelope.payload().map(classify_data)
}

/// Names of the shapes, in priority order.
pub fn shape_priority() -> impl Iterator<Item = &'static str> {
    SHAPE_PRIORITY.iter().map(|(name, _)| *name)
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
