// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Classified stream items and their human-readable rendering.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{self, Write as _};

use crate::content::ContentKind;
use crate::thread::{FileChanges, ThreadSnapshot, ThreadStateUpdate, ThreadStatus};

/// Thinking text longer than this is cut down when rendered.
const THINKING_PREVIEW_CHARS: usize = 60;

/// Payload that matched no known shape, or a decode diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenericItem {
    pub data: Value,
}

impl GenericItem {
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    pub fn diagnostic(message: impl Into<String>) -> Self {
        Self {
            data: Value::String(message.into()),
        }
    }
}

/// One element of a thread's output stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ThreadItem {
    State(ThreadStateUpdate),
    Snapshot(ThreadSnapshot),
    Generic(GenericItem),
}

impl ThreadItem {
    /// Whether this item signals that the worker finished the turn.
    pub fn is_complete(&self) -> bool {
        match self {
            ThreadItem::State(update) => update.is_complete(),
            ThreadItem::Snapshot(snapshot) => snapshot.is_complete(),
            ThreadItem::Generic(_) => false,
        }
    }

    pub fn as_snapshot(&self) -> Option<&ThreadSnapshot> {
        match self {
            ThreadItem::Snapshot(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn render(&self) -> String {
        match self {
            ThreadItem::State(update) => render_state(update),
            ThreadItem::Snapshot(snapshot) => render_snapshot(snapshot),
            ThreadItem::Generic(generic) => render_generic(generic),
        }
    }
}

impl fmt::Display for ThreadItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn render_snapshot(snapshot: &ThreadSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Thread [ID: {}] (v{})", snapshot.id, snapshot.version);
    if let Some(title) = snapshot.title.as_deref().filter(|t| !t.is_empty()) {
        let _ = writeln!(out, "Title: {title}");
    }

    if !snapshot.messages.is_empty() {
        out.push_str("\nMessages:\n");
        for (i, message) in snapshot.messages.iter().enumerate() {
            let _ = write!(out, "  [{}] {}: ", i + 1, message.role);
            if message.content.is_empty() {
                out.push_str("(empty)\n");
                continue;
            }
            for block in &message.content {
                match block.kind() {
                    ContentKind::Text => {
                        if !block.text_str().is_empty() {
                            let _ = writeln!(out, "{}", block.text_str());
                        }
                    }
                    ContentKind::Thinking => {
                        if !block.thinking_str().is_empty() {
                            let _ = writeln!(out, "(thinking: {})", preview(block.thinking_str()));
                        }
                    }
                    ContentKind::ToolUse => {
                        let _ = writeln!(out, "(using tool: {})", block.name_str());
                    }
                    ContentKind::ToolResult | ContentKind::Other => {
                        let _ = writeln!(out, "({} content)", block.block_type);
                    }
                }
            }
        }
    }

    if !snapshot.state().is_empty() || !snapshot.inference_state().is_empty() {
        let _ = writeln!(
            out,
            "\nState: {}, Inference: {}",
            snapshot.state(),
            snapshot.inference_state()
        );
    }

    if let Some(changes) = snapshot.file_changes.as_ref().filter(|c| !c.is_empty()) {
        out.push_str("\nFile Changes:\n");
        push_paths(&mut out, changes, "  ");
    }
    out
}

fn render_state(update: &ThreadStateUpdate) -> String {
    let mut out = String::from("ThreadState:\n");
    let _ = writeln!(out, "  State: {}", update.state);
    let _ = writeln!(out, "  Inference: {}", update.inference_state);
    if update.file_changes.is_empty() {
        out.push_str("  No file changes\n");
    } else {
        out.push_str("  File Changes:\n");
        push_paths(&mut out, &update.file_changes, "    ");
    }
    out
}

fn render_generic(generic: &GenericItem) -> String {
    let pretty = serde_json::to_string_pretty(&generic.data).unwrap_or_default();
    format!("Unknown: {pretty}")
}

fn push_paths(out: &mut String, changes: &FileChanges, indent: &str) {
    for file in &changes.files {
        let _ = writeln!(out, "{indent}- {}", file.path);
    }
}

fn preview(thinking: &str) -> String {
    if thinking.chars().count() <= THINKING_PREVIEW_CHARS {
        return thinking.to_string();
    }
    let head: String = thinking.chars().take(THINKING_PREVIEW_CHARS - 3).collect();
    format!("{head}...")
}

#[cfg(test)]
#[path = "item_tests.rs"]
mod tests;
