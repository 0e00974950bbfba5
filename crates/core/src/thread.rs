// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thread views reported by the worker while it streams.

use serde::{Deserialize, Serialize};

use crate::de::null_as_default;
use crate::message::ConversationMessage;

/// Lifecycle state a thread settles into once the worker is serving it.
pub const STATE_ACTIVE: &str = "active";
/// Inference state once generation for the latest turn has stopped.
pub const INFERENCE_IDLE: &str = "idle";

/// Shared completion rule for snapshots and state updates.
pub trait ThreadStatus {
    fn state(&self) -> &str;
    fn inference_state(&self) -> &str;

    /// The thread is active and no inference is in flight.
    fn is_complete(&self) -> bool {
        self.state() == STATE_ACTIVE && self.inference_state() == INFERENCE_IDLE
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChanges {
    #[serde(default, deserialize_with = "null_as_default")]
    pub files: Vec<FileChange>,
}

impl FileChanges {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    #[serde(default, deserialize_with = "null_as_default")]
    pub os: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub web_browser: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(rename = "ref", default, deserialize_with = "null_as_default")]
    pub git_ref: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sha: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub repo_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceTree {
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub repository: Repository,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialEnvironment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub interactive: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub platform: Platform,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub trees: Vec<WorkspaceTree>,
}

/// Environment the worker captured when the thread started.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadEnvironment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub initial: InitialEnvironment,
}

/// Full view of a thread: identity, messages, and status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadSnapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub created: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: Vec<ConversationMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<ThreadEnvironment>,
    #[serde(rename = "v", default, deserialize_with = "null_as_default")]
    pub version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_changes: Option<FileChanges>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inference_state: Option<String>,
}

impl ThreadStatus for ThreadSnapshot {
    fn state(&self) -> &str {
        self.state.as_deref().unwrap_or_default()
    }

    fn inference_state(&self) -> &str {
        self.inference_state.as_deref().unwrap_or_default()
    }
}

/// Lightweight status notification, sent without the message list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadStateUpdate {
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub inference_state: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_changes: FileChanges,
}

impl ThreadStatus for ThreadStateUpdate {
    fn state(&self) -> &str {
        &self.state
    }

    fn inference_state(&self) -> &str {
        &self.inference_state
    }
}

#[cfg(test)]
#[path = "thread_tests.rs"]
mod tests;
