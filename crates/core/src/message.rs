// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Conversation messages: a role plus an ordered list of content blocks.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::content::ContentBlock;
use crate::de::null_as_default;

/// Author of a message.
///
/// Roles other than `user` and `assistant` are kept verbatim so that saved
/// transcripts round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    User,
    Assistant,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Other(role) => role,
        }
    }
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        match role.as_str() {
            "user" => Role::User,
            "assistant" => Role::Assistant,
            _ => Role::Other(role),
        }
    }
}

impl From<&str> for Role {
    fn from(role: &str) -> Self {
        Role::from(role.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(role) => role,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-message state reported by the worker (e.g. `{"type": "complete"}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageState {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub state_type: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<ContentBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<MessageState>,
}

impl ConversationMessage {
    pub fn new(role: impl Into<Role>, content: Vec<ContentBlock>) -> Self {
        Self {
            role: role.into(),
            content,
            state: None,
        }
    }

    /// A user turn holding a single text block.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self::new(Role::User, vec![ContentBlock::text(text)])
    }

    pub fn assistant(content: Vec<ContentBlock>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// True when every block is a thinking block (vacuously true for none).
    pub fn is_thinking_only(&self) -> bool {
        self.content.iter().all(ContentBlock::is_thinking)
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
