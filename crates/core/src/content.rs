// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Content blocks inside a conversation message.
//!
//! A block is a loosely tagged record: the `type` field selects how the
//! other fields are read, and block types this crate does not know about
//! are carried through untouched, together with any extra fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Known block types, as seen through [`ContentBlock::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Text,
    Thinking,
    ToolUse,
    ToolResult,
    /// Any type string not listed above
    Other,
}

impl ContentKind {
    pub fn from_type(block_type: &str) -> Self {
        match block_type {
            "text" => ContentKind::Text,
            "thinking" => ContentKind::Thinking,
            "tool_use" => ContentKind::ToolUse,
            "tool_result" => ContentKind::ToolResult,
            _ => ContentKind::Other,
        }
    }
}

/// Partially streamed tool input, as the worker reports it mid-generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialJson {
    #[serde(default)]
    pub json: String,
}

/// One typed unit of message content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Map<String, Value>>,
    #[serde(rename = "inputPartialJSON", default, skip_serializing_if = "Option::is_none")]
    pub partial_json: Option<PartialJson>,
    /// Fields not modelled above (`id`, `signature`, tool results, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentBlock {
    fn of_type(block_type: &str) -> Self {
        Self {
            block_type: block_type.to_string(),
            ..Self::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::of_type("text")
        }
    }

    pub fn thinking(thinking: impl Into<String>) -> Self {
        Self {
            thinking: Some(thinking.into()),
            ..Self::of_type("thinking")
        }
    }

    pub fn tool_use(name: impl Into<String>, input: Map<String, Value>) -> Self {
        Self {
            name: Some(name.into()),
            input: Some(input),
            ..Self::of_type("tool_use")
        }
    }

    pub fn kind(&self) -> ContentKind {
        ContentKind::from_type(&self.block_type)
    }

    pub fn is_thinking(&self) -> bool {
        self.kind() == ContentKind::Thinking
    }

    pub fn text_str(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    pub fn thinking_str(&self) -> &str {
        self.thinking.as_deref().unwrap_or_default()
    }

    pub fn name_str(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Tool input as compact JSON, `null` when absent.
    pub fn input_json(&self) -> String {
        match &self.input {
            Some(input) => Value::Object(input.clone()).to_string(),
            None => Value::Null.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "content_tests.rs"]
mod tests;
