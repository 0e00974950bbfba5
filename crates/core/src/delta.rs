// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thread deltas: atomic updates pushed into a worker's thread.
//!
//! Only a few variants are ever sent by this crate (`user:message`,
//! `title`, `environment`); the rest exist so that deltas echoed back by the
//! worker decode into something typed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::content::ContentBlock;
use crate::message::{ConversationMessage, Role};

/// Message payload carried by `user:message` and `assistant:message`.
///
/// Content blocks are plain maps on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeltaMessage {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub role: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolInputValue {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolRun {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

/// Raw model stream event relayed by the worker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamEvent {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaEnvironment {
    #[serde(default)]
    pub interactive: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub platform: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaEnvironmentEnvelope {
    pub initial: DeltaEnvironment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ThreadDelta {
    #[serde(rename = "user:message")]
    UserMessage {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<u32>,
        message: DeltaMessage,
    },
    #[serde(rename = "user:tool-input")]
    UserToolInput {
        #[serde(rename = "toolUse")]
        tool_use: String,
        value: ToolInputValue,
    },
    #[serde(rename = "tool:data")]
    ToolData {
        #[serde(rename = "toolUse")]
        tool_use: String,
        data: ToolRun,
    },
    #[serde(rename = "assistant:message")]
    AssistantMessage {
        #[serde(rename = "assistantMessage")]
        message: DeltaMessage,
    },
    #[serde(rename = "assistant:message-delta")]
    AssistantMessageDelta { event: StreamEvent },
    #[serde(rename = "inference:completed")]
    InferenceCompleted {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        usage: Option<Usage>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        params: Option<Value>,
    },
    #[serde(rename = "cancelled")]
    Cancelled,
    #[serde(rename = "title")]
    Title { title: String },
    #[serde(rename = "environment")]
    Environment { env: DeltaEnvironmentEnvelope },
    #[serde(rename = "summary:created")]
    SummaryCreated {
        #[serde(rename = "summaryThreadID")]
        summary_thread_id: String,
    },
}

impl ThreadDelta {
    /// A `user:message` delta carrying `text` as its only block.
    pub fn user_text(text: &str) -> Self {
        let mut block = Map::new();
        block.insert("type".into(), Value::from("text"));
        block.insert("text".into(), Value::from(text));
        ThreadDelta::UserMessage {
            index: None,
            message: DeltaMessage {
                role: String::new(),
                content: vec![block],
            },
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        ThreadDelta::Title {
            title: title.into(),
        }
    }

    pub fn environment(interactive: bool, platform: impl Into<String>) -> Self {
        ThreadDelta::Environment {
            env: DeltaEnvironmentEnvelope {
                initial: DeltaEnvironment {
                    interactive,
                    platform: platform.into(),
                },
            },
        }
    }

    /// Wire tag of this delta (`user:message`, `title`, ...).
    pub fn delta_type(&self) -> &'static str {
        match self {
            ThreadDelta::UserMessage { .. } => "user:message",
            ThreadDelta::UserToolInput { .. } => "user:tool-input",
            ThreadDelta::ToolData { .. } => "tool:data",
            ThreadDelta::AssistantMessage { .. } => "assistant:message",
            ThreadDelta::AssistantMessageDelta { .. } => "assistant:message-delta",
            ThreadDelta::InferenceCompleted { .. } => "inference:completed",
            ThreadDelta::Cancelled => "cancelled",
            ThreadDelta::Title { .. } => "title",
            ThreadDelta::Environment { .. } => "environment",
            ThreadDelta::SummaryCreated { .. } => "summary:created",
        }
    }
}

/// Project a stored message into the delta that would replay it.
///
/// Assistant messages become `assistant:message`; every other role,
/// including unrecognized ones, is replayed as `user:message`.
pub fn to_delta(message: &ConversationMessage) -> ThreadDelta {
    let delta_message = DeltaMessage {
        role: message.role.as_str().to_string(),
        content: message.content.iter().map(project_block).collect(),
    };
    match message.role {
        Role::Assistant => ThreadDelta::AssistantMessage {
            message: delta_message,
        },
        Role::User | Role::Other(_) => {
            ThreadDelta::UserMessage {
                index: None,
                message: delta_message,
            }
        }
    }
}

/// `type` plus each non-empty field among text, thinking, name, input and
/// partial input.
fn project_block(block: &ContentBlock) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("type".into(), Value::from(block.block_type.as_str()));
    if let Some(text) = block.text.as_deref().filter(|s| !s.is_empty()) {
        map.insert("text".into(), Value::from(text));
    }
    if let Some(thinking) = block.thinking.as_deref().filter(|s| !s.is_empty()) {
        map.insert("thinking".into(), Value::from(thinking));
    }
    if let Some(name) = block.name.as_deref().filter(|s| !s.is_empty()) {
        map.insert("name".into(), Value::from(name));
    }
    if let Some(input) = &block.input {
        map.insert("input".into(), Value::Object(input.clone()));
    }
    if let Some(partial) = block.partial_json.as_ref().filter(|p| !p.json.is_empty()) {
        let mut partial_map = Map::new();
        partial_map.insert("json".into(), Value::from(partial.json.as_str()));
        map.insert("inputPartialJSON".into(), Value::Object(partial_map));
    }
    map
}

#[cfg(test)]
#[path = "delta_tests.rs"]
mod tests;
