// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Prior-conversation handling for continued threads.
//!
//! A fresh worker has no memory of an earlier thread, so the saved messages
//! are flattened into text and prepended to the next prompt.

use crate::content::{ContentBlock, ContentKind};
use crate::message::ConversationMessage;

/// Separator placed between serialized messages.
pub const MESSAGE_SEPARATOR: &str = "\n---\n";

/// Drop thinking content from `messages`.
///
/// Thinking blocks are removed from every message; a message left with no
/// blocks (including one that only ever had thinking) is removed entirely.
/// Everything else keeps its relative order.
pub fn filter(messages: &[ConversationMessage]) -> Vec<ConversationMessage> {
    messages
        .iter()
        .filter(|message| !message.is_thinking_only())
        .filter_map(|message| {
            let content: Vec<ContentBlock> =
                message.content.iter().filter(|block| !block.is_thinking()).cloned().collect();
            if content.is_empty() {
                return None;
            }
            Some(ConversationMessage {
                content,
                ..message.clone()
            })
        })
        .collect()
}

/// Render messages as a plain-text transcript.
pub fn serialize(messages: &[ConversationMessage]) -> String {
    messages.iter().map(serialize_message).collect::<Vec<_>>().join(MESSAGE_SEPARATOR)
}

fn serialize_message(message: &ConversationMessage) -> String {
    let blocks: Vec<String> = message.content.iter().map(serialize_block).collect();
    format!("{}: {}", message.role, blocks.join("\n"))
}

fn serialize_block(block: &ContentBlock) -> String {
    match block.kind() {
        ContentKind::Text => block.text_str().to_string(),
        ContentKind::Thinking => format!("(thinking: {})", block.thinking_str()),
        ContentKind::ToolUse => {
            format!("(using tool: {} with input: {})", block.name_str(), block.input_json())
        }
        ContentKind::ToolResult | ContentKind::Other => format!("({} content)", block.block_type),
    }
}

/// Prompt sent to a fresh worker when continuing from saved history.
pub fn combined_prompt(history: &[ConversationMessage], prompt: &str) -> String {
    let history = serialize(&filter(history));
    format!("Previous conversation:\n\n{history}\n\nNew question: {prompt}")
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
