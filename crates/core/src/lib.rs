// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sd-core: conversation model for the superdev thread runner

pub mod clock;
pub mod content;
mod de;
pub mod delta;
pub mod history;
pub mod id;
pub mod item;
pub mod message;
pub mod thread;
pub mod transcript;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use content::{ContentBlock, ContentKind, PartialJson};
pub use delta::{to_delta, ThreadDelta};
pub use id::ThreadId;
pub use item::{GenericItem, ThreadItem};
pub use message::{ConversationMessage, MessageState, Role};
pub use thread::{FileChange, FileChanges, ThreadSnapshot, ThreadStateUpdate, ThreadStatus};
pub use transcript::TranscriptError;
