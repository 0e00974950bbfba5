// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thread identifiers

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::borrow::Borrow;
use std::fmt;

use crate::clock::Clock;

/// Identifier of a worker thread.
///
/// Generated ids are `thread_{unix_seconds}`; two sessions started within
/// the same second get the same id, and nothing here detects that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadId(SmolStr);

impl ThreadId {
    pub const PREFIX: &'static str = "thread_";

    pub fn generate(clock: &impl Clock) -> Self {
        Self(smol_str::format_smolstr!("{}{}", Self::PREFIX, clock.epoch_secs()))
    }

    pub fn from_string(id: impl Into<SmolStr>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ThreadId {
    fn from(s: &str) -> Self {
        Self(SmolStr::new(s))
    }
}

impl From<String> for ThreadId {
    fn from(s: String) -> Self {
        Self(SmolStr::from(s))
    }
}

impl Borrow<str> for ThreadId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ThreadId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ThreadId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
