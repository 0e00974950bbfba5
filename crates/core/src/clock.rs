// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wall-clock abstraction so time-derived identifiers are testable

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub trait Clock: Clone + Send + Sync {
    /// Seconds since the Unix epoch
    fn epoch_secs(&self) -> u64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn epoch_secs(&self) -> u64 {
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs()
    }
}

/// Fake clock for tests, shared between clones
#[derive(Clone, Debug)]
pub struct FakeClock {
    epoch_secs: Arc<Mutex<u64>>,
}

impl FakeClock {
    pub fn new(epoch_secs: u64) -> Self {
        Self {
            epoch_secs: Arc::new(Mutex::new(epoch_secs)),
        }
    }

    pub fn advance(&self, duration: Duration) {
        *self.epoch_secs.lock() += duration.as_secs();
    }

    pub fn set_epoch_secs(&self, secs: u64) {
        *self.epoch_secs.lock() = secs;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new(1_700_000_000)
    }
}

impl Clock for FakeClock {
    fn epoch_secs(&self) -> u64 {
        *self.epoch_secs.lock()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
