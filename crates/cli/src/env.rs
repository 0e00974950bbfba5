// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::time::Duration;

/// Worker executable override (`SD_WORKER_CMD`).
pub fn worker_command() -> Option<String> {
    std::env::var("SD_WORKER_CMD").ok().filter(|s| !s.is_empty())
}

/// Whitespace-separated worker arguments (`SD_WORKER_ARGS`).
pub fn worker_args() -> Option<Vec<String>> {
    std::env::var("SD_WORKER_ARGS")
        .ok()
        .map(|s| s.split_whitespace().map(str::to_string).collect())
}

/// Streaming budget (default 60s, `SD_TIMEOUT_SECS`).
pub fn stream_timeout() -> Duration {
    std::env::var("SD_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(Duration::from_secs(60))
}

/// Bound on each handshake response (default 30s, `SD_CALL_TIMEOUT_MS`).
/// Zero disables it.
pub fn call_timeout() -> Option<Duration> {
    let ms = std::env::var("SD_CALL_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(30_000);
    (ms > 0).then(|| Duration::from_millis(ms))
}

/// Time a worker gets to exit after its input closes (default 5s).
pub fn shutdown_grace() -> Duration {
    std::env::var("SD_SHUTDOWN_GRACE_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(5))
}

pub fn queue_capacity() -> usize {
    std::env::var("SD_QUEUE_CAPACITY")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(100)
}

/// Log filter: `SD_LOG` > `RUST_LOG` > `warn`
pub fn log_filter() -> String {
    std::env::var("SD_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "warn".to_string())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
