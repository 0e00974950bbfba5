// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. Stdout is reserved for command output.
pub fn init() {
    let filter = EnvFilter::try_new(crate::env::log_filter())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
