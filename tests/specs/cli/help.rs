// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn sd_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn sd_help_lists_thread_command() {
    cli().args(&["--help"]).passes().stdout_has("Usage:").stdout_has("thread");
}

#[test]
fn sd_thread_help_shows_flags() {
    cli()
        .args(&["thread", "--help"])
        .passes()
        .stdout_has("--prompt")
        .stdout_has("--output")
        .stdout_has("--previous")
        .stdout_has("--worker-arg");
}

#[test]
fn sd_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn thread_id_requires_previous() {
    cli()
        .args(&["thread", "--prompt", "hi", "--output", "out.json", "--thread-id", "thread_1"])
        .fails()
        .code_eq(2)
        .stderr_has("--previous");
}
