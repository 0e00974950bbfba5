// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use std::io::IsTerminal;

pub mod codes {
    /// Banners and section headers: steel blue
    pub const BANNER: u8 = 74;
    /// Flags and literals: light grey
    pub const LITERAL: u8 = 250;
    /// Summary labels: medium grey
    pub const LABEL: u8 = 245;
    /// Warnings about the stream outcome: amber
    pub const WARN: u8 = 214;
}

/// Whether stdout output is colorized.
///
/// Priority: `NO_COLOR=1` disables, `COLOR=1` forces, otherwise a TTY check.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Clap help styles using the same palette.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    let fg = |code| Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))));
    Styles::styled()
        .header(fg(codes::BANNER))
        .literal(fg(codes::LITERAL))
        .placeholder(fg(codes::LABEL))
}

fn paint(code: u8, text: &str) -> String {
    if should_colorize() {
        format!("\x1b[38;5;{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

pub fn banner(text: &str) -> String {
    paint(codes::BANNER, text)
}

pub fn label(text: &str) -> String {
    paint(codes::LABEL, text)
}

pub fn warn(text: &str) -> String {
    paint(codes::WARN, text)
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
