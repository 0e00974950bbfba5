// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;

use sd_core::ThreadItem;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print one stream item: its rendering in text mode, one JSON line otherwise.
pub fn write_item(
    out: &mut impl Write,
    item: &ThreadItem,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            let rendered = item.render();
            out.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                out.write_all(b"\n")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, item)?;
            out.write_all(b"\n")?;
        }
    }
    Ok(())
}

/// End-of-run report for `sd thread`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadSummary {
    pub thread_id: String,
    pub messages: usize,
    pub outcome: String,
    pub complete: bool,
    pub output: PathBuf,
}

pub fn write_summary(
    out: &mut impl Write,
    summary: &ThreadSummary,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out)?;
            if summary.complete {
                writeln!(out, "{}", crate::color::banner("Thread completed!"))?;
            } else {
                let line = format!("Thread stopped: {}", summary.outcome);
                writeln!(out, "{}", crate::color::warn(&line))?;
            }
            writeln!(out, "{} {}", crate::color::label("Thread ID:"), summary.thread_id)?;
            writeln!(out, "{} {}", crate::color::label("Total messages:"), summary.messages)?;
            writeln!(
                out,
                "{} {}",
                crate::color::label("Messages saved to"),
                summary.output.display()
            )?;
        }
        OutputFormat::Json => {
            let obj = serde_json::json!({ "summary": summary });
            writeln!(out, "{}", serde_json::to_string(&obj)?)?;
        }
    }
    Ok(())
}
