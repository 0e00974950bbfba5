// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sd thread` - Run one thread turn against a worker

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;

use sd_adapters::{
    continue_session, start_session, SessionConfig, ThreadSession, WorkerCommand, WorkerTimeouts,
};
use sd_core::{transcript, ConversationMessage, SystemClock, ThreadId, ThreadItem};

use crate::env;
use crate::exit_error::ExitError;
use crate::output::{self, OutputFormat, ThreadSummary};

#[derive(Args, Debug, Clone)]
pub struct ThreadArgs {
    /// Prompt sent as the user turn
    #[arg(long, short)]
    pub prompt: String,

    /// File the final messages are saved to
    #[arg(long, short)]
    pub output: PathBuf,

    /// Saved messages to continue from
    #[arg(long)]
    pub previous: Option<PathBuf>,

    /// Thread id to reuse when continuing
    #[arg(long, requires = "previous")]
    pub thread_id: Option<String>,

    /// Streaming budget in seconds [env: SD_TIMEOUT_SECS, default: 60]
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Worker executable [env: SD_WORKER_CMD, default: amp]
    #[arg(long)]
    pub worker_cmd: Option<String>,

    /// Worker argument, repeatable [env: SD_WORKER_ARGS, default: worker]
    #[arg(long = "worker-arg", allow_hyphen_values = true)]
    pub worker_args: Vec<String>,
}

/// Resolve the session settings: flags, then environment, then defaults.
pub fn session_config(args: &ThreadArgs) -> SessionConfig {
    let mut command = WorkerCommand::default();
    if let Some(program) = args.worker_cmd.clone().or_else(env::worker_command) {
        command.program = program;
    }
    if !args.worker_args.is_empty() {
        command.args = args.worker_args.clone();
    } else if let Some(worker_args) = env::worker_args() {
        command.args = worker_args;
    }

    SessionConfig {
        command,
        timeouts: WorkerTimeouts {
            call: env::call_timeout(),
            shutdown_grace: env::shutdown_grace(),
        },
        stream_timeout: args.timeout.map(Duration::from_secs).unwrap_or_else(env::stream_timeout),
        queue_capacity: env::queue_capacity(),
    }
}

/// Keeps the messages of the most recent snapshot seen on the stream.
#[derive(Debug, Default)]
pub struct TranscriptCollector {
    messages: Vec<ConversationMessage>,
    snapshots: usize,
}

impl TranscriptCollector {
    pub fn observe(&mut self, item: &ThreadItem) {
        if let Some(snapshot) = item.as_snapshot() {
            self.messages = snapshot.messages.clone();
            self.snapshots += 1;
        }
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn snapshots(&self) -> usize {
        self.snapshots
    }
}

pub async fn handle(args: ThreadArgs, format: OutputFormat) -> Result<()> {
    let mut stdout = std::io::stdout();
    run(&args, format, &mut stdout).await
}

/// Run the thread, writing items and the summary to `out`.
pub async fn run(args: &ThreadArgs, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    let config = session_config(args);
    let history = match &args.previous {
        Some(path) => Some(
            transcript::load(path).map_err(|e| ExitError::new(1, format!("cannot continue: {e}")))?,
        ),
        None => None,
    };

    let mut session = match &history {
        Some(history) => {
            if format == OutputFormat::Text {
                writeln!(
                    out,
                    "Continuing thread with prompt: {} ({} previous messages)\n",
                    args.prompt,
                    history.len()
                )?;
            }
            let thread_id = args.thread_id.as_deref().map(ThreadId::from_string);
            continue_session(&config, &SystemClock, thread_id, history, &args.prompt).await?
        }
        None => {
            if format == OutputFormat::Text {
                writeln!(out, "Starting new thread with prompt: {}\n", args.prompt)?;
            }
            start_session(&config, &SystemClock, &args.prompt).await?
        }
    };

    let mut collector = TranscriptCollector::default();
    let drained = drain(&mut session, &mut collector, out, format).await;

    if let Err(e) = session.shutdown().await {
        tracing::warn!(thread_id = %session.thread_id(), error = %e, "worker shutdown");
    }
    drained?;

    let outcome = session.outcome().map(|o| o.to_string()).unwrap_or_else(|| "unknown".to_string());
    tracing::info!(
        thread_id = %session.thread_id(),
        %outcome,
        snapshots = collector.snapshots(),
        "thread finished"
    );

    transcript::save(&args.output, collector.messages())?;

    let summary = ThreadSummary {
        thread_id: session.thread_id().to_string(),
        messages: collector.messages().len(),
        outcome,
        complete: session.is_complete(),
        output: args.output.clone(),
    };
    output::write_summary(out, &summary, format)
}

/// Print every streamed item. The worker is shut down by the caller either way.
async fn drain(
    session: &mut ThreadSession,
    collector: &mut TranscriptCollector,
    out: &mut impl Write,
    format: OutputFormat,
) -> Result<()> {
    while let Some(item) = session.next_item().await {
        collector.observe(&item);
        output::write_item(out, &item, format)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "thread_tests.rs"]
mod tests;
