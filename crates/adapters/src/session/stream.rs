// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background consumer of a worker's output stream.
//!
//! The task owns the output reader and the sending half of a bounded queue.
//! It stops on completion, end of stream, a read failure, the caller
//! dropping the queue, or the deadline, and it drops the sender on every
//! path so the receiver always sees the queue close.

use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use sd_core::{GenericItem, ThreadId, ThreadItem};

use crate::worker::WorkerOutput;

/// Why the consumer stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamOutcome {
    /// An item reported the thread active and idle
    Completed,
    /// The worker closed its output
    EndOfStream,
    /// The deadline passed before completion
    TimedOut,
    /// Reading the output failed
    ReadFailed,
    /// The receiving side went away, or the task was cancelled
    Abandoned,
}

impl fmt::Display for StreamOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StreamOutcome::Completed => "completed",
            StreamOutcome::EndOfStream => "end of stream",
            StreamOutcome::TimedOut => "timed out",
            StreamOutcome::ReadFailed => "read failed",
            StreamOutcome::Abandoned => "abandoned",
        })
    }
}

pub(crate) fn spawn_consumer(
    thread_id: ThreadId,
    output: WorkerOutput,
    items: mpsc::Sender<ThreadItem>,
    timeout: Duration,
) -> JoinHandle<StreamOutcome> {
    tokio::spawn(async move {
        let started = Instant::now();
        let (outcome, emitted) = consume(output, items, started + timeout).await;
        tracing::info!(
            %thread_id,
            %outcome,
            emitted,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "thread stream finished"
        );
        outcome
    })
}

/// Every read and every send is bounded by `deadline`, so a silent worker
/// or a stalled receiver cannot hold the task past it.
async fn consume(
    mut output: WorkerOutput,
    items: mpsc::Sender<ThreadItem>,
    deadline: Instant,
) -> (StreamOutcome, usize) {
    let mut emitted = 0;
    loop {
        if Instant::now() >= deadline {
            return (StreamOutcome::TimedOut, emitted);
        }

        let line = match tokio::time::timeout_at(deadline, sd_wire::read_line(&mut output)).await {
            Err(_) => return (StreamOutcome::TimedOut, emitted),
            Ok(Ok(None)) => return (StreamOutcome::EndOfStream, emitted),
            Ok(Ok(Some(line))) => line,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "failed to read worker output");
                let diagnostic = GenericItem::diagnostic(format!("Error reading response: {e}"));
                let send = items.send(ThreadItem::Generic(diagnostic));
                let _ = tokio::time::timeout_at(deadline, send).await;
                return (StreamOutcome::ReadFailed, emitted);
            }
        };

        let Some(item) = sd_wire::classify_line(&line) else {
            tracing::trace!(%line, "skipping line without payload");
            continue;
        };
        let complete = item.is_complete();

        match tokio::time::timeout_at(deadline, items.send(item)).await {
            Err(_) => return (StreamOutcome::TimedOut, emitted),
            Ok(Err(_)) => return (StreamOutcome::Abandoned, emitted),
            Ok(Ok(())) => emitted += 1,
        }
        if complete {
            return (StreamOutcome::Completed, emitted);
        }
    }
}

#[cfg(test)]
#[path = "stream_tests.rs"]
mod tests;
