// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thread sessions: handshake, then a streamed response.
//!
//! Opening a session runs three calls in order (`startThreadWorker`,
//! `handleThreadDelta` with the user turn, `observeThread`). Each must be
//! answered with a `next` event. After that the worker output belongs to a
//! background consumer and the caller drains classified items from a
//! bounded queue.

mod stream;

use std::fmt;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use sd_core::{history, Clock, ConversationMessage, ThreadDelta, ThreadId, ThreadItem};
use sd_wire::Method;

use crate::error::WorkerError;
use crate::worker::{self, WorkerCommand, WorkerHandle, WorkerTimeouts};

pub use stream::StreamOutcome;

/// Everything needed to run one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub command: WorkerCommand,
    pub timeouts: WorkerTimeouts,
    /// Overall budget for the streaming phase
    pub stream_timeout: Duration,
    pub queue_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            command: WorkerCommand::default(),
            timeouts: WorkerTimeouts::default(),
            stream_timeout: Duration::from_secs(60),
            queue_capacity: 100,
        }
    }
}

/// Where a session is in its setup sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    WorkerStarted,
    MessageInjected,
    Observing,
    Streaming,
    Failed,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionPhase::Idle => "idle",
            SessionPhase::WorkerStarted => "worker_started",
            SessionPhase::MessageInjected => "message_injected",
            SessionPhase::Observing => "observing",
            SessionPhase::Streaming => "streaming",
            SessionPhase::Failed => "failed",
        })
    }
}

/// A thread in its streaming phase.
///
/// Dropping it without [`ThreadSession::shutdown`] aborts the consumer task.
pub struct ThreadSession {
    thread_id: ThreadId,
    worker: WorkerHandle,
    items: Option<mpsc::Receiver<ThreadItem>>,
    consumer: Option<JoinHandle<StreamOutcome>>,
    outcome: Option<StreamOutcome>,
    saw_completion: bool,
    shutdown_grace: Duration,
}

impl ThreadSession {
    pub fn thread_id(&self) -> &ThreadId {
        &self.thread_id
    }

    pub fn phase(&self) -> SessionPhase {
        SessionPhase::Streaming
    }

    /// Next classified item; `None` once the consumer has stopped.
    pub async fn next_item(&mut self) -> Option<ThreadItem> {
        let item = self.items.as_mut()?.recv().await?;
        if item.is_complete() {
            self.saw_completion = true;
        }
        Some(item)
    }

    /// Drain every remaining item.
    pub async fn collect(&mut self) -> Vec<ThreadItem> {
        let mut items = Vec::new();
        while let Some(item) = self.next_item().await {
            items.push(item);
        }
        items
    }

    /// Whether a completion item has been received.
    pub fn is_complete(&self) -> bool {
        self.saw_completion
    }

    /// Consumer outcome, known after [`ThreadSession::shutdown`].
    pub fn outcome(&self) -> Option<StreamOutcome> {
        self.outcome
    }

    /// Stop the consumer, shut the worker down, and join the consumer task.
    ///
    /// Safe to call more than once. The worker's exit result is returned;
    /// the stream outcome is available from [`ThreadSession::outcome`].
    pub async fn shutdown(&mut self) -> Result<(), WorkerError> {
        // Dropping the receiver stops a consumer still sending
        self.items = None;
        let result = self.worker.shutdown().await;

        if let Some(mut consumer) = self.consumer.take() {
            let joined = tokio::time::timeout(self.shutdown_grace, &mut consumer).await;
            let outcome = match joined {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(e)) => {
                    tracing::warn!(
                        thread_id = %self.thread_id,
                        error = %e,
                        "stream consumer failed"
                    );
                    StreamOutcome::Abandoned
                }
                Err(_) => {
                    tracing::warn!(
                        thread_id = %self.thread_id,
                        "stream consumer did not stop, aborting"
                    );
                    consumer.abort();
                    StreamOutcome::Abandoned
                }
            };
            self.outcome = Some(outcome);
        }
        result
    }
}

impl Drop for ThreadSession {
    fn drop(&mut self) {
        if let Some(consumer) = self.consumer.take() {
            consumer.abort();
        }
    }
}

/// Run the handshake on an already spawned worker and start streaming.
///
/// Any failure shuts the worker down before the error is returned.
pub async fn open(
    mut worker: WorkerHandle,
    thread_id: ThreadId,
    prompt: &str,
    config: &SessionConfig,
) -> Result<ThreadSession, WorkerError> {
    if let Err(e) = handshake(&mut worker, &thread_id, prompt).await {
        tracing::warn!(%thread_id, phase = %SessionPhase::Failed, error = %e, "handshake failed");
        if let Err(shutdown_err) = worker.shutdown().await {
            tracing::warn!(
                %thread_id,
                error = %shutdown_err,
                "worker shutdown after failed handshake"
            );
        }
        return Err(e);
    }

    let Some(output) = worker.take_output() else {
        if let Err(shutdown_err) = worker.shutdown().await {
            tracing::warn!(
                %thread_id,
                error = %shutdown_err,
                "worker shutdown after lost output"
            );
        }
        return Err(WorkerError::UnexpectedEof {
            method: Method::ObserveThread,
        });
    };
    let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
    let consumer = stream::spawn_consumer(thread_id.clone(), output, tx, config.stream_timeout);
    tracing::info!(%thread_id, phase = %SessionPhase::Streaming, "thread session streaming");

    Ok(ThreadSession {
        thread_id,
        worker,
        items: Some(rx),
        consumer: Some(consumer),
        outcome: None,
        saw_completion: false,
        shutdown_grace: config.timeouts.shutdown_grace,
    })
}

async fn handshake(
    worker: &mut WorkerHandle,
    thread_id: &ThreadId,
    prompt: &str,
) -> Result<(), WorkerError> {
    let mut phase = SessionPhase::Idle;
    tracing::debug!(%thread_id, %phase, "starting handshake");

    expect_next(worker, Method::StartThreadWorker, sd_wire::start_thread_worker_args(thread_id))
        .await?;
    phase = SessionPhase::WorkerStarted;
    tracing::debug!(%thread_id, %phase, "handshake step done");

    let delta = ThreadDelta::user_text(prompt);
    let args = sd_wire::handle_thread_delta_args(thread_id, &delta).map_err(|e| {
        WorkerError::RequestEncode {
            method: Method::HandleThreadDelta,
            source: sd_wire::ProtocolError::Encode(e),
        }
    })?;
    expect_next(worker, Method::HandleThreadDelta, args).await?;
    phase = SessionPhase::MessageInjected;
    tracing::debug!(%thread_id, %phase, "handshake step done");

    expect_next(worker, Method::ObserveThread, sd_wire::observe_thread_args(thread_id)).await?;
    phase = SessionPhase::Observing;
    tracing::debug!(%thread_id, %phase, "handshake step done");
    Ok(())
}

/// Make a call whose response must decode with a `next` event.
async fn expect_next(
    worker: &mut WorkerHandle,
    method: Method,
    args: Vec<Value>,
) -> Result<(), WorkerError> {
    let response = worker.call(method, args).await?;
    match sd_wire::decode(&response) {
        Ok(envelope) if envelope.is_next() => Ok(()),
        _ => Err(WorkerError::Handshake { method, response }),
    }
}

/// Spawn a worker and open a new thread with a generated id.
pub async fn start_session(
    config: &SessionConfig,
    clock: &impl Clock,
    prompt: &str,
) -> Result<ThreadSession, WorkerError> {
    let thread_id = ThreadId::generate(clock);
    let worker = worker::spawn(&config.command, config.timeouts)?;
    open(worker, thread_id, prompt, config).await
}

/// Spawn a worker and continue from saved history.
///
/// The worker has no memory of the earlier thread, so the filtered history
/// is folded into the prompt. `thread_id` is reused when given; otherwise a
/// fresh one is generated.
pub async fn continue_session(
    config: &SessionConfig,
    clock: &impl Clock,
    thread_id: Option<ThreadId>,
    history: &[ConversationMessage],
    prompt: &str,
) -> Result<ThreadSession, WorkerError> {
    let thread_id = thread_id.unwrap_or_else(|| ThreadId::generate(clock));
    let combined = history::combined_prompt(history, prompt);
    let worker = worker::spawn(&config.command, config.timeouts)?;
    open(worker, thread_id, &combined, config).await
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
