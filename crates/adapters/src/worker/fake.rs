// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory worker for tests: the handle talks to a [`FakeWorkerEnd`]
//! over duplex pipes instead of a child process.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::io::{AsyncWriteExt, BufReader, DuplexStream};

use sd_wire::Request;

use super::{WorkerControl, WorkerHandle, WorkerTimeouts};
use crate::error::{WorkerError, WorkerExitStatus};

const PIPE_CAPACITY: usize = 64 * 1024;

#[derive(Debug, Default)]
struct FakeProcess {
    exit_code: Option<i32>,
    hang_on_wait: bool,
    waits: usize,
    killed: bool,
}

/// Shared view of the fake process, for configuring and inspecting it.
#[derive(Clone, Debug)]
pub struct FakeControl {
    process: Arc<Mutex<FakeProcess>>,
}

impl FakeControl {
    fn new() -> Self {
        let process = FakeProcess {
            exit_code: Some(0),
            ..FakeProcess::default()
        };
        Self {
            process: Arc::new(Mutex::new(process)),
        }
    }

    /// Exit code reported on wait (`None` means killed by a signal).
    pub fn set_exit_code(&self, code: Option<i32>) {
        self.process.lock().exit_code = code;
    }

    /// Make wait never return, as for a worker that ignores closed input.
    pub fn hang_on_wait(&self) {
        self.process.lock().hang_on_wait = true;
    }

    pub fn waits(&self) -> usize {
        self.process.lock().waits
    }

    pub fn was_killed(&self) -> bool {
        self.process.lock().killed
    }
}

#[async_trait]
impl WorkerControl for FakeControl {
    async fn wait(&mut self) -> Result<WorkerExitStatus, WorkerError> {
        let (hang, code) = {
            let mut process = self.process.lock();
            process.waits += 1;
            (process.hang_on_wait, process.exit_code)
        };
        if hang {
            std::future::pending::<()>().await;
        }
        Ok(WorkerExitStatus { code })
    }

    async fn kill(&mut self) -> Result<(), WorkerError> {
        self.process.lock().killed = true;
        Ok(())
    }

    fn pid(&self) -> Option<u32> {
        None
    }
}

/// The worker's side of the pipes.
pub struct FakeWorkerEnd {
    requests: BufReader<DuplexStream>,
    output: Option<DuplexStream>,
    pub control: FakeControl,
}

impl FakeWorkerEnd {
    /// Next request the handle wrote, or `None` once its input is closed.
    pub async fn next_request(&mut self) -> Option<Request> {
        let line = sd_wire::read_line(&mut self.requests).await.ok()??;
        serde_json::from_str(&line).ok()
    }

    /// Write one line (a newline is appended) to the handle's output.
    pub async fn send(&mut self, line: &str) {
        if let Some(output) = self.output.as_mut() {
            let _ = output.write_all(format!("{line}\n").as_bytes()).await;
            let _ = output.flush().await;
        }
    }

    /// Whether the reading side of the output has been dropped.
    ///
    /// Writes a single space, which never completes a line.
    pub async fn output_dropped(&mut self) -> bool {
        match self.output.as_mut() {
            Some(output) => output.write_all(b" ").await.is_err(),
            None => false,
        }
    }

    /// Close the output stream; the handle sees end-of-stream.
    pub fn close_output(&mut self) {
        self.output = None;
    }
}

/// Create a handle wired to an in-memory worker.
pub fn fake_worker(timeouts: WorkerTimeouts) -> (WorkerHandle, FakeWorkerEnd) {
    let (handle_input, worker_requests) = tokio::io::duplex(PIPE_CAPACITY);
    let (worker_output, handle_output) = tokio::io::duplex(PIPE_CAPACITY);
    let control = FakeControl::new();
    let handle = WorkerHandle::from_parts(
        Box::new(handle_input),
        Box::new(handle_output),
        Box::new(control.clone()),
        timeouts,
    );
    let end = FakeWorkerEnd {
        requests: BufReader::new(worker_requests),
        output: Some(worker_output),
        control,
    };
    (handle, end)
}
