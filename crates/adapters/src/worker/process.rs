// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawning a real worker process over piped stdio.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::{Child, Command};

use super::{WorkerControl, WorkerHandle, WorkerTimeouts};
use crate::error::{WorkerError, WorkerExitStatus};

/// Command line that starts a worker in RPC-serving mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl WorkerCommand {
    pub fn new(
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for WorkerCommand {
    fn default() -> Self {
        Self::new("amp", ["worker"])
    }
}

struct ChildControl {
    child: Child,
}

#[async_trait]
impl WorkerControl for ChildControl {
    async fn wait(&mut self) -> Result<WorkerExitStatus, WorkerError> {
        self.child.wait().await.map(WorkerExitStatus::from).map_err(WorkerError::Wait)
    }

    async fn kill(&mut self) -> Result<(), WorkerError> {
        self.child.kill().await.map_err(WorkerError::Wait)
    }

    fn pid(&self) -> Option<u32> {
        self.child.id()
    }
}

/// Launch the worker with stdin/stdout piped; stderr is inherited.
///
/// The child is killed if the handle is dropped without a shutdown.
pub fn spawn(
    command: &WorkerCommand,
    timeouts: WorkerTimeouts,
) -> Result<WorkerHandle, WorkerError> {
    let spawn_error = |source| WorkerError::ProcessSpawn {
        program: command.program.clone(),
        source,
    };

    let mut child = Command::new(&command.program)
        .args(&command.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .map_err(spawn_error)?;

    let stdin = child.stdin.take().ok_or_else(|| spawn_error(missing_pipe("stdin")))?;
    let stdout = child.stdout.take().ok_or_else(|| spawn_error(missing_pipe("stdout")))?;

    tracing::info!(
        program = %command.program,
        args = ?command.args,
        pid = ?child.id(),
        "worker spawned"
    );

    Ok(WorkerHandle::from_parts(
        Box::new(stdin),
        Box::new(stdout),
        Box::new(ChildControl { child }),
        timeouts,
    ))
}

fn missing_pipe(name: &str) -> std::io::Error {
    std::io::Error::other(format!("worker {name} was not captured"))
}
