// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers: run the `sd` binary and assert on its output.

use std::path::{Path, PathBuf};
use std::process::Output;

pub use similar_asserts::assert_eq;

/// Builder for one `sd` invocation.
pub struct CliBuilder {
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

pub fn cli() -> CliBuilder {
    CliBuilder {
        args: Vec::new(),
        envs: Vec::new(),
    }
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|a| a.to_string()));
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    fn output(self) -> Output {
        let mut cmd = assert_cmd::Command::cargo_bin("sd").unwrap();
        cmd.env_remove("SD_WORKER_CMD")
            .env_remove("SD_WORKER_ARGS")
            .env_remove("SD_TIMEOUT_SECS")
            .env("NO_COLOR", "1")
            .args(&self.args);
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd.output().unwrap()
    }

    /// Run and require exit code 0.
    pub fn passes(self) -> RunAssert {
        let run = RunAssert {
            output: self.output(),
        };
        assert!(
            run.output.status.success(),
            "expected success, got {:?}\nstderr: {}",
            run.output.status,
            run.stderr()
        );
        run
    }

    /// Run and require a non-zero exit.
    pub fn fails(self) -> RunAssert {
        let run = RunAssert {
            output: self.output(),
        };
        assert!(!run.output.status.success(), "expected failure\nstdout: {}", run.stdout());
        run
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(expected), "stdout missing {expected:?}:\n{stdout}");
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(expected), "stderr missing {expected:?}:\n{stderr}");
        self
    }

    pub fn code_eq(self, code: i32) -> Self {
        assert_eq!(self.output.status.code(), Some(code));
        self
    }
}

/// Scratch directory holding worker scripts and transcripts.
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn read_json(&self, name: &str) -> serde_json::Value {
        read_json(&self.path(name))
    }
}

pub fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}
