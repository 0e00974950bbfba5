// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sd thread` specs against a scripted worker

use crate::prelude::*;
use crate::prelude::assert_eq;

/// Acknowledges every request, logs it, and after the third one streams a
/// snapshot followed by a completion state.
const WORKER: &str = r#"
n=0
while IFS= read -r line; do
  n=$((n+1))
  printf '%s\n' "$line" >> "$1"
  printf '{"streamId":%d,"streamEvent":"next"}\n' "$n"
  if [ "$n" -eq 3 ]; then
    printf '%s\n' '{"streamId":3,"streamEvent":"next","data":{"id":"T-greet","v":3,"title":"Greeting","messages":[{"role":"user","content":[{"type":"text","text":"hello"}]},{"role":"assistant","content":[{"type":"thinking","thinking":"short"},{"type":"text","text":"hi there"}]}]}}'
    printf '%s\n' 'this is not json'
    printf '%s\n' '{"streamId":3,"streamEvent":"next","data":{"state":"active","inferenceState":"idle","fileChanges":{"files":[{"path":"src/lib.rs"}]}}}'
  fi
done
"#;

fn thread_cmd(project: &Project, extra: &[&str]) -> CliBuilder {
    let script = project.file("worker.sh", WORKER);
    let log = project.path("requests.jsonl");
    let output = project.path("out.json");
    let base = [
        "thread",
        "--prompt",
        "hello",
        "--output",
        output.to_str().unwrap(),
        "--worker-cmd",
        "/bin/sh",
        "--worker-arg",
        script.to_str().unwrap(),
        "--worker-arg",
        log.to_str().unwrap(),
    ];
    cli().args(&base).args(extra)
}

fn requests(project: &Project) -> Vec<serde_json::Value> {
    std::fs::read_to_string(project.path("requests.jsonl"))
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[cfg(unix)]
#[test]
fn new_thread_prints_items_and_saves_transcript() {
    let project = Project::empty();
    thread_cmd(&project, &[])
        .passes()
        .stdout_has("Starting new thread with prompt: hello")
        .stdout_has("Thread [ID: T-greet] (v3)")
        .stdout_has("Title: Greeting")
        .stdout_has("  [2] assistant: (thinking: short)\nhi there")
        .stdout_has("Unknown: \"Error parsing response:")
        .stdout_has("  File Changes:\n    - src/lib.rs")
        .stdout_has("Thread completed!")
        .stdout_has("Total messages: 2");

    let saved = project.read_json("out.json");
    assert_eq!(
        saved,
        serde_json::json!([
            {"role": "user", "content": [{"type": "text", "text": "hello"}]},
            {"role": "assistant", "content": [
                {"type": "thinking", "thinking": "short"},
                {"type": "text", "text": "hi there"}
            ]}
        ])
    );

    let sent = requests(&project);
    let methods: Vec<&str> = sent.iter().map(|r| r["method"].as_str().unwrap()).collect();
    assert_eq!(methods, vec!["startThreadWorker", "handleThreadDelta", "observeThread"]);
    let ids: Vec<u64> = sent.iter().map(|r| r["streamId"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(sent[1]["args"][1]["message"]["content"][0]["text"], "hello");
}

#[cfg(unix)]
#[test]
fn continuation_folds_history_into_prompt() {
    let project = Project::empty();
    let previous = project.file(
        "previous.json",
        r#"[
          {"role":"user","content":[{"type":"text","text":"Hello"}]},
          {"role":"assistant","content":[{"type":"thinking","thinking":"x"}]},
          {"role":"assistant","content":[{"type":"text","text":"Hi"}]}
        ]"#,
    );

    thread_cmd(&project, &["--previous", previous.to_str().unwrap(), "--thread-id", "thread_7"])
        .passes()
        .stdout_has("Continuing thread with prompt: hello (3 previous messages)")
        .stdout_has("Thread ID: thread_7");

    let sent = requests(&project);
    assert_eq!(sent[0]["args"][0], "thread_7");
    assert_eq!(
        sent[1]["args"][1]["message"]["content"][0]["text"],
        "Previous conversation:\n\nuser: Hello\n---\nassistant: Hi\n\nNew question: hello"
    );
}

#[cfg(unix)]
#[test]
fn json_format_emits_one_object_per_line() {
    let project = Project::empty();
    let run = thread_cmd(&project, &["--format", "json"]).passes();
    let lines: Vec<serde_json::Value> =
        run.stdout().lines().map(|line| serde_json::from_str(line).unwrap()).collect();

    let kinds: Vec<&str> = lines[..3].iter().map(|l| l["kind"].as_str().unwrap()).collect();
    assert_eq!(kinds, vec!["snapshot", "generic", "state"]);
    assert_eq!(lines[3]["summary"]["messages"], 2);
    assert_eq!(lines[3]["summary"]["complete"], true);
}

#[test]
fn missing_previous_file_fails() {
    let project = Project::empty();
    let missing = project.path("nope.json");
    thread_cmd(&project, &["--previous", missing.to_str().unwrap()])
        .fails()
        .code_eq(1)
        .stderr_has("cannot continue");
    assert!(!project.path("out.json").exists());
}

#[test]
fn missing_worker_binary_fails() {
    let project = Project::empty();
    let output = project.path("out.json");
    cli()
        .args(&["thread", "--prompt", "hi", "--output", output.to_str().unwrap()])
        .env("SD_WORKER_CMD", "sd-missing-worker")
        .fails()
        .code_eq(1)
        .stderr_has("sd-missing-worker");
    assert!(!output.exists());
}
