//! Executes one untrusted submission at a time in a throwaway interpreter
//! subprocess: fresh process, private scratch directory, stdin fed
//! explicitly, stdout/stderr captured with a byte cap, and a hard
//! wall-clock deadline enforced by killing the child.
//!
//! Nothing survives between runs. Each call owns its scratch directory and
//! its child process; both are gone by the time the call returns, whether
//! the run completed, faulted, or was killed at the deadline. That makes
//! `run` safe to call concurrently from many grading workers.

use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tokio::time::timeout;
use util::execution_config::ExecutionConfig;
use uuid::Uuid;

/// The outcome of running one submission against one input stream.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Everything the program wrote to stdout, capped at
    /// `max_output_bytes`. Partial output is kept on fault and timeout.
    pub stdout: String,
    /// `None` on clean exit within the deadline.
    pub error: Option<RunError>,
    /// True when the run was killed at the wall-clock deadline.
    pub timed_out: bool,
}

/// How a run failed, when it did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The program did not finish within the configured deadline.
    Timeout,
    /// The program raised or exited abnormally. Carries a one-line
    /// diagnostic (the interpreter's final stderr line), never a full
    /// traceback.
    Fault(String),
}

/// Host-side failures: the sandbox itself could not run, as opposed to the
/// submitted program failing. These indicate server misconfiguration and
/// must not be recorded as a student's fault.
#[derive(Debug)]
pub enum SandboxError {
    /// Could not prepare the scratch directory or write the source file.
    Scratch(String),
    /// Could not launch the configured interpreter.
    Spawn(String),
    /// I/O failure talking to the child process.
    Io(String),
}

impl std::fmt::Display for SandboxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SandboxError::Scratch(msg) => write!(f, "scratch setup failed: {msg}"),
            SandboxError::Spawn(msg) => write!(f, "interpreter launch failed: {msg}"),
            SandboxError::Io(msg) => write!(f, "sandbox I/O failed: {msg}"),
        }
    }
}

impl std::error::Error for SandboxError {}

/// Runs Python submissions, one isolated subprocess per call.
#[derive(Debug, Clone)]
pub struct PythonSandbox {
    config: ExecutionConfig,
}

impl PythonSandbox {
    pub fn new(config: ExecutionConfig) -> Self {
        Self {
            config: config.sanitize(),
        }
    }

    /// Execute `source` once, feeding `stdin_text` as the program's entire
    /// standard input.
    ///
    /// The scratch directory is removed when its guard drops, on every exit
    /// path. The child is killed if it outlives the deadline; partial
    /// output captured up to that point is returned.
    pub async fn run(&self, source: &str, stdin_text: &str) -> Result<RunOutput, SandboxError> {
        let run_id = Uuid::new_v4();
        let started = Instant::now();

        let scratch = tempfile::Builder::new()
            .prefix("code-run-")
            .tempdir()
            .map_err(|e| SandboxError::Scratch(format!("failed to create scratch dir: {e}")))?;

        let source_path = scratch.path().join("main.py");
        tokio::fs::write(&source_path, source)
            .await
            .map_err(|e| SandboxError::Scratch(format!("failed to write source file: {e}")))?;

        let mut child = Command::new(&self.config.interpreter.program)
            .args(&self.config.interpreter.args)
            .arg(&source_path)
            .current_dir(scratch.path())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                SandboxError::Spawn(format!(
                    "failed to launch {}: {e}",
                    self.config.interpreter.program
                ))
            })?;

        // Feed stdin from a detached task: the child may exit (or be
        // killed) without reading it, which surfaces here as EPIPE.
        if let Some(mut stdin) = child.stdin.take() {
            let bytes = stdin_text.as_bytes().to_vec();
            tokio::spawn(async move {
                let _ = stdin.write_all(&bytes).await;
                let _ = stdin.shutdown().await;
            });
        }

        // Drain both streams concurrently so the child cannot block on a
        // full pipe regardless of how much it writes.
        let cap = self.config.execution.max_output_bytes as usize;
        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();
        let stdout_task = tokio::spawn(drain_capped(stdout_pipe, cap));
        let stderr_task = tokio::spawn(drain_capped(stderr_pipe, cap));

        let deadline = Duration::from_secs(self.config.execution.timeout_secs);
        let status = match timeout(deadline, child.wait()).await {
            Ok(waited) => Some(
                waited.map_err(|e| SandboxError::Io(format!("failed waiting for child: {e}")))?,
            ),
            Err(_) => {
                tracing::warn!(
                    run_id = %run_id,
                    timeout_secs = self.config.execution.timeout_secs,
                    "run exceeded deadline, killing interpreter"
                );
                if let Err(e) = child.kill().await {
                    tracing::warn!(run_id = %run_id, "failed to kill timed-out child: {e}");
                }
                None
            }
        };

        // Pipes close once the child is gone, so both drains finish.
        let stdout = stdout_task.await.unwrap_or_default();
        let stderr = stderr_task.await.unwrap_or_default();

        let (timed_out, error) = match status {
            None => (true, Some(RunError::Timeout)),
            Some(status) if status.success() => (false, None),
            Some(status) => (
                false,
                Some(RunError::Fault(fault_message(&stderr, status.code()))),
            ),
        };

        tracing::info!(
            run_id = %run_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            timed_out,
            faulted = matches!(error, Some(RunError::Fault(_))),
            "sandbox run finished"
        );

        Ok(RunOutput {
            stdout,
            error,
            timed_out,
        })
    }
}

/// Read a stream to completion, keeping at most `cap` bytes. Reading past
/// the cap continues (and discards) so the writer never stalls on a full
/// pipe buffer.
async fn drain_capped<R>(reader: Option<R>, cap: usize) -> String
where
    R: tokio::io::AsyncRead + Unpin,
{
    let Some(mut reader) = reader else {
        return String::new();
    };

    let mut kept: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 8192];
    loop {
        match reader.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                if kept.len() < cap {
                    let take = n.min(cap - kept.len());
                    kept.extend_from_slice(&chunk[..take]);
                }
            }
        }
    }

    String::from_utf8_lossy(&kept).into_owned()
}

/// Reduce interpreter stderr to a one-line diagnostic. Python ends a
/// traceback with a single `ErrorType: message` line; that line alone is
/// safe to show a student, the frames above it are not.
fn fault_message(stderr: &str, exit_code: Option<i32>) -> String {
    if let Some(line) = stderr.lines().rev().find(|l| !l.trim().is_empty()) {
        return line.trim().to_string();
    }
    match exit_code {
        Some(code) => format!("process exited with status {code}"),
        None => "process terminated by signal".to_string(),
    }
}
