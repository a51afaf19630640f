use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Output comparison strategy applied when grading a test case.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MarkingScheme {
    /// Compare after stripping leading/trailing whitespace on both sides.
    /// A trailing newline either program produces never fails a case.
    Trim,
    /// Compare the captured output byte-for-byte.
    Exact,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExecutionLimits {
    /// Wall-clock budget for one test-case run, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Cap on captured bytes per output stream. Excess output is drained
    /// and discarded so the child never blocks on a full pipe.
    #[serde(default = "default_max_output_bytes")]
    pub max_output_bytes: u64,
}

impl Default for ExecutionLimits {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_output_bytes: default_max_output_bytes(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarkingOptions {
    #[serde(default = "default_marking_scheme")]
    pub marking_scheme: MarkingScheme,
}

impl Default for MarkingOptions {
    fn default() -> Self {
        Self {
            marking_scheme: default_marking_scheme(),
        }
    }
}

/// Which interpreter runs submissions, and how it is invoked.
///
/// The program receives the source file path as its final argument.
/// Deployments that want OS-level confinement beyond a fresh process can
/// point `program` at a wrapper without touching the grading code.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InterpreterOptions {
    #[serde(default = "default_interpreter_program")]
    pub program: String,

    #[serde(default = "default_interpreter_args")]
    pub args: Vec<String>,
}

impl Default for InterpreterOptions {
    fn default() -> Self {
        Self {
            program: default_interpreter_program(),
            args: default_interpreter_args(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExecutionConfig {
    #[serde(default)]
    pub execution: ExecutionLimits,

    #[serde(default)]
    pub marking: MarkingOptions,

    #[serde(default)]
    pub interpreter: InterpreterOptions,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl ExecutionLimits {
    /// Clamp limits into a range the grading host can honor.
    pub fn sanitize(mut self) -> Self {
        self.timeout_secs = self.timeout_secs.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS);
        if self.max_output_bytes < MIN_OUTPUT_BYTES {
            self.max_output_bytes = MIN_OUTPUT_BYTES;
        }
        self
    }
}

impl ExecutionConfig {
    pub fn default_config() -> Self {
        ExecutionConfig {
            execution: ExecutionLimits::default(),
            marking: MarkingOptions::default(),
            interpreter: InterpreterOptions::default(),
        }
    }

    pub fn sanitize(mut self) -> Self {
        self.execution = self.execution.sanitize();
        self
    }

    /// Load an assignment-level config file. Missing fields fall back to
    /// defaults; limits are sanitized before use.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|_| format!("Failed to read config file at {path:?}"))?;

        let cfg: ExecutionConfig = serde_json::from_str(&contents)
            .map_err(|_| "Invalid config JSON format".to_string())?;

        Ok(cfg.sanitize())
    }
}

const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 600;
const MIN_OUTPUT_BYTES: u64 = 4096;

// Default Functions

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_output_bytes() -> u64 {
    1_048_576
}

fn default_marking_scheme() -> MarkingScheme {
    MarkingScheme::Trim
}

fn default_interpreter_program() -> String {
    "python3".to_string()
}

fn default_interpreter_args() -> Vec<String> {
    // -I: isolated mode, ignores PYTHON* env vars and user site-packages.
    vec!["-I".to_string()]
}
