//! # Runner Trait
//!
//! [`CodeRunner`] abstracts the execution sandbox behind the grader so the
//! grading logic can be exercised against a scripted runner in tests while
//! production uses the subprocess sandbox from `code_runner`.

use std::pin::Pin;

use code_runner::RunOutput;

use crate::error::MarkerError;

/// A strategy for running one submitted source against one stdin stream.
///
/// Per-run failures of the submitted program (faults, timeouts) are data
/// inside [`RunOutput`]; an `Err` means the runner itself could not
/// execute anything and grading cannot proceed.
pub trait CodeRunner: Send + Sync {
    fn run<'a>(
        &'a self,
        source: &'a str,
        stdin_text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<RunOutput, MarkerError>> + Send + 'a>>;
}
