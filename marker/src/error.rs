//! Marker Error Types
//!
//! [`MarkerError`] covers the structural failures that may surface to the
//! caller of a grading run. Failures of the *submitted program* (faults,
//! timeouts, missing sources) are not errors; they are recorded per test
//! case in [`crate::types::ExecutionResult`] and grading continues.

use std::fmt;

/// Structural errors a grading run can surface to its caller.
#[derive(Debug)]
pub enum MarkerError {
    /// The caller referenced a problem id that is not in the problem set.
    /// Indicates a data-integrity mismatch between the UI and the stored
    /// assignment; never silently ignored.
    UnknownProblem(i64),
    /// Problem definitions could not be parsed from JSON.
    InvalidProblemJson(String),
    /// The sandbox failed for host-side reasons (scratch dir, interpreter
    /// spawn). Server misconfiguration, not a student's fault.
    Sandbox(String),
}

impl fmt::Display for MarkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerError::UnknownProblem(id) => write!(f, "unknown problem id {id}"),
            MarkerError::InvalidProblemJson(msg) => write!(f, "{msg}"),
            MarkerError::Sandbox(msg) => write!(f, "sandbox failure: {msg}"),
        }
    }
}

impl std::error::Error for MarkerError {}
