//! Core result types produced while grading one submission. All of these
//! are created fresh per grading run, serialized for the caller, and never
//! persisted by this crate.

use serde::{Deserialize, Serialize};

/// Why a test case failed, when it did not fail on output alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum CaseError {
    /// The program raised or exited abnormally. Carries the sandbox's
    /// one-line diagnostic.
    Fault(String),
    /// The program was killed at the wall-clock deadline.
    Timeout,
    /// No source was submitted for this problem.
    MissingSource,
}

/// The graded outcome of one test case.
///
/// `expected` and `actual` are always concrete strings (possibly empty) so
/// a client can render a diff regardless of how the case ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Position of the test case within its problem, starting at 0.
    pub test_case_index: usize,
    pub input: String,
    pub expected: String,
    pub actual: String,
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<CaseError>,
}
