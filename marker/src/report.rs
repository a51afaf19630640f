//! Verdict and report types handed back to the caller. The external
//! progress-tracking layer reads `fully_passed` and the solved/total counts
//! to decide unlocking, completion, and point awards; none of that policy
//! lives here.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::types::ExecutionResult;

/// The aggregated outcome for one problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemVerdict {
    pub problem_id: i64,
    /// One entry per test case, in test-case order.
    pub results: Vec<ExecutionResult>,
    /// True iff every test case passed. A problem with no test cases can
    /// never be marked solved.
    pub all_passed: bool,
}

impl ProblemVerdict {
    pub fn new(problem_id: i64, results: Vec<ExecutionResult>) -> Self {
        let all_passed = !results.is_empty() && results.iter().all(|r| r.passed);
        Self {
            problem_id,
            results,
            all_passed,
        }
    }
}

/// The terminal artifact of grading one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReport {
    /// RFC 3339 timestamp of when the report was produced.
    pub generated_at: String,
    /// One verdict per submitted problem, in the order the problems were
    /// given.
    pub verdicts: Vec<ProblemVerdict>,
    pub solved_count: usize,
    pub total_count: usize,
    /// True iff every problem was solved and there was at least one.
    pub fully_passed: bool,
}

/// Assemble the report from per-problem verdicts.
pub fn generate_submission_report(verdicts: Vec<ProblemVerdict>) -> SubmissionReport {
    let total_count = verdicts.len();
    let solved_count = verdicts.iter().filter(|v| v.all_passed).count();
    SubmissionReport {
        generated_at: Utc::now().to_rfc3339(),
        verdicts,
        solved_count,
        total_count,
        fully_passed: total_count > 0 && solved_count == total_count,
    }
}
