//! # Marker Library
//!
//! Core logic for automatically grading submitted Python programs against
//! their problems' test cases. It runs each submission through the
//! execution sandbox once per test case, compares captured output using a
//! pluggable strategy, and aggregates per-case results into per-problem
//! verdicts and a submission-level report.
//!
//! ## Key Concepts
//! - **SubmissionJob**: the main struct representing one grading run over a
//!   whole assignment (a lesson's or exam's coding problems).
//! - **CodeRunner**: pluggable execution strategy; production uses the
//!   subprocess sandbox, tests use a scripted stand-in.
//! - **Comparators**: pluggable output comparison (trim-tolerant by
//!   default, exact on request).
//! - **Reports**: serializable verdicts the caller persists and scores;
//!   this crate stores nothing and awards nothing.
//!
//! Grading is a pure function of its inputs: problems in, report out, in
//! input order, with every test case of every problem accounted for.

pub mod comparators;
pub mod error;
pub mod grader;
pub mod report;
pub mod runners;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

use std::collections::HashMap;

use util::execution_config::{ExecutionConfig, MarkingScheme};
use util::problem::{Problem, ProblemSet};

use crate::comparators::exact_comparator::ExactComparator;
use crate::comparators::trim_comparator::TrimComparator;
use crate::error::MarkerError;
use crate::report::{SubmissionReport, generate_submission_report};
use crate::runners::subprocess::SubprocessRunner;
use crate::traits::comparator::OutputComparator;
use crate::traits::runner::CodeRunner;
use crate::types::ExecutionResult;

/// One grading run over a set of problems submitted together.
///
/// Problems are graded in the order given; the report's verdicts keep that
/// order. A problem with no entry in `sources` is graded as unattempted
/// (every case failed with a missing-source error), never as an exception.
pub struct SubmissionJob<'a> {
    problems: &'a [Problem],
    sources: &'a HashMap<i64, String>,
    runner: Box<dyn CodeRunner + 'a>,
    comparator: Box<dyn OutputComparator + Send + Sync + 'a>,
}

impl<'a> SubmissionJob<'a> {
    /// Create a job with the production sandbox runner and the comparator
    /// selected by `config.marking.marking_scheme`.
    ///
    /// # Arguments
    /// * `problems` - The assignment's problems, in display order.
    /// * `sources` - Submitted source text keyed by problem id.
    /// * `config` - Execution limits, interpreter, and marking options.
    pub fn new(
        problems: &'a [Problem],
        sources: &'a HashMap<i64, String>,
        config: ExecutionConfig,
    ) -> Self {
        let comparator = comparator_for(config.marking.marking_scheme);
        let runner = Box::new(SubprocessRunner::new(config));
        Self {
            problems,
            sources,
            runner,
            comparator,
        }
    }

    /// Swap the execution strategy for this job.
    pub fn with_runner<R: CodeRunner + 'a>(mut self, runner: R) -> Self {
        self.runner = Box::new(runner);
        self
    }

    /// Swap the output comparison strategy for this job.
    pub fn with_comparator<C: OutputComparator + Send + Sync + 'a>(
        mut self,
        comparator: C,
    ) -> Self {
        self.comparator = Box::new(comparator);
        self
    }

    /// Grade every problem and assemble the submission report.
    ///
    /// Per-case failures (wrong output, fault, timeout, missing source)
    /// are data in the report. An `Err` here means the run itself could
    /// not proceed (sandbox environment failure).
    pub async fn submit(self) -> Result<SubmissionReport, MarkerError> {
        let mut verdicts = Vec::with_capacity(self.problems.len());
        for problem in self.problems {
            let source = self.sources.get(&problem.id).map(String::as_str);
            let verdict = grader::grade_problem(
                self.runner.as_ref(),
                self.comparator.as_ref(),
                problem,
                source,
            )
            .await?;
            verdicts.push(verdict);
        }

        let report = generate_submission_report(verdicts);
        tracing::info!(
            total_count = report.total_count,
            solved_count = report.solved_count,
            fully_passed = report.fully_passed,
            "submission graded"
        );
        Ok(report)
    }
}

/// Grade a single problem for the try-before-you-submit flow.
///
/// Returns the per-case results only; nothing is persisted and repeated
/// calls with identical inputs are independent. A `problem_id` that is not
/// in `problems` is a caller error and is rejected.
pub async fn run_problem(
    problems: &[Problem],
    problem_id: i64,
    source: &str,
    config: ExecutionConfig,
) -> Result<Vec<ExecutionResult>, MarkerError> {
    let problem = problems
        .iter()
        .find(|p| p.id == problem_id)
        .ok_or(MarkerError::UnknownProblem(problem_id))?;

    let comparator = comparator_for(config.marking.marking_scheme);
    let runner = SubprocessRunner::new(config);
    let verdict =
        grader::grade_problem(&runner, comparator.as_ref(), problem, Some(source)).await?;
    Ok(verdict.results)
}

/// Parse authored problem definitions at the boundary, tolerating both
/// historical field spellings.
pub fn load_problems(json: &str) -> Result<ProblemSet, MarkerError> {
    ProblemSet::from_json(json).map_err(MarkerError::InvalidProblemJson)
}

fn comparator_for(scheme: MarkingScheme) -> Box<dyn OutputComparator + Send + Sync> {
    match scheme {
        MarkingScheme::Trim => Box::new(TrimComparator),
        MarkingScheme::Exact => Box::new(ExactComparator),
    }
}
