//! Grades one problem: every test case is run through the sandbox in
//! order, compared through the configured comparator, and folded into a
//! [`ProblemVerdict`].
//!
//! A failing, faulting, or timed-out case never stops the remaining cases
//! from running; a student sees all failures at once, not just the first.

use code_runner::{RunError, RunOutput};
use util::problem::Problem;

use crate::error::MarkerError;
use crate::report::ProblemVerdict;
use crate::traits::comparator::OutputComparator;
use crate::traits::runner::CodeRunner;
use crate::types::{CaseError, ExecutionResult};

/// Grade `problem` against `source`. `None` means the problem was never
/// attempted: every test case is recorded as failed with
/// [`CaseError::MissingSource`] rather than raising.
pub async fn grade_problem(
    runner: &dyn CodeRunner,
    comparator: &dyn OutputComparator,
    problem: &Problem,
    source: Option<&str>,
) -> Result<ProblemVerdict, MarkerError> {
    let Some(source) = source else {
        return Ok(missing_source_verdict(problem));
    };

    tracing::info!(
        problem_id = problem.id,
        cases = problem.test_cases.len(),
        "grading problem"
    );

    let mut results = Vec::with_capacity(problem.test_cases.len());
    for (index, case) in problem.test_cases.iter().enumerate() {
        let run = runner.run(source, &case.input).await?;
        results.push(case_result(
            index,
            &case.input,
            &case.expected_output,
            run,
            comparator,
        ));
    }

    Ok(ProblemVerdict::new(problem.id, results))
}

fn case_result(
    index: usize,
    input: &str,
    expected: &str,
    run: RunOutput,
    comparator: &dyn OutputComparator,
) -> ExecutionResult {
    let error = run.error.map(|e| match e {
        RunError::Timeout => CaseError::Timeout,
        RunError::Fault(msg) => CaseError::Fault(msg),
    });

    // A run that faulted or timed out never passes, even if the output it
    // managed to produce happens to match.
    let passed = error.is_none() && comparator.compare(expected, &run.stdout);

    ExecutionResult {
        test_case_index: index,
        input: input.to_string(),
        expected: expected.to_string(),
        actual: run.stdout,
        passed,
        error,
    }
}

fn missing_source_verdict(problem: &Problem) -> ProblemVerdict {
    let results = problem
        .test_cases
        .iter()
        .enumerate()
        .map(|(index, case)| ExecutionResult {
            test_case_index: index,
            input: case.input.clone(),
            expected: case.expected_output.clone(),
            actual: String::new(),
            passed: false,
            error: Some(CaseError::MissingSource),
        })
        .collect();

    ProblemVerdict::new(problem.id, results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparators::trim_comparator::TrimComparator;
    use crate::test_support::{ScriptedRunner, clean, faulted, problem, timed_out};

    #[tokio::test]
    async fn test_all_cases_pass() {
        let problem = problem(1, &[("An", "An"), ("Minh", "Minh")]);
        let runner = ScriptedRunner::new(vec![clean("An\n"), clean("Minh\n")]);

        let verdict = grade_problem(&runner, &TrimComparator, &problem, Some("print(input())"))
            .await
            .unwrap();

        assert!(verdict.all_passed);
        assert_eq!(verdict.results.len(), 2);
        assert!(verdict.results.iter().all(|r| r.passed && r.error.is_none()));
    }

    #[tokio::test]
    async fn test_grading_continues_past_a_fault() {
        let problem = problem(1, &[("4", "Even"), ("7", "Odd"), ("0", "Even")]);
        let runner = ScriptedRunner::new(vec![
            clean("Even\n"),
            faulted("NameError: name 'n' is not defined"),
            clean("Even\n"),
        ]);

        let verdict = grade_problem(&runner, &TrimComparator, &problem, Some("..."))
            .await
            .unwrap();

        assert!(!verdict.all_passed);
        assert_eq!(verdict.results.len(), 3, "a fault must not abort later cases");
        assert!(verdict.results[0].passed);
        assert!(!verdict.results[1].passed);
        assert_eq!(
            verdict.results[1].error,
            Some(CaseError::Fault("NameError: name 'n' is not defined".to_string()))
        );
        assert!(verdict.results[2].passed);
    }

    #[tokio::test]
    async fn test_timeout_is_recorded_and_grading_continues() {
        let problem = problem(2, &[("", "1"), ("", "2")]);
        let runner = ScriptedRunner::new(vec![timed_out(), clean("2\n")]);

        let verdict = grade_problem(&runner, &TrimComparator, &problem, Some("..."))
            .await
            .unwrap();

        assert!(!verdict.all_passed);
        assert_eq!(verdict.results[0].error, Some(CaseError::Timeout));
        assert!(!verdict.results[0].passed);
        assert!(verdict.results[1].passed);
    }

    #[tokio::test]
    async fn test_matching_output_from_faulted_run_does_not_pass() {
        let problem = problem(3, &[("", "5")]);
        let mut run = clean("5\n");
        run.error = Some(code_runner::RunError::Fault("SystemExit: 1".to_string()));
        let runner = ScriptedRunner::new(vec![run]);

        let verdict = grade_problem(&runner, &TrimComparator, &problem, Some("..."))
            .await
            .unwrap();

        assert!(!verdict.results[0].passed);
    }

    #[tokio::test]
    async fn test_zero_test_cases_never_pass() {
        let problem = problem(4, &[]);
        let runner = ScriptedRunner::new(vec![]);

        let verdict = grade_problem(&runner, &TrimComparator, &problem, Some("print(1)"))
            .await
            .unwrap();

        assert!(verdict.results.is_empty());
        assert!(!verdict.all_passed);
    }

    #[tokio::test]
    async fn test_missing_source_fails_every_case() {
        let problem = problem(5, &[("a", "A"), ("b", "B")]);
        let runner = ScriptedRunner::new(vec![]);

        let verdict = grade_problem(&runner, &TrimComparator, &problem, None)
            .await
            .unwrap();

        assert!(!verdict.all_passed);
        assert_eq!(verdict.results.len(), 2);
        for (index, result) in verdict.results.iter().enumerate() {
            assert_eq!(result.test_case_index, index);
            assert!(!result.passed);
            assert_eq!(result.error, Some(CaseError::MissingSource));
            assert_eq!(result.actual, "");
            assert!(!result.expected.is_empty());
        }
    }

    #[tokio::test]
    async fn test_results_keep_test_case_order() {
        let problem = problem(6, &[("1", "a"), ("2", "b"), ("3", "c")]);
        let runner = ScriptedRunner::new(vec![clean("a"), clean("b"), clean("c")]);

        let verdict = grade_problem(&runner, &TrimComparator, &problem, Some("..."))
            .await
            .unwrap();

        let indices: Vec<usize> = verdict.results.iter().map(|r| r.test_case_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        let inputs: Vec<&str> = verdict.results.iter().map(|r| r.input.as_str()).collect();
        assert_eq!(inputs, vec!["1", "2", "3"]);
    }
}
