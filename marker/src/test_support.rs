//! Shared fixtures for the unit tests in this crate.

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Mutex;

use code_runner::{RunError, RunOutput};
use util::problem::{Problem, TestCase};

use crate::error::MarkerError;
use crate::traits::runner::CodeRunner;

/// Replays a fixed sequence of run outcomes, one per `run` call, so
/// grading logic can be tested without an interpreter.
pub(crate) struct ScriptedRunner {
    outputs: Mutex<VecDeque<RunOutput>>,
}

impl ScriptedRunner {
    pub(crate) fn new(outputs: Vec<RunOutput>) -> Self {
        Self {
            outputs: Mutex::new(outputs.into()),
        }
    }
}

impl CodeRunner for ScriptedRunner {
    fn run<'a>(
        &'a self,
        _source: &'a str,
        _stdin_text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<RunOutput, MarkerError>> + Send + 'a>> {
        Box::pin(async move {
            let next = self.outputs.lock().unwrap().pop_front();
            Ok(next.expect("scripted runner ran out of outputs"))
        })
    }
}

pub(crate) fn clean(stdout: &str) -> RunOutput {
    RunOutput {
        stdout: stdout.to_string(),
        error: None,
        timed_out: false,
    }
}

pub(crate) fn faulted(message: &str) -> RunOutput {
    RunOutput {
        stdout: String::new(),
        error: Some(RunError::Fault(message.to_string())),
        timed_out: false,
    }
}

pub(crate) fn timed_out() -> RunOutput {
    RunOutput {
        stdout: String::new(),
        error: Some(RunError::Timeout),
        timed_out: true,
    }
}

pub(crate) fn problem(id: i64, cases: &[(&str, &str)]) -> Problem {
    Problem {
        id,
        prompt: format!("problem {id}"),
        starter_code: String::new(),
        test_cases: cases
            .iter()
            .map(|(input, expected)| TestCase {
                input: input.to_string(),
                expected_output: expected.to_string(),
            })
            .collect(),
    }
}
