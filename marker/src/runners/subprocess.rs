//! The production runner: the subprocess sandbox from `code_runner`,
//! adapted to the [`CodeRunner`] seam.

use std::pin::Pin;

use code_runner::{PythonSandbox, RunOutput};
use util::execution_config::ExecutionConfig;

use crate::error::MarkerError;
use crate::traits::runner::CodeRunner;

pub struct SubprocessRunner {
    sandbox: PythonSandbox,
}

impl SubprocessRunner {
    pub fn new(config: ExecutionConfig) -> Self {
        Self {
            sandbox: PythonSandbox::new(config),
        }
    }
}

impl CodeRunner for SubprocessRunner {
    fn run<'a>(
        &'a self,
        source: &'a str,
        stdin_text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<RunOutput, MarkerError>> + Send + 'a>> {
        Box::pin(async move {
            self.sandbox
                .run(source, stdin_text)
                .await
                .map_err(|e| MarkerError::Sandbox(e.to_string()))
        })
    }
}
