use serde::{Deserialize, Serialize};

/// One input/expected-output pair used to validate a submitted program.
///
/// Curriculum data and exam authoring have historically used two names for
/// the expected field (`expected_output` in lesson fixtures, `expected` in
/// AI-converted exams); both deserialize into `expected_output`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(default)]
    pub input: String,

    #[serde(alias = "expected")]
    pub expected_output: String,
}

/// One coding exercise: a prompt, a starter template shown in the editor,
/// and the ordered test cases it is graded against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    #[serde(alias = "question_id")]
    pub id: i64,

    #[serde(default, alias = "question", alias = "description", alias = "title")]
    pub prompt: String,

    #[serde(default)]
    pub starter_code: String,

    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

/// An ordered set of problems belonging to one assignment (a lesson's
/// coding section or an exam's coding section). Read-only to the grading
/// core; authored by curriculum/exam tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProblemSet {
    problems: Vec<Problem>,
}

impl ProblemSet {
    pub fn new(problems: Vec<Problem>) -> Self {
        Self { problems }
    }

    /// Parse an authored problem list, tolerating both historical field
    /// spellings. Errors stay short and free of host detail.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str::<ProblemSet>(json)
            .map_err(|e| format!("Invalid problem JSON: {e}"))
    }

    pub fn get(&self, id: i64) -> Option<&Problem> {
        self.problems.iter().find(|p| p.id == id)
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}
