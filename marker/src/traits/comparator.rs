/// OutputComparator is a strategy trait for deciding whether the output a
/// submission produced satisfies a test case's expected output.
///
/// Implementations must be pure: same inputs, same answer, no side
/// effects. The grader calls `compare` once per test case.
pub trait OutputComparator: Send + Sync {
    fn compare(&self, expected: &str, actual: &str) -> bool;
}
