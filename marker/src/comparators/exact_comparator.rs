//! Byte-for-byte comparison, selectable for exercises where whitespace is
//! part of the answer. Not the default; the curriculum's fixtures expect
//! the trim tolerance.

use crate::traits::comparator::OutputComparator;

pub struct ExactComparator;

impl OutputComparator for ExactComparator {
    fn compare(&self, expected: &str, actual: &str) -> bool {
        expected == actual
    }
}
