//! # Comparators
//!
//! Interchangeable strategies for comparing a test case's expected output
//! with what the submission actually printed, all implementing the
//! `OutputComparator` trait.
//!
//! - [`trim_comparator`]: equality after stripping leading/trailing
//!   whitespace on both sides. The default, and the tolerance the lesson
//!   fixtures were authored against.
//! - [`exact_comparator`]: byte-for-byte equality, for whitespace-
//!   sensitive exercises.

pub mod exact_comparator;
pub mod trim_comparator;
