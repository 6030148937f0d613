// SPDX-License-Identifier: MIT
// Core data types shared by the aligner and the scorers.

/// Integer similarity score in `[0, 100]`.
pub type Score = u32;

/// A maximal contiguous run of symbols common to both sequences.
///
/// `a` and `b` are the run's starting offsets in the first and second
/// sequence; `size` is its length. The block list produced by the aligner is
/// position-ordered, non-overlapping, and terminated by a zero-length block
/// at `(len(a), len(b))`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchingBlock {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

impl MatchingBlock {
    pub fn new(a: usize, b: usize, size: usize) -> Self {
        MatchingBlock { a, b, size }
    }
}

/// Decompose a string into the code-point sequence the aligner operates on.
pub(crate) fn to_chars(s: &str) -> Vec<char> {
    s.chars().collect()
}
