// SPDX-License-Identifier: MIT
// Input normalization: ASCII folding, non-alphanumeric stripping, rounding.

use std::fmt::Display;

use crate::types::Score;

/// Drop every character outside the ASCII range.
pub fn ascii_only(s: &str) -> String {
    s.chars().filter(char::is_ascii).collect()
}

/// Normalize a raw string into comparison-ready form.
///
/// Replaces non-alphanumeric characters with spaces, collapses whitespace
/// runs, trims, and lowercases. With `force_ascii` set, non-ASCII characters
/// are dropped before the rest of the pipeline.
pub fn full_process(s: &str, force_ascii: bool) -> String {
    let folded;
    let s = if force_ascii {
        folded = ascii_only(s);
        folded.as_str()
    } else {
        s
    };

    let cleaned: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Coerce any displayable value to its textual form, then `full_process` it.
///
/// The coercion is deterministic: equal values produce equal strings, so the
/// equivalence short-circuit in the scorers behaves correctly after
/// normalization.
pub fn full_process_value<T: Display + ?Sized>(value: &T, force_ascii: bool) -> String {
    full_process(&value.to_string(), force_ascii)
}

/// A processed string is valid when anything is left to compare.
pub fn validate_string(s: &str) -> bool {
    !s.is_empty()
}

/// Round a fractional score to an integer, ties to even.
///
/// Ties-to-even matches the rounding the reference scores were defined with;
/// naive half-up rounding disagrees at the .5 boundary.
pub fn intr(n: f64) -> Score {
    n.round_ties_even() as Score
}
