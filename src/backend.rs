// SPDX-License-Identifier: MIT
// Scoring backends. The reference implementation lives here; a faster
// drop-in with identical output can be bound in its place, once, at startup.

use std::collections::HashSet;
use std::sync::OnceLock;

use crate::algorithms;
use crate::error::{FuzzError, Result};
use crate::types::{to_chars, Score};
use crate::utils;

/// The primitive scoring operations a backend must provide.
///
/// Inputs are already preprocessed by the public API layer; implementations
/// must satisfy the short-circuit contract (equal inputs score 100, an empty
/// input against a non-empty one scores 0) and return scores in `[0, 100]`.
pub trait RatioBackend: Send + Sync {
    fn ratio(&self, s1: &str, s2: &str) -> Score;
    fn partial_ratio(&self, s1: &str, s2: &str) -> Score;
    fn token_sort_ratio(&self, s1: &str, s2: &str) -> Score;
    fn partial_token_sort_ratio(&self, s1: &str, s2: &str) -> Score;
    fn token_set_ratio(&self, s1: &str, s2: &str) -> Score;
    fn partial_token_set_ratio(&self, s1: &str, s2: &str) -> Score;
    fn wratio(&self, s1: &str, s2: &str) -> Score;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}

static BACKEND: OnceLock<&'static dyn RatioBackend> = OnceLock::new();
static REFERENCE: SequenceBackend = SequenceBackend;

/// Bind a scoring backend for the lifetime of the process.
///
/// Must run before the first scoring call; once any score has been computed
/// the reference backend is bound implicitly and a later install fails with
/// [`FuzzError::BackendInstalled`]. There is no rebinding.
pub fn install_backend(backend: &'static dyn RatioBackend) -> Result<()> {
    BACKEND
        .set(backend)
        .map_err(|_| FuzzError::BackendInstalled(active().name()))?;
    tracing::debug!(backend = backend.name(), "scoring backend bound");
    Ok(())
}

/// The backend scoring calls route through.
pub(crate) fn active() -> &'static dyn RatioBackend {
    *BACKEND.get_or_init(|| &REFERENCE)
}

// ===========================================================================
// Reference backend: Ratcliff-Obershelp alignment scorers
// ===========================================================================

/// The reference backend, built on the matching-block aligner.
pub struct SequenceBackend;

impl RatioBackend for SequenceBackend {
    fn ratio(&self, s1: &str, s2: &str) -> Score {
        ratio_score(s1, s2)
    }

    fn partial_ratio(&self, s1: &str, s2: &str) -> Score {
        partial_ratio_score(s1, s2)
    }

    fn token_sort_ratio(&self, s1: &str, s2: &str) -> Score {
        token_sort(s1, s2, false)
    }

    fn partial_token_sort_ratio(&self, s1: &str, s2: &str) -> Score {
        token_sort(s1, s2, true)
    }

    fn token_set_ratio(&self, s1: &str, s2: &str) -> Score {
        token_set(s1, s2, false)
    }

    fn partial_token_set_ratio(&self, s1: &str, s2: &str) -> Score {
        token_set(s1, s2, true)
    }

    fn wratio(&self, s1: &str, s2: &str) -> Score {
        wratio_score(s1, s2)
    }

    fn name(&self) -> &'static str {
        "sequence"
    }
}

// ---------------------------------------------------------------------------
// ratio / partial_ratio
// ---------------------------------------------------------------------------

// Guard order matters: equivalence before emptiness, so two empty strings
// score 100, not 0.
fn ratio_score(s1: &str, s2: &str) -> Score {
    if s1 == s2 {
        return 100;
    }
    if s1.is_empty() || s2.is_empty() {
        return 0;
    }
    let a = to_chars(s1);
    let b = to_chars(s2);
    utils::intr(100.0 * algorithms::ratio(&a, &b))
}

fn partial_ratio_score(s1: &str, s2: &str) -> Score {
    if s1 == s2 {
        return 100;
    }
    if s1.is_empty() || s2.is_empty() {
        return 0;
    }

    let c1 = to_chars(s1);
    let c2 = to_chars(s2);
    let (shorter, longer) = if c1.len() <= c2.len() { (c1, c2) } else { (c2, c1) };

    // The best partial match aligns the shorter string with a window of the
    // longer one starting where some matching block starts, e.g.
    //   shorter = "abcd", longer = "XXXbcdeEEE", block = (1, 3, 3)
    //   best score == ratio("abcd", "Xbcd")
    let blocks = algorithms::matching_blocks(&shorter, &longer);
    let mut best = 0.0f64;
    for block in blocks {
        let long_start = block.b.saturating_sub(block.a);
        let long_end = (long_start + shorter.len()).min(longer.len());
        let window = &longer[long_start..long_end];

        let r = algorithms::ratio(&shorter, window);
        if r > 0.995 {
            // exact-enough substring match; don't let float residue keep an
            // equal window under 100
            return 100;
        }
        if r > best {
            best = r;
        }
    }
    utils::intr(100.0 * best)
}

// ---------------------------------------------------------------------------
// token_sort / token_set
// ---------------------------------------------------------------------------

fn sort_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn ratio_or_partial(s1: &str, s2: &str, partial: bool) -> Score {
    if partial {
        partial_ratio_score(s1, s2)
    } else {
        ratio_score(s1, s2)
    }
}

fn token_sort(s1: &str, s2: &str, partial: bool) -> Score {
    let sorted1 = sort_tokens(s1);
    let sorted2 = sort_tokens(s2);
    ratio_or_partial(&sorted1, &sorted2, partial)
}

fn joined(sect: &str, diff: &str) -> String {
    format!("{sect} {diff}").trim().to_string()
}

// Isolates shared vocabulary from extraneous tokens: compare the sorted
// intersection against each "intersection + leftovers" string, and the two
// leftover strings against each other, and keep the best.
fn token_set(s1: &str, s2: &str, partial: bool) -> Score {
    if s1 == s2 {
        return 100;
    }
    if !utils::validate_string(s1) || !utils::validate_string(s2) {
        return 0;
    }

    let tokens1: HashSet<&str> = s1.split_whitespace().collect();
    let tokens2: HashSet<&str> = s2.split_whitespace().collect();

    let mut intersection: Vec<&str> = tokens1.intersection(&tokens2).copied().collect();
    let mut diff1to2: Vec<&str> = tokens1.difference(&tokens2).copied().collect();
    let mut diff2to1: Vec<&str> = tokens2.difference(&tokens1).copied().collect();
    intersection.sort_unstable();
    diff1to2.sort_unstable();
    diff2to1.sort_unstable();

    let sorted_sect = intersection.join(" ");
    let combined_1to2 = joined(&sorted_sect, &diff1to2.join(" "));
    let combined_2to1 = joined(&sorted_sect, &diff2to1.join(" "));

    ratio_or_partial(&sorted_sect, &combined_1to2, partial)
        .max(ratio_or_partial(&sorted_sect, &combined_2to1, partial))
        .max(ratio_or_partial(&combined_1to2, &combined_2to1, partial))
}

// ---------------------------------------------------------------------------
// wratio
// ---------------------------------------------------------------------------

// Partial-match scores are inflated (a perfect substring trivially hits 100),
// so they are discounted to keep 100 reserved for true full matches; token
// scores carry a 0.95 discount so a reordering-insensitive comparison never
// beats an exact-order one.
fn wratio_score(s1: &str, s2: &str) -> Score {
    if !utils::validate_string(s1) || !utils::validate_string(s2) {
        return 0;
    }

    let unbase_scale = 0.95;
    let mut partial_scale = 0.90;

    let base = ratio_score(s1, s2) as f64;

    let len1 = s1.chars().count() as f64;
    let len2 = s2.chars().count() as f64;
    let len_ratio = len1.max(len2) / len1.min(len2);

    // comparably sized strings: partial matching only adds noise
    let try_partial = len_ratio >= 1.5;
    if len_ratio > 8.0 {
        partial_scale = 0.6;
    }
    tracing::trace!(len_ratio, try_partial, "wratio heuristic branch");

    if try_partial {
        let partial = partial_ratio_score(s1, s2) as f64 * partial_scale;
        let ptsor = token_sort(s1, s2, true) as f64 * unbase_scale * partial_scale;
        let ptser = token_set(s1, s2, true) as f64 * unbase_scale * partial_scale;
        utils::intr(base.max(partial).max(ptsor).max(ptser))
    } else {
        let tsor = token_sort(s1, s2, false) as f64 * unbase_scale;
        let tser = token_set(s1, s2, false) as f64 * unbase_scale;
        utils::intr(base.max(tsor).max(tser))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_equivalence_precedes_empty_check() {
        assert_eq!(ratio_score("", ""), 100);
        assert_eq!(ratio_score("", "something"), 0);
        assert_eq!(ratio_score("something", ""), 0);
    }

    #[test]
    fn ratio_known_value() {
        // 14 matched chars over 14 + 15 total
        assert_eq!(ratio_score("this is a test", "this is a test!"), 97);
    }

    #[test]
    fn ratio_is_symmetric() {
        let (a, b) = ("new york mets", "new YORK mets");
        assert_eq!(ratio_score(a, b), ratio_score(b, a));
    }

    #[test]
    fn partial_ratio_full_containment_is_100() {
        assert_eq!(partial_ratio_score("this is a test", "this is a test!"), 100);
        assert_eq!(partial_ratio_score("york", "new york mets"), 100);
    }

    #[test]
    fn partial_ratio_uses_best_window() {
        let s = partial_ratio_score("mets", "new york mets vs atlanta braves");
        assert_eq!(s, 100);
        let s = partial_ratio_score("nwe yrok", "new york mets");
        assert!(s < 100);
        assert!(s > 0);
    }

    #[test]
    fn token_sort_ignores_word_order() {
        assert_eq!(
            token_sort("fuzzy wuzzy was a bear", "wuzzy fuzzy was a bear", false),
            100
        );
    }

    #[test]
    fn token_set_ignores_duplicate_tokens() {
        assert_eq!(
            token_set("fuzzy was a bear", "fuzzy fuzzy was a bear", false),
            100
        );
    }

    #[test]
    fn token_set_beats_token_sort_on_duplicates() {
        let s1 = "fuzzy was a bear";
        let s2 = "fuzzy fuzzy was a bear";
        assert!(token_set(s1, s2, false) >= token_sort(s1, s2, false));
    }

    #[test]
    fn token_set_empty_inputs_score_zero() {
        assert_eq!(token_set("", "fuzzy", false), 0);
        assert_eq!(token_set("fuzzy", "", true), 0);
    }

    #[test]
    fn partial_token_set_hits_100_on_any_shared_token() {
        // shared token => sorted intersection is a prefix of both combined
        // strings, so the partial comparison saturates
        assert_eq!(token_set("grizzly bear peach", "bear snow leopard", true), 100);
    }

    #[test]
    fn wratio_validates_inputs() {
        assert_eq!(wratio_score("", "anything"), 0);
        assert_eq!(wratio_score("anything", ""), 0);
    }

    #[test]
    fn wratio_unrelated_strings_score_low() {
        let s = wratio_score("atlanta falcons", "new york jets");
        assert!(s < 50, "got {s}");
    }

    #[test]
    fn wratio_stays_in_bounds() {
        let cases = [
            ("new york mets", "new york mets"),
            ("new york mets", "new YORK mets"),
            ("mets", "new york mets vs atlanta braves"),
            ("a", "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
        ];
        for (s1, s2) in cases {
            let s = wratio_score(s1, s2);
            assert!(s <= 100, "{s1} / {s2} -> {s}");
        }
    }

    #[test]
    fn wratio_partial_branch_engages_on_length_asymmetry() {
        // 4 vs 31 chars: len_ratio > 1.5, containment found by the partial
        // family, discounted below 100
        let s = wratio_score("mets", "new york mets vs atlanta braves");
        assert_eq!(s, 90);
    }

    #[test]
    fn reference_backend_has_a_name() {
        assert_eq!(SequenceBackend.name(), "sequence");
    }
}
