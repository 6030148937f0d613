// SPDX-License-Identifier: MIT
// Public scoring surface. Each entry point is an ordered guard pipeline:
// missing-input check, optional preprocessing, validation, then delegation
// to the bound backend. A missing argument scores 0, never fails.

use std::borrow::Cow;

use crate::backend::active;
use crate::types::Score;
use crate::utils;

fn processed(s: &str, force_ascii: bool, full_process: bool) -> Cow<'_, str> {
    if full_process {
        Cow::Owned(utils::full_process(s, force_ascii))
    } else {
        Cow::Borrowed(s)
    }
}

// ===========================================================================
// Basic scoring functions
// ===========================================================================

/// Full-string similarity in `[0, 100]`.
pub fn ratio(s1: Option<&str>, s2: Option<&str>) -> Score {
    let (Some(s1), Some(s2)) = (s1, s2) else {
        return 0;
    };
    active().ratio(s1, s2)
}

/// Similarity of the most similar substring, in `[0, 100]`.
///
/// Aligns the shorter input against windows of the longer one; not
/// guaranteed symmetric.
pub fn partial_ratio(s1: Option<&str>, s2: Option<&str>) -> Score {
    let (Some(s1), Some(s2)) = (s1, s2) else {
        return 0;
    };
    active().partial_ratio(s1, s2)
}

// ===========================================================================
// Advanced scoring functions
// ===========================================================================

/// Similarity with whitespace tokens sorted before comparing, controlling
/// for word order.
pub fn token_sort_ratio(
    s1: Option<&str>,
    s2: Option<&str>,
    force_ascii: bool,
    full_process: bool,
) -> Score {
    let (Some(s1), Some(s2)) = (s1, s2) else {
        return 0;
    };
    let p1 = processed(s1, force_ascii, full_process);
    let p2 = processed(s2, force_ascii, full_process);
    active().token_sort_ratio(&p1, &p2)
}

/// Best-substring similarity with tokens sorted before comparing.
pub fn partial_token_sort_ratio(
    s1: Option<&str>,
    s2: Option<&str>,
    force_ascii: bool,
    full_process: bool,
) -> Score {
    let (Some(s1), Some(s2)) = (s1, s2) else {
        return 0;
    };
    let p1 = processed(s1, force_ascii, full_process);
    let p2 = processed(s2, force_ascii, full_process);
    active().partial_token_sort_ratio(&p1, &p2)
}

/// Similarity over deduplicated token sets, controlling for word order and
/// repeated or extraneous tokens.
pub fn token_set_ratio(
    s1: Option<&str>,
    s2: Option<&str>,
    force_ascii: bool,
    full_process: bool,
) -> Score {
    let (Some(s1), Some(s2)) = (s1, s2) else {
        return 0;
    };
    let p1 = processed(s1, force_ascii, full_process);
    let p2 = processed(s2, force_ascii, full_process);
    active().token_set_ratio(&p1, &p2)
}

/// Best-substring similarity over deduplicated token sets.
pub fn partial_token_set_ratio(
    s1: Option<&str>,
    s2: Option<&str>,
    force_ascii: bool,
    full_process: bool,
) -> Score {
    let (Some(s1), Some(s2)) = (s1, s2) else {
        return 0;
    };
    let p1 = processed(s1, force_ascii, full_process);
    let p2 = processed(s2, force_ascii, full_process);
    active().partial_token_set_ratio(&p1, &p2)
}

// ===========================================================================
// Combination API
// ===========================================================================

/// Quick ratio: preprocess both inputs, score 0 if either comes out empty,
/// otherwise `ratio` of the processed strings.
pub fn qratio(
    s1: Option<&str>,
    s2: Option<&str>,
    force_ascii: bool,
    full_process: bool,
) -> Score {
    let (Some(s1), Some(s2)) = (s1, s2) else {
        return 0;
    };
    let p1 = processed(s1, force_ascii, full_process);
    let p2 = processed(s2, force_ascii, full_process);
    if !utils::validate_string(&p1) || !utils::validate_string(&p2) {
        return 0;
    }
    active().ratio(&p1, &p2)
}

/// `qratio` with ASCII folding disabled (full Unicode retained).
pub fn uqratio(s1: Option<&str>, s2: Option<&str>, full_process: bool) -> Score {
    qratio(s1, s2, false, full_process)
}

/// Weighted ratio: the highest-confidence score among the base ratio and the
/// partial/token heuristics, selected and discounted by input length and
/// content (see [`RatioBackend::wratio`](crate::backend::RatioBackend)).
pub fn wratio(
    s1: Option<&str>,
    s2: Option<&str>,
    force_ascii: bool,
    full_process: bool,
) -> Score {
    let (Some(s1), Some(s2)) = (s1, s2) else {
        return 0;
    };
    let p1 = processed(s1, force_ascii, full_process);
    let p2 = processed(s2, force_ascii, full_process);
    active().wratio(&p1, &p2)
}

/// `wratio` with ASCII folding disabled (full Unicode retained).
pub fn uwratio(s1: Option<&str>, s2: Option<&str>, full_process: bool) -> Score {
    wratio(s1, s2, false, full_process)
}
