// SPDX-License-Identifier: MIT

//! # fuzzscore
//!
//! Normalized fuzzy string similarity in `[0, 100]`, for approximate
//! matching, deduplication, and ranking:
//! - `ratio` / `partial_ratio` — sequence-alignment primitives
//! - `token_sort_ratio` / `token_set_ratio` (+ partial variants) — token
//!   reordering and vocabulary-overlap heuristics
//! - `qratio` / `wratio` (+ Unicode variants) — preprocessing and the
//!   length-adaptive combiner
//!
//! Scoring is pure and thread-safe; the only process-wide state is which
//! backend implements the primitives, bound once at startup
//! (see [`install_backend`]).
//!
//! ## Example
//!
//! ```rust
//! use fuzzscore::fuzz;
//!
//! let score = fuzz::wratio(Some("vampire survivor"), Some("Vampire Survivors!"), true, true);
//! assert!(score > 80);
//!
//! // missing input degrades to 0 instead of failing
//! assert_eq!(fuzz::ratio(None, Some("anything")), 0);
//! ```

pub mod algorithms;
pub mod backend;
pub mod error;
pub mod fuzz;
pub mod types;
pub mod utils;

// Re-export primary types
pub use backend::{install_backend, RatioBackend, SequenceBackend};
pub use error::{FuzzError, Result};
pub use types::{MatchingBlock, Score};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
