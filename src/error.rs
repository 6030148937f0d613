// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors surfaced by the library.
///
/// Scoring itself never fails: every documented input shape has a defined
/// score. The only fallible operation is backend installation.
#[derive(Error, Debug)]
pub enum FuzzError {
    /// A scoring backend is already bound for this process.
    #[error("scoring backend already bound to '{0}'")]
    BackendInstalled(&'static str),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, FuzzError>;
