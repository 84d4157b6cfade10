//! Base error type.
//!
//! Sub-crates define their own error enums; `nh-sim` folds `CoreError`
//! into its own `Config` variant.

use thiserror::Error;

/// Errors raised by `nh-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unrecognised selector or out-of-range value.  Raised before the first
    /// tick runs.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `nh-core`.
pub type CoreResult<T> = Result<T, CoreError>;
