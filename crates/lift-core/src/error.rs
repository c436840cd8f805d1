//! Crate-level error type.
//!
//! Sub-crates define their own error enums where they need richer variants
//! (see `lift-engine`) and convert or wrap as appropriate.

use thiserror::Error;

/// The top-level error type for `lift-core`.
#[derive(Debug, Error)]
pub enum LiftError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `lift-*` crates.
pub type LiftResult<T> = Result<T, LiftError>;
