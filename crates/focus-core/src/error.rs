//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `FocusError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// The base error type for `focus-core`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FocusError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `focus-core`.
pub type FocusResult<T> = Result<T, FocusError>;
