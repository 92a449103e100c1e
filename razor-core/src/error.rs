//! Error types for Razor.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`RazorError`] - Top-level error type for all Razor operations
//! - [`DispatchError`] - Errors while selecting or invoking adapters
//! - [`ValidatorError`] - Errors while building validators

use crate::validator::ScoreVector;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Razor operations.
#[derive(Error, Debug)]
pub enum RazorError {
    /// An error occurred while dispatching a call.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// A validator could not be built.
    #[error("validator error: {0}")]
    Validator(#[from] ValidatorError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors that can occur while dispatching a call to the registered adapters.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No adapter accepts the arguments.
    #[error("no adapter matches the arguments")]
    NotFound,

    /// The most specific score is shared by more than one adapter.
    #[error("{candidates} adapters fit with the same score {score}")]
    AmbiguousMatch {
        /// The score shared by the top-ranked adapters.
        score: ScoreVector,
        /// How many adapters share it.
        candidates: usize,
    },

    /// The selected handler returned an error.
    #[error("handler failed")]
    Handler(#[source] BoxError),
}

impl DispatchError {
    /// Returns `true` for [`DispatchError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, DispatchError::NotFound)
    }

    /// Returns `true` for [`DispatchError::AmbiguousMatch`].
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, DispatchError::AmbiguousMatch { .. })
    }
}

/// Errors raised while building validators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidatorError {
    /// The validator input is malformed (for example an invalid pattern).
    #[error("invalid validator combination: {0}")]
    InvalidCombination(String),
}

// Convenience conversions
impl From<BoxError> for RazorError {
    fn from(err: BoxError) -> Self {
        RazorError::Custom(err)
    }
}

impl From<BoxError> for DispatchError {
    fn from(err: BoxError) -> Self {
        DispatchError::Handler(err)
    }
}
