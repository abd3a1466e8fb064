//! Error types for anvil-bundle

use crate::generator::Step;
use thiserror::Error;

/// Result type alias using anvil-bundle's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Bundle generation error types
///
/// Lower-level failures are wrapped here so callers receive exactly one
/// failure signal per generation attempt; partial output is cleaned up
/// before the error propagates.
#[derive(Error, Debug)]
pub enum Error {
    /// Request failed validation; generation was not attempted
    #[error(transparent)]
    Validation(#[from] anvil_core::Error),

    /// Configuration store or role lookup failed
    #[error("Store lookup failed: {0}")]
    Store(#[from] anvil_store::Error),

    /// IO failure during a specific generation step
    #[error("{step} failed: {source}")]
    Step {
        step: Step,
        source: std::io::Error,
    },

    /// IO error outside of the step pipeline
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap an IO error with the step it interrupted
    pub fn step(step: Step, source: std::io::Error) -> Self {
        Self::Step { step, source }
    }
}
