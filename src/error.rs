//! Error types shared by every strategy.

use thiserror::Error;

/// Failure reported by a [`FitnessOracle`](crate::oracle::FitnessOracle).
///
/// The oracle is opaque to the search, so the error only carries a message
/// describing what went wrong on the evaluation side (environment could not
/// be built, simulation aborted, ...).
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct OracleError {
    message: String,
}

impl OracleError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors that abort a search run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// A configuration value was rejected before the run started.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The fitness oracle failed to score a candidate.
    #[error("fitness evaluation failed: {0}")]
    Oracle(#[from] OracleError),

    /// The oracle returned a score that is negative or NaN.
    #[error("fitness oracle returned an invalid score: {0}")]
    InvalidScore(f64),

    /// Two solutions that must share a length do not.
    #[error("solution length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A grid path cannot be expressed as a sequence of actions.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// The background thread for a strategy could not be started.
    #[error("failed to spawn search thread: {0}")]
    Spawn(String),

    /// A strategy thread panicked before producing a result.
    #[error("search thread panicked")]
    Panicked,
}

pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oracle_error_converts() {
        let err: SearchError = OracleError::new("player could not be created").into();
        assert_eq!(
            err.to_string(),
            "fitness evaluation failed: player could not be created"
        );
    }

    #[test]
    fn test_length_mismatch_message() {
        let err = SearchError::LengthMismatch {
            expected: 6,
            actual: 4,
        };
        assert_eq!(
            err.to_string(),
            "solution length mismatch: expected 6, got 4"
        );
    }
}
