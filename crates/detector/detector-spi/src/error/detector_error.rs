//! Detector error types.

use thiserror::Error;

/// Errors raised by a detector.
///
/// All of them are validation failures: a detector either returns a full
/// report or one of these, never a partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DetectorError {
    #[error("Empty series: at least one sample is required")]
    EmptySeries,

    #[error("Invalid input at index {index}: {reason}")]
    InvalidInput { index: usize, reason: String },

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl DetectorError {
    pub fn invalid_input(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            index,
            reason: reason.into(),
        }
    }

    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for detector operations.
pub type Result<T> = std::result::Result<T, DetectorError>;
