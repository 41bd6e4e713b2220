//! Error types for alphabet validation and identifier generation.

use thiserror::Error;

/// Errors that can occur when building an alphabet or generating an identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The alphabet has no symbols.
    #[error("alphabet must not be empty")]
    EmptyAlphabet,

    /// The alphabet has more symbols than a single random byte can address.
    #[error("alphabet must contain at most {max} symbols, got {actual}")]
    AlphabetTooLarge { max: usize, actual: usize },

    /// The requested identifier length is out of range.
    #[error("length must be between {min} and {max}, got {actual}")]
    InvalidLength { min: i64, max: i64, actual: i64 },

    /// The random source failed to produce bytes.
    #[error("random source unavailable: {0}")]
    EntropyUnavailable(String),
}

impl GenerationError {
    /// Returns true if the failure came from the random source rather than the inputs.
    pub fn is_entropy_failure(&self) -> bool {
        matches!(self, GenerationError::EntropyUnavailable(_))
    }
}
