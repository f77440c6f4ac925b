//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Research depth must be at least 1")]
    InvalidDepth,

    #[error("No adapters selected for research")]
    NoAdapters,

    #[error("Unknown adapter: {0}")]
    UnknownAdapter(String),

    #[error("Invalid research request: {0}")]
    InvalidRequest(String),

    #[error("Invalid score weights: {0}")]
    InvalidWeights(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_error_display() {
        let error = DomainError::Cancelled;
        assert_eq!(error.to_string(), "Operation cancelled");
    }

    #[test]
    fn test_is_cancelled_check() {
        assert!(DomainError::Cancelled.is_cancelled());
        assert!(!DomainError::NoAdapters.is_cancelled());
        assert!(!DomainError::UnknownAdapter("x".to_string()).is_cancelled());
    }
}
