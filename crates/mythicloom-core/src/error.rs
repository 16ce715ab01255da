//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
///
/// Every variant is raised before any state is touched, so a caller that
/// receives one can assume the engine is exactly as it was before the call.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Caller input broke a domain rule (empty identity, text length, delta).
    #[error("validation error: {0}")]
    Validation(String),

    /// The active day's deadline has already passed.
    #[error("deadline passed: {0}")]
    DeadlinePassed(String),

    /// A vote targeted a submission that is not part of the active day.
    #[error("submission not found: {0}")]
    SubmissionNotFound(Uuid),

    /// An infrastructure error (e.g. a poisoned state lock).
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let id = Uuid::nil();

        assert_eq!(
            DomainError::Validation("voterId is required.".into()).to_string(),
            "validation error: voterId is required."
        );
        assert_eq!(
            DomainError::SubmissionNotFound(id).to_string(),
            format!("submission not found: {id}")
        );
    }
}
