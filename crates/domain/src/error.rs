//! Unified error types for the domain layer
//!
//! `DomainError` covers construction and decoding failures. `CompletionError`
//! is the taxonomy of a quest completion attempt; its variants are expected
//! outcomes of normal play, not bugs.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid ID format
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Stored state breaks an aggregate invariant
    #[error("Invariant violated: {0}")]
    Invariant(String),
}

impl DomainError {
    /// Creates a validation error for rejected input.
    ///
    /// # Example
    /// ```ignore
    /// if template.quests.is_empty() {
    ///     return Err(DomainError::validation("Adventure must contain at least one quest"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid ID error
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an invariant violation error (used when decoding persisted aggregates)
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }
}

/// Why a quest completion attempt was rejected.
///
/// A rejected attempt never changes the story.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// The story has no remaining quests. Callers should not offer the action.
    #[error("Adventure is already complete")]
    AlreadyComplete,

    /// A photo quest was submitted without a photo.
    #[error("A photo is required to complete this quest")]
    MissingEvidence,

    /// A puzzle quest was submitted with a non-matching answer.
    #[error("That answer is not correct")]
    IncorrectAnswer,

    /// The caller completed against a quest index that is no longer current.
    #[error("Quest {expected} is no longer active (current quest is {actual})")]
    StaleProgress { expected: usize, actual: usize },
}

impl CompletionError {
    /// True for failures the player can fix by submitting again.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MissingEvidence | Self::IncorrectAnswer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("title cannot be empty");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: title cannot be empty");
    }

    #[test]
    fn test_not_found_error() {
        let err = DomainError::not_found("Story", "123e4567-e89b-12d3-a456-426614174000");
        assert!(err.to_string().contains("Story"));
        assert!(err.to_string().contains("123e4567"));
    }

    #[test]
    fn test_recoverable_completion_errors() {
        assert!(CompletionError::MissingEvidence.is_recoverable());
        assert!(CompletionError::IncorrectAnswer.is_recoverable());
        assert!(!CompletionError::AlreadyComplete.is_recoverable());
        assert!(!CompletionError::StaleProgress {
            expected: 0,
            actual: 1
        }
        .is_recoverable());
    }

    #[test]
    fn test_stale_progress_message() {
        let err = CompletionError::StaleProgress {
            expected: 1,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "Quest 1 is no longer active (current quest is 2)"
        );
    }
}
