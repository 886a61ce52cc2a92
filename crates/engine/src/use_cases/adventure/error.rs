//! Adventure operation errors.

use echoes_domain::{CompletionError, DomainError, ProgressionError, StoryId};

use crate::infrastructure::ports::{GenerationError, RepoError};

/// Errors that can occur during adventure operations.
#[derive(Debug, thiserror::Error)]
pub enum AdventureError {
    #[error("Adventure not found: {0}")]
    NotFound(StoryId),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The quest attempt was rejected; nothing changed.
    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<ProgressionError> for AdventureError {
    fn from(err: ProgressionError) -> Self {
        match err {
            ProgressionError::StoryNotFound(id) => Self::NotFound(id),
            ProgressionError::Completion(e) => Self::Completion(e),
        }
    }
}
