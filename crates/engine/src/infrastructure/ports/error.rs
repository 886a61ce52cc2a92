//! Error types for port operations.

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Storage operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Stored data could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Stored data was written by an unsupported schema version.
    #[error("Unsupported schema version {found} (expected {expected})")]
    SchemaVersion { found: u32, expected: u32 },
}

impl RepoError {
    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Adventure generation failed. Callers treat every variant the same way:
/// nothing is created and the player may retry.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Generator unavailable: {0}")]
    Unavailable(#[from] LlmError),
    #[error("Generator returned malformed output: {0}")]
    Malformed(String),
    #[error("Generator returned an unplayable adventure: {0}")]
    InvalidTemplate(#[from] echoes_domain::DomainError),
}

#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid geocoding response: {0}")]
    InvalidResponse(String),
}
