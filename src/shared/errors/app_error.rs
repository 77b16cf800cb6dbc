use serde::Serialize;
use thiserror::Error;

/// Terminal outcomes of catalog operations.
///
/// All variants are synchronous, local failures; none are retried. Storage
/// errors come from the persistence collaborator and abort the operation
/// before any cache invalidation happens.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Deletion blocked: {0}")]
    DeletionBlocked(String),

    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
