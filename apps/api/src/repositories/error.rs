//! Persistence error types

use thiserror::Error;

/// Errors surfaced by every repository implementation
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Update, delete or unsubscribe target does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Unique constraint violated
    #[error("{entity} already exists: {detail}")]
    Conflict { entity: &'static str, detail: String },

    /// A referenced parent record does not exist
    #[error("{entity} references a missing record: {detail}")]
    ForeignKey { entity: &'static str, detail: String },

    /// Any other backend failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn conflict(entity: &'static str, detail: impl Into<String>) -> Self {
        Self::Conflict {
            entity,
            detail: detail.into(),
        }
    }

    pub fn foreign_key(entity: &'static str, detail: impl Into<String>) -> Self {
        Self::ForeignKey {
            entity,
            detail: detail.into(),
        }
    }

    /// Error code exposed to GraphQL clients under `extensions.code`
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict { .. } => "CONFLICT",
            Self::ForeignKey { .. } => "FOREIGN_KEY_VIOLATION",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Whether the caller caused the failure (as opposed to the backend)
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Database(_))
    }
}

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;
