//! Error types for the currency rates service.

/// Domain-level errors (validation failures, bad shapes).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(String),

    #[error("Invalid date, expected `latest` or YYYY-MM-DD: {0}")]
    InvalidDate(String),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Entity not found")]
    NotFound,
}

/// Errors raised by the upstream rate provider client.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Provider returned HTTP {status}")]
    Http { status: u16 },

    #[error("Provider response decode error: {0}")]
    Decode(String),
}

/// Failure taxonomy of the rate synchronization workflow.
///
/// Every variant is recovered locally by the service: the caller sees an
/// absent result, the cause lands in the server-side logs.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Upstream(#[from] ProviderError),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error(transparent)]
    Persistence(#[from] RepoError),
}

impl From<DomainError> for SyncError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::SchemaMismatch(msg) => SyncError::SchemaMismatch(msg),
            other => SyncError::InvalidInput(other.to_string()),
        }
    }
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".into()),
            RepoError::Database(e) => AppError::Internal(e),
            RepoError::Transaction(e) => AppError::Internal(e),
        }
    }
}
