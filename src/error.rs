//! # Error Handling
//!
//! This module provides the unified error taxonomy for the catalog. Every
//! save, find and lookup returns a [`CatalogError`]; transport layers map
//! [`ErrorKind::error_code`] to their own status codes.

use sea_orm::{DbErr, RuntimeErr, SqlErr, SqlxError};
use thiserror::Error;

/// Result alias used throughout the catalog.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors surfaced by catalog operations.
///
/// The error is `Clone` so failed iterators can report the same terminal
/// error on every subsequent call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The backend could not be reached, or refused work for a reason that
    /// may clear up on its own (lock timeout, serialization failure).
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),
    /// A lookup by ID found nothing.
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },
    /// A field value is malformed, missing or duplicated.
    #[error("validation failed on {field}: {message}")]
    ValidationFailed {
        field: &'static str,
        message: String,
    },
    /// A cross-entity invariant would be broken by the write.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
    /// The supplied condition cannot be translated into a backend query.
    #[error("malformed query condition: {0}")]
    QueryMalformed(String),
}

/// Coarse classification of a [`CatalogError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BackendUnavailable,
    NotFound,
    ValidationFailed,
    InvariantViolation,
    QueryMalformed,
}

impl ErrorKind {
    /// Get the error code string for this kind (SCREAMING_SNAKE_CASE)
    pub fn error_code(&self) -> &'static str {
        match self {
            ErrorKind::BackendUnavailable => "BACKEND_UNAVAILABLE",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::ValidationFailed => "VALIDATION_FAILED",
            ErrorKind::InvariantViolation => "INVARIANT_VIOLATION",
            ErrorKind::QueryMalformed => "QUERY_MALFORMED",
        }
    }
}

impl CatalogError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            field,
            message: message.into(),
        }
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::QueryMalformed(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::BackendUnavailable(_) => ErrorKind::BackendUnavailable,
            CatalogError::NotFound { .. } => ErrorKind::NotFound,
            CatalogError::ValidationFailed { .. } => ErrorKind::ValidationFailed,
            CatalogError::InvariantViolation(_) => ErrorKind::InvariantViolation,
            CatalogError::QueryMalformed(_) => ErrorKind::QueryMalformed,
        }
    }

    /// Only backend failures are transient; everything else needs the caller
    /// to change the request before resubmitting.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CatalogError::BackendUnavailable(_))
    }
}

fn is_unique_violation(error: &DbErr) -> bool {
    matches!(error.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn is_foreign_key_violation(error: &DbErr) -> bool {
    matches!(error.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}

/// SQLSTATE / SQLite result codes for failures that can succeed on retry.
fn is_transient_code(code: &str) -> bool {
    matches!(
        code,
        "5" | "6" | "261" | "262" | "517" | "773" | "40001" | "40P01"
    )
        || code.starts_with("08")
        || code.starts_with("53")
        || code.starts_with("57P")
}

/// Whether a statement failed on its way to or from the backend, rather
/// than being rejected by it.
fn is_transport_failure(error: &RuntimeErr) -> bool {
    match error {
        RuntimeErr::SqlxError(SqlxError::Database(db_error)) => db_error
            .code()
            .is_some_and(|code| is_transient_code(&code)),
        RuntimeErr::SqlxError(
            SqlxError::Io(_)
            | SqlxError::Tls(_)
            | SqlxError::Protocol(_)
            | SqlxError::PoolTimedOut
            | SqlxError::PoolClosed
            | SqlxError::WorkerCrashed
            | SqlxError::BeginFailed,
        ) => true,
        _ => false,
    }
}

impl From<DbErr> for CatalogError {
    fn from(error: DbErr) -> Self {
        if is_unique_violation(&error) {
            tracing::debug!(?error, "Unique constraint violation detected");
            return CatalogError::validation("id", "record already exists in this scope");
        }

        if is_foreign_key_violation(&error) {
            tracing::debug!(?error, "Foreign key violation detected");
            return CatalogError::invariant("referenced parent record does not exist");
        }

        match error {
            DbErr::RecordNotFound(record) => CatalogError::NotFound {
                entity: "record",
                id: record,
            },
            DbErr::Conn(connection_err) => {
                tracing::error!("Database connection error: {:?}", connection_err);
                CatalogError::BackendUnavailable(connection_err.to_string())
            }
            DbErr::ConnectionAcquire(acquire_err) => {
                tracing::error!("Database connection acquire error: {:?}", acquire_err);
                CatalogError::BackendUnavailable(acquire_err.to_string())
            }
            DbErr::Query(runtime_err) | DbErr::Exec(runtime_err)
                if is_transport_failure(&runtime_err) =>
            {
                tracing::error!("Database transport error: {:?}", runtime_err);
                CatalogError::BackendUnavailable(runtime_err.to_string())
            }
            DbErr::Query(runtime_err) => {
                tracing::warn!("Database rejected query: {:?}", runtime_err);
                CatalogError::malformed(format!("backend rejected the query: {}", runtime_err))
            }
            DbErr::Exec(runtime_err) => {
                tracing::warn!("Database rejected write: {:?}", runtime_err);
                CatalogError::invariant(format!("backend rejected the write: {}", runtime_err))
            }
            _ => {
                tracing::error!("Database error: {:?}", error);
                CatalogError::invariant(format!("unexpected backend error: {}", error))
            }
        }
    }
}
