//! Repository Module
//!
//! CRUD operations over the SQLite tables as free functions taking
//! `&SqlitePool`. Queries are runtime-checked (`sqlx::query_as` with
//! `.bind()`), so no database needs to exist at compile time.

pub mod category;
pub mod order;
pub mod product;
pub mod user;

use thiserror::Error;

use crate::utils::{AppError, ErrorCode};

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Whether a sqlx error is transient (retriable by the client)
///
/// SQLITE_BUSY / SQLITE_LOCKED and pool acquire timeouts clear on their
/// own; everything else is a hard failure.
fn is_transient(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::PoolTimedOut => true,
        sqlx::Error::Database(db) => {
            let msg = db.message();
            msg.contains("database is locked") || msg.contains("database table is locked")
        }
        _ => false,
    }
}

// RepoError messages are full sentences already; don't re-wrap them.
impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(e) if is_transient(&e) => {
                AppError::storage_unavailable(e.to_string())
            }
            RepoError::Database(e) => AppError::database(e.to_string()),
        }
    }
}

/// Whether a sqlx error is a UNIQUE constraint violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
