//! Repository Module
//!
//! Free functions over a `SqlitePool`, one module per table group. Writes
//! that touch more than one row run in a single transaction.

pub mod category;
pub mod configuration;
pub mod menu_entry;
pub mod user;
pub mod wine;

use shared::error::{AppError, ErrorCode};
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound(err.to_string()),
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation => RepoError::Duplicate(db_err.message().to_string()),
                ErrorKind::ForeignKeyViolation
                | ErrorKind::CheckViolation
                | ErrorKind::NotNullViolation => {
                    RepoError::Validation(db_err.message().to_string())
                }
                _ => RepoError::Database(err.to_string()),
            },
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Repository database error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Read a non-negative SQLite integer into a `u32`
pub(crate) fn to_u32(value: i64, column: &str) -> RepoResult<u32> {
    u32::try_from(value).map_err(|_| RepoError::Database(format!("{column} out of range: {value}")))
}
