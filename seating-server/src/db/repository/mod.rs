//! Repository Module
//!
//! CRUD operations for guests, dining tables and connections on top of
//! [`SeatingStorage`](crate::db::SeatingStorage). Each mutating call runs in
//! one redb write transaction.

pub mod connection;
pub mod dining_table;
pub mod guest;

// Re-exports
pub use connection::ConnectionRepository;
pub use dining_table::DiningTableRepository;
pub use guest::GuestRepository;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::db::StorageError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{1}")]
    NotFound(ErrorCode, String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("{1}")]
    Validation(ErrorCode, String),

    #[error("{1}")]
    Conflict(ErrorCode, String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<StorageError> for RepoError {
    fn from(err: StorageError) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<redb::CommitError> for RepoError {
    fn from(err: redb::CommitError) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(code, msg) => AppError::with_message(code, msg),
            RepoError::Duplicate(msg) => AppError::already_exists(msg),
            RepoError::Validation(code, msg) => AppError::with_message(code, msg),
            RepoError::Conflict(code, msg) => AppError::with_message(code, msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
