//! Persistence error types.

use sea_orm::DbErr;
use thiserror::Error;

use crate::service::retry::RetryError;

/// Errors returned by the persistence layer.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Transient connectivity failures persisted through every allowed attempt.
    #[error("Database unavailable after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: DbErr,
    },
    /// A non-transient database error (query, constraint or schema failure).
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl From<RetryError<DbErr>> for StorageError {
    fn from(err: RetryError<DbErr>) -> Self {
        match err {
            RetryError::Permanent(source) => Self::Database(source),
            RetryError::Exhausted { attempts, source } => {
                Self::RetriesExhausted { attempts, source }
            }
        }
    }
}
