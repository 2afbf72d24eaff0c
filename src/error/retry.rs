use sea_orm::{sqlx, DbErr, RuntimeErr};

/// Strategy for handling errors in a retry context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorRetryStrategy {
    /// Retry after the policy's delay (transient failures)
    Retry,
    /// Failed permanently
    Fail,
}

impl ErrorRetryStrategy {
    /// Determine retry strategy for a database error
    pub fn for_db_err(err: &DbErr) -> Self {
        match err {
            // Connection acquisition errors - transient, should retry
            DbErr::ConnectionAcquire(_) => Self::Retry,
            // Connection errors (refused, timed out, reset) - transient, should retry
            DbErr::Conn(_) => Self::Retry,
            // Connection lost while a statement was running
            DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e))
                if is_connection_lost(e) =>
            {
                Self::Retry
            }

            // All other database errors are permanent failures:
            // - Query errors (constraint violations, syntax errors, etc.)
            // - Type conversion errors
            // - Schema errors
            // These won't resolve with a retry
            _ => Self::Fail,
        }
    }
}

/// Whether a driver error means the connection went away rather than the statement failing.
fn is_connection_lost(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed
    )
}
