//! Error types for the market ledger.
//!
//! Each stage of the synchronization pipeline has its own error type so callers can branch on
//! the failing stage without inspecting messages. The top-level [`Error`] aggregates them with
//! `#[from]` conversions for use at the orchestrator boundary. [`data::DataError`] is recovered
//! inside the transformer and never reaches it.

pub mod auth;
pub mod config;
pub mod data;
pub mod fetch;
pub mod retry;
pub mod storage;

use thiserror::Error;

use crate::error::{
    auth::AuthError, config::ConfigError, fetch::FetchError, storage::StorageError,
};

/// Main error type for the market ledger.
///
/// Every identity-level failure of a synchronization cycle is represented here. None of these
/// errors terminate the process once startup has completed; the orchestrator logs them and moves
/// on to the next identity.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables, incomplete identity).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Refresh token grant was rejected or could not be sent.
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Wallet transactions could not be retrieved from ESI.
    #[error(transparent)]
    FetchError(#[from] FetchError),
    /// Persisting transactions failed permanently or exhausted its retries.
    #[error(transparent)]
    StorageError(#[from] StorageError),
    /// HTTP client could not be constructed.
    #[error(transparent)]
    HttpClientError(#[from] reqwest::Error),
}
