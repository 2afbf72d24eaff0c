//! Wallet transaction fetch error types.

use thiserror::Error;

/// Errors returned when retrieving wallet transactions from ESI.
#[derive(Error, Debug)]
pub enum FetchError {
    /// ESI answered with a non-success status code.
    #[error("Failed to fetch transactions (status {status}): {body}")]
    Status { status: u16, body: String },
    /// The request to ESI could not be completed.
    #[error("Failed to send transactions request: {0}")]
    Request(#[from] reqwest::Error),
    /// ESI answered successfully but the body was not a list of transactions.
    #[error("Failed to decode transactions response: {0}")]
    Decode(#[from] serde_json::Error),
}
