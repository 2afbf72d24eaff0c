//! Credential refresh error types.

use thiserror::Error;

/// Errors returned when exchanging a refresh token for an access token.
///
/// These abort the current cycle for the affected identity only. The raw response body is kept
/// for diagnostics since EVE SSO reports the reason (`invalid_grant`, `invalid_client`, ...) there.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The token endpoint answered without an `access_token`.
    #[error("Failed to refresh access token (status {status}): {body}")]
    RefreshRejected { status: u16, body: String },
    /// The request to the token endpoint could not be completed.
    #[error("Failed to send refresh token request: {0}")]
    Request(#[from] reqwest::Error),
}
