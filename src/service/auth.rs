//! Credential manager exchanging refresh tokens for access tokens.

use serde::Deserialize;

use crate::{
    error::auth::AuthError,
    model::{identity::Credentials, token::AccessToken},
    service::esi::EsiClient,
};

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

pub struct CredentialService<'a> {
    esi_client: &'a EsiClient,
}

impl<'a> CredentialService<'a> {
    pub fn new(esi_client: &'a EsiClient) -> Self {
        Self { esi_client }
    }

    /// Exchanges the identity's refresh token for a short-lived access token.
    ///
    /// Sends a `refresh_token` grant to the EVE SSO token endpoint. No retry is attempted; a
    /// failure only aborts the current cycle for this identity.
    ///
    /// # Arguments
    /// - `credentials` - Client ID, client secret and refresh token of the identity
    ///
    /// # Returns
    /// - `Ok(AccessToken)` - Response body contained an `access_token`
    /// - `Err(AuthError::RefreshRejected)` - Any other response, with status and raw body
    /// - `Err(AuthError::Request)` - The request could not be sent or the body not read
    pub async fn refresh_access_token(
        &self,
        credentials: &Credentials<'_>,
    ) -> Result<AccessToken, AuthError> {
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", credentials.refresh_token),
            ("client_id", credentials.client_id),
            ("client_secret", credentials.client_secret),
        ];

        let response = self
            .esi_client
            .http
            .post(&self.esi_client.token_url)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<TokenResponse>(&body) {
            Ok(TokenResponse {
                access_token: Some(token),
            }) if !token.is_empty() => Ok(AccessToken::new(token)),
            _ => Err(AuthError::RefreshRejected {
                status: status.as_u16(),
                body,
            }),
        }
    }
}
