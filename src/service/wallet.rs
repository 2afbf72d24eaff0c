//! Transaction fetcher for the ESI character wallet.

use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::{
    error::fetch::FetchError, model::token::AccessToken,
    model::transaction::WalletTransaction, service::esi::EsiClient,
};

pub struct WalletService<'a> {
    esi_client: &'a EsiClient,
}

impl<'a> WalletService<'a> {
    pub fn new(esi_client: &'a EsiClient) -> Self {
        Self { esi_client }
    }

    /// Retrieves the most recent page of wallet transactions for a character.
    ///
    /// An empty list is a valid outcome meaning no transactions were returned. No retry is
    /// attempted at this layer.
    ///
    /// # Returns
    /// - `Ok(Vec<WalletTransaction>)` - Success status with a JSON array body
    /// - `Err(FetchError::Status)` - Non-success status, with the response body
    /// - `Err(FetchError::Decode)` - Success status but the body is not a transaction list
    /// - `Err(FetchError::Request)` - The request could not be sent or the body not read
    pub async fn fetch_transactions(
        &self,
        token: &AccessToken,
        character_id: i64,
    ) -> Result<Vec<WalletTransaction>, FetchError> {
        let url = format!(
            "{}/characters/{}/wallet/transactions/",
            self.esi_client.esi_url, character_id
        );

        let response = self
            .esi_client
            .http
            .get(url)
            .bearer_auth(token.secret())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(
            character_id = %character_id,
            status = %status,
            content_type = ?response.headers().get(CONTENT_TYPE),
            "Wallet transactions response received"
        );
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
