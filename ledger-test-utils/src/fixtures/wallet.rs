//! ESI wallet transaction endpoint mocks and stored transaction fixtures.

use mockito::Mock;
use sea_orm::{ActiveModelTrait, IntoActiveModel};
use serde_json::Value;

use crate::{context::TestContext, error::TestError};

pub struct WalletFixtures<'a> {
    setup: &'a mut TestContext,
}

impl<'a> WalletFixtures<'a> {
    pub(crate) fn new(setup: &'a mut TestContext) -> Self {
        Self { setup }
    }

    /// Create a mock `GET /characters/{character_id}/wallet/transactions/` endpoint.
    ///
    /// The request must carry `Authorization: Bearer {access_token}` and accept JSON.
    ///
    /// # Arguments
    /// - `character_id` - Character ID in the endpoint path
    /// - `access_token` - Bearer token the request must carry
    /// - `transactions` - Raw transaction objects returned as a JSON array
    /// - `expected_requests` - Number of times this endpoint should be called
    pub fn create_transactions_endpoint(
        &mut self,
        character_id: i64,
        access_token: &str,
        transactions: Vec<Value>,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("GET", transactions_path(character_id).as_str())
            .match_header("authorization", format!("Bearer {}", access_token).as_str())
            .match_header("accept", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(Value::Array(transactions).to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock wallet transactions endpoint answering with an error status.
    pub fn create_transactions_error_endpoint(
        &mut self,
        character_id: i64,
        status: usize,
        body: &str,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("GET", transactions_path(character_id).as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(expected_requests)
            .create()
    }

    /// Insert a stored transaction row.
    pub async fn insert_mock_transaction(
        &self,
        transaction: entity::market_transaction::Model,
    ) -> Result<entity::market_transaction::Model, TestError> {
        Ok(transaction
            .into_active_model()
            .reset_all()
            .insert(&self.setup.db)
            .await?)
    }
}

pub fn transactions_path(character_id: i64) -> String {
    format!("/characters/{}/wallet/transactions/", character_id)
}
