//! Declarative test builder.
//!
//! Configuration methods only queue work; everything is executed in `build()`.

use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};
use serde_json::Value;

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// Sets up database tables, stored transaction rows and mock HTTP endpoints, then `build()`
/// returns the resulting [`TestContext`].
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    transactions: Vec<entity::market_transaction::Model>,

    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,

    token_endpoints: Vec<(String, String, usize)>, // (refresh_token, access_token, expected)
    rejected_token_endpoints: Vec<(String, usize, String, usize)>, // (refresh_token, status, body, expected)
    transactions_endpoints: Vec<(i64, String, Vec<Value>, usize)>, // (character_id, access_token, body, expected)
    transactions_error_endpoints: Vec<(i64, usize, String, usize)>, // (character_id, status, body, expected)
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            transactions: Vec::new(),
            mock_builders: Vec::new(),
            token_endpoints: Vec::new(),
            rejected_token_endpoints: Vec::new(),
            transactions_endpoints: Vec::new(),
            transactions_error_endpoints: Vec::new(),
        }
    }

    /// Add an entity table to the test database.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ledger_test_utils::TestBuilder;
    ///
    /// # async fn example() -> Result<(), ledger_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(entity::prelude::MarketTransaction)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a stored transaction row. The `market_transactions` table must be added too.
    pub fn with_mock_transaction(mut self, transaction: entity::market_transaction::Model) -> Self {
        self.transactions.push(transaction);
        self
    }

    /// Add a token endpoint granting `access_token` for `refresh_token`.
    pub fn with_token_endpoint(
        mut self,
        refresh_token: impl Into<String>,
        access_token: impl Into<String>,
        expected_requests: usize,
    ) -> Self {
        self.token_endpoints
            .push((refresh_token.into(), access_token.into(), expected_requests));
        self
    }

    /// Add a token endpoint rejecting the refresh grant for `refresh_token`.
    pub fn with_rejected_token_endpoint(
        mut self,
        refresh_token: impl Into<String>,
        status: usize,
        body: impl Into<String>,
        expected_requests: usize,
    ) -> Self {
        self.rejected_token_endpoints.push((
            refresh_token.into(),
            status,
            body.into(),
            expected_requests,
        ));
        self
    }

    /// Add a wallet transactions endpoint for `character_id` returning `transactions`.
    pub fn with_transactions_endpoint(
        mut self,
        character_id: i64,
        access_token: impl Into<String>,
        transactions: Vec<Value>,
        expected_requests: usize,
    ) -> Self {
        self.transactions_endpoints.push((
            character_id,
            access_token.into(),
            transactions,
            expected_requests,
        ));
        self
    }

    /// Add a wallet transactions endpoint for `character_id` answering with an error status.
    pub fn with_transactions_error_endpoint(
        mut self,
        character_id: i64,
        status: usize,
        body: impl Into<String>,
        expected_requests: usize,
    ) -> Self {
        self.transactions_error_endpoints
            .push((character_id, status, body.into(), expected_requests));
        self
    }

    /// Add a custom mock endpoint with full control over the mockito server.
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Build the test context.
    ///
    /// Executes all queued operations in order:
    /// 1. Creates database tables
    /// 2. Inserts stored transaction rows
    /// 3. Creates mock HTTP endpoints
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment
    /// - `Err(TestError::DbErr)` - Table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        setup.with_tables(self.tables).await?;

        for transaction in self.transactions {
            setup.wallet().insert_mock_transaction(transaction).await?;
        }

        for (refresh_token, access_token, expected) in self.token_endpoints {
            let mock = setup
                .auth()
                .create_token_endpoint(&refresh_token, &access_token, expected);
            setup.mocks.push(mock);
        }

        for (refresh_token, status, body, expected) in self.rejected_token_endpoints {
            let mock = setup
                .auth()
                .create_rejected_token_endpoint(&refresh_token, status, &body, expected);
            setup.mocks.push(mock);
        }

        for (character_id, access_token, transactions, expected) in self.transactions_endpoints {
            let mock = setup.wallet().create_transactions_endpoint(
                character_id,
                &access_token,
                transactions,
                expected,
            );
            setup.mocks.push(mock);
        }

        for (character_id, status, body, expected) in self.transactions_error_endpoints {
            let mock = setup
                .wallet()
                .create_transactions_error_endpoint(character_id, status, &body, expected);
            setup.mocks.push(mock);
        }

        for builder in self.mock_builders {
            let mock = builder(&mut setup.server);
            setup.mocks.push(mock);
        }

        Ok(setup)
    }
}
