//! Test context returned by [`TestBuilder`](crate::TestBuilder).

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::{
    constant::TOKEN_PATH,
    error::TestError,
    fixtures::{auth::AuthFixtures, wallet::WalletFixtures},
};

/// Test environment with an in-memory SQLite database and a mock EVE SSO/ESI server.
///
/// ```ignore
/// let test = TestBuilder::new()
///     .with_table(entity::prelude::MarketTransaction)
///     .with_token_endpoint(TEST_REFRESH_TOKEN, TEST_ACCESS_TOKEN, 1)
///     .build()
///     .await?;
///
/// let esi_client = EsiClient::builder()
///     .esi_url(&test.esi_url())
///     .token_url(&test.token_url())
///     .build()?;
///
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,

    /// Mock HTTP server for EVE SSO and ESI endpoints
    pub(crate) server: ServerGuard,
    /// Collection of mock HTTP endpoints for assertion
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    /// Create a new test context with an empty database and no mock endpoints.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context
    /// - `Err(TestError::DbErr)` - Database connection failed
    pub(crate) async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;
        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext {
            db,
            server,
            mocks: Vec::new(),
        })
    }

    /// Base URL to configure as the ESI URL of the client under test.
    pub fn esi_url(&self) -> String {
        self.server.url()
    }

    /// URL to configure as the token URL of the client under test.
    pub fn token_url(&self) -> String {
        format!("{}{}", self.server.url(), TOKEN_PATH)
    }

    pub fn auth(&mut self) -> AuthFixtures<'_> {
        AuthFixtures::new(self)
    }

    pub fn wallet(&mut self) -> WalletFixtures<'_> {
        WalletFixtures::new(self)
    }

    /// Register a mock created after `build()` so `assert_mocks` verifies it too.
    pub fn track_mock(&mut self, mock: Mock) {
        self.mocks.push(mock);
    }

    /// Execute CREATE TABLE statements.
    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
