use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, TransactionTrait};

use crate::{
    data::transaction::TransactionRepository,
    error::storage::StorageError,
    model::transaction::TransactionRecord,
    service::retry::RetryPolicy,
    util::time::{Sleeper, TokioSleeper},
};

/// Opens and releases database connections for the persistence layer.
///
/// Every connection returned by `connect` is handed back to `release` once its attempt ends,
/// whether the attempt succeeded or not.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<DatabaseConnection, DbErr>;

    /// Closes the connection so the server sees a clean disconnect.
    async fn release(&self, db: DatabaseConnection) {
        if let Err(e) = db.close().await {
            tracing::warn!("Failed to close database connection: {}", e);
        }
    }
}

/// Connector opening a fresh single-connection pool to the configured database URL.
pub struct DatabaseConnector {
    url: String,
}

impl DatabaseConnector {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl Connector for DatabaseConnector {
    async fn connect(&self) -> Result<DatabaseConnection, DbErr> {
        let mut opt = ConnectOptions::new(&self.url);
        opt.max_connections(1).min_connections(0).sqlx_logging(false);

        Database::connect(opt).await
    }
}

/// Persistence layer for transformed wallet transactions.
pub struct TransactionStore {
    connector: Arc<dyn Connector>,
    retry_policy: RetryPolicy<DbErr>,
    sleeper: Arc<dyn Sleeper>,
}

impl TransactionStore {
    /// Creates a store with the default retry policy (3 attempts, 3 seconds apart) and the
    /// tokio sleeper.
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self {
            connector,
            retry_policy: RetryPolicy::default(),
            sleeper: Arc::new(TokioSleeper),
        }
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy<DbErr>) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Upserts a batch of transactions in a single database transaction.
    ///
    /// Empty input returns 0 without opening a connection. Otherwise every attempt opens its own
    /// connection, ensures the schema exists, upserts all records and commits once. The
    /// connection is released through the connector when the attempt ends, whatever its outcome.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of records written
    /// - `Err(StorageError::RetriesExhausted)` - Connectivity failed on every attempt
    /// - `Err(StorageError::Database)` - A non-transient database error occurred
    pub async fn upsert_batch(&self, records: Vec<TransactionRecord>) -> Result<u64, StorageError> {
        if records.is_empty() {
            return Ok(0);
        }

        let description = format!("upsert of {} transactions", records.len());
        let connector = self.connector.as_ref();
        let records = &records;

        let count = self
            .retry_policy
            .execute(&description, self.sleeper.as_ref(), move || async move {
                let db = connector.connect().await?;
                let result = write_batch(&db, records.clone()).await;
                connector.release(db).await;

                result
            })
            .await?;

        Ok(count)
    }
}

async fn write_batch(db: &DatabaseConnection, records: Vec<TransactionRecord>) -> Result<u64, DbErr> {
    TransactionRepository::new(db).ensure_schema().await?;

    let txn = db.begin().await?;
    let count = TransactionRepository::new(&txn).upsert_many(records).await?;
    txn.commit().await?;

    Ok(count)
}
