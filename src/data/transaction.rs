use sea_orm::{sea_query::OnConflict, ConnectionTrait, DbErr, EntityTrait, Schema};

use crate::model::transaction::TransactionRecord;

pub struct TransactionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TransactionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates `market_transactions` if it does not exist yet; safe to call on every batch.
    pub async fn ensure_schema(&self) -> Result<(), DbErr> {
        let schema = Schema::new(self.db.get_database_backend());
        let mut stmt = schema.create_table_from_entity(entity::prelude::MarketTransaction);
        stmt.if_not_exists();

        self.db.execute(&stmt).await?;

        Ok(())
    }

    /// Inserts transactions, overwriting every non-key column of rows that already exist.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of records written (inserted or updated)
    /// - `Err(DbErr)` - Statement failed, e.g. the table does not exist
    pub async fn upsert_many(&self, records: Vec<TransactionRecord>) -> Result<u64, DbErr> {
        if records.is_empty() {
            return Ok(0);
        }

        let count = records.len() as u64;
        let records = records
            .into_iter()
            .map(entity::market_transaction::ActiveModel::from);

        entity::prelude::MarketTransaction::insert_many(records)
            .on_conflict(
                OnConflict::column(entity::market_transaction::Column::TransactionId)
                    .update_columns([
                        entity::market_transaction::Column::Date,
                        entity::market_transaction::Column::TypeId,
                        entity::market_transaction::Column::TypeName,
                        entity::market_transaction::Column::UnitPrice,
                        entity::market_transaction::Column::Quantity,
                        entity::market_transaction::Column::ClientId,
                        entity::market_transaction::Column::LocationId,
                        entity::market_transaction::Column::IsBuyOrder,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        Ok(count)
    }
}
