//! Wallet transaction models.

use chrono::NaiveDateTime;
use sea_orm::ActiveValue;
use serde::{Deserialize, Serialize};

/// Wallet transaction as returned by ESI `GET /characters/{character_id}/wallet/transactions/`.
///
/// `date` is kept as the raw string so a malformed timestamp cannot fail decoding of the whole
/// page; the transformer resolves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletTransaction {
    pub transaction_id: i64,
    pub date: String,
    pub type_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    pub unit_price: f64,
    pub quantity: i32,
    pub client_id: i64,
    pub location_id: i64,
    pub is_buy: bool,
}

/// Normalized transaction ready to be stored in `market_transactions`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub transaction_id: i64,
    pub date: Option<NaiveDateTime>,
    pub type_id: i32,
    pub type_name: String,
    pub unit_price: f64,
    pub quantity: i32,
    pub client_id: i64,
    pub location_id: i64,
    pub is_buy_order: bool,
}

impl From<TransactionRecord> for entity::market_transaction::ActiveModel {
    fn from(record: TransactionRecord) -> Self {
        Self {
            transaction_id: ActiveValue::Set(record.transaction_id),
            date: ActiveValue::Set(record.date),
            type_id: ActiveValue::Set(record.type_id),
            type_name: ActiveValue::Set(record.type_name),
            unit_price: ActiveValue::Set(record.unit_price),
            quantity: ActiveValue::Set(record.quantity),
            client_id: ActiveValue::Set(record.client_id),
            location_id: ActiveValue::Set(record.location_id),
            is_buy_order: ActiveValue::Set(record.is_buy_order),
        }
    }
}
