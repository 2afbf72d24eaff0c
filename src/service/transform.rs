//! Normalizes raw ESI wallet transactions into storage records.

use chrono::NaiveDateTime;

use crate::{
    error::data::DataError,
    model::transaction::{TransactionRecord, WalletTransaction},
};

/// Timestamp format used by ESI, e.g. `2016-10-24T09:00:00Z`
pub const ESI_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Canonical `DATETIME` format stored in `market_transactions.date`
pub const STORAGE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Type name stored when ESI omits `type_name`
pub const UNKNOWN_TYPE_NAME: &str = "Unknown";

pub fn parse_esi_date(value: &str) -> Result<NaiveDateTime, DataError> {
    NaiveDateTime::parse_from_str(value, ESI_DATE_FORMAT).map_err(|source| {
        DataError::InvalidDate {
            value: value.to_string(),
            source,
        }
    })
}

/// Converts an ESI timestamp to a storage datetime, `None` when it cannot be parsed.
pub fn convert_date(value: &str) -> Option<NaiveDateTime> {
    match parse_esi_date(value) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!("{}; storing null date", e);
            None
        }
    }
}

/// Converts a raw ESI record into a [`TransactionRecord`].
///
/// Never fails: a malformed date is stored as null and a missing type name as `"Unknown"`.
pub fn transform(raw: WalletTransaction) -> TransactionRecord {
    let date = convert_date(&raw.date);

    TransactionRecord {
        transaction_id: raw.transaction_id,
        date,
        type_id: raw.type_id,
        type_name: raw
            .type_name
            .unwrap_or_else(|| UNKNOWN_TYPE_NAME.to_string()),
        unit_price: raw.unit_price,
        quantity: raw.quantity,
        client_id: raw.client_id,
        location_id: raw.location_id,
        is_buy_order: raw.is_buy,
    }
}
