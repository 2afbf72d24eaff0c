//! Factories for wallet transaction test data.

use chrono::NaiveDate;
use serde_json::{json, Value};

/// ESI timestamp used by [`mock_transaction`].
pub static MOCK_TRANSACTION_DATE: &str = "2024-03-15T18:42:07Z";

/// Raw ESI wallet transaction with every field populated.
///
/// Numeric fields are derived from `transaction_id` so distinct IDs produce distinct rows.
pub fn mock_transaction(transaction_id: i64) -> Value {
    json!({
        "transaction_id": transaction_id,
        "date": MOCK_TRANSACTION_DATE,
        "type_id": 34,
        "type_name": "Tritanium",
        "unit_price": 4.5,
        "quantity": 1000,
        "client_id": 2112625428_i64,
        "location_id": 60003760_i64,
        "is_buy": true,
        "is_personal": true,
        "journal_ref_id": transaction_id + 1
    })
}

/// Raw ESI wallet transaction with `type_name` omitted, as ESI itself returns it.
pub fn mock_transaction_without_type_name(transaction_id: i64) -> Value {
    let mut transaction = mock_transaction(transaction_id);
    if let Some(fields) = transaction.as_object_mut() {
        fields.remove("type_name");
    }
    transaction
}

/// Raw ESI wallet transaction with field overrides applied on top of [`mock_transaction`].
pub fn mock_transaction_with(transaction_id: i64, overrides: Value) -> Value {
    let mut transaction = mock_transaction(transaction_id);
    if let (Some(fields), Some(overrides)) = (transaction.as_object_mut(), overrides.as_object()) {
        for (key, value) in overrides {
            fields.insert(key.clone(), value.clone());
        }
    }
    transaction
}

/// Stored row matching [`mock_transaction`] after transformation.
pub fn mock_transaction_model(transaction_id: i64) -> entity::market_transaction::Model {
    entity::market_transaction::Model {
        transaction_id,
        date: NaiveDate::from_ymd_opt(2024, 3, 15).and_then(|d| d.and_hms_opt(18, 42, 7)),
        type_id: 34,
        type_name: "Tritanium".to_string(),
        unit_price: 4.5,
        quantity: 1000,
        client_id: 2112625428,
        location_id: 60003760,
        is_buy_order: true,
    }
}
