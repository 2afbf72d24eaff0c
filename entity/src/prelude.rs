pub use super::market_transaction::Entity as MarketTransaction;
