pub mod prelude;

pub mod market_transaction;
