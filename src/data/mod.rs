//! Persistence of market transactions.
//!
//! [`transaction::TransactionRepository`] issues the schema and upsert statements on a given
//! connection. [`store::TransactionStore`] is the persistence layer used by the orchestrator:
//! it opens a connection per attempt through a [`store::Connector`] and retries transient
//! connectivity failures.

pub mod store;
pub mod transaction;
