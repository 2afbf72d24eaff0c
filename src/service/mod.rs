//! Synchronization pipeline services.
//!
//! - `auth` - refresh token grant against EVE SSO
//! - `wallet` - wallet transaction retrieval from ESI
//! - `transform` - normalization of raw records
//! - `retry` - bounded retry policy used by the persistence layer
//! - `sync` - per-identity pipeline and cycle orchestration

pub mod auth;
pub mod esi;
pub mod retry;
pub mod sync;
pub mod transform;
pub mod wallet;
