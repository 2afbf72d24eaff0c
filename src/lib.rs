//! Market ledger: EVE Online wallet transaction synchronization.
//!
//! Every cycle each configured character's refresh token is exchanged for an access token, the
//! character's wallet transactions are fetched from ESI, normalized, and upserted into the
//! `market_transactions` table. Cycles repeat on a fixed interval; a failing character never
//! stops the others or the process.

pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
