//! Test fixtures for database rows and mock HTTP endpoints.
//!
//! - `auth` - EVE SSO token endpoint
//! - `wallet` - ESI wallet transactions endpoint and stored transaction rows
//! - `factory` - raw ESI payloads and entity models

pub mod auth;
pub mod factory;
pub mod wallet;
