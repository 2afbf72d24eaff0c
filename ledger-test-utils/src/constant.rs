//! Placeholder credentials used across tests. None of these are real.

/// User agent sent by test ESI clients.
pub static TEST_USER_AGENT: &str = "market-ledger-tests/1.0 (contact@example.com)";

pub static TEST_CLIENT_ID: &str = "esi_client_id";

pub static TEST_CLIENT_SECRET: &str = "esi_client_secret";

pub static TEST_REFRESH_TOKEN: &str = "esi_refresh_token";

/// Access token returned by mock token endpoints unless a test provides its own.
pub static TEST_ACCESS_TOKEN: &str = "esi_access_token";

pub static TEST_CHARACTER_ID: i64 = 2114794365;

/// Path of the EVE SSO token endpoint on the mock server.
pub static TOKEN_PATH: &str = "/v2/oauth/token";
