//! Shared test harness for the market ledger.
//!
//! Tests are written in two phases: a [`TestBuilder`] declares tables, database fixtures and
//! mock HTTP endpoints, then `build()` returns a [`TestContext`] holding an in-memory SQLite
//! database and a mockito server that stands in for EVE SSO and ESI.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{constant::*, fixtures::factory, TestBuilder, TestContext, TestError};
}
