//! Domain models shared across the synchronization pipeline.

pub mod identity;
pub mod token;
pub mod transaction;
