use std::time::Duration;

/// Wait between the end of one cycle and the start of the next (24 hours)
pub const CYCLE_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Slice of the inter-cycle wait after which the remaining time is logged (1 hour)
pub const PROGRESS_INTERVAL: Duration = Duration::from_secs(60 * 60);
