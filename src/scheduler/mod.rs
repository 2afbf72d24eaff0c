//! Interval scheduler driving synchronization cycles.
//!
//! Cycles run back to back with a fixed wait in between, measured from the end of one cycle.
//! The wait is split into progress slices so the remaining time shows up in the logs. There is
//! no cancellation; the loop ends when the process is terminated.

pub mod config;

use std::{sync::Arc, time::Duration};

use crate::{
    service::sync::{CycleReport, SyncOrchestrator},
    util::time::{format_remaining, Sleeper, TokioSleeper},
};

pub struct Scheduler {
    orchestrator: SyncOrchestrator,
    sleeper: Arc<dyn Sleeper>,
    interval: Duration,
    progress_interval: Duration,
}

impl Scheduler {
    /// Creates a scheduler waiting [`config::CYCLE_INTERVAL`] between cycles on the tokio timer.
    pub fn new(orchestrator: SyncOrchestrator) -> Self {
        Self {
            orchestrator,
            sleeper: Arc::new(TokioSleeper),
            interval: config::CYCLE_INTERVAL,
            progress_interval: config::PROGRESS_INTERVAL,
        }
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Overrides the inter-cycle wait and the progress slice it is logged in.
    ///
    /// A zero `progress_interval` waits the whole interval in one sleep.
    pub fn with_interval(mut self, interval: Duration, progress_interval: Duration) -> Self {
        self.interval = interval;
        self.progress_interval = progress_interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn orchestrator(&self) -> &SyncOrchestrator {
        &self.orchestrator
    }

    pub async fn run_cycle(&self) -> CycleReport {
        tracing::info!(
            identities = self.orchestrator.identities().len(),
            "Starting synchronization cycle"
        );

        self.orchestrator.run_cycle().await
    }

    /// Sleeps for the full interval in progress slices, logging the remaining time.
    pub async fn wait_until_next_cycle(&self) {
        let slice = if self.progress_interval.is_zero() {
            self.interval
        } else {
            self.progress_interval
        };
        let mut remaining = self.interval;

        while !remaining.is_zero() {
            tracing::info!("Next cycle in {}", format_remaining(remaining));

            let step = slice.min(remaining);
            self.sleeper.sleep(step).await;
            remaining -= step;
        }
    }

    /// Runs `cycles` cycles, waiting the interval after each one.
    pub async fn run_cycles(&self, cycles: usize) -> Vec<CycleReport> {
        let mut reports = Vec::with_capacity(cycles);

        for _ in 0..cycles {
            reports.push(self.run_cycle().await);
            self.wait_until_next_cycle().await;
        }

        reports
    }

    /// Runs cycles until the process is terminated.
    pub async fn run(&self) {
        loop {
            self.run_cycle().await;
            self.wait_until_next_cycle().await;
        }
    }
}
