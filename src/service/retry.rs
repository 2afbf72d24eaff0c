//! Bounded retry with a fixed delay between attempts.
//!
//! This module provides the [`RetryPolicy`] used by the persistence layer to ride out transient
//! database connectivity failures. The policy owns the attempt bound, the delay and the function
//! classifying errors as retryable, so tests can construct one with a zero delay.

use std::{future::Future, time::Duration};

use sea_orm::DbErr;
use thiserror::Error;

use crate::{error::retry::ErrorRetryStrategy, util::time::Sleeper};

/// Failure of an operation executed under a [`RetryPolicy`].
#[derive(Error, Debug)]
pub enum RetryError<E>
where
    E: std::error::Error + 'static,
{
    /// The operation failed with an error classified as permanent.
    #[error(transparent)]
    Permanent(E),
    /// Every allowed attempt failed with a retryable error; `source` is the last one.
    #[error("Gave up after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: E,
    },
}

/// Retry policy with fixed attempt bound and fixed delay.
///
/// # Retry Behavior
///
/// - **Max attempts**: total number of executions, including the first
/// - **Delay**: constant wait between attempts, none after the last attempt
/// - **Retry conditions**: only errors the strategy maps to `ErrorRetryStrategy::Retry`
/// - **Permanent failures**: errors mapped to `ErrorRetryStrategy::Fail` return immediately
pub struct RetryPolicy<E> {
    max_attempts: u32,
    delay: Duration,
    strategy: fn(&E) -> ErrorRetryStrategy,
}

impl RetryPolicy<DbErr> {
    const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    const DEFAULT_DELAY_SECS: u64 = 3;
}

impl Default for RetryPolicy<DbErr> {
    /// 3 attempts, 3 seconds apart, retrying only connection failures.
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MAX_ATTEMPTS,
            Duration::from_secs(Self::DEFAULT_DELAY_SECS),
            ErrorRetryStrategy::for_db_err,
        )
    }
}

impl<E> Clone for RetryPolicy<E> {
    fn clone(&self) -> Self {
        Self {
            max_attempts: self.max_attempts,
            delay: self.delay,
            strategy: self.strategy,
        }
    }
}

impl<E> RetryPolicy<E>
where
    E: std::error::Error + 'static,
{
    /// Creates a retry policy.
    ///
    /// A `max_attempts` of 0 is treated as 1; the operation always runs at least once.
    pub fn new(max_attempts: u32, delay: Duration, strategy: fn(&E) -> ErrorRetryStrategy) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
            strategy,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Executes an operation, retrying transient failures.
    ///
    /// # Arguments
    /// - `description` - Human-readable description for logging (e.g., "upsert of 12 transactions")
    /// - `sleeper` - Performs the wait between attempts
    /// - `operation` - Produces a fresh future for each attempt
    ///
    /// # Returns
    /// - `Ok(R)` - An attempt succeeded
    /// - `Err(RetryError::Permanent)` - An attempt failed with a non-retryable error
    /// - `Err(RetryError::Exhausted)` - All `max_attempts` attempts failed with retryable errors
    pub async fn execute<R, F, Fut>(
        &self,
        description: &str,
        sleeper: &dyn Sleeper,
        mut operation: F,
    ) -> Result<R, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<R, E>>,
    {
        let mut attempt = 1;

        loop {
            tracing::debug!(
                "Processing {} (attempt {}/{})",
                description,
                attempt,
                self.max_attempts
            );

            match operation().await {
                Ok(result) => {
                    tracing::debug!("Successfully processed {}", description);
                    return Ok(result);
                }
                Err(e) => match (self.strategy)(&e) {
                    ErrorRetryStrategy::Fail => {
                        tracing::error!("Permanent error for {}: {}", description, e);
                        return Err(RetryError::Permanent(e));
                    }
                    ErrorRetryStrategy::Retry => {
                        if attempt >= self.max_attempts {
                            tracing::error!(
                                "Max attempts ({}) exceeded for {}: {}",
                                self.max_attempts,
                                description,
                                e
                            );
                            return Err(RetryError::Exhausted {
                                attempts: attempt,
                                source: e,
                            });
                        }

                        tracing::warn!(
                            "Retrying {} (attempt {}/{}) after {:?}: {}",
                            description,
                            attempt + 1,
                            self.max_attempts,
                            self.delay,
                            e
                        );

                        sleeper.sleep(self.delay).await;
                        attempt += 1;
                    }
                },
            }
        }
    }
}
