//! Retry strategy for discovery fetches.

use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

/// Creates an exponential backoff retry strategy.
///
/// Returns a retry strategy configured with:
/// - Initial delay: `RETRY_INITIAL_DELAY_MS` milliseconds
/// - Growth: multiplied by `RETRY_FACTOR` on each retry
/// - Maximum delay: `RETRY_MAX_DELAY_SECS` seconds
/// - Maximum attempts: `RETRY_MAX_ATTEMPTS`
///
/// Only discovery fetches (CT feed, shared-nameserver API) are retried. Check
/// probes are never retried because their failure is the signal.
pub fn get_retry_strategy() -> impl Iterator<Item = Duration> {
    // tokio-retry yields factor * base^n, so the base is the growth rate
    ExponentialBackoff::from_millis(crate::config::RETRY_FACTOR)
        .factor(crate::config::RETRY_INITIAL_DELAY_MS / crate::config::RETRY_FACTOR)
        .max_delay(Duration::from_secs(crate::config::RETRY_MAX_DELAY_SECS))
        .take(crate::config::RETRY_MAX_ATTEMPTS)
}
