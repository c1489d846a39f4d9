use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// Message fragments that identify connectivity failures regardless of error type.
const NETWORK_ERROR_MARKERS: &[&str] = &[
    "Failed to fetch",
    "ERR_NAME_NOT_RESOLVED",
    "NetworkError",
    "Network request failed",
    "ERR_INTERNET_DISCONNECTED",
    "ECONNREFUSED",
    "ENOTFOUND",
    "connection refused",
    "Connection refused",
];

/// Errors that can tell whether retrying might help.
pub trait Transient {
    fn is_network(&self) -> bool;
}

impl Transient for sqlx::Error {
    fn is_network(&self) -> bool {
        match self {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => true,
            other => is_network_message(&other.to_string()),
        }
    }
}

/// Substring match against the known connectivity failure messages.
pub fn is_network_message(message: &str) -> bool {
    NETWORK_ERROR_MARKERS.iter().any(|m| message.contains(m))
}

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt + 1`: base, 2x base, 4x base, ...
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(1u32 << attempt.min(16))
    }
}

/// Runs `op` until it succeeds, fails with a non-network error, or runs out of retries.
///
/// - `Ok(Some(v))`: success
/// - `Ok(None)`: every attempt failed with a network error
/// - `Err(e)`: a non-network error, returned without retrying
pub async fn retry_with_backoff<T, E, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<Option<T>, E>
where
    E: Transient + std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    for attempt in 0..=policy.max_retries {
        match op().await {
            Ok(value) => return Ok(Some(value)),
            Err(e) if e.is_network() => {
                if attempt == policy.max_retries {
                    warn!("Max retries reached for backend operation: {e}");
                    return Ok(None);
                }
                let delay = policy.delay_for(attempt);
                warn!(
                    "Backend attempt {} failed with network error, retrying after {}ms: {e}",
                    attempt + 1,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(None)
}
