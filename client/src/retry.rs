//! Retry logic with linear backoff for handling transient failures.
//!
//! Transient failures (server errors, connectivity loss, timeouts) are
//! retried a bounded number of times with a linearly growing delay between
//! attempts. Terminal failures (client errors) are surfaced immediately.
//!
//! # Example
//!
//! ```rust
//! use eventdesk_client::retry::{RetryPolicy, retry_with_policy};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), String> {
//! let policy = RetryPolicy::new()
//!     .with_max_attempts(5)
//!     .with_base_delay(Duration::from_millis(100));
//!
//! let result = retry_with_policy(&policy, || async {
//!     // Your fallible operation here
//!     Ok::<_, String>(42)
//! }, |err: &String| err.contains("transient")).await?;
//!
//! assert_eq!(result, 42);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use tokio::time::sleep;

/// Retry policy configuration for linear backoff.
///
/// # Default Values
///
/// - `max_attempts`: 3 (including the initial attempt)
/// - `base_delay`: 1 second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the initial one
    pub max_attempts: u32,

    /// Base delay; the wait after attempt `n` is `base_delay * n`
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Create a new retry policy with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }

    /// Set the maximum number of attempts.
    #[must_use]
    pub const fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set the base delay.
    #[must_use]
    pub const fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Calculate the delay inserted after a given failed attempt (1-indexed).
    ///
    /// Uses linear backoff: `delay = base_delay * attempt`, so with the
    /// default base delay the waits are 1s, 2s, 3s, ...
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }

    /// Check whether another attempt is allowed after `attempt` completed
    /// attempts.
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Retry an async operation, consulting a predicate after each failure.
///
/// Attempts are strictly sequential; the backoff delay is slept between
/// them. Errors for which `is_retryable` returns `false` are surfaced
/// immediately. When attempts are exhausted, the last error is returned
/// untouched.
///
/// # Errors
///
/// Returns the first non-retryable error, or the last error once
/// `policy.max_attempts` attempts have failed.
pub async fn retry_with_policy<F, Fut, T, E, P>(
    policy: &RetryPolicy,
    mut operation: F,
    is_retryable: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let mut attempt: u32 = 1;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    tracing::info!(attempt, "operation succeeded after retry");
                }
                return Ok(result);
            }
            Err(err) => {
                if !is_retryable(&err) {
                    tracing::warn!(
                        error = %err,
                        "error is not retryable, failing immediately"
                    );
                    return Err(err);
                }

                if !policy.should_retry(attempt) {
                    tracing::error!(
                        attempt,
                        error = %err,
                        "operation failed after max attempts"
                    );
                    return Err(err);
                }

                let delay = policy.delay_for_attempt(attempt);
                tracing::warn!(
                    attempt,
                    delay_ms = delay.as_millis(),
                    error = %err,
                    "operation failed, retrying..."
                );

                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_linear_delay_calculation() {
        let policy = RetryPolicy::new().with_base_delay(Duration::from_millis(1000));

        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(2000));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(3000));
    }

    #[test]
    fn test_should_retry_respects_ceiling() {
        let policy = RetryPolicy::new().with_max_attempts(3);

        assert!(policy.should_retry(1));
        assert!(policy.should_retry(2));
        assert!(!policy.should_retry(3));
    }

    #[tokio::test]
    async fn test_succeeds_on_first_attempt() {
        let policy = RetryPolicy::default();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);

        let result = retry_with_policy(
            &policy,
            || {
                let c = Arc::clone(&counter_clone);
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>(42)
                }
            },
            |_| true,
        )
        .await;

        assert_eq!(result, Ok(42));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_transient_failures() {
        let policy = RetryPolicy::new().with_base_delay(Duration::from_millis(10));
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);

        let result = retry_with_policy(
            &policy,
            || {
                let c = Arc::clone(&counter_clone);
                async move {
                    let attempt = c.fetch_add(1, Ordering::SeqCst);
                    if attempt < 2 {
                        Err(format!("attempt {attempt} failed"))
                    } else {
                        Ok(42)
                    }
                }
            },
            |_| true,
        )
        .await;

        assert_eq!(result, Ok(42));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausts_attempts_and_surfaces_last_error() {
        let policy = RetryPolicy::new().with_base_delay(Duration::from_millis(10));
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);

        let result = retry_with_policy(
            &policy,
            || {
                let c = Arc::clone(&counter_clone);
                async move {
                    let attempt = c.fetch_add(1, Ordering::SeqCst);
                    Err::<i32, _>(format!("attempt {attempt} failed"))
                }
            },
            |_| true,
        )
        .await;

        assert_eq!(result, Err("attempt 2 failed".to_owned()));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_linear_backoff_timing() {
        // 3 attempts with base 1000ms: waits ~1000ms then ~2000ms between
        // attempts, 3000ms of virtual time total.
        let policy = RetryPolicy::new().with_base_delay(Duration::from_millis(1000));
        let started = tokio::time::Instant::now();

        let result = retry_with_policy(
            &policy,
            || async { Err::<i32, _>("persistent failure".to_owned()) },
            |_| true,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(started.elapsed(), Duration::from_millis(3000));
    }

    #[tokio::test]
    async fn test_non_retryable_error_fails_immediately() {
        let policy = RetryPolicy::default();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);

        let result = retry_with_policy(
            &policy,
            || {
                let c = Arc::clone(&counter_clone);
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err::<i32, _>("permanent error".to_owned())
                }
            },
            |err: &String| err.contains("transient"),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
