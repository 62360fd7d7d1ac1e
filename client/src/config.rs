//! Client configuration.
//!
//! Configuration is constructed explicitly and handed to the client at
//! application start. Business logic never reads the process environment on
//! its own; [`ClientConfig::from_env`] exists as a thin convenience
//! constructor for binaries.

use std::time::Duration;

use thiserror::Error;

use crate::retry::RetryPolicy;

/// Environment variable consulted by [`ClientConfig::from_env`].
pub const BASE_URL_VAR: &str = "EVENTDESK_BASE_URL";

/// Errors that can occur while constructing a client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing `EVENTDESK_BASE_URL` environment variable
    #[error("Missing EVENTDESK_BASE_URL environment variable")]
    MissingBaseUrl,

    /// The underlying HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Configuration for [`ApiClient`](crate::ApiClient) instances.
///
/// # Default Values
///
/// - `timeout`: 10 seconds per attempt
/// - `retry`: 3 attempts, 1 second base delay (linear backoff)
/// - `poll_interval`: 30 seconds
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the platform API, stored without a trailing slash
    pub base_url: String,

    /// Per-attempt request timeout
    pub timeout: Duration,

    /// Retry policy applied to transient failures
    pub retry: RetryPolicy,

    /// Interval used by live-activity polling subscriptions
    pub poll_interval: Duration,
}

impl ClientConfig {
    /// Create a configuration for the given base URL with default settings.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
            poll_interval: Duration::from_secs(30),
        }
    }

    /// Create a configuration from the `EVENTDESK_BASE_URL` environment
    /// variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingBaseUrl`] if the variable is unset. The
    /// absence of a base URL is a hard configuration error, never silently
    /// defaulted.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_base_url(std::env::var(BASE_URL_VAR).ok())
    }

    fn from_base_url(base_url: Option<String>) -> Result<Self, ConfigError> {
        base_url
            .filter(|url| !url.is_empty())
            .map(Self::new)
            .ok_or(ConfigError::MissingBaseUrl)
    }

    /// Set the per-attempt timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry policy.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the polling interval for live-activity subscriptions.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}
