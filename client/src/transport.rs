//! Timeout-bounded request transport.
//!
//! Wraps the HTTP primitive so that every attempt is bounded by a single
//! timer. Dropping the in-flight future on expiry aborts the underlying
//! request, so no attempt can outlive its timer.

use std::time::Duration;

use crate::error::ApiError;

/// Send a request, aborting it if it does not settle within `timeout`.
///
/// An elapsed timer surfaces as [`ApiError::Timeout`]; a transport failure
/// before any response existed surfaces as [`ApiError::Network`]. HTTP error
/// statuses are NOT errors at this layer; classification happens in the
/// resource client once the response body has been read.
///
/// # Errors
///
/// Returns [`ApiError::Timeout`] when the timer fires first, or
/// [`ApiError::Network`] when the transport itself fails.
pub async fn send_with_timeout(
    request: reqwest::RequestBuilder,
    timeout: Duration,
) -> Result<reqwest::Response, ApiError> {
    match tokio::time::timeout(timeout, request.send()).await {
        Ok(Ok(response)) => Ok(response),
        Ok(Err(err)) => Err(ApiError::network(err.to_string())),
        Err(_elapsed) => Err(ApiError::timeout()),
    }
}
