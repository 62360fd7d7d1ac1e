//! The resource client: verb methods over the platform REST API.
//!
//! Composes the timeout transport, the retry policy, and the error
//! normalizer behind a uniform envelope. Network-layer retries are invisible
//! to callers except as added latency; every logical call produces exactly
//! one [`ApiResponse`] or one [`ApiError`].

use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::{ClientConfig, ConfigError};
use crate::error::ApiError;
use crate::retry::retry_with_policy;
use crate::transport::send_with_timeout;

/// Uniform success envelope returned by every platform endpoint.
///
/// Produced only for 2xx responses; everything else is normalized into an
/// [`ApiError`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Payload of the call
    pub data: T,
    /// Whether the backend reports the operation as successful
    pub success: bool,
    /// Optional human-readable detail supplied by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Error body shape the backend uses for non-2xx responses.
///
/// Parsed tolerantly: absent, empty, or non-JSON bodies all fall back to the
/// canonical message table.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP resource client for the platform API.
///
/// Holds the connection pool, the injected [`ClientConfig`], and the default
/// JSON headers applied to every request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    default_headers: HeaderMap,
}

impl ApiClient {
    /// Create a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(Self {
            http,
            config,
            default_headers,
        })
    }

    /// Create a client configured from the `EVENTDESK_BASE_URL` environment
    /// variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingBaseUrl`] if the variable is unset --
    /// before any network call is attempted.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Get the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute a GET request.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] after exhausting any retries.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>, ApiError> {
        self.request::<T, ()>(Method::GET, path, &[], None, HeaderMap::new())
            .await
    }

    /// Execute a GET request with query parameters.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] after exhausting any retries.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request::<T, ()>(Method::GET, path, query, None, HeaderMap::new())
            .await
    }

    /// Execute a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] after exhausting any retries.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, &[], Some(body), HeaderMap::new())
            .await
    }

    /// Execute a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] after exhausting any retries.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, &[], Some(body), HeaderMap::new())
            .await
    }

    /// Execute a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] after exhausting any retries.
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, path, &[], Some(body), HeaderMap::new())
            .await
    }

    /// Execute a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] after exhausting any retries.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>, ApiError> {
        self.request::<T, ()>(Method::DELETE, path, &[], None, HeaderMap::new())
            .await
    }

    /// Execute a custom request with full control over query, body, and
    /// header overrides.
    ///
    /// Per-call headers take precedence over the default JSON headers.
    /// Transient failures are retried per the configured policy, sleeping
    /// the backoff delay between strictly sequential attempts.
    ///
    /// # Errors
    ///
    /// Returns the first terminal [`ApiError`], or the last transient one
    /// once attempts are exhausted.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
        headers: HeaderMap,
    ) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.config.base_url, path);

        retry_with_policy(
            &self.config.retry,
            || self.execute_once::<T, B>(method.clone(), &url, query, body, &headers),
            ApiError::is_retryable,
        )
        .await
    }

    /// One attempt: build, send through the timeout transport, normalize.
    async fn execute_once<T, B>(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
        overrides: &HeaderMap,
    ) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut headers = self.default_headers.clone();
        for (name, value) in overrides {
            headers.insert(name, value.clone());
        }

        let mut request = self.http.request(method.clone(), url).headers(headers);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(%method, url, "sending request");
        let response = send_with_timeout(request, self.config.timeout).await?;
        let status = response.status();

        if status.is_success() {
            let bytes = response
                .bytes()
                .await
                .map_err(|e| ApiError::network(e.to_string()))?;
            serde_json::from_slice(&bytes).map_err(|e| ApiError::decode(e.to_string()))
        } else {
            let server_message = response
                .text()
                .await
                .ok()
                .and_then(|text| serde_json::from_str::<ErrorBody>(&text).ok())
                .and_then(|parsed| parsed.message);

            tracing::debug!(status = status.as_u16(), url, "request failed");
            Err(ApiError::from_status(status.as_u16(), server_message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new(ClientConfig::new("https://api.example.com"));
        assert!(client.is_ok());
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn test_default_headers_are_json() {
        let client = ApiClient::new(ClientConfig::new("https://api.example.com"))
            .expect("client construction should succeed");

        assert_eq!(
            client.default_headers.get(CONTENT_TYPE),
            Some(&HeaderValue::from_static("application/json"))
        );
        assert_eq!(
            client.default_headers.get(ACCEPT),
            Some(&HeaderValue::from_static("application/json"))
        );
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn test_envelope_deserializes_without_message() {
        let envelope: ApiResponse<Vec<u32>> =
            serde_json::from_str(r#"{"data":[1,2,3],"success":true}"#)
                .expect("envelope should parse");

        assert_eq!(envelope.data, vec![1, 2, 3]);
        assert!(envelope.success);
        assert_eq!(envelope.message, None);
    }
}
