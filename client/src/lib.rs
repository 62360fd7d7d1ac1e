//! # Eventdesk API Client
//!
//! Typed HTTP resource client for the Eventdesk event-management platform:
//! timeout-bounded transport, linear-backoff retry, a closed error taxonomy
//! decided at the normalization boundary, and a typed endpoint surface for
//! every platform resource.
//!
//! ## Example
//!
//! ```no_run
//! use eventdesk_client::{ApiClient, ClientConfig};
//! use eventdesk_client::types::EventStatus;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Configuration is injected explicitly; from_env() exists for binaries.
//!     let client = ApiClient::new(ClientConfig::new("https://api.example.com"))?;
//!
//!     let events = client.events().list(Some(EventStatus::Active)).await?;
//!     println!("{} active events", events.data.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Guarantees
//!
//! - Exactly one success envelope or one normalized error per logical call
//! - Transient failures retried with strictly sequential, linearly spaced
//!   attempts; client errors surface immediately
//! - Every attempt is bounded by one timeout timer

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod retry;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::{ApiClient, ApiResponse};
pub use config::{BASE_URL_VAR, ClientConfig, ConfigError};
pub use error::ApiError;
pub use retry::RetryPolicy;
