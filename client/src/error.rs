//! Error taxonomy for the platform API client.
//!
//! Every failure is classified exactly once, at the normalization boundary.
//! Downstream code matches on [`ApiError`] variants and never re-inspects
//! raw response payloads.

use thiserror::Error;

/// Errors produced by the resource client.
///
/// One variant per taxonomy entry. [`ApiError::code`] yields the canonical
/// string form, [`ApiError::is_retryable`] the retry classification. The
/// `Display` form is the normalized user-facing message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server rejected the request as invalid (HTTP 400)
    #[error("{message}")]
    Validation {
        /// Normalized user-facing message
        message: String,
    },

    /// Authentication is missing or invalid (HTTP 401)
    #[error("{message}")]
    Unauthorized {
        /// Normalized user-facing message
        message: String,
    },

    /// The requested resource does not exist (HTTP 404)
    #[error("{message}")]
    NotFound {
        /// Normalized user-facing message
        message: String,
    },

    /// The server failed to process the request (HTTP 5xx, or status 0
    /// treated as a connectivity failure)
    #[error("{message}")]
    Server {
        /// Status code reported by the server
        status: u16,
        /// Normalized user-facing message
        message: String,
    },

    /// The attempt was aborted after exceeding the configured timeout
    #[error("{message}")]
    Timeout {
        /// Normalized user-facing message
        message: String,
    },

    /// The transport failed before a response existed
    #[error("{message}")]
    Network {
        /// Normalized user-facing message
        message: String,
    },

    /// A 2xx response carried a body that could not be decoded
    #[error("{message}")]
    Decode {
        /// Normalized user-facing message
        message: String,
    },

    /// A failure that fits no other classification
    #[error("{message}")]
    Unknown {
        /// Status code, when one was observed at all
        status: Option<u16>,
        /// Normalized user-facing message
        message: String,
    },
}

impl ApiError {
    /// Classify an HTTP status code into an error variant.
    ///
    /// A server-supplied message takes precedence over the canonical table;
    /// the table keeps the error surface consistent when the backend sends
    /// nothing usable.
    #[must_use]
    pub fn from_status(status: u16, server_message: Option<String>) -> Self {
        let message = |fallback: &str| server_message.clone().unwrap_or_else(|| fallback.to_owned());

        match status {
            400 => Self::Validation {
                message: message("Validation error"),
            },
            401 => Self::Unauthorized {
                message: message("Unauthorized"),
            },
            404 => Self::NotFound {
                message: message("Resource not found"),
            },
            0 | 500..=599 => Self::Server {
                status,
                message: message("Server error"),
            },
            _ => Self::Unknown {
                status: Some(status),
                message: message("Unknown error"),
            },
        }
    }

    /// Create a timeout error.
    #[must_use]
    pub fn timeout() -> Self {
        Self::Timeout {
            message: "Request timed out".to_owned(),
        }
    }

    /// Create a network error from a transport failure.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a decode error for a malformed success body.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an unclassified error with no observed status.
    #[must_use]
    pub fn ambiguous(message: impl Into<String>) -> Self {
        Self::Unknown {
            status: None,
            message: message.into(),
        }
    }

    /// Canonical string form of the taxonomy entry.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Server { .. } => "SERVER_ERROR",
            Self::Timeout { .. } => "TIMEOUT_ERROR",
            Self::Network { .. } => "NETWORK_ERROR",
            Self::Decode { .. } => "DECODE_ERROR",
            Self::Unknown { .. } => "UNKNOWN_ERROR",
        }
    }

    /// HTTP status associated with the error, when one was observed.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Validation { .. } => Some(400),
            Self::Unauthorized { .. } => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::Server { status, .. } => Some(*status),
            Self::Unknown { status, .. } => *status,
            Self::Timeout { .. } | Self::Network { .. } | Self::Decode { .. } => None,
        }
    }

    /// Whether the failure is worth retrying.
    ///
    /// Server errors, network failures, timeouts, and unclassified failures
    /// with no observed status are transient (ambiguous failures fail open
    /// toward retrying). Client errors and decode failures are terminal.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Server { .. } | Self::Network { .. } | Self::Timeout { .. } => true,
            Self::Unknown { status, .. } => status.is_none(),
            Self::Validation { .. }
            | Self::Unauthorized { .. }
            | Self::NotFound { .. }
            | Self::Decode { .. } => false,
        }
    }
}
