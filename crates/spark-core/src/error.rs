//! Centralized error types for calls against the donation API.

use thiserror::Error;

/// Message shown to users for transport-level failures.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";

/// Error returned by every donation API operation.
///
/// Local validation failures never reach the network. Remote failures are
/// split into HTTP errors (the server answered with a non-success status)
/// and network errors (no usable answer at all).
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for donation API operations.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build an HTTP error from a non-success response body.
    ///
    /// A JSON object carrying a string `detail` field supplies the message;
    /// anything else falls back to `HTTP error! status: <code>`.
    pub fn from_error_body(status: u16, body: &[u8]) -> Self {
        let detail = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("detail")
                    .and_then(|detail| detail.as_str())
                    .map(str::to_string)
            });

        let message = detail.unwrap_or_else(|| format!("HTTP error! status: {}", status));
        Self::Http { status, message }
    }

    /// HTTP status carried by the error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the error was raised before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether editing the input or trying again can succeed. Local
    /// failures (unwritable output, bad settings) repeat on every attempt.
    pub fn is_retryable_by_user(&self) -> bool {
        match self {
            Self::Validation(_) | Self::Http { .. } | Self::Network { .. } | Self::Decode(_) => true,
            Self::Io(_) | Self::Config(_) => false,
        }
    }

    /// Text suitable for showing to a donor or reviewer.
    pub fn display_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Http { message, .. } => message.clone(),
            Self::Network { .. } => NETWORK_ERROR_MESSAGE.to_string(),
            Self::Decode(_) => "Unexpected response from the donation service".to_string(),
            Self::Io(e) => format!("Could not save file: {}", e),
            Self::Config(msg) => msg.clone(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Network {
                message: e.to_string(),
            }
        }
    }
}
