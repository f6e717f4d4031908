//! Error types for the client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, OpenAIError>;

/// Raised at builder finalization when a required field was never set.
///
/// The message names the missing field ("role is required") so the failure is
/// actionable at the call site. This is a programmer error, not a retryable
/// condition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} is required")]
pub struct ValidationError {
    /// Wire name of the missing field
    pub field: &'static str,
}

impl ValidationError {
    /// Missing required field
    pub fn missing(field: &'static str) -> Self {
        Self { field }
    }
}

/// Raised when inbound wire data lacks a required field or carries a value
/// incompatible with the declared type.
#[derive(Error, Debug)]
#[error("failed to deserialize {entity}: {source}")]
pub struct DeserializationError {
    /// Entity that was being decoded
    pub entity: &'static str,
    /// Underlying decode failure
    #[source]
    pub source: serde_json::Error,
}

impl DeserializationError {
    /// Wrap a serde failure with the entity being decoded
    pub fn new(entity: &'static str, source: serde_json::Error) -> Self {
        Self { entity, source }
    }
}

/// Error body returned by the API inside the `{"error": {...}}` envelope
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable message
    pub message: String,
    /// Error type (e.g. "invalid_request_error")
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    /// Parameter the error refers to
    pub param: Option<String>,
    /// Machine-readable code
    pub code: Option<String>,
}

/// Main error type for the client
#[derive(Error, Debug)]
pub enum OpenAIError {
    /// Request construction errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Wire decode errors
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] DeserializationError),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// IO errors (reading a file-backed payload)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error response from the API
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message from the error envelope, or the raw body
        message: String,
        /// Decoded error body when the envelope parsed
        body: Option<ApiErrorBody>,
    },

    /// Request exhausted its retry budget
    #[error("Timeout error: {0}")]
    Timeout(String),
}

impl OpenAIError {
    /// Whether retrying the same request can succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            OpenAIError::HttpClient(e) => e.is_timeout() || e.is_connect(),
            OpenAIError::Api { status, .. } => *status == 429 || *status >= 500,
            OpenAIError::Timeout(_) => true,
            _ => false,
        }
    }

    /// Whether the API rejected the credentials
    pub fn is_auth_error(&self) -> bool {
        matches!(self, OpenAIError::Api { status, .. } if *status == 401 || *status == 403)
    }
}
