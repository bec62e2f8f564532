//! Error types for the GetSwift client.

use crate::config::ConfigError;
use crate::error_code::ErrorCode;
use crate::response::{ApiResponse, TransportError};
use crate::validation::ValidationError;
use thiserror::Error;


/// A failed exchange with the API.
///
/// Carries the message chosen from the response, the classified error code,
/// and the exchange metadata. A transport failure is kept as the source.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ServiceError {
    message: String,
    code: ErrorCode,
    status: u16,
    response: Option<ApiResponse>,
    #[source]
    source: Option<TransportError>,
}

impl ServiceError {
    /// Creates a service error.
    pub fn new(
        message: impl Into<String>,
        code: ErrorCode,
        status: u16,
        response: Option<ApiResponse>,
        source: Option<TransportError>,
    ) -> Self {
        Self {
            message: message.into(),
            code,
            status,
            response,
            source,
        }
    }

    /// Error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Classified error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// HTTP status, 0 when no response was received.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Exchange metadata.
    #[must_use]
    pub fn response(&self) -> Option<&ApiResponse> {
        self.response.as_ref()
    }

    /// Returns true when no HTTP response was received.
    #[must_use]
    pub fn is_transport_failure(&self) -> bool {
        self.status == 0
    }
}

/// Client error types.
#[derive(Debug, Error)]
pub enum Error {
    /// The API rejected the request or could not be reached.
    #[error("API error: {0}")]
    Service(Box<ServiceError>),

    /// A local value failed validation before any request was sent.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The call was cancelled before a response arrived.
    #[error("Request cancelled")]
    Cancelled,
}

impl Error {
    /// The service error, if this is one.
    #[must_use]
    pub fn as_service(&self) -> Option<&ServiceError> {
        match self {
            Self::Service(error) => Some(error),
            _ => None,
        }
    }

    /// The classified code of a service error.
    #[must_use]
    pub fn code(&self) -> Option<ErrorCode> {
        self.as_service().map(ServiceError::code)
    }
}

impl From<ServiceError> for Error {
    fn from(error: ServiceError) -> Self {
        Self::Service(Box::new(error))
    }
}
