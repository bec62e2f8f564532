//! Interpretation of raw HTTP responses into typed results.
//!
//! A 2xx response is deserialized into the requested model and the exchange
//! metadata bound to it. Anything else becomes a [`ServiceError`] whose code
//! comes from the structured payload of a 400 response.

use crate::error::{Error, ServiceError};
use crate::error_code::ErrorCode;
use crate::types::ErrorMessage;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use url::Url;


/// Error raised by a transport while exchanging a request.
pub type TransportError = Arc<dyn std::error::Error + Send + Sync>;

/// Status of a 400 response, the only one carrying a structured error.
pub const BAD_REQUEST: u16 = 400;

/// Status of a rate-limited response, whose body is the error message.
pub const TOO_MANY_REQUESTS: u16 = 429;

/// Response as produced by a transport.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    /// HTTP status, 0 when no response was received.
    pub status: u16,
    /// Reason phrase.
    pub status_description: Option<String>,
    /// Response body.
    pub body: String,
    /// `Content-Type` header.
    pub content_type: Option<String>,
    /// Body length reported by the server.
    pub content_length: Option<u64>,
    /// Response headers.
    pub headers: Vec<(String, String)>,
    /// Final URL after redirects.
    pub uri: Option<Url>,
    /// Transport failure, if any.
    pub error: Option<TransportError>,
}

impl RawResponse {
    /// Creates a response with a status and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            ..Default::default()
        }
    }

    /// Creates the response of an exchange that failed before a status
    /// was received.
    pub fn failed(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self {
            error: Some(Arc::new(error)),
            ..Default::default()
        }
    }

    /// Returns true for a 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Exchange metadata bound to every returned model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status, 0 when no response was received.
    pub status: u16,
    /// Reason phrase.
    pub status_description: Option<String>,
    /// Raw body.
    pub content: String,
    /// Body length reported by the server.
    pub content_length: Option<u64>,
    /// `Content-Type` header.
    pub content_type: Option<String>,
    /// Response headers.
    pub headers: Vec<(String, String)>,
    /// Final URL after redirects.
    pub uri: Option<Url>,
    /// Classified error, `None` on success.
    pub error_code: ErrorCode,
}

impl ApiResponse {
    fn from_raw(raw: &RawResponse, error_code: ErrorCode) -> Self {
        Self {
            status: raw.status,
            status_description: raw.status_description.clone(),
            content: raw.body.clone(),
            content_length: raw.content_length,
            content_type: raw.content_type.clone(),
            headers: raw.headers.clone(),
            uri: raw.uri.clone(),
            error_code,
        }
    }
}

/// Models that keep the metadata of the exchange that produced them.
pub trait BindResponse {
    /// Stores the exchange metadata.
    fn bind_response(&mut self, response: ApiResponse);
}

/// A model an API call can return.
pub trait ResponseModel: DeserializeOwned + BindResponse {
    /// Whether a bare JSON array body is wrapped as `{"data": [...]}`.
    const WRAPS_BARE_ARRAY: bool = false;
}

/// Turns a raw response into the requested model or a [`ServiceError`].
///
/// # Errors
/// Returns [`Error::Service`] for any non-2xx status and [`Error::Json`]
/// when a successful body does not match the model.
pub fn interpret<T: ResponseModel>(raw: RawResponse) -> Result<T, Error> {
    if !raw.is_success() {
        return Err(classify(raw).into());
    }

    let mut value: Value = serde_json::from_str(&raw.body)?;
    if T::WRAPS_BARE_ARRAY && value.is_array() {
        value = serde_json::json!({ "data": value });
    }

    let mut model: T = serde_json::from_value(value)?;
    model.bind_response(ApiResponse::from_raw(&raw, ErrorCode::None));
    Ok(model)
}

/// Builds the error for a failed exchange.
#[must_use]
pub fn classify(raw: RawResponse) -> ServiceError {
    let payload = if raw.status == BAD_REQUEST {
        serde_json::from_str::<ErrorMessage>(&raw.body).ok()
    } else {
        None
    };
    let code = ErrorCode::from_payload(payload.as_ref());

    let rate_limited = (raw.status == TOO_MANY_REQUESTS).then(|| raw.body.clone());
    let transport = raw.error.as_ref().map(ToString::to_string);
    let message = [
        rate_limited,
        payload.and_then(|p| p.message),
        transport,
        raw.status_description.clone(),
    ]
    .into_iter()
    .flatten()
    .find(|text| !text.trim().is_empty())
    .unwrap_or_else(|| format!("HTTP {}", raw.status));

    let response = ApiResponse::from_raw(&raw, code);
    ServiceError::new(message, code, raw.status, Some(response), raw.error)
}
