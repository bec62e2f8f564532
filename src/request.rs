//! Translation of typed inputs into transport-neutral requests.

use crate::error::Error;
use crate::expandable;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

#[cfg(test)]
mod tests;

/// Wire name of the API key slot in a serialized input.
pub const API_KEY_FIELD: &str = "apiKey";

/// Content type of every request.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP verb of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Read; the input travels in the query string.
    Get,
    /// Write; the input travels in the body.
    Post,
}

impl HttpMethod {
    /// Upper-case verb.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Path relative to the API base URL, without leading slash.
    pub path: String,
    /// Request headers.
    pub headers: Vec<(String, String)>,
    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,
    /// JSON body.
    pub body: Option<String>,
}

impl ApiRequest {
    /// Returns the value of the first query parameter named `name`.
    #[must_use]
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// API keys that fill an input's empty key slot, highest precedence first
/// after the input itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApiKeys {
    /// Key set on the resource service.
    pub service: Option<Uuid>,
    /// Default key from configuration.
    pub configured: Option<Uuid>,
}

impl ApiKeys {
    /// Key used when the input carries none.
    #[must_use]
    pub fn fallback(&self) -> Option<Uuid> {
        self.service.or(self.configured)
    }
}

/// Builds requests for one resource service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBuilder {
    service_path: String,
}

impl RequestBuilder {
    /// Creates a builder for the service rooted at `service_path`.
    pub fn new(service_path: impl Into<String>) -> Self {
        Self {
            service_path: service_path.into().trim_matches('/').to_string(),
        }
    }

    /// Path of the service.
    #[must_use]
    pub fn service_path(&self) -> &str {
        &self.service_path
    }

    /// Joins the service path with a resource, which may be empty.
    #[must_use]
    pub fn path_for(&self, resource: &str) -> String {
        let resource = resource.trim_matches('/');
        match (self.service_path.is_empty(), resource.is_empty()) {
            (_, true) => self.service_path.clone(),
            (true, false) => resource.to_string(),
            (false, false) => format!("{}/{}", self.service_path, resource),
        }
    }

    /// Builds the request for `input`.
    ///
    /// The input is serialized to a JSON object and its `apiKey` slot filled
    /// from `keys` when empty. GET requests carry every field as a query
    /// parameter with expandable flags rewritten to `expand[n]`; POST
    /// requests carry the object as the body.
    ///
    /// # Errors
    /// Returns [`Error::Json`] if the input does not serialize to a JSON object.
    pub fn build<I: Serialize + ?Sized>(
        &self,
        resource: &str,
        method: HttpMethod,
        input: Option<&I>,
        keys: ApiKeys,
    ) -> Result<ApiRequest, Error> {
        let mut request = ApiRequest {
            method,
            path: self.path_for(resource),
            headers: vec![("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string())],
            query: Vec::new(),
            body: None,
        };

        let Some(input) = input else {
            return Ok(request);
        };

        let mut data = to_object(input)?;
        if !data.contains_key(API_KEY_FIELD)
            && let Some(key) = keys.fallback()
        {
            data.insert(API_KEY_FIELD.to_string(), Value::String(key.to_string()));
        }

        match method {
            HttpMethod::Get => {
                let expands = expandable::take_parameters(&mut data);
                request.query = data
                    .into_iter()
                    .filter_map(|(key, value)| query_text(value).map(|text| (key, text)))
                    .chain(expands)
                    .collect();
            }
            HttpMethod::Post => {
                request.body = Some(serde_json::to_string(&Value::Object(data))?);
            }
        }

        Ok(request)
    }
}

fn to_object<I: Serialize + ?Sized>(input: &I) -> Result<Map<String, Value>, Error> {
    match serde_json::to_value(input)? {
        Value::Object(map) => Ok(map),
        other => Err(Error::Json(<serde_json::Error as serde::ser::Error>::custom(
            format!("request input must serialize to an object, got {other}"),
        ))),
    }
}

/// Text of a query parameter: strings verbatim, other values as compact JSON.
fn query_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}
