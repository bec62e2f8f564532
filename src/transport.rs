//! HTTP transport and call cancellation.

use crate::config::GetSwiftConfig;
use crate::error::Error;
use crate::request::{ApiRequest, HttpMethod};
use crate::response::RawResponse;
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::redirect::Policy;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;
use url::Url;

#[cfg(test)]
mod tests;

const MAX_REDIRECTS: usize = 10;

/// Exchanges requests with the API.
///
/// A transport reports connection and protocol failures inside the
/// [`RawResponse`] (status 0 with `error` set). The `Err` path is reserved
/// for requests that cannot be attempted at all, such as an unusable URL.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a request, blocking the current thread.
    ///
    /// # Errors
    /// Returns error if the request cannot be attempted.
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, Error>;

    /// Sends a request asynchronously.
    ///
    /// # Errors
    /// Returns error if the request cannot be attempted.
    async fn send_async(&self, request: &ApiRequest) -> Result<RawResponse, Error>;
}

/// `reqwest`-backed transport.
///
/// The blocking client is built on first blocking use; blocking calls must
/// not be made from inside an async runtime.
#[derive(Debug)]
pub struct HttpTransport {
    base_url: Url,
    timeout: Duration,
    proxy: Option<String>,
    client: reqwest::Client,
    blocking: OnceLock<reqwest::blocking::Client>,
}

impl HttpTransport {
    /// Creates a transport from configuration.
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &GetSwiftConfig) -> Result<Self, Error> {
        config.validate()?;

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout())
            .redirect(Policy::limited(MAX_REDIRECTS));
        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy.as_str())?);
        }

        Ok(Self {
            base_url: config.base_url()?,
            timeout: config.timeout(),
            proxy: config.proxy.clone(),
            client: builder.build()?,
            blocking: OnceLock::new(),
        })
    }

    /// API root requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of a request, query included.
    ///
    /// # Errors
    /// Returns [`Error::InvalidUrl`] if the path cannot be joined.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url, Error> {
        let mut url = self.base_url.join(&request.path)?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }

    fn blocking_client(&self) -> Result<&reqwest::blocking::Client, Error> {
        if let Some(client) = self.blocking.get() {
            return Ok(client);
        }

        let mut builder = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .redirect(Policy::limited(MAX_REDIRECTS));
        if let Some(proxy) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy.as_str())?);
        }
        let client = builder.build()?;

        Ok(self.blocking.get_or_init(|| client))
    }
}

fn method_of(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
    }
}

/// Response metadata shared by the blocking and async readers.
fn response_head(
    status: reqwest::StatusCode,
    headers: &HeaderMap,
    content_length: Option<u64>,
    url: &Url,
) -> RawResponse {
    RawResponse {
        status: status.as_u16(),
        status_description: status.canonical_reason().map(str::to_string),
        content_type: headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        content_length,
        headers: headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|text| (name.as_str().to_string(), text.to_string()))
            })
            .collect(),
        uri: Some(url.clone()),
        ..Default::default()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, Error> {
        let url = self.url_for(request)?;
        debug!(method = %request.method, %url, "sending blocking request");

        let mut builder = self.blocking_client()?.request(method_of(request.method), url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = match builder.send() {
            Ok(response) => response,
            Err(e) => return Ok(RawResponse::failed(e)),
        };

        let mut raw = response_head(
            response.status(),
            response.headers(),
            response.content_length(),
            response.url(),
        );
        match response.text() {
            Ok(body) => raw.body = body,
            Err(e) => raw.error = Some(Arc::new(e)),
        }
        Ok(raw)
    }

    async fn send_async(&self, request: &ApiRequest) -> Result<RawResponse, Error> {
        let url = self.url_for(request)?;
        debug!(method = %request.method, %url, "sending request");

        let mut builder = self.client.request(method_of(request.method), url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return Ok(RawResponse::failed(e)),
        };

        let mut raw = response_head(
            response.status(),
            response.headers(),
            response.content_length(),
            response.url(),
        );
        match response.text().await {
            Ok(body) => raw.body = body,
            Err(e) => raw.error = Some(Arc::new(e)),
        }
        Ok(raw)
    }
}

/// Signals cancellation to in-flight async calls.
///
/// Clones share the same signal. Once cancelled a token stays cancelled.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    sender: Arc<watch::Sender<bool>>,
}

impl CancellationToken {
    /// Creates a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Cancels every call observing this token.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    /// Returns true once [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    /// Completes when the token is cancelled.
    pub async fn cancelled(&self) {
        let mut receiver = self.sender.subscribe();
        // the sender lives in self, so the channel cannot close while waiting
        let _ = receiver.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
