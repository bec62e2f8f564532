//! Shared client executing requests for the resource services.

use crate::config::GetSwiftConfig;
use crate::error::Error;
use crate::request::{ApiKeys, ApiRequest, HttpMethod, RequestBuilder};
use crate::response::{RawResponse, ResponseModel, interpret};
use crate::transport::{CancellationToken, HttpTransport, Transport};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;


/// A call against one resource of a service.
pub struct Call<'a, I: ?Sized> {
    /// Builder of the owning service.
    pub builder: &'a RequestBuilder,
    /// Resource below the service path; empty for the service root.
    pub resource: &'a str,
    /// HTTP verb.
    pub method: HttpMethod,
    /// Typed input, if any.
    pub input: Option<&'a I>,
    /// Key set on the owning service.
    pub service_key: Option<Uuid>,
}

/// Client for the GetSwift API.
///
/// Cheap to clone; clones share configuration and transport.
#[derive(Clone)]
pub struct ServiceClient {
    config: Arc<GetSwiftConfig>,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ServiceClient {
    /// Creates a client using the HTTP transport.
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: GetSwiftConfig) -> Result<Self, Error> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client using the given transport.
    pub fn with_transport(config: GetSwiftConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    /// Creates a client for `base_url` with otherwise default settings.
    ///
    /// # Errors
    /// Returns error if the URL is invalid or the HTTP client cannot be built.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::new(GetSwiftConfig::default().with_base_url(base_url))
    }

    /// Client configuration.
    #[must_use]
    pub fn config(&self) -> &GetSwiftConfig {
        &self.config
    }

    /// Builds the request of a call.
    ///
    /// # Errors
    /// Returns error if the input cannot be serialized.
    pub fn prepare<I: Serialize + ?Sized>(&self, call: &Call<'_, I>) -> Result<ApiRequest, Error> {
        let keys = ApiKeys {
            service: call.service_key,
            configured: self.config.api_key,
        };
        call.builder
            .build(call.resource, call.method, call.input, keys)
    }

    /// Executes a call, blocking the current thread.
    ///
    /// # Errors
    /// Returns [`Error::Service`] if the API rejects the call or cannot be
    /// reached, or a local error if the request cannot be built.
    pub fn execute<I, T>(&self, call: Call<'_, I>) -> Result<T, Error>
    where
        I: Serialize + ?Sized,
        T: ResponseModel,
    {
        let request = self.prepare(&call)?;
        debug!(method = %request.method, path = %request.path, "dispatching request");

        let raw = self.transport.send(&request)?;
        Self::finish(&request, raw)
    }

    /// Executes a call asynchronously.
    ///
    /// # Errors
    /// Returns [`Error::Service`] if the API rejects the call or cannot be
    /// reached, or a local error if the request cannot be built.
    pub async fn execute_async<I, T>(&self, call: Call<'_, I>) -> Result<T, Error>
    where
        I: Serialize + Sync + ?Sized,
        T: ResponseModel,
    {
        let request = self.prepare(&call)?;
        debug!(method = %request.method, path = %request.path, "dispatching request");

        let raw = self.transport.send_async(&request).await?;
        Self::finish(&request, raw)
    }

    /// Executes a call asynchronously unless `token` is cancelled first.
    ///
    /// On cancellation the in-flight exchange is dropped and no response is
    /// interpreted.
    ///
    /// # Errors
    /// Returns [`Error::Cancelled`] if the token fires before the response
    /// arrives, otherwise as [`execute_async`](Self::execute_async).
    pub async fn execute_cancellable<I, T>(
        &self,
        call: Call<'_, I>,
        token: &CancellationToken,
    ) -> Result<T, Error>
    where
        I: Serialize + Sync + ?Sized,
        T: ResponseModel,
    {
        let request = self.prepare(&call)?;
        if token.is_cancelled() {
            info!(path = %request.path, "request cancelled before dispatch");
            return Err(Error::Cancelled);
        }
        debug!(method = %request.method, path = %request.path, "dispatching request");

        let raw = tokio::select! {
            biased;
            () = token.cancelled() => {
                info!(path = %request.path, "request cancelled");
                return Err(Error::Cancelled);
            }
            raw = self.transport.send_async(&request) => raw?,
        };
        Self::finish(&request, raw)
    }

    fn finish<T: ResponseModel>(request: &ApiRequest, raw: RawResponse) -> Result<T, Error> {
        let status = raw.status;
        let result = interpret(raw);
        match &result {
            Ok(_) => debug!(path = %request.path, status, "request succeeded"),
            Err(Error::Service(error)) => warn!(
                path = %request.path,
                status,
                code = %error.code(),
                message = error.message(),
                "request failed"
            ),
            Err(e) => warn!(path = %request.path, status, error = %e, "response not understood"),
        }
        result
    }
}
