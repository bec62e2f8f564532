//! Resource services: deliveries, drivers and quotes.
//!
//! Each service offers every operation in three forms: blocking, async, and
//! async with a [`CancellationToken`]. A service-level API key fills the key
//! slot of any input that does not carry its own; the configured default key
//! is used when neither is set.

use crate::client::{Call, ServiceClient};
use crate::config::GetSwiftConfig;
use crate::error::Error;
use crate::request::{HttpMethod, RequestBuilder};
use crate::transport::CancellationToken;
use crate::types::{
    ApiList, DeliveryCancelInput, DeliveryDetails, DeliveryGetInput, DeliveryListInput, Driver,
    DriverGetInput, DriverListInput, PagedApiList, QuoteCreateInput, QuoteResponse,
};
use serde::Serialize;
use uuid::Uuid;

#[cfg(test)]
mod tests;

/// State shared by every resource service.
#[derive(Debug, Clone)]
struct ServiceBase {
    client: ServiceClient,
    builder: RequestBuilder,
    api_key: Option<Uuid>,
}

impl ServiceBase {
    fn new(client: ServiceClient, service_path: &str) -> Self {
        Self {
            client,
            builder: RequestBuilder::new(service_path),
            api_key: None,
        }
    }

    fn call<'a, I: Serialize>(
        &'a self,
        resource: &'a str,
        method: HttpMethod,
        input: &'a I,
    ) -> Call<'a, I> {
        Call {
            builder: &self.builder,
            resource,
            method,
            input: Some(input),
            service_key: self.api_key,
        }
    }
}

/// Implements the key accessors every service shares.
macro_rules! service_api_key {
    ($service:ident) => {
        impl $service {
            /// Sets the service-level API key.
            #[must_use]
            pub fn with_api_key(mut self, api_key: Uuid) -> Self {
                self.base.api_key = Some(api_key);
                self
            }

            /// Replaces the service-level API key.
            pub fn set_api_key(&mut self, api_key: Option<Uuid>) {
                self.base.api_key = api_key;
            }

            /// Service-level API key.
            #[must_use]
            pub fn api_key(&self) -> Option<Uuid> {
                self.base.api_key
            }

            /// Path of the service below the API root.
            #[must_use]
            pub fn service_path(&self) -> &str {
                self.base.builder.service_path()
            }
        }
    };
}

// ============================================================================
// Deliveries
// ============================================================================

/// Fetches, lists and cancels deliveries.
#[derive(Debug, Clone)]
pub struct DeliveryService {
    base: ServiceBase,
}

service_api_key!(DeliveryService);

impl DeliveryService {
    /// Path of the service.
    pub const SERVICE_PATH: &'static str = "deliveries";
    /// Resource of the cancel operation.
    pub const CANCEL_RESOURCE: &'static str = "cancel";

    /// Creates the service with its own HTTP client.
    ///
    /// # Errors
    /// Returns error if the configuration is invalid.
    pub fn new(config: GetSwiftConfig) -> Result<Self, Error> {
        Ok(Self::with_client(ServiceClient::new(config)?))
    }

    /// Creates the service on a shared client.
    #[must_use]
    pub fn with_client(client: ServiceClient) -> Self {
        Self {
            base: ServiceBase::new(client, Self::SERVICE_PATH),
        }
    }

    /// Fetches one delivery.
    ///
    /// # Errors
    /// Returns [`Error::Service`] if the API rejects the call.
    pub fn get(&self, input: &DeliveryGetInput) -> Result<DeliveryDetails, Error> {
        let resource = input.id.to_string();
        self.base
            .client
            .execute(self.base.call(&resource, HttpMethod::Get, input))
    }

    /// Fetches one delivery asynchronously.
    ///
    /// # Errors
    /// Returns [`Error::Service`] if the API rejects the call.
    pub async fn get_async(&self, input: &DeliveryGetInput) -> Result<DeliveryDetails, Error> {
        let resource = input.id.to_string();
        self.base
            .client
            .execute_async(self.base.call(&resource, HttpMethod::Get, input))
            .await
    }

    /// Fetches one delivery unless `token` is cancelled first.
    ///
    /// # Errors
    /// Returns [`Error::Cancelled`] on cancellation, [`Error::Service`] if
    /// the API rejects the call.
    pub async fn get_async_cancellable(
        &self,
        input: &DeliveryGetInput,
        token: &CancellationToken,
    ) -> Result<DeliveryDetails, Error> {
        let resource = input.id.to_string();
        self.base
            .client
            .execute_cancellable(self.base.call(&resource, HttpMethod::Get, input), token)
            .await
    }

    /// Lists deliveries a page at a time.
    ///
    /// # Errors
    /// Returns [`Error::Service`] if the API rejects the call.
    pub fn list(
        &self,
        input: &DeliveryListInput,
    ) -> Result<PagedApiList<DeliveryDetails>, Error> {
        self.base
            .client
            .execute(self.base.call("", HttpMethod::Get, input))
    }

    /// Lists deliveries asynchronously.
    ///
    /// # Errors
    /// Returns [`Error::Service`] if the API rejects the call.
    pub async fn list_async(
        &self,
        input: &DeliveryListInput,
    ) -> Result<PagedApiList<DeliveryDetails>, Error> {
        self.base
            .client
            .execute_async(self.base.call("", HttpMethod::Get, input))
            .await
    }

    /// Lists deliveries unless `token` is cancelled first.
    ///
    /// # Errors
    /// Returns [`Error::Cancelled`] on cancellation, [`Error::Service`] if
    /// the API rejects the call.
    pub async fn list_async_cancellable(
        &self,
        input: &DeliveryListInput,
        token: &CancellationToken,
    ) -> Result<PagedApiList<DeliveryDetails>, Error> {
        self.base
            .client
            .execute_cancellable(self.base.call("", HttpMethod::Get, input), token)
            .await
    }

    /// Cancels a delivery.
    ///
    /// # Errors
    /// Returns [`Error::Service`] if the API rejects the call, for example
    /// with [`ErrorCode::Unspecified`](crate::ErrorCode::Unspecified) when the
    /// job has already finished.
    pub fn cancel(&self, input: &DeliveryCancelInput) -> Result<DeliveryDetails, Error> {
        self.base
            .client
            .execute(self.base.call(Self::CANCEL_RESOURCE, HttpMethod::Post, input))
    }

    /// Cancels a delivery asynchronously.
    ///
    /// # Errors
    /// Returns [`Error::Service`] if the API rejects the call.
    pub async fn cancel_async(
        &self,
        input: &DeliveryCancelInput,
    ) -> Result<DeliveryDetails, Error> {
        self.base
            .client
            .execute_async(self.base.call(Self::CANCEL_RESOURCE, HttpMethod::Post, input))
            .await
    }

    /// Cancels a delivery unless `token` is cancelled first.
    ///
    /// # Errors
    /// Returns [`Error::Cancelled`] on cancellation, [`Error::Service`] if
    /// the API rejects the call.
    pub async fn cancel_async_cancellable(
        &self,
        input: &DeliveryCancelInput,
        token: &CancellationToken,
    ) -> Result<DeliveryDetails, Error> {
        self.base
            .client
            .execute_cancellable(
                self.base.call(Self::CANCEL_RESOURCE, HttpMethod::Post, input),
                token,
            )
            .await
    }
}

// ============================================================================
// Drivers
// ============================================================================

/// Fetches and lists drivers.
#[derive(Debug, Clone)]
pub struct DriverService {
    base: ServiceBase,
}

service_api_key!(DriverService);

impl DriverService {
    /// Path of the service.
    pub const SERVICE_PATH: &'static str = "drivers";

    /// Creates the service with its own HTTP client.
    ///
    /// # Errors
    /// Returns error if the configuration is invalid.
    pub fn new(config: GetSwiftConfig) -> Result<Self, Error> {
        Ok(Self::with_client(ServiceClient::new(config)?))
    }

    /// Creates the service on a shared client.
    #[must_use]
    pub fn with_client(client: ServiceClient) -> Self {
        Self {
            base: ServiceBase::new(client, Self::SERVICE_PATH),
        }
    }

    /// Fetches one driver.
    ///
    /// # Errors
    /// Returns [`Error::Service`] if the API rejects the call.
    pub fn get(&self, input: &DriverGetInput) -> Result<Driver, Error> {
        let resource = input.id.to_string();
        self.base
            .client
            .execute(self.base.call(&resource, HttpMethod::Get, input))
    }

    /// Fetches one driver asynchronously.
    ///
    /// # Errors
    /// Returns [`Error::Service`] if the API rejects the call.
    pub async fn get_async(&self, input: &DriverGetInput) -> Result<Driver, Error> {
        let resource = input.id.to_string();
        self.base
            .client
            .execute_async(self.base.call(&resource, HttpMethod::Get, input))
            .await
    }

    /// Fetches one driver unless `token` is cancelled first.
    ///
    /// # Errors
    /// Returns [`Error::Cancelled`] on cancellation, [`Error::Service`] if
    /// the API rejects the call.
    pub async fn get_async_cancellable(
        &self,
        input: &DriverGetInput,
        token: &CancellationToken,
    ) -> Result<Driver, Error> {
        let resource = input.id.to_string();
        self.base
            .client
            .execute_cancellable(self.base.call(&resource, HttpMethod::Get, input), token)
            .await
    }

    /// Lists drivers.
    ///
    /// # Errors
    /// Returns [`Error::Service`] if the API rejects the call.
    pub fn list(&self, input: &DriverListInput) -> Result<ApiList<Driver>, Error> {
        self.base
            .client
            .execute(self.base.call("", HttpMethod::Get, input))
    }

    /// Lists drivers asynchronously.
    ///
    /// # Errors
    /// Returns [`Error::Service`] if the API rejects the call.
    pub async fn list_async(&self, input: &DriverListInput) -> Result<ApiList<Driver>, Error> {
        self.base
            .client
            .execute_async(self.base.call("", HttpMethod::Get, input))
            .await
    }

    /// Lists drivers unless `token` is cancelled first.
    ///
    /// # Errors
    /// Returns [`Error::Cancelled`] on cancellation, [`Error::Service`] if
    /// the API rejects the call.
    pub async fn list_async_cancellable(
        &self,
        input: &DriverListInput,
        token: &CancellationToken,
    ) -> Result<ApiList<Driver>, Error> {
        self.base
            .client
            .execute_cancellable(self.base.call("", HttpMethod::Get, input), token)
            .await
    }
}

// ============================================================================
// Quotes
// ============================================================================

/// Requests delivery price quotes.
#[derive(Debug, Clone)]
pub struct QuoteService {
    base: ServiceBase,
}

service_api_key!(QuoteService);

impl QuoteService {
    /// Path of the service.
    pub const SERVICE_PATH: &'static str = "quotes";

    /// Creates the service with its own HTTP client.
    ///
    /// # Errors
    /// Returns error if the configuration is invalid.
    pub fn new(config: GetSwiftConfig) -> Result<Self, Error> {
        Ok(Self::with_client(ServiceClient::new(config)?))
    }

    /// Creates the service on a shared client.
    #[must_use]
    pub fn with_client(client: ServiceClient) -> Self {
        Self {
            base: ServiceBase::new(client, Self::SERVICE_PATH),
        }
    }

    /// Requests a quote.
    ///
    /// # Errors
    /// Returns [`Error::Service`] if the API rejects the call.
    pub fn create(&self, input: &QuoteCreateInput) -> Result<QuoteResponse, Error> {
        self.base
            .client
            .execute(self.base.call("", HttpMethod::Post, input))
    }

    /// Requests a quote asynchronously.
    ///
    /// # Errors
    /// Returns [`Error::Service`] if the API rejects the call.
    pub async fn create_async(&self, input: &QuoteCreateInput) -> Result<QuoteResponse, Error> {
        self.base
            .client
            .execute_async(self.base.call("", HttpMethod::Post, input))
            .await
    }

    /// Requests a quote unless `token` is cancelled first.
    ///
    /// # Errors
    /// Returns [`Error::Cancelled`] on cancellation, [`Error::Service`] if
    /// the API rejects the call.
    pub async fn create_async_cancellable(
        &self,
        input: &QuoteCreateInput,
        token: &CancellationToken,
    ) -> Result<QuoteResponse, Error> {
        self.base
            .client
            .execute_cancellable(self.base.call("", HttpMethod::Post, input), token)
            .await
    }
}
