//! # GetSwift - Delivery Booking API Client
//!
//! A typed client for the [GetSwift](https://app.getswift.co) delivery
//! booking API. Bookings are validated locally before they are sent, and
//! every response or failure is surfaced as a typed value.
//!
//! ## Key Features
//!
//! - **Validated Booking Model**: Entities such as [`DeliveryBooking`] and
//!   [`DeliveryBookingLocation`] can only be built through factories that
//!   report every violated rule at once via [`Outcome`].
//!
//! - **Closed Enumerations**: Filters and [`ErrorCode`] are fixed sets with a
//!   numeric value, a name and a display name.
//!
//! - **Three Call Forms**: Each operation is available blocking, async, and
//!   async with a [`CancellationToken`].
//!
//! - **API Key Precedence**: A key on the input wins over a key on the
//!   service, which wins over the configured default.
//!
//! - **Error Translation**: Non-success statuses and transport failures come
//!   back as a [`ServiceError`] carrying an [`ErrorCode`] and message.
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`booking`] | Validated booking entities |
//! | [`types`] | Operation inputs, response models and filters |
//! | [`services`] | Delivery, driver and quote services |
//! | [`client`] | Request execution shared by the services |
//! | [`request`] | Building requests from typed inputs |
//! | [`response`] | Interpreting raw responses |
//! | [`transport`] | HTTP transport and cancellation |
//! | [`config`] | Client configuration |
//! | [`error`] | Error types |
//!
//! ## API Endpoints
//!
//! | Method | Endpoint | Operation |
//! |--------|----------|-----------|
//! | GET | `deliveries/{id}` | [`DeliveryService::get`] |
//! | GET | `deliveries` | [`DeliveryService::list`] |
//! | POST | `deliveries/cancel` | [`DeliveryService::cancel`] |
//! | GET | `drivers/{id}` | [`DriverService::get`] |
//! | GET | `drivers` | [`DriverService::list`] |
//! | POST | `quotes` | [`QuoteService::create`] |
//!
//! ## Example Usage
//!
//! ```no_run
//! use getswift::{GetSwiftConfig, QuoteCreateInput, QuoteService};
//! use uuid::Uuid;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GetSwiftConfig::default().with_api_key(Uuid::new_v4());
//! let quotes = QuoteService::new(config)?;
//!
//! let input = QuoteCreateInput::for_addresses(Some("1 George St, Sydney"), "5 Martin Pl, Sydney")
//!     .into_result()?;
//! let response = quotes.create(&input)?;
//! println!("fee: {:?}", response.quote.fee);
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! Settings can be loaded from a TOML file:
//!
//! ```toml
//! api_key = "1c9e2a52-5f2b-4bd5-9f0c-0f8c1d4b6e11"
//! base_url = "https://app.getswift.co/api/v2"
//! timeout_ms = 30000
//! ```

pub mod booking;
pub mod client;
pub mod config;
pub mod enumeration;
pub mod error;
pub mod error_code;
pub mod expandable;
pub mod outcome;
pub mod request;
pub mod response;
pub mod services;
pub mod transport;
pub mod types;
pub mod validation;

#[cfg(test)]
mod testing;

pub use booking::{
    DeliveryBooking, DeliveryBookingItem, DeliveryBookingLocation, DeliveryEventWebhook, Email,
    ExtraAddressDetails, JobConstraint, TimeFrame,
};
pub use client::ServiceClient;
pub use config::{ConfigError, GetSwiftConfig};
pub use enumeration::{Enumeration, EnumerationError};
pub use error::{Error, ServiceError};
pub use error_code::ErrorCode;
pub use outcome::Outcome;
pub use request::{ApiRequest, HttpMethod};
pub use response::{ApiResponse, RawResponse};
pub use services::{DeliveryService, DriverService, QuoteService};
pub use transport::{CancellationToken, HttpTransport, Transport};
pub use types::{
    ApiList, DeliveryApiFilter, DeliveryCancelInput, DeliveryDetails, DeliveryGetInput,
    DeliveryListInput, Driver, DriverApiFilter, DriverGetInput, DriverListInput, PagedApiList,
    Quote, QuoteCreateInput, QuoteResponse,
};
pub use validation::{ValidationError, ValidationErrorKind};
