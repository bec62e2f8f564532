//! Request inputs and response models for the GetSwift API.

use crate::booking::{DeliveryBooking, DeliveryBookingLocation, TimeFrame};
use crate::enumeration::enumeration;
use crate::outcome::Outcome;
use crate::response::{ApiResponse, BindResponse, ResponseModel};
use crate::validation::ValidationError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;


fn is_false(value: &bool) -> bool {
    !*value
}

/// Implements [`BindResponse`] and [`ResponseModel`] for models carrying a
/// `response` slot.
macro_rules! bound_model {
    ($name:ident $(<$param:ident>)?, wraps_bare_array = $wraps:expr) => {
        impl$(<$param>)? BindResponse for $name$(<$param>)? {
            fn bind_response(&mut self, response: ApiResponse) {
                self.response = Some(response);
            }
        }

        impl$(<$param: serde::de::DeserializeOwned>)? ResponseModel for $name$(<$param>)? {
            const WRAPS_BARE_ARRAY: bool = $wraps;
        }
    };
}

// ============================================================================
// Filters
// ============================================================================

enumeration! {
    /// Delivery list filter.
    pub enum DeliveryApiFilter {
        /// Deliveries still in progress.
        Active = (0, "Active"),
        /// Every delivery.
        All = (1, "All"),
        /// Completed deliveries.
        Successful = (2, "Successful"),
        /// Cancelled deliveries.
        Cancelled = (3, "Cancelled"),
    }
}

enumeration! {
    /// Driver list filter.
    pub enum DriverApiFilter {
        /// Every driver.
        All = (0, "All"),
        /// Drivers currently online.
        OnlineNow = (1, "Online Now"),
        /// Activated drivers.
        Activated = (2, "Activated"),
        /// Invited drivers who have not activated.
        Invited = (3, "Invited"),
        /// Deactivated drivers.
        Deactivated = (4, "Deactivated"),
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Structured error payload returned with a 400 response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    /// Error description.
    #[serde(default)]
    pub message: Option<String>,
    /// Error code name.
    #[serde(default)]
    pub code: Option<String>,
}

// ============================================================================
// Inputs
// ============================================================================

/// Fetches a single delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryGetInput {
    /// API key for this call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<Uuid>,
    /// Delivery identifier, sent in the path.
    #[serde(skip)]
    pub id: Uuid,
    /// Include the stage history.
    #[serde(skip_serializing_if = "is_false")]
    pub expand_stage_history: bool,
    /// Include the driver constraints.
    #[serde(skip_serializing_if = "is_false")]
    pub expand_constraints: bool,
    /// Include the line items.
    #[serde(skip_serializing_if = "is_false")]
    pub expand_items: bool,
}

impl DeliveryGetInput {
    /// Creates an input for the given delivery.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            api_key: None,
            id,
            expand_stage_history: false,
            expand_constraints: false,
            expand_items: false,
        }
    }
}

/// Lists deliveries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryListInput {
    /// API key for this call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<Uuid>,
    /// Status filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<DeliveryApiFilter>,
    /// Only deliveries created after this instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    /// Only deliveries assigned to this driver.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<Uuid>,
    /// One-based page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<i32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,
    /// Highest job identifier to page from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paging_max_id: Option<i32>,
}

/// Cancels a delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryCancelInput {
    /// API key for this call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<Uuid>,
    /// Delivery to cancel.
    pub job_id: Uuid,
    /// Reason given to the driver.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_notes: Option<String>,
}

impl DeliveryCancelInput {
    /// Creates a cancellation without notes.
    #[must_use]
    pub fn new(job_id: Uuid) -> Self {
        Self {
            api_key: None,
            job_id,
            cancellation_notes: None,
        }
    }

    /// Adds cancellation notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.cancellation_notes = Some(notes.into());
        self
    }
}

/// Fetches a single driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverGetInput {
    /// API key for this call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<Uuid>,
    /// Driver identifier, sent in the path.
    #[serde(skip)]
    pub id: Uuid,
}

impl DriverGetInput {
    /// Creates an input for the given driver.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self { api_key: None, id }
    }
}

/// Lists drivers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverListInput {
    /// API key for this call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<Uuid>,
    /// Status filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<DriverApiFilter>,
}

/// Requests a price quote for a booking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteCreateInput {
    /// API key for this call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<Uuid>,
    /// Booking to quote.
    pub booking: DeliveryBooking,
}

impl QuoteCreateInput {
    /// Quotes an existing booking.
    #[must_use]
    pub fn new(booking: DeliveryBooking) -> Self {
        Self {
            api_key: None,
            booking,
        }
    }

    /// Quotes a dropoff-only booking.
    pub fn for_dropoff(dropoff_address: &str) -> Outcome<Self> {
        Self::for_addresses(None, dropoff_address)
    }

    /// Quotes a booking from address strings, collecting the errors of
    /// both locations.
    pub fn for_addresses(pickup_address: Option<&str>, dropoff_address: &str) -> Outcome<Self> {
        let pickup = pickup_address.map(DeliveryBookingLocation::create);
        let dropoff = DeliveryBookingLocation::create(dropoff_address);

        let errors: Vec<ValidationError> = pickup
            .iter()
            .flat_map(|outcome| outcome.errors())
            .chain(dropoff.errors())
            .cloned()
            .collect();
        if !errors.is_empty() {
            return Outcome::failure(errors);
        }

        let pickup = pickup.and_then(|outcome| outcome.into_result().ok());
        DeliveryBooking::create(pickup, dropoff.into_result().ok()).map(Self::new)
    }
}

// ============================================================================
// Response Models
// ============================================================================

/// Contact and address of a delivery endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationApi {
    /// Contact name.
    pub name: Option<String>,
    /// Free-text address.
    pub address: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Postcode.
    pub postcode: Option<String>,
    /// Suburb.
    pub suburb: Option<String>,
}

/// A driver account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    /// Driver identifier.
    pub identifier: Uuid,
    /// Display name.
    pub name: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Profile photo.
    pub photo_url: Option<Url>,
    /// Contact email.
    pub email: Option<String>,
    /// Exchange metadata of the call that produced this driver.
    #[serde(skip)]
    pub response: Option<ApiResponse>,
}

/// Drivers are identified by their identifier alone.
impl PartialEq for Driver {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for Driver {}

bound_model!(Driver, wraps_bare_array = false);

/// Public and API tracking links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingUrls {
    /// Customer facing tracking page.
    pub www: Option<Url>,
    /// Tracking API endpoint.
    pub api: Option<Url>,
}

/// Signature and attachments captured at dropoff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofOfDelivery {
    /// Signature image.
    pub signature_url: Option<Url>,
    /// Attachment links.
    #[serde(default)]
    pub attachments: Vec<String>,
}

/// A distance in both unit systems.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distance {
    /// Kilometres.
    pub kilometres: Decimal,
    /// Miles.
    pub miles: Decimal,
}

/// One entry of a delivery's stage history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageEntry {
    /// When the stage was entered.
    pub created: DateTime<Utc>,
    /// Stage name.
    pub stage: String,
    /// Driver or system notes.
    pub notes: Option<String>,
}

/// A delivery as reported by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetails {
    /// Delivery identifier.
    pub id: Uuid,
    /// Creation time.
    pub created: Option<DateTime<Utc>>,
    /// Booking reference.
    pub reference: Option<String>,
    /// Pickup endpoint.
    pub pickup_location: Option<LocationApi>,
    /// Dropoff endpoint.
    pub dropoff_location: Option<LocationApi>,
    /// Last modification time.
    pub last_updated: Option<DateTime<Utc>>,
    /// Current status name.
    pub current_status: Option<String>,
    /// Assigned driver.
    pub driver: Option<Driver>,
    /// Line items, when expanded.
    #[serde(default)]
    pub items: Vec<String>,
    /// Driver constraints, when expanded.
    #[serde(default)]
    pub constraints: Vec<String>,
    /// Scheduled pickup time.
    pub pickup_time: Option<DateTime<Utc>>,
    /// Dropoff window.
    pub dropoff_time: Option<TimeFrame>,
    /// Instructions for the driver.
    pub delivery_instructions: Option<String>,
    /// Customer's own reference.
    pub customer_reference: Option<String>,
    /// Tracking links.
    pub tracking_urls: Option<TrackingUrls>,
    /// Dropoff proof.
    pub proof_of_delivery: Option<ProofOfDelivery>,
    /// Driver tip.
    pub driver_tip: Option<Decimal>,
    /// Delivery fee.
    pub delivery_fee: Option<Decimal>,
    /// Estimated route distance.
    pub estimated_distance: Option<Distance>,
    /// Stage history, when expanded.
    #[serde(default)]
    pub stage_history: Vec<StageEntry>,
    /// Exchange metadata of the call that produced this delivery.
    #[serde(skip)]
    pub response: Option<ApiResponse>,
}

bound_model!(DeliveryDetails, wraps_bare_array = false);

/// A monetary amount in units and cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    /// Amount in currency units.
    pub cost: Decimal,
    /// Amount in cents.
    pub cost_cents: i32,
}

/// Estimated arrival at a quoted location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEstimate {
    /// Expected time.
    pub average: DateTime<Utc>,
    /// Earliest time.
    pub earliest: DateTime<Utc>,
    /// Latest time.
    pub latest: DateTime<Utc>,
}

/// A quoted pickup or dropoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLocationDetail {
    /// Arrival estimate.
    pub time: Option<TimeEstimate>,
    /// Address as understood by the API.
    pub address: Option<String>,
}

/// A price quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Quote time.
    pub created: Option<DateTime<Utc>>,
    /// Quoted start time.
    pub start: Option<DateTime<Utc>>,
    /// Route distance in kilometres.
    pub distance_km: Option<Decimal>,
    /// Quoted fee.
    pub fee: Option<Price>,
    /// Quoted pickup.
    pub pickup: Option<QuoteLocationDetail>,
    /// Quoted dropoff.
    pub dropoff: Option<QuoteLocationDetail>,
}

/// Result of a quote request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    /// The quote.
    pub quote: Quote,
    /// Booking the quote was computed for.
    pub request: Option<DeliveryBooking>,
    /// Exchange metadata of the call that produced this quote.
    #[serde(skip)]
    pub response: Option<ApiResponse>,
}

bound_model!(QuoteResponse, wraps_bare_array = false);

/// An unpaged list. The API may answer with a bare array, which is
/// wrapped as `{"data": [...]}` before deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiList<T> {
    /// Items.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Exchange metadata of the call that produced this list.
    #[serde(skip)]
    pub response: Option<ApiResponse>,
}

bound_model!(ApiList<T>, wraps_bare_array = true);

/// A page of results with navigation links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedApiList<T> {
    /// One-based page number.
    #[serde(default)]
    pub current_page: i32,
    /// Number of pages.
    #[serde(default)]
    pub page_count: i32,
    /// Items per page.
    #[serde(default)]
    pub page_size: i32,
    /// Total number of items.
    #[serde(default)]
    pub total_count: i32,
    /// First page link.
    pub first_page_url: Option<Url>,
    /// Previous page link.
    pub previous_page_url: Option<Url>,
    /// Next page link.
    pub next_page_url: Option<Url>,
    /// Last page link.
    pub last_page_url: Option<Url>,
    /// Items on this page.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Exchange metadata of the call that produced this page.
    #[serde(skip)]
    pub response: Option<ApiResponse>,
}

bound_model!(PagedApiList<T>, wraps_bare_array = false);
