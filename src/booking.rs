//! Validated delivery booking entities.
//!
//! Entities are built through `create` factories returning an [`Outcome`]
//! that carries every violated constraint at once. Fields that may change
//! after construction have setters which re-run the single field validator
//! and fail fast.

use crate::outcome::Outcome;
use crate::validation::{
    ValidationError, first_of, when_before, when_blank, when_invalid_url,
    when_length_out_of_range, when_missing, when_pattern_mismatch, when_supplied_blank,
};
use chrono::{DateTime, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use url::Url;


static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(Email::PATTERN).expect("email pattern is a valid regex")
});

/// Checks an optional text field: non-blank when supplied, at most `max` chars.
fn check_optional_text(
    value: Option<&str>,
    max: usize,
    field: &'static str,
) -> Option<ValidationError> {
    first_of([
        when_supplied_blank(value, field),
        when_length_out_of_range(value, 0, max, field),
    ])
}

/// Checks a required text field: present, non-blank, `min..=max` chars.
fn check_required_text(
    value: Option<&str>,
    min: usize,
    max: usize,
    field: &'static str,
) -> Option<ValidationError> {
    first_of([
        when_blank(value, field),
        when_length_out_of_range(value, min, max, field),
    ])
}

// ============================================================================
// Email
// ============================================================================

/// A validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Minimum length.
    pub const MIN_LENGTH: usize = 6;
    /// Maximum length.
    pub const MAX_LENGTH: usize = 100;
    /// Accepted address pattern.
    pub const PATTERN: &'static str = r"^\w+([-+.']\w+)*@\w+([-.]\w+)*\.\w+([-.]\w+)*$";

    /// Creates an email address.
    pub fn create(value: &str) -> Outcome<Self> {
        Outcome::from_checks([Self::validate(Some(value))], || Self(value.to_string()))
    }

    /// Checks a candidate address without constructing it.
    pub fn check_value(value: Option<&str>) -> Outcome<()> {
        Outcome::determine(Self::validate(value))
    }

    /// The address text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(value: Option<&str>) -> Option<ValidationError> {
        first_of([
            when_blank(value, "value"),
            when_length_out_of_range(value, Self::MIN_LENGTH, Self::MAX_LENGTH, "value"),
            when_pattern_mismatch(value, &EMAIL_PATTERN, "value"),
        ])
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match Self::validate(Some(&value)) {
            Some(error) => Err(error),
            None => Ok(Self(value)),
        }
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// TimeFrame
// ============================================================================

/// A window between two instants, latest never before earliest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTimeFrame")]
pub struct TimeFrame {
    earliest_time: DateTime<Utc>,
    latest_time: DateTime<Utc>,
}

impl TimeFrame {
    /// Creates a time frame.
    pub fn create(earliest_time: DateTime<Utc>, latest_time: DateTime<Utc>) -> Outcome<Self> {
        Outcome::from_checks(
            [when_before(latest_time, earliest_time, "latest_time")],
            || Self {
                earliest_time,
                latest_time,
            },
        )
    }

    /// Start of the window.
    #[must_use]
    pub fn earliest_time(&self) -> DateTime<Utc> {
        self.earliest_time
    }

    /// End of the window.
    #[must_use]
    pub fn latest_time(&self) -> DateTime<Utc> {
        self.latest_time
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTimeFrame {
    earliest_time: DateTime<Utc>,
    latest_time: DateTime<Utc>,
}

impl TryFrom<RawTimeFrame> for TimeFrame {
    type Error = ValidationError;

    fn try_from(raw: RawTimeFrame) -> Result<Self, Self::Error> {
        Self::create(raw.earliest_time, raw.latest_time).into_result()
    }
}

// ============================================================================
// ExtraAddressDetails
// ============================================================================

/// Structured address components supplementing a free-text address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawExtraAddressDetails")]
pub struct ExtraAddressDetails {
    state_province: String,
    country: String,
    suburb_locality: String,
    postcode: String,
    latitude: Decimal,
    longitude: Decimal,
}

impl ExtraAddressDetails {
    /// Maximum state or province length.
    pub const MAX_STATE_PROVINCE_LENGTH: usize = 40;
    /// Maximum country length.
    pub const MAX_COUNTRY_LENGTH: usize = 30;
    /// Maximum suburb or locality length.
    pub const MAX_SUBURB_LOCALITY_LENGTH: usize = 35;
    /// Maximum postcode length.
    pub const MAX_POSTCODE_LENGTH: usize = 10;

    /// Creates address details.
    pub fn create(
        state_province: &str,
        country: &str,
        suburb_locality: &str,
        postcode: &str,
        latitude: Decimal,
        longitude: Decimal,
    ) -> Outcome<Self> {
        Outcome::from_checks(
            [
                Self::validate_state_province(Some(state_province)),
                Self::validate_country(Some(country)),
                Self::validate_suburb_locality(Some(suburb_locality)),
                Self::validate_postcode(Some(postcode)),
            ],
            || Self {
                state_province: state_province.to_string(),
                country: country.to_string(),
                suburb_locality: suburb_locality.to_string(),
                postcode: postcode.to_string(),
                latitude,
                longitude,
            },
        )
    }

    /// Checks a state or province.
    pub fn check_state_province(value: Option<&str>) -> Outcome<()> {
        Outcome::determine(Self::validate_state_province(value))
    }

    /// Checks a country.
    pub fn check_country(value: Option<&str>) -> Outcome<()> {
        Outcome::determine(Self::validate_country(value))
    }

    /// Checks a suburb or locality.
    pub fn check_suburb_locality(value: Option<&str>) -> Outcome<()> {
        Outcome::determine(Self::validate_suburb_locality(value))
    }

    /// Checks a postcode.
    pub fn check_postcode(value: Option<&str>) -> Outcome<()> {
        Outcome::determine(Self::validate_postcode(value))
    }

    /// State or province.
    #[must_use]
    pub fn state_province(&self) -> &str {
        &self.state_province
    }

    /// Country.
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Suburb or locality.
    #[must_use]
    pub fn suburb_locality(&self) -> &str {
        &self.suburb_locality
    }

    /// Postcode.
    #[must_use]
    pub fn postcode(&self) -> &str {
        &self.postcode
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub fn latitude(&self) -> Decimal {
        self.latitude
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub fn longitude(&self) -> Decimal {
        self.longitude
    }

    fn validate_state_province(value: Option<&str>) -> Option<ValidationError> {
        check_required_text(value, 1, Self::MAX_STATE_PROVINCE_LENGTH, "state_province")
    }

    fn validate_country(value: Option<&str>) -> Option<ValidationError> {
        check_required_text(value, 1, Self::MAX_COUNTRY_LENGTH, "country")
    }

    fn validate_suburb_locality(value: Option<&str>) -> Option<ValidationError> {
        check_required_text(value, 1, Self::MAX_SUBURB_LOCALITY_LENGTH, "suburb_locality")
    }

    fn validate_postcode(value: Option<&str>) -> Option<ValidationError> {
        check_required_text(value, 1, Self::MAX_POSTCODE_LENGTH, "postcode")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExtraAddressDetails {
    state_province: String,
    country: String,
    suburb_locality: String,
    postcode: String,
    latitude: Decimal,
    longitude: Decimal,
}

impl TryFrom<RawExtraAddressDetails> for ExtraAddressDetails {
    type Error = ValidationError;

    fn try_from(raw: RawExtraAddressDetails) -> Result<Self, Self::Error> {
        Self::create(
            &raw.state_province,
            &raw.country,
            &raw.suburb_locality,
            &raw.postcode,
            raw.latitude,
            raw.longitude,
        )
        .into_result()
    }
}

// ============================================================================
// DeliveryBookingLocation
// ============================================================================

/// Pickup or dropoff location of a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDeliveryBookingLocation")]
pub struct DeliveryBookingLocation {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    email: Option<Email>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    description: Option<String>,
    address: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    additional_address_details: Option<ExtraAddressDetails>,
}

impl DeliveryBookingLocation {
    /// Maximum contact name length.
    pub const MAX_NAME_LENGTH: usize = 256;
    /// Maximum phone length.
    pub const MAX_PHONE_LENGTH: usize = 20;
    /// Maximum description length.
    pub const MAX_DESCRIPTION_LENGTH: usize = 250;
    /// Minimum address length.
    pub const MIN_ADDRESS_LENGTH: usize = 1;
    /// Maximum address length.
    pub const MAX_ADDRESS_LENGTH: usize = 250;

    /// Creates a location from an address only.
    pub fn create(address: &str) -> Outcome<Self> {
        Self::create_with_details(address, None, None, None, None, None)
    }

    /// Creates a location with contact details.
    pub fn create_with_details(
        address: &str,
        name: Option<String>,
        phone: Option<String>,
        email: Option<Email>,
        description: Option<String>,
        additional_address_details: Option<ExtraAddressDetails>,
    ) -> Outcome<Self> {
        Outcome::from_checks(
            [
                Self::validate_address(Some(address)),
                Self::validate_name(name.as_deref()),
                Self::validate_phone(phone.as_deref()),
                Self::validate_description(description.as_deref()),
            ],
            || Self {
                name,
                phone,
                email,
                description,
                address: address.to_string(),
                additional_address_details,
            },
        )
    }

    /// Checks an address.
    pub fn check_address(value: Option<&str>) -> Outcome<()> {
        Outcome::determine(Self::validate_address(value))
    }

    /// Checks a contact name.
    pub fn check_name(value: Option<&str>) -> Outcome<()> {
        Outcome::determine(Self::validate_name(value))
    }

    /// Checks a phone number.
    pub fn check_phone(value: Option<&str>) -> Outcome<()> {
        Outcome::determine(Self::validate_phone(value))
    }

    /// Checks a description.
    pub fn check_description(value: Option<&str>) -> Outcome<()> {
        Outcome::determine(Self::validate_description(value))
    }

    /// Checks a contact email. Optional, and an [`Email`] is valid by
    /// construction, so this always succeeds.
    pub fn check_email(_value: Option<&Email>) -> Outcome<()> {
        Outcome::determine(None)
    }

    /// Checks structured address components. Optional and valid by
    /// construction, so this always succeeds.
    pub fn check_additional_address_details(_value: Option<&ExtraAddressDetails>) -> Outcome<()> {
        Outcome::determine(None)
    }

    /// Free-text address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Structured address components.
    #[must_use]
    pub fn additional_address_details(&self) -> Option<&ExtraAddressDetails> {
        self.additional_address_details.as_ref()
    }

    /// Contact name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Replaces the contact name.
    ///
    /// # Errors
    /// Returns the violated constraint; the location is left unchanged.
    pub fn set_name(&mut self, name: Option<String>) -> Result<(), ValidationError> {
        Self::validate_name(name.as_deref()).map_or(Ok(()), Err)?;
        self.name = name;
        Ok(())
    }

    /// Contact phone.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Replaces the contact phone.
    ///
    /// # Errors
    /// Returns the violated constraint; the location is left unchanged.
    pub fn set_phone(&mut self, phone: Option<String>) -> Result<(), ValidationError> {
        Self::validate_phone(phone.as_deref()).map_or(Ok(()), Err)?;
        self.phone = phone;
        Ok(())
    }

    /// Contact email.
    #[must_use]
    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    /// Replaces the contact email. An [`Email`] is valid by construction.
    pub fn set_email(&mut self, email: Option<Email>) {
        self.email = email;
    }

    /// Location description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Replaces the description.
    ///
    /// # Errors
    /// Returns the violated constraint; the location is left unchanged.
    pub fn set_description(&mut self, description: Option<String>) -> Result<(), ValidationError> {
        Self::validate_description(description.as_deref()).map_or(Ok(()), Err)?;
        self.description = description;
        Ok(())
    }

    fn validate_address(value: Option<&str>) -> Option<ValidationError> {
        check_required_text(
            value,
            Self::MIN_ADDRESS_LENGTH,
            Self::MAX_ADDRESS_LENGTH,
            "address",
        )
    }

    fn validate_name(value: Option<&str>) -> Option<ValidationError> {
        check_optional_text(value, Self::MAX_NAME_LENGTH, "name")
    }

    fn validate_phone(value: Option<&str>) -> Option<ValidationError> {
        check_optional_text(value, Self::MAX_PHONE_LENGTH, "phone")
    }

    fn validate_description(value: Option<&str>) -> Option<ValidationError> {
        check_optional_text(value, Self::MAX_DESCRIPTION_LENGTH, "description")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDeliveryBookingLocation {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    email: Option<Email>,
    #[serde(default)]
    description: Option<String>,
    address: String,
    #[serde(default)]
    additional_address_details: Option<ExtraAddressDetails>,
}

impl TryFrom<RawDeliveryBookingLocation> for DeliveryBookingLocation {
    type Error = ValidationError;

    fn try_from(raw: RawDeliveryBookingLocation) -> Result<Self, Self::Error> {
        Self::create_with_details(
            &raw.address,
            raw.name,
            raw.phone,
            raw.email,
            raw.description,
            raw.additional_address_details,
        )
        .into_result()
    }
}

// ============================================================================
// DeliveryBookingItem
// ============================================================================

/// A line item carried by a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDeliveryBookingItem")]
pub struct DeliveryBookingItem {
    description: String,
    #[serde(rename = "sku", skip_serializing_if = "Option::is_none", default)]
    stock_keeping_unit: Option<String>,
    /// Number of units.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub quantity: Option<i32>,
    /// Unit price.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub price: Option<Decimal>,
}

impl DeliveryBookingItem {
    /// Minimum description length.
    pub const MIN_DESCRIPTION_LENGTH: usize = 1;
    /// Maximum description length.
    pub const MAX_DESCRIPTION_LENGTH: usize = 250;
    /// Maximum SKU length.
    pub const MAX_STOCK_KEEPING_UNIT_LENGTH: usize = 50;

    /// Creates an item.
    pub fn create(description: &str, stock_keeping_unit: Option<String>) -> Outcome<Self> {
        Outcome::from_checks(
            [
                Self::validate_description(Some(description)),
                Self::validate_stock_keeping_unit(stock_keeping_unit.as_deref()),
            ],
            || Self {
                description: description.to_string(),
                stock_keeping_unit,
                quantity: None,
                price: None,
            },
        )
    }

    /// Creates an item with quantity and price.
    pub fn create_priced(
        description: &str,
        stock_keeping_unit: Option<String>,
        quantity: i32,
        price: Decimal,
    ) -> Outcome<Self> {
        Self::create(description, stock_keeping_unit).map(|item| Self {
            quantity: Some(quantity),
            price: Some(price),
            ..item
        })
    }

    /// Checks a description.
    pub fn check_description(value: Option<&str>) -> Outcome<()> {
        Outcome::determine(Self::validate_description(value))
    }

    /// Checks a SKU.
    pub fn check_stock_keeping_unit(value: Option<&str>) -> Outcome<()> {
        Outcome::determine(Self::validate_stock_keeping_unit(value))
    }

    /// Item description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Stock keeping unit.
    #[must_use]
    pub fn stock_keeping_unit(&self) -> Option<&str> {
        self.stock_keeping_unit.as_deref()
    }

    /// Replaces the SKU.
    ///
    /// # Errors
    /// Returns the violated constraint; the item is left unchanged.
    pub fn set_stock_keeping_unit(&mut self, sku: Option<String>) -> Result<(), ValidationError> {
        Self::validate_stock_keeping_unit(sku.as_deref()).map_or(Ok(()), Err)?;
        self.stock_keeping_unit = sku;
        Ok(())
    }

    fn validate_description(value: Option<&str>) -> Option<ValidationError> {
        check_required_text(
            value,
            Self::MIN_DESCRIPTION_LENGTH,
            Self::MAX_DESCRIPTION_LENGTH,
            "description",
        )
    }

    fn validate_stock_keeping_unit(value: Option<&str>) -> Option<ValidationError> {
        check_optional_text(value, Self::MAX_STOCK_KEEPING_UNIT_LENGTH, "stock_keeping_unit")
    }
}

#[derive(Deserialize)]
struct RawDeliveryBookingItem {
    description: String,
    #[serde(default)]
    sku: Option<String>,
    #[serde(default)]
    quantity: Option<i32>,
    #[serde(default)]
    price: Option<Decimal>,
}

impl TryFrom<RawDeliveryBookingItem> for DeliveryBookingItem {
    type Error = ValidationError;

    fn try_from(raw: RawDeliveryBookingItem) -> Result<Self, Self::Error> {
        Self::create(&raw.description, raw.sku)
            .map(|item| Self {
                quantity: raw.quantity,
                price: raw.price,
                ..item
            })
            .into_result()
    }
}

// ============================================================================
// JobConstraint
// ============================================================================

/// A named requirement the assigned driver must satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawJobConstraint")]
pub struct JobConstraint {
    name: String,
    value: String,
}

impl JobConstraint {
    /// Creates a constraint.
    pub fn create(name: &str, value: &str) -> Outcome<Self> {
        Outcome::from_checks(
            [Self::validate_name(Some(name)), Self::validate_value(Some(value))],
            || Self {
                name: name.to_string(),
                value: value.to_string(),
            },
        )
    }

    /// Checks a constraint name.
    pub fn check_name(value: Option<&str>) -> Outcome<()> {
        Outcome::determine(Self::validate_name(value))
    }

    /// Checks a constraint value.
    pub fn check_value(value: Option<&str>) -> Outcome<()> {
        Outcome::determine(Self::validate_value(value))
    }

    /// Constraint name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Constraint value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    fn validate_name(value: Option<&str>) -> Option<ValidationError> {
        when_blank(value, "name")
    }

    fn validate_value(value: Option<&str>) -> Option<ValidationError> {
        when_blank(value, "value")
    }
}

#[derive(Deserialize)]
struct RawJobConstraint {
    name: String,
    value: String,
}

impl TryFrom<RawJobConstraint> for JobConstraint {
    type Error = ValidationError;

    fn try_from(raw: RawJobConstraint) -> Result<Self, Self::Error> {
        Self::create(&raw.name, &raw.value).into_result()
    }
}

// ============================================================================
// DeliveryEventWebhook
// ============================================================================

/// Callback registered for a delivery event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDeliveryEventWebhook")]
pub struct DeliveryEventWebhook {
    event_name: String,
    url: Url,
}

impl DeliveryEventWebhook {
    /// Creates a webhook from a URL string.
    pub fn create(event_name: &str, url: &str) -> Outcome<Self> {
        let event_error = Self::validate_event_name(Some(event_name));
        let url_error = when_invalid_url(Some(url), "url");
        match (event_error, url_error, Url::parse(url)) {
            (None, None, Ok(url)) => Outcome::success(Self {
                event_name: event_name.to_string(),
                url,
            }),
            (event_error, url_error, _) => Outcome::failure(
                event_error.into_iter().chain(url_error).collect(),
            ),
        }
    }

    /// Creates a webhook from a parsed URL.
    pub fn create_with_url(event_name: &str, url: Url) -> Outcome<Self> {
        Outcome::from_checks([Self::validate_event_name(Some(event_name))], || Self {
            event_name: event_name.to_string(),
            url,
        })
    }

    /// Checks an event name.
    pub fn check_event_name(value: Option<&str>) -> Outcome<()> {
        Outcome::determine(Self::validate_event_name(value))
    }

    /// Checks a URL string.
    pub fn check_url(value: Option<&str>) -> Outcome<()> {
        Outcome::determine(when_invalid_url(value, "url"))
    }

    /// Event name.
    #[must_use]
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    /// Callback URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    fn validate_event_name(value: Option<&str>) -> Option<ValidationError> {
        when_blank(value, "event_name")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDeliveryEventWebhook {
    event_name: String,
    url: String,
}

impl TryFrom<RawDeliveryEventWebhook> for DeliveryEventWebhook {
    type Error = ValidationError;

    fn try_from(raw: RawDeliveryEventWebhook) -> Result<Self, Self::Error> {
        Self::create(&raw.event_name, &raw.url).into_result()
    }
}

// ============================================================================
// DeliveryBooking
// ============================================================================

/// A delivery booking request.
///
/// Money fields travel as JSON numbers, so values beyond about 15
/// significant digits are rounded on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDeliveryBooking")]
pub struct DeliveryBooking {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    delivery_instructions: Option<String>,
    /// Whether the driver must purchase the items.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub items_require_purchase: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    items: Vec<DeliveryBookingItem>,
    /// Requested pickup time.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pickup_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pickup_detail: Option<DeliveryBookingLocation>,
    /// Requested dropoff window.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dropoff_window: Option<TimeFrame>,
    dropoff_detail: DeliveryBookingLocation,
    /// Fee charged to the customer.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub customer_fee: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    customer_reference: Option<String>,
    /// Tax amount.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tax: Option<Decimal>,
    /// Whether prices include tax.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tax_inclusive_price: Option<bool>,
    /// Driver tip.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tip: Option<Decimal>,
    /// Driver fee as a percentage.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub driver_fee_percentage: Option<Decimal>,
    /// Code used to match a specific driver.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub driver_match_code: Option<String>,
    /// Position within a delivery route.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub delivery_sequence: Option<i32>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    constraints: Vec<JobConstraint>,
    /// Route the delivery belongs to.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub delivery_route_identifier: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    webhooks: Vec<DeliveryEventWebhook>,
    /// Booking template name.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub template: Option<String>,
}

impl DeliveryBooking {
    /// Maximum reference length.
    pub const MAX_REFERENCE_LENGTH: usize = 50;
    /// Maximum delivery instructions length.
    pub const MAX_DELIVERY_INSTRUCTIONS_LENGTH: usize = 2000;
    /// Maximum customer reference length.
    pub const MAX_CUSTOMER_REFERENCE_LENGTH: usize = 50;

    /// Creates a booking. The dropoff is required, the pickup optional.
    pub fn create(
        pickup_detail: Option<DeliveryBookingLocation>,
        dropoff_detail: Option<DeliveryBookingLocation>,
    ) -> Outcome<Self> {
        match dropoff_detail {
            Some(dropoff_detail) => Outcome::success(Self::new(pickup_detail, dropoff_detail)),
            None => Outcome::failure(Self::validate_dropoff_detail(None).into_iter().collect()),
        }
    }

    fn new(
        pickup_detail: Option<DeliveryBookingLocation>,
        dropoff_detail: DeliveryBookingLocation,
    ) -> Self {
        Self {
            reference: None,
            delivery_instructions: None,
            items_require_purchase: None,
            items: Vec::new(),
            pickup_time: None,
            pickup_detail,
            dropoff_window: None,
            dropoff_detail,
            customer_fee: None,
            customer_reference: None,
            tax: None,
            tax_inclusive_price: None,
            tip: None,
            driver_fee_percentage: None,
            driver_match_code: None,
            delivery_sequence: None,
            constraints: Vec::new(),
            delivery_route_identifier: None,
            webhooks: Vec::new(),
            template: None,
        }
    }

    /// Checks a pickup location. Optional and valid by construction, so this
    /// always succeeds.
    pub fn check_pickup_detail(_value: Option<&DeliveryBookingLocation>) -> Outcome<()> {
        Outcome::determine(None)
    }

    /// Checks a dropoff location.
    pub fn check_dropoff_detail(value: Option<&DeliveryBookingLocation>) -> Outcome<()> {
        Outcome::determine(Self::validate_dropoff_detail(value))
    }

    /// Checks a reference.
    pub fn check_reference(value: Option<&str>) -> Outcome<()> {
        Outcome::determine(Self::validate_reference(value))
    }

    /// Checks delivery instructions.
    pub fn check_delivery_instructions(value: Option<&str>) -> Outcome<()> {
        Outcome::determine(Self::validate_delivery_instructions(value))
    }

    /// Checks a customer reference.
    pub fn check_customer_reference(value: Option<&str>) -> Outcome<()> {
        Outcome::determine(Self::validate_customer_reference(value))
    }

    /// Pickup location.
    #[must_use]
    pub fn pickup_detail(&self) -> Option<&DeliveryBookingLocation> {
        self.pickup_detail.as_ref()
    }

    /// Dropoff location.
    #[must_use]
    pub fn dropoff_detail(&self) -> &DeliveryBookingLocation {
        &self.dropoff_detail
    }

    /// Booking reference.
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Replaces the booking reference.
    ///
    /// # Errors
    /// Returns the violated constraint; the booking is left unchanged.
    pub fn set_reference(&mut self, reference: Option<String>) -> Result<(), ValidationError> {
        Self::validate_reference(reference.as_deref()).map_or(Ok(()), Err)?;
        self.reference = reference;
        Ok(())
    }

    /// Instructions for the driver.
    #[must_use]
    pub fn delivery_instructions(&self) -> Option<&str> {
        self.delivery_instructions.as_deref()
    }

    /// Replaces the delivery instructions.
    ///
    /// # Errors
    /// Returns the violated constraint; the booking is left unchanged.
    pub fn set_delivery_instructions(
        &mut self,
        instructions: Option<String>,
    ) -> Result<(), ValidationError> {
        Self::validate_delivery_instructions(instructions.as_deref()).map_or(Ok(()), Err)?;
        self.delivery_instructions = instructions;
        Ok(())
    }

    /// Customer's own reference.
    #[must_use]
    pub fn customer_reference(&self) -> Option<&str> {
        self.customer_reference.as_deref()
    }

    /// Replaces the customer reference.
    ///
    /// # Errors
    /// Returns the violated constraint; the booking is left unchanged.
    pub fn set_customer_reference(
        &mut self,
        customer_reference: Option<String>,
    ) -> Result<(), ValidationError> {
        Self::validate_customer_reference(customer_reference.as_deref()).map_or(Ok(()), Err)?;
        self.customer_reference = customer_reference;
        Ok(())
    }

    /// Line items.
    #[must_use]
    pub fn items(&self) -> &[DeliveryBookingItem] {
        &self.items
    }

    /// Adds the item of a successful outcome.
    ///
    /// # Errors
    /// Returns the first error of a failed outcome; nothing is added.
    pub fn add_item(&mut self, item: Outcome<DeliveryBookingItem>) -> Result<(), ValidationError> {
        self.items.push(item.into_result()?);
        Ok(())
    }

    /// Driver constraints.
    #[must_use]
    pub fn constraints(&self) -> &[JobConstraint] {
        &self.constraints
    }

    /// Adds the constraint of a successful outcome.
    ///
    /// # Errors
    /// Returns the first error of a failed outcome; nothing is added.
    pub fn add_constraint(
        &mut self,
        constraint: Outcome<JobConstraint>,
    ) -> Result<(), ValidationError> {
        self.constraints.push(constraint.into_result()?);
        Ok(())
    }

    /// Event webhooks.
    #[must_use]
    pub fn webhooks(&self) -> &[DeliveryEventWebhook] {
        &self.webhooks
    }

    /// Adds the webhook of a successful outcome.
    ///
    /// # Errors
    /// Returns the first error of a failed outcome; nothing is added.
    pub fn add_webhook(
        &mut self,
        webhook: Outcome<DeliveryEventWebhook>,
    ) -> Result<(), ValidationError> {
        self.webhooks.push(webhook.into_result()?);
        Ok(())
    }

    fn validate_dropoff_detail(value: Option<&DeliveryBookingLocation>) -> Option<ValidationError> {
        when_missing(value, "dropoff_detail")
    }

    fn validate_reference(value: Option<&str>) -> Option<ValidationError> {
        check_optional_text(value, Self::MAX_REFERENCE_LENGTH, "reference")
    }

    fn validate_delivery_instructions(value: Option<&str>) -> Option<ValidationError> {
        check_optional_text(
            value,
            Self::MAX_DELIVERY_INSTRUCTIONS_LENGTH,
            "delivery_instructions",
        )
    }

    fn validate_customer_reference(value: Option<&str>) -> Option<ValidationError> {
        check_optional_text(
            value,
            Self::MAX_CUSTOMER_REFERENCE_LENGTH,
            "customer_reference",
        )
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDeliveryBooking {
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    delivery_instructions: Option<String>,
    #[serde(default)]
    items_require_purchase: Option<bool>,
    #[serde(default)]
    items: Vec<DeliveryBookingItem>,
    #[serde(default)]
    pickup_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pickup_detail: Option<DeliveryBookingLocation>,
    #[serde(default)]
    dropoff_window: Option<TimeFrame>,
    #[serde(default)]
    dropoff_detail: Option<DeliveryBookingLocation>,
    #[serde(default)]
    customer_fee: Option<Decimal>,
    #[serde(default)]
    customer_reference: Option<String>,
    #[serde(default)]
    tax: Option<Decimal>,
    #[serde(default)]
    tax_inclusive_price: Option<bool>,
    #[serde(default)]
    tip: Option<Decimal>,
    #[serde(default)]
    driver_fee_percentage: Option<Decimal>,
    #[serde(default)]
    driver_match_code: Option<String>,
    #[serde(default)]
    delivery_sequence: Option<i32>,
    #[serde(default)]
    constraints: Vec<JobConstraint>,
    #[serde(default)]
    delivery_route_identifier: Option<String>,
    #[serde(default)]
    webhooks: Vec<DeliveryEventWebhook>,
    #[serde(default)]
    template: Option<String>,
}

impl TryFrom<RawDeliveryBooking> for DeliveryBooking {
    type Error = ValidationError;

    fn try_from(raw: RawDeliveryBooking) -> Result<Self, Self::Error> {
        let checks = [
            DeliveryBooking::validate_dropoff_detail(raw.dropoff_detail.as_ref()),
            DeliveryBooking::validate_reference(raw.reference.as_deref()),
            DeliveryBooking::validate_delivery_instructions(raw.delivery_instructions.as_deref()),
            DeliveryBooking::validate_customer_reference(raw.customer_reference.as_deref()),
        ];
        let Some(dropoff_detail) = raw.dropoff_detail else {
            return Outcome::<Self>::failure(checks.into_iter().flatten().collect()).into_result();
        };

        Outcome::from_checks(checks, || Self {
            reference: raw.reference,
            delivery_instructions: raw.delivery_instructions,
            items_require_purchase: raw.items_require_purchase,
            items: raw.items,
            pickup_time: raw.pickup_time,
            pickup_detail: raw.pickup_detail,
            dropoff_window: raw.dropoff_window,
            dropoff_detail,
            customer_fee: raw.customer_fee,
            customer_reference: raw.customer_reference,
            tax: raw.tax,
            tax_inclusive_price: raw.tax_inclusive_price,
            tip: raw.tip,
            driver_fee_percentage: raw.driver_fee_percentage,
            driver_match_code: raw.driver_match_code,
            delivery_sequence: raw.delivery_sequence,
            constraints: raw.constraints,
            delivery_route_identifier: raw.delivery_route_identifier,
            webhooks: raw.webhooks,
            template: raw.template,
        })
        .into_result()
    }
}
