//! Closed taxonomy of server error codes.

use crate::enumeration::{Enumeration, enumeration};
use crate::types::ErrorMessage;


enumeration! {
    /// Error classification reported by the GetSwift API.
    pub enum ErrorCode {
        /// No error.
        None = (0, "None"),
        /// No drivers available.
        AtCapacity = (1, "At Capacity"),
        /// Delivery does not exist.
        DeliveryNotFound = (2, "Delivery Not Found"),
        /// Pickup details missing.
        NoPickupDeets = (3, "No Pickup Deets"),
        /// Dropoff details missing.
        NoDropoffDeets = (4, "No Dropoff Deets"),
        /// Only one bound of the delivery window was supplied.
        DeliveryWindowFullInfo = (5, "Delivery Window Full Info"),
        /// Earliest delivery time missing.
        NoEarliestDeliveryWindow = (6, "No Earliest Delivery Window"),
        /// Latest delivery time missing.
        NoLatestDeliveryWindow = (7, "No Latest Delivery Window"),
        /// Delivery window bounds are inconsistent.
        InvalidDeliveryWindow = (8, "Invalid Delivery Window"),
        /// Delivery window lies in the past.
        PastDeliveryWindow = (9, "Past Delivery Window"),
        /// Drop-off missing.
        NoDropoff = (10, "No Dropoff"),
        /// Pickup missing.
        NoPickup = (11, "No Pickup"),
        /// Pickup address could not be validated.
        InvalidPickupAddress = (12, "Invalid Pickup Address"),
        /// Dropoff address could not be validated.
        InvalidDropoffAddress = (13, "Invalid Dropoff Address"),
        /// No data.
        NoData = (14, "No Data"),
        /// Server did not specify the error.
        Unspecified = (15, "Unspecified"),
        /// Internal server error.
        ServerError = (16, "Server Error"),
        /// Invalid or missing API key.
        Unauthorised = (17, "Unauthorised"),
        /// Job rating not found.
        RatingNotFound = (18, "Rating Not Found"),
        /// Job skills not found.
        SkillNotFound = (19, "Skill Not Found"),
        /// A code this client does not recognize.
        Unknown = (20, "Unknown"),
    }
}

impl ErrorCode {
    /// Fixed message describing the error.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::None => "No error",
            Self::AtCapacity => {
                "We are sorry, all of our drivers nearby are busy.Please try again in a few minutes"
            }
            Self::DeliveryNotFound => "Delivery not found",
            Self::NoPickupDeets => "No pickup details supplied",
            Self::NoDropoffDeets => "No destination details supplied",
            Self::DeliveryWindowFullInfo => {
                "Please supply earliest AND latest time for the delivery time window"
            }
            Self::NoEarliestDeliveryWindow => "Earliest delivery time window should be specified",
            Self::NoLatestDeliveryWindow => "Latest delivery time window should be specified",
            Self::InvalidDeliveryWindow => "Invalid delivery time window",
            Self::PastDeliveryWindow => "Delivery time window is in the past",
            Self::NoDropoff => "No drop-off details supplied",
            Self::NoPickup => "No pickup details supplied",
            Self::InvalidPickupAddress => "Pickup address cannot be validated",
            Self::InvalidDropoffAddress => "Destination address cannot be validated",
            Self::NoData => "No Data",
            Self::Unspecified => "Unspecified Error",
            Self::ServerError => "Internal Server Error",
            Self::Unauthorised => "Unauthorised",
            Self::RatingNotFound => "Job rating not found",
            Self::SkillNotFound => "Job skills not found",
            Self::Unknown => "Unknown error",
        }
    }

    /// Resolves a wire code.
    ///
    /// `None` when no code was present, the matching member when recognized,
    /// `Unknown` when a code was present but this client does not know it.
    #[must_use]
    pub fn resolve(code: Option<&str>) -> Self {
        match code {
            None => Self::None,
            Some(code) => Self::try_by_name(code).unwrap_or(Self::Unknown),
        }
    }

    /// Resolves the code carried by an optional error payload.
    ///
    /// No payload means no error; a payload whose code is missing or
    /// unrecognized is `Unknown`.
    #[must_use]
    pub fn from_payload(payload: Option<&ErrorMessage>) -> Self {
        match payload {
            None => Self::None,
            Some(payload) => payload
                .code
                .as_deref()
                .and_then(Self::try_by_name)
                .unwrap_or(Self::Unknown),
        }
    }
}

impl Default for ErrorCode {
    fn default() -> Self {
        Self::None
    }
}
