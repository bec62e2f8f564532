//! Quote service tests.

use getswift::{
    DeliveryBooking, DeliveryBookingItem, DeliveryBookingLocation, ErrorCode, QuoteCreateInput,
    QuoteService,
};
use getswift_tests::{MockServer, UNKNOWN_ADDRESS};

fn booking_with_items() -> DeliveryBooking {
    let pickup = DeliveryBookingLocation::create("1 George St, Sydney")
        .into_result()
        .expect("Invalid pickup");
    let dropoff = DeliveryBookingLocation::create("5 Martin Pl, Sydney")
        .into_result()
        .expect("Invalid dropoff");
    let mut booking = DeliveryBooking::create(Some(pickup), Some(dropoff))
        .into_result()
        .expect("Invalid booking");
    booking
        .add_item(DeliveryBookingItem::create("Margherita pizza", Some("PZ-01".to_string())))
        .expect("Invalid item");
    booking
        .add_item(DeliveryBookingItem::create("Garlic bread", None))
        .expect("Invalid item");
    booking
        .set_reference(Some("ORDER-77".to_string()))
        .expect("Invalid reference");
    booking
}

#[test]
fn test_create_quote() {
    let server = MockServer::start().expect("Failed to start mock");
    let quotes = QuoteService::new(server.config()).expect("Failed to create service");

    let response = quotes
        .create(&QuoteCreateInput::new(booking_with_items()))
        .expect("Failed to create quote");

    let fee = response.quote.fee.expect("Quote has no fee");
    assert_eq!(fee.cost_cents, 1100);
    let pickup = response.quote.pickup.expect("Quote has no pickup");
    assert_eq!(pickup.address.as_deref(), Some("1 George St, Sydney"));
    assert!(pickup.time.is_some());

    let request = response.request.expect("Quote has no request echo");
    assert_eq!(request.dropoff_detail().address(), "5 Martin Pl, Sydney");
    assert_eq!(request.items().len(), 2);
    assert_eq!(request.reference(), Some("ORDER-77"));
}

#[test]
fn test_create_quote_for_dropoff_only() {
    let server = MockServer::start().expect("Failed to start mock");
    let quotes = QuoteService::new(server.config()).expect("Failed to create service");
    let input = QuoteCreateInput::for_dropoff("5 Martin Pl, Sydney")
        .into_result()
        .expect("Invalid input");

    let response = quotes.create(&input).expect("Failed to create quote");

    assert_eq!(response.quote.fee.unwrap().cost_cents, 800);
    assert!(response.quote.pickup.unwrap().address.is_none());
}

#[test]
fn test_create_quote_unknown_address() {
    let server = MockServer::start().expect("Failed to start mock");
    let quotes = QuoteService::new(server.config()).expect("Failed to create service");
    let input = QuoteCreateInput::for_dropoff(UNKNOWN_ADDRESS)
        .into_result()
        .expect("Invalid input");

    let error = quotes.create(&input).unwrap_err();

    assert_eq!(error.code(), Some(ErrorCode::InvalidDropoffAddress));
    assert_eq!(
        error.as_service().unwrap().message(),
        "Dropoff address could not be found"
    );
}

#[tokio::test]
async fn test_create_quote_async() {
    let server = MockServer::start().expect("Failed to start mock");
    let quotes = QuoteService::new(server.config()).expect("Failed to create service");
    let input = QuoteCreateInput::for_addresses(Some("1 George St, Sydney"), "5 Martin Pl, Sydney")
        .into_result()
        .expect("Invalid input");

    let response = quotes
        .create_async(&input)
        .await
        .expect("Failed to create quote");

    assert_eq!(response.quote.fee.unwrap().cost_cents, 800);
    assert!(response.response.is_some());
}
