//! Unit tests for services module.

use super::*;
use crate::error_code::ErrorCode;
use crate::response::RawResponse;
use crate::testing::{Reply, StubTransport};
use crate::types::DriverApiFilter;
use std::sync::Arc;
use std::time::Duration;

const DELIVERY_ID: &str = "5b3b5a38-7c42-4a3f-9f0e-3c2d7b0c8d11";
const DRIVER_ID: &str = "0d7e8f35-2a8b-4c8a-a6a2-6f8c5f1e4b20";

fn client(stub: &Arc<StubTransport>, configured: Option<Uuid>) -> ServiceClient {
    let mut config = GetSwiftConfig::default();
    config.api_key = configured;
    ServiceClient::with_transport(config, stub.clone())
}

fn delivery_body() -> String {
    format!(r#"{{"id":"{DELIVERY_ID}","reference":"ORDER-1","currentStatus":"Cancelled"}}"#)
}

// ============================================================================
// DeliveryService Tests
// ============================================================================

#[test]
fn test_delivery_get_request_shape() {
    let stub = Arc::new(StubTransport::fixed(200, &delivery_body()));
    let service = DeliveryService::with_client(client(&stub, None));
    let mut input = DeliveryGetInput::new(Uuid::parse_str(DELIVERY_ID).unwrap());
    input.expand_stage_history = true;

    let details = service.get(&input).unwrap();

    assert_eq!(details.reference.as_deref(), Some("ORDER-1"));
    let request = stub.last();
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.path, format!("deliveries/{DELIVERY_ID}"));
    assert_eq!(request.query_value("expand[0]"), Some("StageHistory"));
}

#[test]
fn test_delivery_list_request_shape() {
    let stub = Arc::new(StubTransport::fixed(
        200,
        &format!(r#"{{"currentPage":1,"pageCount":1,"pageSize":10,"totalCount":1,"data":[{}]}}"#, delivery_body()),
    ));
    let service = DeliveryService::with_client(client(&stub, None));
    let input = DeliveryListInput {
        page_size: Some(10),
        ..Default::default()
    };

    let page = service.list(&input).unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(stub.last().path, "deliveries");
    assert_eq!(stub.last().query_value("pageSize"), Some("10"));
}

#[test]
fn test_delivery_cancel_posts_body() {
    let stub = Arc::new(StubTransport::fixed(200, &delivery_body()));
    let service = DeliveryService::with_client(client(&stub, None));
    let input = DeliveryCancelInput::new(Uuid::parse_str(DELIVERY_ID).unwrap());

    service.cancel(&input).unwrap();

    let request = stub.last();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.path, "deliveries/cancel");
    assert!(request.body.unwrap().contains(DELIVERY_ID));
    assert!(request.query.is_empty());
}

#[test]
fn test_delivery_cancel_already_finished() {
    let stub = Arc::new(StubTransport::fixed(
        400,
        r#"{"message":"Job already finished","code":"Unspecified"}"#,
    ));
    let service = DeliveryService::with_client(client(&stub, None));

    let error = service
        .cancel(&DeliveryCancelInput::new(Uuid::from_u128(1)))
        .unwrap_err();

    assert_eq!(error.code(), Some(ErrorCode::Unspecified));
    assert_eq!(error.as_service().unwrap().message(), "Job already finished");
}

#[test]
fn test_service_paths() {
    let stub = Arc::new(StubTransport::new(Reply::Echo));

    assert_eq!(DeliveryService::with_client(client(&stub, None)).service_path(), "deliveries");
    assert_eq!(DriverService::with_client(client(&stub, None)).service_path(), "drivers");
    assert_eq!(QuoteService::with_client(client(&stub, None)).service_path(), "quotes");
}

// ============================================================================
// API Key Tests
// ============================================================================

#[test]
fn test_service_key_overrides_configured() {
    let stub = Arc::new(StubTransport::fixed(200, "[]"));
    let configured = Uuid::from_u128(10);
    let service_key = Uuid::from_u128(20);
    let service = DriverService::with_client(client(&stub, Some(configured)));

    service.list(&DriverListInput::default()).unwrap();
    assert_eq!(
        stub.last().query_value("apiKey"),
        Some(configured.to_string().as_str())
    );

    let service = service.with_api_key(service_key);
    assert_eq!(service.api_key(), Some(service_key));
    service.list(&DriverListInput::default()).unwrap();
    assert_eq!(
        stub.last().query_value("apiKey"),
        Some(service_key.to_string().as_str())
    );

    let own = Uuid::from_u128(30);
    let input = DriverListInput {
        api_key: Some(own),
        filter: Some(DriverApiFilter::OnlineNow),
    };
    service.list(&input).unwrap();
    assert_eq!(stub.last().query_value("apiKey"), Some(own.to_string().as_str()));
    assert_eq!(stub.last().query_value("filter"), Some("OnlineNow"));
}

#[test]
fn test_set_api_key_clears() {
    let stub = Arc::new(StubTransport::fixed(200, "[]"));
    let mut service = DriverService::with_client(client(&stub, None)).with_api_key(Uuid::from_u128(1));

    service.set_api_key(None);
    service.list(&DriverListInput::default()).unwrap();

    assert_eq!(service.api_key(), None);
    assert_eq!(stub.last().query_value("apiKey"), None);
}

// ============================================================================
// DriverService Tests
// ============================================================================

#[test]
fn test_driver_list_bare_array() {
    let stub = Arc::new(StubTransport::fixed(
        200,
        &format!(r#"[{{"identifier":"{DRIVER_ID}","name":"Sam"}}]"#),
    ));
    let service = DriverService::with_client(client(&stub, None));

    let drivers = service.list(&DriverListInput::default()).unwrap();

    assert_eq!(drivers.data.len(), 1);
    assert_eq!(drivers.data[0].name.as_deref(), Some("Sam"));
    assert_eq!(drivers.response.unwrap().status, 200);
}

#[test]
fn test_driver_get() {
    let stub = Arc::new(StubTransport::fixed(
        200,
        &format!(r#"{{"identifier":"{DRIVER_ID}"}}"#),
    ));
    let service = DriverService::with_client(client(&stub, None));
    let id = Uuid::parse_str(DRIVER_ID).unwrap();

    let driver = service.get(&DriverGetInput::new(id)).unwrap();

    assert_eq!(driver.identifier, id);
    assert_eq!(stub.last().path, format!("drivers/{DRIVER_ID}"));
}

#[test]
fn test_rate_limited() {
    let stub = Arc::new(StubTransport::new(Reply::Fixed(RawResponse::new(
        429,
        "Too many requests",
    ))));
    let service = DriverService::with_client(client(&stub, None));

    let error = service.list(&DriverListInput::default()).unwrap_err();

    assert_eq!(error.as_service().unwrap().message(), "Too many requests");
    assert_eq!(error.code(), Some(ErrorCode::None));
}

// ============================================================================
// QuoteService Tests
// ============================================================================

#[test]
fn test_quote_create_posts_booking() {
    let stub = Arc::new(StubTransport::fixed(
        200,
        r#"{"quote":{"distanceKm":3.5,"fee":{"cost":12.5,"costCents":1250}}}"#,
    ));
    let service = QuoteService::with_client(client(&stub, Some(Uuid::from_u128(4))));
    let input = QuoteCreateInput::for_addresses(Some("1 Pickup Ln"), "2 Dropoff Rd")
        .into_result()
        .unwrap();

    let quote = service.create(&input).unwrap();

    assert_eq!(quote.quote.fee.unwrap().cost_cents, 1250);
    let body: serde_json::Value = serde_json::from_str(&stub.last().body.unwrap()).unwrap();
    assert_eq!(body["booking"]["dropoffDetail"]["address"], "2 Dropoff Rd");
    assert_eq!(body["apiKey"], Uuid::from_u128(4).to_string());
    assert_eq!(stub.last().path, "quotes");
}

// ============================================================================
// Async Tests
// ============================================================================

#[tokio::test]
async fn test_delivery_get_async() {
    let stub = Arc::new(StubTransport::fixed(200, &delivery_body()));
    let service = DeliveryService::with_client(client(&stub, None));
    let input = DeliveryGetInput::new(Uuid::parse_str(DELIVERY_ID).unwrap());

    let details = service.get_async(&input).await.unwrap();

    assert_eq!(details.current_status.as_deref(), Some("Cancelled"));
}

#[tokio::test]
async fn test_quote_create_async_cancellable() {
    let stub = Arc::new(StubTransport::new(Reply::Slow(Duration::from_secs(5))));
    let service = QuoteService::with_client(client(&stub, None));
    let input = QuoteCreateInput::for_dropoff("2 Dropoff Rd").into_result().unwrap();
    let token = CancellationToken::new();

    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        canceller.cancel();
    });

    let result = service.create_async_cancellable(&input, &token).await;

    assert!(matches!(result, Err(Error::Cancelled)));
}

#[tokio::test]
async fn test_driver_list_async() {
    let stub = Arc::new(StubTransport::fixed(200, r#"{"data":[]}"#));
    let service = DriverService::with_client(client(&stub, None));

    let drivers = service.list_async(&DriverListInput::default()).await.unwrap();

    assert!(drivers.data.is_empty());
}
