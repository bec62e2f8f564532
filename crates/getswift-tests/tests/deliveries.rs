//! Delivery service tests: get, list and cancel.

use getswift::{
    CancellationToken, DeliveryApiFilter, DeliveryCancelInput, DeliveryGetInput,
    DeliveryListInput, DeliveryService, ErrorCode,
};
use getswift_tests::{ACTIVE_DELIVERY, FINISHED_DELIVERY, MockServer, SEEDED_DELIVERIES};

fn service(server: &MockServer) -> DeliveryService {
    DeliveryService::new(server.config()).expect("Failed to create service")
}

#[test]
fn test_get_delivery() {
    let server = MockServer::start().expect("Failed to start mock");
    let deliveries = service(&server);

    let details = deliveries
        .get(&DeliveryGetInput::new(ACTIVE_DELIVERY))
        .expect("Failed to get delivery");

    assert_eq!(details.id, ACTIVE_DELIVERY);
    assert_eq!(details.reference.as_deref(), Some("ORDER-1"));
    assert_eq!(details.current_status.as_deref(), Some("Accepted"));
    assert!(details.stage_history.is_empty());
    assert!(details.tracking_urls.unwrap().www.is_some());
    assert_eq!(details.response.unwrap().status, 200);
}

#[test]
fn test_get_delivery_expands_stage_history() {
    let server = MockServer::start().expect("Failed to start mock");
    let deliveries = service(&server);
    let mut input = DeliveryGetInput::new(FINISHED_DELIVERY);
    input.expand_stage_history = true;

    let details = deliveries.get(&input).expect("Failed to get delivery");

    assert_eq!(details.stage_history.len(), 2);
    assert_eq!(details.stage_history[0].stage, "Received");
    assert_eq!(details.stage_history[1].stage, "Completed");
}

#[test]
fn test_get_unknown_delivery() {
    let server = MockServer::start().expect("Failed to start mock");
    let deliveries = service(&server);

    let error = deliveries
        .get(&DeliveryGetInput::new(uuid::Uuid::from_u128(999)))
        .unwrap_err();

    assert_eq!(error.code(), Some(ErrorCode::DeliveryNotFound));
    assert_eq!(error.as_service().unwrap().status(), 400);
}

#[test]
fn test_list_deliveries_paged() {
    let server = MockServer::start().expect("Failed to start mock");
    let deliveries = service(&server);
    let input = DeliveryListInput {
        page_size: Some(2),
        ..Default::default()
    };

    let page = deliveries.list(&input).expect("Failed to list deliveries");

    assert_eq!(page.total_count as usize, SEEDED_DELIVERIES);
    assert_eq!(page.page_size, 2);
    assert_eq!(page.page_count, 3);
    assert_eq!(page.data.len(), 2);
    assert!(page.previous_page_url.is_none());
    assert!(page.next_page_url.is_some());

    let last = deliveries
        .list(&DeliveryListInput {
            page_number: Some(3),
            page_size: Some(2),
            ..Default::default()
        })
        .expect("Failed to list deliveries");
    assert_eq!(last.data.len(), 1);
    assert!(last.next_page_url.is_none());
}

#[test]
fn test_list_deliveries_filtered() {
    let server = MockServer::start().expect("Failed to start mock");
    let deliveries = service(&server);
    let input = DeliveryListInput {
        filter: Some(DeliveryApiFilter::Successful),
        ..Default::default()
    };

    let page = deliveries.list(&input).expect("Failed to list deliveries");

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].id, FINISHED_DELIVERY);
}

#[test]
fn test_cancel_delivery() {
    let server = MockServer::start().expect("Failed to start mock");
    let deliveries = service(&server);

    let cancelled = deliveries
        .cancel(&DeliveryCancelInput::new(ACTIVE_DELIVERY).with_notes("customer changed mind"))
        .expect("Failed to cancel delivery");
    assert_eq!(cancelled.current_status.as_deref(), Some("Cancelled"));

    let page = deliveries
        .list(&DeliveryListInput {
            filter: Some(DeliveryApiFilter::Cancelled),
            ..Default::default()
        })
        .expect("Failed to list deliveries");
    assert_eq!(page.data.len(), 1);
}

#[test]
fn test_cancel_finished_delivery() {
    let server = MockServer::start().expect("Failed to start mock");
    let deliveries = service(&server);

    let error = deliveries
        .cancel(&DeliveryCancelInput::new(FINISHED_DELIVERY))
        .unwrap_err();

    let service_error = error.as_service().expect("Expected a service error");
    assert_eq!(service_error.code(), ErrorCode::Unspecified);
    assert_eq!(service_error.message(), "Job already finished");
    assert_eq!(service_error.status(), 400);
}

#[tokio::test]
async fn test_get_delivery_async() {
    let server = MockServer::start().expect("Failed to start mock");
    let deliveries = service(&server);

    let details = deliveries
        .get_async(&DeliveryGetInput::new(ACTIVE_DELIVERY))
        .await
        .expect("Failed to get delivery");

    assert_eq!(details.id, ACTIVE_DELIVERY);
}

#[tokio::test]
async fn test_cancel_delivery_async_cancellable() {
    let server = MockServer::start().expect("Failed to start mock");
    let deliveries = service(&server);
    let token = CancellationToken::new();

    let cancelled = deliveries
        .cancel_async_cancellable(&DeliveryCancelInput::new(ACTIVE_DELIVERY), &token)
        .await
        .expect("Failed to cancel delivery");

    assert_eq!(cancelled.current_status.as_deref(), Some("Cancelled"));
    assert!(!token.is_cancelled());
}

#[tokio::test]
async fn test_list_deliveries_async() {
    let server = MockServer::start().expect("Failed to start mock");
    let deliveries = service(&server);

    let page = deliveries
        .list_async(&DeliveryListInput::default())
        .await
        .expect("Failed to list deliveries");

    assert_eq!(page.data.len(), SEEDED_DELIVERIES);
    assert_eq!(page.current_page, 1);
}
