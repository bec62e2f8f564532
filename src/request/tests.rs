//! Unit tests for request module.

use super::*;
use crate::types::{
    DeliveryApiFilter, DeliveryCancelInput, DeliveryGetInput, DeliveryListInput, DriverListInput,
};

fn key(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

fn deliveries() -> RequestBuilder {
    RequestBuilder::new("deliveries")
}

// ============================================================================
// Path Tests
// ============================================================================

#[test]
fn test_path_for() {
    let builder = deliveries();

    assert_eq!(builder.path_for(""), "deliveries");
    assert_eq!(builder.path_for("cancel"), "deliveries/cancel");
    assert_eq!(builder.path_for("/abc/"), "deliveries/abc");
    assert_eq!(RequestBuilder::new("").path_for("test"), "test");
    assert_eq!(RequestBuilder::new("/quotes/").service_path(), "quotes");
}

#[test]
fn test_http_method_display() {
    assert_eq!(HttpMethod::Get.to_string(), "GET");
    assert_eq!(HttpMethod::Post.as_str(), "POST");
}

// ============================================================================
// Build Tests
// ============================================================================

#[test]
fn test_build_without_input() {
    let request = deliveries()
        .build::<DriverListInput>("", HttpMethod::Get, None, ApiKeys {
            service: Some(key(1)),
            configured: None,
        })
        .unwrap();

    assert!(request.query.is_empty());
    assert!(request.body.is_none());
    assert_eq!(
        request.headers,
        vec![("Content-Type".to_string(), "application/json".to_string())]
    );
}

#[test]
fn test_get_puts_fields_in_query() {
    let input = DeliveryListInput {
        filter: Some(DeliveryApiFilter::Successful),
        page_size: Some(10),
        ..Default::default()
    };

    let request = deliveries()
        .build("", HttpMethod::Get, Some(&input), ApiKeys::default())
        .unwrap();

    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.path, "deliveries");
    assert_eq!(
        request.query,
        vec![
            ("filter".to_string(), "Successful".to_string()),
            ("pageSize".to_string(), "10".to_string()),
        ]
    );
    assert!(request.body.is_none());
}

#[test]
fn test_get_rewrites_expandables() {
    let mut input = DeliveryGetInput::new(key(42));
    input.expand_stage_history = true;
    input.expand_items = true;

    let request = deliveries()
        .build(&input.id.to_string(), HttpMethod::Get, Some(&input), ApiKeys::default())
        .unwrap();

    assert_eq!(request.path, format!("deliveries/{}", key(42)));
    assert_eq!(request.query_value("expand[0]"), Some("StageHistory"));
    assert_eq!(request.query_value("expand[1]"), Some("Items"));
    assert_eq!(request.query_value("expandStageHistory"), None);
    assert_eq!(request.query.len(), 2);
}

#[test]
fn test_get_is_deterministic() {
    let mut input = DeliveryGetInput::new(key(7));
    input.expand_constraints = true;
    input.expand_items = true;

    let builder = deliveries();
    let first = builder
        .build("x", HttpMethod::Get, Some(&input), ApiKeys::default())
        .unwrap();
    let second = builder
        .build("x", HttpMethod::Get, Some(&input), ApiKeys::default())
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_post_puts_input_in_body() {
    let input = DeliveryCancelInput::new(key(9)).with_notes("wrong address");

    let request = deliveries()
        .build("cancel", HttpMethod::Post, Some(&input), ApiKeys::default())
        .unwrap();

    assert!(request.query.is_empty());
    let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["jobId"], key(9).to_string());
    assert_eq!(body["cancellationNotes"], "wrong address");
}

#[test]
fn test_non_object_input_rejected() {
    let result = deliveries().build("", HttpMethod::Post, Some(&42), ApiKeys::default());

    assert!(matches!(result, Err(Error::Json(_))));
}

// ============================================================================
// API Key Precedence Tests
// ============================================================================

fn sent_key(input: &DriverListInput, keys: ApiKeys) -> Option<String> {
    RequestBuilder::new("drivers")
        .build("", HttpMethod::Get, Some(input), keys)
        .unwrap()
        .query_value(API_KEY_FIELD)
        .map(str::to_string)
}

#[test]
fn test_input_key_wins() {
    let input = DriverListInput {
        api_key: Some(key(1)),
        filter: None,
    };
    let keys = ApiKeys {
        service: Some(key(2)),
        configured: Some(key(3)),
    };

    assert_eq!(sent_key(&input, keys), Some(key(1).to_string()));
}

#[test]
fn test_service_key_beats_configured() {
    let keys = ApiKeys {
        service: Some(key(2)),
        configured: Some(key(3)),
    };

    assert_eq!(
        sent_key(&DriverListInput::default(), keys),
        Some(key(2).to_string())
    );
}

#[test]
fn test_configured_key_is_last_resort() {
    let keys = ApiKeys {
        service: None,
        configured: Some(key(3)),
    };

    assert_eq!(
        sent_key(&DriverListInput::default(), keys),
        Some(key(3).to_string())
    );
    assert_eq!(sent_key(&DriverListInput::default(), ApiKeys::default()), None);
}

#[test]
fn test_caller_input_not_mutated() {
    let input = DriverListInput::default();
    let keys = ApiKeys {
        service: Some(key(2)),
        configured: None,
    };

    let _ = sent_key(&input, keys);
    assert_eq!(input.api_key, None);
}
