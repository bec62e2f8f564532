//! Unit tests for transport module.

use super::*;
use std::time::Duration;

fn request(path: &str, query: &[(&str, &str)]) -> ApiRequest {
    ApiRequest {
        method: HttpMethod::Get,
        path: path.to_string(),
        headers: Vec::new(),
        query: query
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        body: None,
    }
}

// ============================================================================
// HttpTransport Tests
// ============================================================================

#[test]
fn test_transport_rejects_invalid_config() {
    let config = GetSwiftConfig::default().with_base_url("not a url");

    assert!(matches!(HttpTransport::new(&config), Err(Error::Config(_))));
}

#[test]
fn test_url_for_joins_base_path() {
    let transport = HttpTransport::new(&GetSwiftConfig::default()).unwrap();

    let url = transport.url_for(&request("deliveries/cancel", &[])).unwrap();

    assert_eq!(url.as_str(), "https://app.getswift.co/api/v2/deliveries/cancel");
    assert!(url.query().is_none());
}

#[test]
fn test_url_for_encodes_query() {
    let config = GetSwiftConfig::default().with_base_url("http://localhost:9000/api/v2");
    let transport = HttpTransport::new(&config).unwrap();

    let url = transport
        .url_for(&request(
            "deliveries",
            &[("filter", "All"), ("expand[0]", "StageHistory")],
        ))
        .unwrap();

    assert_eq!(
        url.as_str(),
        "http://localhost:9000/api/v2/deliveries?filter=All&expand%5B0%5D=StageHistory"
    );
    let pairs: Vec<_> = url.query_pairs().into_owned().collect();
    assert_eq!(pairs[1], ("expand[0]".to_string(), "StageHistory".to_string()));
}

// ============================================================================
// CancellationToken Tests
// ============================================================================

#[test]
fn test_token_starts_uncancelled() {
    let token = CancellationToken::default();

    assert!(!token.is_cancelled());
    token.cancel();
    assert!(token.is_cancelled());
}

#[test]
fn test_token_clones_share_signal() {
    let token = CancellationToken::new();
    let clone = token.clone();

    clone.cancel();

    assert!(token.is_cancelled());
}

#[tokio::test]
async fn test_cancelled_completes_after_cancel() {
    let token = CancellationToken::new();
    let waiter = token.clone();

    let handle = tokio::spawn(async move { waiter.cancelled().await });
    token.cancel();

    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("cancelled() should complete")
        .unwrap();
}

#[tokio::test]
async fn test_cancelled_completes_when_already_cancelled() {
    let token = CancellationToken::new();
    token.cancel();

    tokio::time::timeout(Duration::from_millis(100), token.cancelled())
        .await
        .expect("already cancelled token should resolve immediately");
}
