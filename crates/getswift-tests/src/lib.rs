//! Integration tests for the GetSwift client.
//!
//! The tests run against an in-process mock of the GetSwift API started on a
//! random local port. Set `RUST_LOG` (for example `RUST_LOG=getswift=debug`)
//! to see the client's logs.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use getswift::GetSwiftConfig;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::error;
use uuid::Uuid;

/// Path of the API root on the mock server.
pub const API_PREFIX: &str = "/api/v2";

/// Merchant key accepted by the mock.
pub const MERCHANT_KEY: Uuid = Uuid::from_u128(0x6a0f_1e4c_0b5e_4c5f_9d84_0a3c_2f8e_7b11);
/// Second accepted key, used as a service-level key.
pub const SERVICE_KEY: Uuid = Uuid::from_u128(0x2b7d_3c11_8e4a_4f0b_a1c2_5d6e_7f80_9a12);
/// Key the mock answers with 429.
pub const RATE_LIMITED_KEY: Uuid = Uuid::from_u128(0x0e1d_2c3b_4a59_4687_9a0b_1c2d_3e4f_5a6b);
/// Key the mock answers only after [`SLOW_DELAY`].
pub const SLOW_KEY: Uuid = Uuid::from_u128(0x5c4b_3a29_1807_4f6e_8d5c_4b3a_2918_0706);
/// Key the mock rejects as invalid.
pub const UNKNOWN_KEY: Uuid = Uuid::from_u128(0x7f7f_7f7f_7f7f_4f7f_8f7f_7f7f_7f7f_7f7f);

/// Delay applied to calls made with [`SLOW_KEY`].
pub const SLOW_DELAY: Duration = Duration::from_secs(3);

/// Delivery that can still be cancelled.
pub const ACTIVE_DELIVERY: Uuid = Uuid::from_u128(0x5b3b_5a38_7c42_4a3f_9f0e_3c2d_7b0c_8d11);
/// Delivery that has already been completed.
pub const FINISHED_DELIVERY: Uuid = Uuid::from_u128(0x8c1a_9d02_3b4e_4c6f_b7a8_1d2e_3f4a_5b6c);
/// Number of deliveries the mock is seeded with.
pub const SEEDED_DELIVERIES: usize = 5;

/// Driver that is online.
pub const ONLINE_DRIVER: Uuid = Uuid::from_u128(0x0d7e_8f35_2a8b_4c8a_a6a2_6f8c_5f1e_4b20);
/// Driver that is offline.
pub const OFFLINE_DRIVER: Uuid = Uuid::from_u128(0x1e8f_9046_3b9c_4d9b_b7b3_7a9d_6a2f_5c31);

/// Dropoff address the mock cannot locate.
pub const UNKNOWN_ADDRESS: &str = "1 Atlantis Way";

const QUOTE_BASE_CENTS: i64 = 800;
const QUOTE_ITEM_CENTS: i64 = 150;

// ============================================================================
// Test Setup
// ============================================================================

/// Initializes a test subscriber filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}

/// A running mock API.
#[derive(Debug, Clone, Copy)]
pub struct MockServer {
    addr: SocketAddr,
}

impl MockServer {
    /// Starts a mock API on a random port in a thread of its own.
    ///
    /// # Errors
    /// Returns error if the listener or runtime cannot be created.
    pub fn start() -> std::io::Result<Self> {
        init_tracing();

        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        listener.set_nonblocking(true)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        std::thread::spawn(move || {
            let served = runtime.block_on(async {
                let listener = tokio::net::TcpListener::from_std(listener)?;
                axum::serve(listener, app()).await
            });
            if let Err(e) = served {
                error!(error = %e, "mock server stopped");
            }
        });

        Ok(Self { addr })
    }

    /// API root of the mock.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.addr, API_PREFIX)
    }

    /// Client configuration pointing at the mock with [`MERCHANT_KEY`].
    #[must_use]
    pub fn config(&self) -> GetSwiftConfig {
        GetSwiftConfig::default()
            .with_base_url(self.base_url())
            .with_api_key(MERCHANT_KEY)
            .with_timeout(Duration::from_secs(10))
    }
}

/// API root on a local port nothing listens on.
///
/// # Errors
/// Returns error if no port can be reserved.
pub fn closed_port_url() -> std::io::Result<String> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}{API_PREFIX}"))
}

// ============================================================================
// Mock API
// ============================================================================

#[derive(Debug, Clone)]
struct MockDelivery {
    id: Uuid,
    reference: String,
    status: &'static str,
    created: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct MockDriver {
    id: Uuid,
    name: &'static str,
    online: bool,
}

#[derive(Debug, Clone)]
struct MockState {
    deliveries: Arc<RwLock<HashMap<Uuid, MockDelivery>>>,
    drivers: Arc<Vec<MockDriver>>,
}

/// Router of the mock API.
pub fn app() -> Router {
    let created = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).single().unwrap_or_default();
    let mut deliveries = vec![
        MockDelivery {
            id: ACTIVE_DELIVERY,
            reference: "ORDER-1".to_string(),
            status: "Accepted",
            created,
        },
        MockDelivery {
            id: FINISHED_DELIVERY,
            reference: "ORDER-2".to_string(),
            status: "Completed",
            created,
        },
    ];
    for n in 3..=SEEDED_DELIVERIES {
        deliveries.push(MockDelivery {
            id: Uuid::from_u128(n as u128),
            reference: format!("ORDER-{n}"),
            status: "Received",
            created: created + ChronoDuration::minutes(n as i64),
        });
    }

    let state = MockState {
        deliveries: Arc::new(RwLock::new(
            deliveries.into_iter().map(|d| (d.id, d)).collect(),
        )),
        drivers: Arc::new(vec![
            MockDriver {
                id: ONLINE_DRIVER,
                name: "Sam Rivers",
                online: true,
            },
            MockDriver {
                id: OFFLINE_DRIVER,
                name: "Alex Stone",
                online: false,
            },
        ]),
    };

    let api = Router::new()
        .route("/deliveries", get(list_deliveries))
        .route("/deliveries/cancel", post(cancel_delivery))
        .route("/deliveries/{id}", get(get_delivery))
        .route("/drivers", get(list_drivers))
        .route("/drivers/{id}", get(get_driver))
        .route("/quotes", post(create_quote));

    Router::new().nest(API_PREFIX, api).with_state(state)
}

type ApiResult = Result<Json<Value>, Response>;

fn rejection(code: &str, message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": message, "code": code })),
    )
        .into_response()
}

async fn authorise(key: Option<&str>) -> Result<(), Response> {
    let key = key.and_then(|k| Uuid::parse_str(k).ok());
    match key {
        Some(k) if k == MERCHANT_KEY || k == SERVICE_KEY => Ok(()),
        Some(k) if k == SLOW_KEY => {
            tokio::time::sleep(SLOW_DELAY).await;
            Ok(())
        }
        Some(k) if k == RATE_LIMITED_KEY => Err((
            StatusCode::TOO_MANY_REQUESTS,
            "API calls quota exceeded! maximum admitted 10 per Second.",
        )
            .into_response()),
        _ => Err(rejection("Unauthorised", "Invalid API key")),
    }
}

fn delivery_json(delivery: &MockDelivery, stage_history: bool) -> Value {
    let mut value = json!({
        "id": delivery.id,
        "created": delivery.created,
        "reference": delivery.reference,
        "currentStatus": delivery.status,
        "pickupLocation": { "name": "Swift Kitchen", "address": "1 George St, Sydney" },
        "dropoffLocation": { "address": "5 Martin Pl, Sydney" },
        "trackingUrls": { "www": format!("https://app.getswift.co/track/{}", delivery.id) },
        "deliveryFee": 12.5,
        "estimatedDistance": { "kilometres": 4.2, "miles": 2.61 },
    });
    if stage_history {
        value["stageHistory"] = json!([
            { "created": delivery.created, "stage": "Received" },
            { "created": delivery.created, "stage": delivery.status, "notes": "updated by mock" },
        ]);
    }
    value
}

fn driver_json(driver: &MockDriver) -> Value {
    json!({
        "identifier": driver.id,
        "name": driver.name,
        "phone": "0400 000 000",
        "email": format!("{}@drivers.example.com", driver.name.to_lowercase().replace(' ', ".")),
    })
}

async fn get_delivery(
    State(state): State<MockState>,
    Path(id): Path<Uuid>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    authorise(params.get("apiKey").map(String::as_str)).await?;

    let deliveries = state.deliveries.read().await;
    let delivery = deliveries
        .get(&id)
        .ok_or_else(|| rejection("DeliveryNotFound", "Delivery not found"))?;
    let stage_history = params
        .iter()
        .any(|(key, value)| key.starts_with("expand[") && value == "StageHistory");

    Ok(Json(delivery_json(delivery, stage_history)))
}

async fn list_deliveries(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    authorise(params.get("apiKey").map(String::as_str)).await?;

    let page_size = params
        .get("pageSize")
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|size| *size > 0)
        .unwrap_or(10);
    let page_number = params
        .get("pageNumber")
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|page| *page > 0)
        .unwrap_or(1);

    let deliveries = state.deliveries.read().await;
    let mut matching: Vec<&MockDelivery> = deliveries
        .values()
        .filter(|d| match params.get("filter").map(String::as_str) {
            Some("Cancelled") => d.status == "Cancelled",
            Some("Successful") => d.status == "Completed",
            Some("Active") => !matches!(d.status, "Cancelled" | "Completed"),
            _ => true,
        })
        .collect();
    matching.sort_by_key(|d| d.created);

    let page_count = matching.len().div_ceil(page_size);
    let data: Vec<Value> = matching
        .iter()
        .skip((page_number - 1) * page_size)
        .take(page_size)
        .map(|d| delivery_json(d, false))
        .collect();
    let page_url = |n: usize| format!("https://app.getswift.co{API_PREFIX}/deliveries?pageNumber={n}");

    Ok(Json(json!({
        "currentPage": page_number,
        "pageCount": page_count,
        "pageSize": page_size,
        "totalCount": matching.len(),
        "firstPageUrl": page_url(1),
        "previousPageUrl": (page_number > 1).then(|| page_url(page_number - 1)),
        "nextPageUrl": (page_number < page_count).then(|| page_url(page_number + 1)),
        "lastPageUrl": page_url(page_count.max(1)),
        "data": data,
    })))
}

async fn cancel_delivery(State(state): State<MockState>, Json(body): Json<Value>) -> ApiResult {
    authorise(body["apiKey"].as_str()).await?;

    let id = body["jobId"]
        .as_str()
        .and_then(|v| Uuid::parse_str(v).ok())
        .ok_or_else(|| rejection("NoData", "Job id is required"))?;

    let mut deliveries = state.deliveries.write().await;
    let delivery = deliveries
        .get_mut(&id)
        .ok_or_else(|| rejection("DeliveryNotFound", "Delivery not found"))?;
    if delivery.status == "Completed" {
        return Err(rejection("Unspecified", "Job already finished"));
    }
    delivery.status = "Cancelled";

    Ok(Json(delivery_json(delivery, false)))
}

async fn list_drivers(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    authorise(params.get("apiKey").map(String::as_str)).await?;

    let online_only = params.get("filter").is_some_and(|f| f == "OnlineNow");
    let drivers: Vec<Value> = state
        .drivers
        .iter()
        .filter(|d| !online_only || d.online)
        .map(driver_json)
        .collect();

    // the live API answers driver lists with a bare array
    Ok(Json(Value::Array(drivers)))
}

async fn get_driver(
    State(state): State<MockState>,
    Path(id): Path<Uuid>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    authorise(params.get("apiKey").map(String::as_str)).await?;

    state
        .drivers
        .iter()
        .find(|d| d.id == id)
        .map(|d| Json(driver_json(d)))
        .ok_or_else(|| rejection("NoData", "Driver not found"))
}

async fn create_quote(Json(body): Json<Value>) -> ApiResult {
    authorise(body["apiKey"].as_str()).await?;

    let booking = &body["booking"];
    let dropoff = booking["dropoffDetail"]["address"]
        .as_str()
        .ok_or_else(|| rejection("NoDropoffDeets", "Dropoff details are required"))?;
    if dropoff.contains(UNKNOWN_ADDRESS) {
        return Err(rejection(
            "InvalidDropoffAddress",
            "Dropoff address could not be found",
        ));
    }

    let items = booking["items"].as_array().map_or(0, Vec::len) as i64;
    let cents = QUOTE_BASE_CENTS + QUOTE_ITEM_CENTS * items;
    let now = Utc::now();
    let estimate = |minutes: i64| {
        json!({
            "average": now + ChronoDuration::minutes(minutes),
            "earliest": now + ChronoDuration::minutes(minutes - 10),
            "latest": now + ChronoDuration::minutes(minutes + 10),
        })
    };

    Ok(Json(json!({
        "quote": {
            "created": now,
            "distanceKm": 4.2,
            "fee": { "cost": cents as f64 / 100.0, "costCents": cents },
            "pickup": {
                "address": booking["pickupDetail"]["address"],
                "time": estimate(20),
            },
            "dropoff": { "address": dropoff, "time": estimate(45) },
        },
        "request": booking,
    })))
}
