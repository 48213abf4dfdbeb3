//! Integration tests for the Sparco webhook endpoint.
//!
//! These tests drive the full router:
//! 1. Signed JSON and form notifications move orders through the state machine
//! 2. Unverified notifications leave orders untouched
//! 3. Acknowledgement bodies and status codes match what the processor expects

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use sparco_gateway::adapters::{api_router, GatewayAppState, InMemoryOrderStore, MockHttpClient};
use sparco_gateway::config::GatewayConfig;
use sparco_gateway::domain::foundation::OrderId;
use sparco_gateway::domain::order::{BillingDetails, Order, OrderStatus};
use sparco_gateway::domain::signature::{FieldMap, SignatureCodec};
use sparco_gateway::ports::OrderStore;

// =============================================================================
// Test Infrastructure
// =============================================================================

const WEBHOOK_PATH: &str = "/api/webhooks/sparco";

fn gateway_config() -> GatewayConfig {
    GatewayConfig::new(
        "pk_live_shop",
        "sk_live_shop",
        "https://shop.example/api/webhooks/sparco",
    )
}

fn on_hold_order(id: u64) -> Order {
    let mut order = Order::new(OrderId::new(id), "150.00", "ZMW", BillingDetails::default());
    order.status = OrderStatus::OnHold;
    order
}

fn app_with(config: &GatewayConfig, orders: Vec<Order>) -> (axum::Router, Arc<InMemoryOrderStore>) {
    let store = Arc::new(InMemoryOrderStore::with_orders(orders));
    let state = GatewayAppState::new(store.clone(), Arc::new(MockHttpClient::new()), config);
    (api_router(state), store)
}

fn signed(pairs: &[(&str, &str)]) -> FieldMap {
    let fields: FieldMap = pairs.iter().map(|(k, v)| (*k, *v)).collect();
    SignatureCodec::generate(&fields, &gateway_config().signing_context())
}

fn json_body(fields: &FieldMap) -> String {
    let object: serde_json::Map<String, Value> = fields
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect();
    Value::Object(object).to_string()
}

fn post(content_type: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(WEBHOOK_PATH)
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn status_of(store: &InMemoryOrderStore, id: u64) -> OrderStatus {
    store.get(OrderId::new(id)).await.unwrap().unwrap().status
}

// =============================================================================
// Signed Notifications
// =============================================================================

#[tokio::test]
async fn signed_success_notification_completes_order() {
    let (app, store) = app_with(&gateway_config(), vec![on_hold_order(55)]);
    let fields = signed(&[
        ("merchantReference", "WC-x-55"),
        ("isError", ""),
        ("status", "TXN_AUTH_SUCCESSFUL"),
    ]);

    let (status, body) = send(app, post("application/json", json_body(&fields))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"webhookPayloadVerified": true, "status": "PROCESSED"}));
    assert_eq!(status_of(&store, 55).await, OrderStatus::Completed);
}

#[tokio::test]
async fn signed_form_notification_is_accepted() {
    let (app, store) = app_with(&gateway_config(), vec![on_hold_order(70)]);
    let fields = signed(&[("merchantReference", "WC-r1-70"), ("status", "PROCESSING")]);
    let pairs: Vec<(&str, &str)> = fields.iter().collect();
    let body = serde_urlencoded::to_string(&pairs).unwrap();

    let (status, body) = send(app, post("application/x-www-form-urlencoded", body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "PROCESSING");
    assert_eq!(status_of(&store, 70).await, OrderStatus::Processing);
}

#[tokio::test]
async fn unknown_order_is_acknowledged_with_error_message() {
    let (app, _store) = app_with(&gateway_config(), vec![]);
    let fields = signed(&[("merchantReference", "WC-x-999"), ("status", "PROCESSING")]);

    let (status, body) = send(app, post("application/json", json_body(&fields))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["webhookPayloadVerified"], true);
    assert_eq!(body["errMsg"], "Order not found: 999");
}

// =============================================================================
// Unverified Notifications
// =============================================================================

#[tokio::test]
async fn tampered_notification_is_not_verified() {
    let (app, store) = app_with(&gateway_config(), vec![on_hold_order(55)]);
    let mut fields = signed(&[("merchantReference", "WC-x-55"), ("status", "TXN_AUTH_SUCCESSFUL")]);
    fields.insert("status", "TXN_AUTH_UNSUCCESSFUL");

    let (status, body) = send(app, post("application/json", json_body(&fields))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"webhookPayloadVerified": false}));
    assert_eq!(status_of(&store, 55).await, OrderStatus::OnHold);
}

#[tokio::test]
async fn empty_body_is_not_verified() {
    let (app, _store) = app_with(&gateway_config(), vec![]);

    let (_status, body) = send(app, post("application/json", String::new())).await;

    assert_eq!(body, json!({"webhookPayloadVerified": false}));
}

#[tokio::test]
async fn configured_status_code_is_used_for_unverified() {
    let mut config = gateway_config();
    config.unverified_status_code = 401;
    let (app, _store) = app_with(&config, vec![]);

    let (status, _body) = send(app, post("application/json", "{}".to_string())).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn redelivered_notification_gets_same_acknowledgement() {
    let (app, store) = app_with(&gateway_config(), vec![on_hold_order(55)]);
    let fields = signed(&[("merchantReference", "WC-x-55"), ("status", "TXN_AUTH_SUCCESSFUL")]);

    let (_, first) = send(app.clone(), post("application/json", json_body(&fields))).await;
    let (_, second) = send(app, post("application/json", json_body(&fields))).await;

    assert_eq!(first, second);
    assert_eq!(store.fulfillment_count(OrderId::new(55)).await, 1);
}
