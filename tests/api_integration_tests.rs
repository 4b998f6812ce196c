//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each passport route through the
//! local HTTP router.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use passport_api::{
    api::create_router, clock::ManualClock, store::InMemoryStore, AppState, Dispatcher,
    PassportService,
};
use serde_json::Value;
use tower::ServiceExt;

const T0: i64 = 1_700_000_000_000;

// == Helper Functions ==

fn create_test_app() -> (Router, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(T0));
    let service = PassportService::with_clock(Arc::new(InMemoryStore::new()), clock.clone());
    let app = create_router(AppState::new(Dispatcher::new(service)));
    (app, clock)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == PUT Endpoint Tests ==

#[tokio::test]
async fn test_create_passport() {
    let (app, _) = create_test_app();

    let (status, json) = send(
        &app,
        "PUT",
        "/passports",
        Some(r#"{"address":"terratestaddress","score":700}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["address"], "terratestaddress");
    assert_eq!(json["score"], 700);
    assert_eq!(json["deliveryDate"], T0);
    assert_eq!(json["lastUpdated"], T0);
    assert!(json.get("transactionID").is_none());
}

#[tokio::test]
async fn test_create_then_update_passport() {
    let (app, clock) = create_test_app();

    send(&app, "PUT", "/passports", Some(r#"{"address":"addr1","score":700}"#)).await;

    clock.advance(60_000);
    let (status, json) = send(
        &app,
        "PUT",
        "/passports",
        Some(r#"{"address":"addr1","score":800,"transactionID":"tx1"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["score"], 800);
    assert_eq!(json["deliveryDate"], T0);
    assert_eq!(json["lastUpdated"], T0 + 60_000);
    assert_eq!(json["transactionID"], "tx1");
}

#[tokio::test]
async fn test_update_without_transaction_rejected() {
    let (app, clock) = create_test_app();

    send(&app, "PUT", "/passports", Some(r#"{"address":"addr1","score":700}"#)).await;

    clock.advance(1_000);
    let (status, json) = send(
        &app,
        "PUT",
        "/passports",
        Some(r#"{"address":"addr1","score":900}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json,
        "Updating a passport requires providing the transaction ID of the associated transaction"
    );

    let (_, stored) = send(&app, "GET", "/passports/addr1", None).await;
    assert_eq!(stored["score"], 700);
    assert_eq!(stored["lastUpdated"], T0);
}

#[tokio::test]
async fn test_put_without_score() {
    let (app, _) = create_test_app();

    let (status, json) = send(&app, "PUT", "/passports", Some(r#"{"address":"addr2"}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, "You need to provide a valid score");
}

#[tokio::test]
async fn test_put_without_address() {
    let (app, _) = create_test_app();

    let (status, json) = send(&app, "PUT", "/passports", Some(r#"{"score":10}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, "You need to provide a valid address");
}

#[tokio::test]
async fn test_put_score_bounds() {
    let (app, _) = create_test_app();

    let (status, json) = send(&app, "PUT", "/passports", Some(r#"{"address":"a","score":1001}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, "The score needs to be between 0 and 1000");

    let (status, _) = send(&app, "PUT", "/passports", Some(r#"{"address":"a","score":-3}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = send(&app, "PUT", "/passports", Some(r#"{"address":"a","score":1000}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["score"], 1000);
}

#[tokio::test]
async fn test_put_accepts_integral_float_score() {
    let (app, _) = create_test_app();

    let (status, json) = send(&app, "PUT", "/passports", Some(r#"{"address":"a","score":700.0}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["score"], 700);
}

#[tokio::test]
async fn test_put_zero_score_reported_missing() {
    let (app, _) = create_test_app();

    let (status, json) = send(&app, "PUT", "/passports", Some(r#"{"address":"a","score":0}"#)).await;

    // 0 is rejected by the presence check, not the range check
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, "You need to provide a valid score");
}

#[tokio::test]
async fn test_invalid_json_request() {
    let (app, _) = create_test_app();

    let (status, json) = send(&app, "PUT", "/passports", Some(r#"{"invalid json"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.as_str().unwrap().starts_with("Invalid request body"));
}

// == GET Endpoint Tests ==

#[tokio::test]
async fn test_get_passport() {
    let (app, _) = create_test_app();
    send(&app, "PUT", "/passports", Some(r#"{"address":"addr1","score":700}"#)).await;

    let (status, json) = send(&app, "GET", "/passports/addr1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["address"], "addr1");
    assert_eq!(json["score"], 700);
}

#[tokio::test]
async fn test_get_missing_passport_is_null() {
    let (app, _) = create_test_app();

    let (status, json) = send(&app, "GET", "/passports/nobody", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json.is_null());
}

#[tokio::test]
async fn test_list_passports() {
    let (app, _) = create_test_app();
    for address in ["a", "b", "c"] {
        let body = format!(r#"{{"address":"{}","score":5}}"#, address);
        send(&app, "PUT", "/passports", Some(&body)).await;
    }

    let (status, json) = send(&app, "GET", "/passports", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["Count"], 3);
    assert_eq!(json["Items"].as_array().unwrap().len(), 3);
}

// == DELETE Endpoint Tests ==

#[tokio::test]
async fn test_delete_twice() {
    let (app, _) = create_test_app();
    send(&app, "PUT", "/passports", Some(r#"{"address":"addr1","score":700}"#)).await;

    for _ in 0..2 {
        let (status, json) = send(&app, "DELETE", "/passports/addr1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, "Deleted item addr1");
    }

    let (_, json) = send(&app, "GET", "/passports/addr1", None).await;
    assert!(json.is_null());
}

#[tokio::test]
async fn test_delete_then_recreate_issues_new_passport() {
    let (app, clock) = create_test_app();
    send(&app, "PUT", "/passports", Some(r#"{"address":"addr1","score":700}"#)).await;
    send(&app, "DELETE", "/passports/addr1", None).await;

    clock.advance(500);
    let (status, json) = send(&app, "PUT", "/passports", Some(r#"{"address":"addr1","score":300}"#)).await;

    // No transaction ID needed: the record is inserted again
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["deliveryDate"], T0 + 500);
}

// == Unsupported Route Tests ==

#[tokio::test]
async fn test_unsupported_route() {
    let (app, _) = create_test_app();

    let (status, json) = send(&app, "POST", "/passports", Some("{}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, r#"Unsupported route: "POST /passports""#);
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
}
