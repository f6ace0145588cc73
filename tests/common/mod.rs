// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use zeromoto_tracker::config::Config;
use zeromoto_tracker::models::UnknownVehiclePolicy;
use zeromoto_tracker::routes::create_router;
use zeromoto_tracker::services::EmissionCatalog;
use zeromoto_tracker::AppState;
use std::sync::Arc;

/// Create a test app with the built-in catalog and a fresh ledger.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_policy(UnknownVehiclePolicy::ZeroFill)
}

/// Create a test app whose ledger applies `policy` to unknown vehicles.
#[allow(dead_code)]
pub fn create_test_app_with_policy(policy: UnknownVehiclePolicy) -> (axum::Router, Arc<AppState>) {
    let config = Config {
        unknown_vehicle_policy: policy,
        ..Config::default()
    };
    let state = Arc::new(AppState::new(config, EmissionCatalog::default()));

    (create_router(state.clone()), state)
}

/// Build a JSON POST request.
#[allow(dead_code)]
pub fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a CSV upload request.
#[allow(dead_code)]
pub fn csv_post(uri: &str, csv: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "text/csv")
        .body(Body::from(csv.to_string()))
        .unwrap()
}

/// Build a GET request.
#[allow(dead_code)]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

/// Read a response body as text.
#[allow(dead_code)]
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
