// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Route registration tests
//!
//! These tests verify that:
//! - GET / answers with a JSON greeting
//! - /health and /v1/styles report model availability
//! - /stylize only accepts POST
//! - Unknown routes return 404

use artifice_stylizer::api::{create_app, AppState};
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use tower::util::ServiceExt; // for `oneshot`

use super::common::body_json;

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_root_returns_message() {
    let app = create_app(AppState::new_for_test());

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let message = body["message"].as_str().unwrap();
    assert!(!message.is_empty());
}

#[tokio::test]
async fn test_health_route_registered() {
    let app = create_app(AppState::new_for_test());

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["cartoonizer_loaded"], false);
    assert_eq!(body["status"], "degraded");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_styles_route_registered() {
    let app = create_app(AppState::new_for_test());

    let response = app.oneshot(get("/v1/styles")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let styles = body["styles"].as_array().unwrap();
    let labels: Vec<&str> = styles
        .iter()
        .map(|s| s["label"].as_str().unwrap())
        .collect();
    assert_eq!(
        labels,
        vec!["White-box Cartoonizer", "Pencil Sketch", "Oil Painting"]
    );
    assert_eq!(styles[0]["available"], false);
}

#[tokio::test]
async fn test_stylize_rejects_get() {
    let app = create_app(AppState::new_for_test());

    let response = app.oneshot(get("/stylize")).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_app(AppState::new_for_test());

    let response = app.oneshot(get("/v1/ocr")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_preflight_is_answered() {
    let app = create_app(AppState::new_for_test());

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/stylize")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}
