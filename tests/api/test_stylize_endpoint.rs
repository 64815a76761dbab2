// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! End-to-end tests for POST /stylize
//!
//! These tests verify that:
//! - Pencil sketch returns a grayscale PNG with the upload's dimensions
//! - Unknown styles are rejected unless legacy fallback is enabled
//! - Cartoonization needs a loaded model and crops to multiples of 8
//! - Malformed or oversized uploads map to client errors

use artifice_stylizer::{
    api::{create_app, ApiConfig, AppState},
    vision::{CartoonBackend, Stylizer},
};
use axum::http::{header, StatusCode};
use image::{ColorType, ImageFormat, Rgb, RgbImage};
use ndarray::Array4;
use std::sync::Arc;
use tower::util::ServiceExt;

use super::common::{body_bytes, body_json, solid_image, stylize_request};

/// Returns its input unchanged
struct IdentityBackend;

impl CartoonBackend for IdentityBackend {
    fn infer(&self, input: Array4<f32>) -> anyhow::Result<Array4<f32>> {
        Ok(input)
    }
}

fn state_with_cartoonizer() -> AppState {
    let backend: Arc<dyn CartoonBackend> = Arc::new(IdentityBackend);
    AppState::with_stylizer(Stylizer::new(Some(backend)), ApiConfig::default())
}

fn legacy_state() -> AppState {
    AppState::with_stylizer(
        Stylizer::new(None),
        ApiConfig {
            legacy_style_fallback: true,
            ..Default::default()
        },
    )
}

fn noisy_png(width: u32, height: u32) -> Vec<u8> {
    let mut seed: u32 = 0x1234_5678;
    let img = RgbImage::from_fn(width, height, |_, _| {
        let mut next = || {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            (seed & 0xff) as u8
        };
        Rgb([next(), next(), next()])
    });
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

#[tokio::test]
async fn test_pencil_sketch_on_red_jpeg_returns_grayscale_png() {
    let app = create_app(AppState::new_for_test());
    let jpeg = solid_image(500, 500, [255, 0, 0], ImageFormat::Jpeg);

    let response = app
        .oneshot(stylize_request(Some(&jpeg), Some("Pencil Sketch")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );

    let png = body_bytes(response).await;
    assert_eq!(image::guess_format(&png).unwrap(), ImageFormat::Png);
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!(decoded.color(), ColorType::L8);
    assert_eq!((decoded.width(), decoded.height()), (500, 500));
}

#[tokio::test]
async fn test_unknown_style_is_rejected_by_default() {
    let app = create_app(AppState::new_for_test());
    let png = solid_image(32, 32, [10, 200, 30], ImageFormat::Png);

    let response = app
        .oneshot(stylize_request(Some(&png), Some("NonexistentStyle")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error_type"], "validation_error");
    assert_eq!(body["details"]["field"], "style");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("NonexistentStyle"));
}

#[tokio::test]
async fn test_unknown_style_falls_back_to_oil_painting_in_legacy_mode() {
    let app = create_app(legacy_state());
    let png = solid_image(37, 23, [10, 200, 30], ImageFormat::Png);

    let response = app
        .oneshot(stylize_request(Some(&png), Some("NonexistentStyle")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let decoded = image::load_from_memory(&body_bytes(response).await).unwrap();
    assert_eq!(decoded.color(), ColorType::Rgb8);
    assert_eq!((decoded.width(), decoded.height()), (37, 23));
}

#[tokio::test]
async fn test_default_style_without_model_is_unavailable() {
    let app = create_app(AppState::new_for_test());
    let png = solid_image(64, 64, [90, 90, 90], ImageFormat::Png);

    let response = app.oneshot(stylize_request(Some(&png), None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["error_type"], "service_unavailable");
    assert!(body["request_id"].is_string());
}

#[tokio::test]
async fn test_cartoon_crops_to_multiple_of_eight() {
    let app = create_app(state_with_cartoonizer());
    let png = solid_image(45, 30, [120, 60, 200], ImageFormat::Png);

    let response = app
        .oneshot(stylize_request(Some(&png), Some("White-box Cartoonizer")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let decoded = image::load_from_memory(&body_bytes(response).await).unwrap();
    assert_eq!(decoded.color(), ColorType::Rgb8);
    assert_eq!((decoded.width(), decoded.height()), (40, 24));
}

#[tokio::test]
async fn test_cartoon_is_the_default_style() {
    let app = create_app(state_with_cartoonizer());
    let png = solid_image(16, 16, [120, 60, 200], ImageFormat::Png);

    let response = app.oneshot(stylize_request(Some(&png), None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let decoded = image::load_from_memory(&body_bytes(response).await).unwrap();
    assert_eq!(decoded.color(), ColorType::Rgb8);
}

#[tokio::test]
async fn test_cartoon_rejects_image_smaller_than_crop_unit() {
    let app = create_app(state_with_cartoonizer());
    let png = solid_image(5, 40, [1, 2, 3], ImageFormat::Png);

    let response = app
        .oneshot(stylize_request(Some(&png), Some("White-box Cartoonizer")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["details"]["field"], "image");
}

#[tokio::test]
async fn test_missing_image_field_is_bad_request() {
    let app = create_app(AppState::new_for_test());

    let response = app
        .oneshot(stylize_request(None, Some("Pencil Sketch")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["details"]["field"], "image");
}

#[tokio::test]
async fn test_undecodable_image_is_bad_request() {
    let app = create_app(AppState::new_for_test());

    let response = app
        .oneshot(stylize_request(
            Some(b"definitely not an image"),
            Some("Pencil Sketch"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let state = AppState::with_stylizer(
        Stylizer::new(None),
        ApiConfig {
            max_upload_bytes: 1024,
            ..Default::default()
        },
    );
    let app = create_app(state);
    let png = noisy_png(96, 96);
    assert!(png.len() > 1024);

    let response = app
        .oneshot(stylize_request(Some(&png), Some("Pencil Sketch")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_body_over_router_limit_is_rejected_without_size() {
    let state = AppState::with_stylizer(
        Stylizer::new(None),
        ApiConfig {
            max_upload_bytes: 1024,
            ..Default::default()
        },
    );
    let app = create_app(state);
    // Larger than the image limit plus the multipart framing headroom
    let png = noisy_png(200, 200);
    assert!(png.len() > 1024 + 64 * 1024);

    let response = app
        .oneshot(stylize_request(Some(&png), Some("Pencil Sketch")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = body_json(response).await;
    assert_eq!(body["error_type"], "payload_too_large");
    assert_eq!(body["details"]["limit"], 1024);
    assert!(body["details"].get("size").is_none());
}

#[tokio::test]
async fn test_style_id_is_accepted() {
    let app = create_app(AppState::new_for_test());
    let png = solid_image(12, 12, [200, 200, 200], ImageFormat::Png);

    let response = app
        .oneshot(stylize_request(Some(&png), Some("pencil-sketch")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let decoded = image::load_from_memory(&body_bytes(response).await).unwrap();
    assert_eq!(decoded.color(), ColorType::L8);
}
