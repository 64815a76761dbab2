// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Stylize endpoint handler

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Multipart;
use bytes::Bytes;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::request::StylizeRequest;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::vision::{decode_image_bytes, encode_png, Style, Stylizer};

/// POST /stylize - Apply a style to an uploaded photo
///
/// # Request
/// Multipart form:
/// - `image`: image file in any decodable format (required)
/// - `style`: style label, defaults to "White-box Cartoonizer"
///
/// # Response
/// `image/png` body with the styled image. Pencil sketch is grayscale,
/// the other styles are RGB.
///
/// # Errors
/// - 400 Bad Request: missing or undecodable image, unknown style, image too small
/// - 413 Payload Too Large: upload exceeds the configured limit
/// - 503 Service Unavailable: cartoonizer model not loaded
/// - 500 Internal Server Error: inference or encoding failed
pub async fn stylize_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let limit = state.config.max_upload_bytes;
    let request = StylizeRequest::from_multipart(multipart, limit).await?;
    let (image, style) = request.validate(state.config.legacy_style_fallback)?;

    if !state.stylizer.is_available(style) {
        return Err(ApiError::ServiceUnavailable(format!(
            "Style '{}' is not available: model not loaded",
            style.label()
        )));
    }

    let stylizer = Arc::clone(&state.stylizer);
    let start = Instant::now();
    let png = tokio::task::spawn_blocking(move || render(&stylizer, style, &image, limit))
        .await
        .map_err(|e| ApiError::InternalError(format!("Stylize task failed: {}", e)))??;

    info!(
        "Stylized image as '{}': {} bytes PNG in {}ms",
        style.label(),
        png.len(),
        start.elapsed().as_millis()
    );

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}

/// Decode, stylize and encode on the calling thread
fn render(
    stylizer: &Stylizer,
    style: Style,
    data: &Bytes,
    limit: usize,
) -> Result<Vec<u8>, ApiError> {
    let (decoded, image_info) = decode_image_bytes(data, limit)?;
    debug!(
        "Decoded {:?} image: {}x{}, {} bytes",
        image_info.format, image_info.width, image_info.height, image_info.size_bytes
    );

    let rgb = decoded.to_rgb8();
    let styled = stylizer.select(style, &rgb)?;
    Ok(encode_png(&styled)?)
}
