// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Stylize request parsing and validation

use axum::http::StatusCode;
use axum_extra::extract::multipart::{Multipart, MultipartError};
use bytes::Bytes;
use tracing::debug;

use crate::api::errors::ApiError;
use crate::vision::{Style, DEFAULT_STYLE_LABEL};

/// Multipart field holding the uploaded photo
pub const IMAGE_FIELD: &str = "image";

/// Multipart field holding the style label
pub const STYLE_FIELD: &str = "style";

/// Parsed `/stylize` form
#[derive(Debug, Clone, Default)]
pub struct StylizeRequest {
    /// Raw uploaded file bytes
    pub image: Option<Bytes>,
    /// Style label as submitted; absent means the default
    pub style: Option<String>,
}

impl StylizeRequest {
    /// Read the `image` and `style` fields from a multipart body.
    ///
    /// Unknown fields are skipped. A repeated field keeps its last value.
    /// `limit` is reported when the body exceeds the configured size.
    pub async fn from_multipart(mut multipart: Multipart, limit: usize) -> Result<Self, ApiError> {
        let mut request = Self::default();
        let to_api_error = |err: MultipartError| multipart_error(err, limit);

        while let Some(field) = multipart.next_field().await.map_err(to_api_error)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                IMAGE_FIELD => {
                    let data = field.bytes().await.map_err(to_api_error)?;
                    debug!("Received image field: {} bytes", data.len());
                    request.image = Some(data);
                }
                STYLE_FIELD => {
                    let text = field.text().await.map_err(to_api_error)?;
                    request.style = Some(text);
                }
                other => debug!("Ignoring multipart field '{}'", other),
            }
        }

        Ok(request)
    }

    /// Label to resolve, falling back to the cartoonizer
    pub fn style_label(&self) -> &str {
        self.style.as_deref().unwrap_or(DEFAULT_STYLE_LABEL)
    }

    /// Check required fields and resolve the style
    pub fn validate(&self, legacy_style_fallback: bool) -> Result<(Bytes, Style), ApiError> {
        let image = match &self.image {
            Some(data) if !data.is_empty() => data.clone(),
            _ => {
                return Err(ApiError::ValidationError {
                    field: IMAGE_FIELD.to_string(),
                    message: "image is required".to_string(),
                })
            }
        };

        let style = Style::resolve(self.style_label(), legacy_style_fallback)?;

        Ok((image, style))
    }
}

fn multipart_error(err: MultipartError, limit: usize) -> ApiError {
    match err.status() {
        StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge { size: None, limit },
        _ => ApiError::InvalidRequest(format!("Malformed multipart body: {}", err.body_text())),
    }
}
