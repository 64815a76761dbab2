// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::http_server::AppState;
use crate::version;
use crate::vision::{ModelInfo, Style};

/// Greeting returned by the liveness route
pub const ROOT_MESSAGE: &str = "Artifice stylizer is running. POST an image to /stylize.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cartoonizer_loaded: bool,
    pub styles: Vec<String>,
    pub model: ModelInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleInfo {
    /// Stable identifier, e.g. "pencil-sketch"
    pub name: String,
    /// Label accepted by the `style` form field
    pub label: String,
    pub available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StylesResponse {
    pub styles: Vec<StyleInfo>,
    pub default: String,
}

/// GET /
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: ROOT_MESSAGE.to_string(),
    })
}

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let cartoonizer_loaded = state.stylizer.has_cartoonizer();
    let styles = Style::ALL
        .iter()
        .filter(|style| state.stylizer.is_available(**style))
        .map(|style| style.label().to_string())
        .collect();

    let (status, issues) = if cartoonizer_loaded {
        ("healthy", None)
    } else {
        (
            "degraded",
            Some(vec!["cartoonizer model not loaded".to_string()]),
        )
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: version::VERSION_NUMBER.to_string(),
        cartoonizer_loaded,
        styles,
        model: state.models.model_info(),
        issues,
    })
}

/// GET /v1/styles
pub async fn styles_handler(State(state): State<AppState>) -> Json<StylesResponse> {
    let styles = Style::ALL
        .iter()
        .map(|style| StyleInfo {
            name: style.id().to_string(),
            label: style.label().to_string(),
            available: state.stylizer.is_available(*style),
        })
        .collect();

    Json(StylesResponse {
        styles,
        default: Style::default().label().to_string(),
    })
}
