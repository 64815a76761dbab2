// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{health_handler, root_handler, styles_handler};
use super::stylize::stylize_handler;
use crate::vision::{image_utils::MAX_IMAGE_SIZE, ModelManager, Stylizer};

/// HTTP-facing settings
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted upload in bytes
    pub max_upload_bytes: usize,
    /// Map unrecognized style labels to oil painting instead of rejecting them
    pub legacy_style_fallback: bool,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_upload_bytes: MAX_IMAGE_SIZE,
            legacy_style_fallback: false,
            cors_origins: Vec::new(),
        }
    }
}

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub stylizer: Arc<Stylizer>,
    pub models: Arc<ModelManager>,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(models: ModelManager, config: ApiConfig) -> Self {
        let stylizer = Stylizer::new(models.cartoonizer());
        Self {
            stylizer: Arc::new(stylizer),
            models: Arc::new(models),
            config: Arc::new(config),
        }
    }

    /// State with a custom stylizer, no loaded model and default settings
    pub fn with_stylizer(stylizer: Stylizer, config: ApiConfig) -> Self {
        Self {
            stylizer: Arc::new(stylizer),
            models: Arc::new(ModelManager::without_model()),
            config: Arc::new(config),
        }
    }

    /// State without a cartoonizer, for tests
    pub fn new_for_test() -> Self {
        Self::with_stylizer(Stylizer::new(None), ApiConfig::default())
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(parsed)
    }
}

/// Build the router with all routes and layers
pub fn create_app(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        // Liveness
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        // Style catalogue
        .route("/v1/styles", get(styles_handler))
        // Stylization
        .route("/stylize", post(stylize_handler))
        // Room for multipart framing on top of the image itself
        .layer(DefaultBodyLimit::max(body_limit + 64 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until `shutdown` resolves
pub async fn start_server<F>(state: AppState, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let addr: SocketAddr = format!("{}:{}", state.config.host, state.config.port).parse()?;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
