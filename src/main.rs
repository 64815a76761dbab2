// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use artifice_stylizer::{
    api::{start_server, AppState},
    config::ServerArgs,
    version,
    vision::ModelManager,
};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🚀 Starting {}", version::get_version_string());

    let args = ServerArgs::parse();

    // Model must be ready before the listener binds
    info!("🧠 Loading cartoonizer model...");
    let models = ModelManager::load(args.model_config(), args.allow_missing_model).await?;

    let api_config = args.api_config();
    if api_config.legacy_style_fallback {
        info!("Unknown style labels fall back to oil painting");
    }

    let state = AppState::new(models, api_config);
    start_server(state, shutdown_signal()).await?;

    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("🛑 Shutdown signal received");
}
