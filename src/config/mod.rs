// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Server configuration from flags and environment

use clap::Parser;
use std::path::PathBuf;

use crate::api::ApiConfig;
use crate::vision::model_manager::{DEFAULT_MODEL_FILE, DEFAULT_MODEL_REPO};
use crate::vision::{cartoon::DEFAULT_OUTPUT_NAME, CartoonModelConfig};

/// Artifice photo stylizer
#[derive(Parser, Debug, Clone)]
#[command(name = "artifice-stylizer")]
#[command(about = "Turn photos into cartoons, pencil sketches and oil paintings", long_about = None)]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Local cartoonizer ONNX file (skips the hub download)
    #[arg(long, env = "CARTOONIZER_MODEL_PATH")]
    pub model_path: Option<PathBuf>,

    /// Hugging Face repository holding the cartoonizer
    #[arg(long, env = "CARTOONIZER_REPO", default_value = DEFAULT_MODEL_REPO)]
    pub model_repo: String,

    /// ONNX file inside the repository
    #[arg(long, env = "CARTOONIZER_MODEL_FILE", default_value = DEFAULT_MODEL_FILE)]
    pub model_file: String,

    /// Output tensor to read from the model
    #[arg(long, env = "CARTOONIZER_OUTPUT", default_value = DEFAULT_OUTPUT_NAME)]
    pub model_output: String,

    /// ONNX Runtime intra-op threads
    #[arg(long, env = "CARTOONIZER_THREADS", default_value_t = 4)]
    pub intra_threads: usize,

    /// Start without the cartoonizer if it fails to load
    #[arg(long, env = "CARTOONIZER_OPTIONAL")]
    pub allow_missing_model: bool,

    /// Treat unknown style labels as oil painting instead of rejecting them
    #[arg(long, env = "LEGACY_STYLE_FALLBACK")]
    pub legacy_style_fallback: bool,

    /// Largest accepted upload in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = 10 * 1024 * 1024)]
    pub max_upload_bytes: usize,

    /// Comma-separated list of allowed CORS origins (any when empty)
    #[arg(long, env = "CORS_ALLOWED_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,
}

impl ServerArgs {
    pub fn model_config(&self) -> CartoonModelConfig {
        CartoonModelConfig {
            model_path: self.model_path.clone(),
            repo_id: self.model_repo.clone(),
            file_name: self.model_file.clone(),
            output_name: self.model_output.clone(),
            intra_threads: self.intra_threads.max(1),
        }
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            host: self.host.clone(),
            port: self.port,
            max_upload_bytes: self.max_upload_bytes,
            legacy_style_fallback: self.legacy_style_fallback,
            cors_origins: self
                .cors_origins
                .iter()
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
        }
    }
}
