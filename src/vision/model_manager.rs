// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Cartoonizer model resolution and loading
//!
//! The model is resolved once at startup, either from a local ONNX file or
//! by downloading it from the Hugging Face hub, and then shared read-only by
//! every request.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::vision::cartoon::{CartoonBackend, OnnxCartoonModel, DEFAULT_OUTPUT_NAME};

/// Hugging Face repository holding the White-box Cartoonizer snapshot
pub const DEFAULT_MODEL_REPO: &str = "sayakpaul/whitebox-cartoonizer";

/// ONNX export file inside the repository
pub const DEFAULT_MODEL_FILE: &str = "model.onnx";

/// Command that turns the published SavedModel snapshot into an ONNX file
pub const ONNX_CONVERSION_HINT: &str = "python -m tf2onnx.convert --saved-model <snapshot-dir> \
--output cartoonizer.onnx --opset 13";

/// Configuration for loading the cartoonizer
#[derive(Debug, Clone)]
pub struct CartoonModelConfig {
    /// Local ONNX file; takes precedence over the hub
    pub model_path: Option<PathBuf>,
    /// Hub repository id
    pub repo_id: String,
    /// File to fetch from the repository
    pub file_name: String,
    /// Preferred output tensor name
    pub output_name: String,
    /// ONNX Runtime intra-op threads
    pub intra_threads: usize,
}

impl Default for CartoonModelConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            repo_id: DEFAULT_MODEL_REPO.to_string(),
            file_name: DEFAULT_MODEL_FILE.to_string(),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            intra_threads: 4,
        }
    }
}

/// Where the model file comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    Local(PathBuf),
    Hub { repo_id: String, file_name: String },
}

impl CartoonModelConfig {
    pub fn source(&self) -> ModelSource {
        match &self.model_path {
            Some(path) => ModelSource::Local(path.clone()),
            None => ModelSource::Hub {
                repo_id: self.repo_id.clone(),
                file_name: self.file_name.clone(),
            },
        }
    }
}

/// Information about the loaded model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model name
    pub name: String,
    /// Where the model was loaded from
    pub source: String,
    /// Whether the model is available
    pub available: bool,
}

/// Resolve the model file, downloading it from the hub if needed
pub async fn resolve_model_file(config: &CartoonModelConfig) -> Result<PathBuf> {
    match config.source() {
        ModelSource::Local(path) => Ok(path),
        ModelSource::Hub { repo_id, file_name } => {
            tracing::info!("Fetching {}/{} from Hugging Face hub", repo_id, file_name);
            let api = hf_hub::api::tokio::Api::new().context("Failed to create hub client")?;
            let path = api
                .model(repo_id.clone())
                .get(&file_name)
                .await
                .with_context(|| hub_download_error(&repo_id, &file_name))?;
            Ok(path)
        }
    }
}

/// Error text for a failed hub download.
///
/// The upstream White-box Cartoonizer snapshot is a TensorFlow SavedModel, so
/// the message explains how to provide an ONNX export instead.
pub fn hub_download_error(repo_id: &str, file_name: &str) -> String {
    format!(
        "Failed to download {}/{} from the Hugging Face hub. If the repository only \
         hosts a TensorFlow SavedModel, convert it with `{}` and set \
         CARTOONIZER_MODEL_PATH, or point CARTOONIZER_REPO/CARTOONIZER_MODEL_FILE at \
         an ONNX export",
        repo_id, file_name, ONNX_CONVERSION_HINT
    )
}

/// Holds the process-wide cartoonizer handle
pub struct ModelManager {
    cartoonizer: Option<Arc<OnnxCartoonModel>>,
    source: String,
}

impl ModelManager {
    /// Resolve and load the cartoonizer.
    ///
    /// With `allow_missing` set, load failures are logged and the manager
    /// comes up without a model; otherwise they are returned.
    pub async fn load(config: CartoonModelConfig, allow_missing: bool) -> Result<Self> {
        let source = match config.source() {
            ModelSource::Local(path) => path.display().to_string(),
            ModelSource::Hub { repo_id, file_name } => format!("hf://{}/{}", repo_id, file_name),
        };

        match Self::load_model(&config).await {
            Ok(model) => {
                tracing::info!(
                    "✅ Cartoonizer model ready ({}) - {} -> {}",
                    source,
                    model.input_name(),
                    model.output_name()
                );
                Ok(Self {
                    cartoonizer: Some(Arc::new(model)),
                    source,
                })
            }
            Err(e) if allow_missing => {
                tracing::warn!(
                    "⚠️ Failed to load cartoonizer from {}: {:#}. Cartoon style disabled",
                    source,
                    e
                );
                Ok(Self::without_model())
            }
            Err(e) => Err(e.context(format!("Failed to load cartoonizer from {}", source))),
        }
    }

    async fn load_model(config: &CartoonModelConfig) -> Result<OnnxCartoonModel> {
        let path = resolve_model_file(config).await?;
        let output_name = config.output_name.clone();
        let threads = config.intra_threads;
        tokio::task::spawn_blocking(move || OnnxCartoonModel::load(path, &output_name, threads))
            .await
            .context("Model loading task panicked")?
    }

    /// Manager with no model loaded
    pub fn without_model() -> Self {
        Self {
            cartoonizer: None,
            source: String::new(),
        }
    }

    /// Shared backend handle, if loaded
    pub fn cartoonizer(&self) -> Option<Arc<dyn CartoonBackend>> {
        self.cartoonizer
            .clone()
            .map(|model| model as Arc<dyn CartoonBackend>)
    }

    pub fn has_cartoonizer(&self) -> bool {
        self.cartoonizer.is_some()
    }

    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            name: "whitebox-cartoonizer".to_string(),
            source: self.source.clone(),
            available: self.cartoonizer.is_some(),
        }
    }
}
