// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! White-box Cartoonizer ONNX model
//!
//! Loads the cartoonizer graph into ONNX Runtime and runs it on CPU.

use anyhow::{anyhow, Context, Result};
use ndarray::{Array4, Ix4};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Output tensor name of the exported White-box Cartoonizer graph
pub const DEFAULT_OUTPUT_NAME: &str = "final_output:0";

/// Anything that can turn a normalized `[1, H, W, 3]` BGR tensor into a
/// cartoonized tensor of the same layout.
pub trait CartoonBackend: Send + Sync {
    fn infer(&self, input: Array4<f32>) -> Result<Array4<f32>>;

    /// Short name for logs
    fn name(&self) -> &str {
        "cartoonizer"
    }
}

/// ONNX Runtime backed cartoonizer
#[derive(Clone)]
pub struct OnnxCartoonModel {
    /// ONNX Runtime session (run needs exclusive access)
    session: Arc<Mutex<Session>>,
    /// Model input name
    input_name: String,
    /// Model output name
    output_name: String,
}

impl std::fmt::Debug for OnnxCartoonModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxCartoonModel")
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .finish_non_exhaustive()
    }
}

impl OnnxCartoonModel {
    /// Load the cartoonizer from an ONNX file
    ///
    /// # Arguments
    /// - `model_path`: Path to the `.onnx` export
    /// - `output_name`: Preferred output tensor; the first output is used if
    ///   the graph has no tensor by that name
    /// - `intra_threads`: ONNX Runtime intra-op thread count
    ///
    /// # Errors
    /// Returns error if the file is missing or ONNX Runtime rejects it.
    pub fn load<P: AsRef<Path>>(
        model_path: P,
        output_name: &str,
        intra_threads: usize,
    ) -> Result<Self> {
        let model_path = model_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("Cartoonizer model not found: {}", model_path.display());
        }

        info!("Loading cartoonizer model from {}", model_path.display());

        let session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(intra_threads.max(1))
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .context(format!(
                "Failed to load cartoonizer model from {}",
                model_path.display()
            ))?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| anyhow!("Cartoonizer model declares no inputs"))?;

        let output_name = if session.outputs.iter().any(|o| o.name == output_name) {
            output_name.to_string()
        } else {
            let fallback = session
                .outputs
                .first()
                .map(|output| output.name.clone())
                .ok_or_else(|| anyhow!("Cartoonizer model declares no outputs"))?;
            debug!(
                "Output '{}' not found in graph, using '{}'",
                output_name, fallback
            );
            fallback
        };

        info!(
            "✅ Cartoonizer loaded (CPU-only) - input: {}, output: {}",
            input_name, output_name
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
            output_name,
        })
    }

    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    pub fn output_name(&self) -> &str {
        &self.output_name
    }
}

impl CartoonBackend for OnnxCartoonModel {
    fn name(&self) -> &str {
        "whitebox-cartoonizer-onnx"
    }

    fn infer(&self, input: Array4<f32>) -> Result<Array4<f32>> {
        let shape = input.shape().to_vec();
        if shape[0] != 1 || shape[3] != 3 {
            anyhow::bail!("Invalid input shape: {:?}, expected [1, H, W, 3]", shape);
        }

        let input_value = Value::from_array(input).context("Failed to create input tensor")?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow!("Cartoonizer session lock poisoned"))?;

        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input_value])
            .context("Cartoonizer inference failed")?;

        let output = outputs
            .get(self.output_name.as_str())
            .ok_or_else(|| anyhow!("Output '{}' missing from results", self.output_name))?;

        let array = output
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;

        debug!("Cartoonizer output shape: {:?}", array.shape());

        array
            .to_owned()
            .into_dimensionality::<Ix4>()
            .context("Cartoonizer output is not 4-dimensional")
    }
}
