// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Neural cartoonization
//!
//! Components:
//! - `preprocessing` - Resize/crop/normalize into the model tensor and back
//! - `model` - Backend trait and the ONNX Runtime implementation

pub mod model;
pub mod preprocessing;

pub use model::{CartoonBackend, OnnxCartoonModel, DEFAULT_OUTPUT_NAME};
pub use preprocessing::{model_input_dimensions, postprocess, preprocess};

use image::RgbImage;

use crate::vision::error::StylizeError;

/// Run the full cartoonization pipeline with the given backend.
pub fn cartoonize(
    backend: &dyn CartoonBackend,
    image: &RgbImage,
) -> Result<RgbImage, StylizeError> {
    let input = preprocess(image)?;
    tracing::debug!("Running {} on {:?} tensor", backend.name(), input.shape());
    let output = backend
        .infer(input)
        .map_err(|e| StylizeError::Inference(format!("{:#}", e)))?;
    postprocess(&output)
}
