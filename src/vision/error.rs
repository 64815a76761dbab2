// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use thiserror::Error;

use super::image_utils::ImageError;

/// Failures raised while stylizing an image
#[derive(Debug, Error)]
pub enum StylizeError {
    #[error("Unknown style '{label}', supported: {supported:?}")]
    UnknownStyle {
        label: String,
        supported: Vec<&'static str>,
    },

    #[error("Cartoonizer model is not loaded")]
    ModelUnavailable,

    #[error("Image {width}x{height} is too small, both sides must be at least {min_side} pixels")]
    ImageTooSmall {
        width: u32,
        height: u32,
        min_side: u32,
    },

    #[error("Cartoonizer inference failed: {0}")]
    Inference(String),

    #[error("Unexpected cartoonizer output: {0}")]
    InvalidModelOutput(String),

    #[error(transparent)]
    Image(#[from] ImageError),
}
