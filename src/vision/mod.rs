// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Photo stylization
//!
//! This module provides:
//! - Neural cartoonization via the White-box Cartoonizer ONNX model
//! - Pencil sketch via a grayscale dodge blend
//! - Soft oil painting via stacked edge-aware filters
//!
//! Everything runs on CPU.

pub mod cartoon;
pub mod error;
pub mod filters;
pub mod image_utils;
pub mod model_manager;
pub mod painting;
pub mod sketch;
pub mod style;
pub mod stylizer;

pub use cartoon::{CartoonBackend, OnnxCartoonModel};
pub use error::StylizeError;
pub use image_utils::{decode_image_bytes, detect_format, encode_png, ImageError, ImageInfo};
pub use model_manager::{CartoonModelConfig, ModelInfo, ModelManager, ModelSource};
pub use painting::OilPaintingParams;
pub use sketch::PencilSketchParams;
pub use style::{Style, DEFAULT_STYLE_LABEL};
pub use stylizer::Stylizer;
