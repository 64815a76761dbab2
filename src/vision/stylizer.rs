// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Style routing
//!
//! `Stylizer` owns the shared, read-only cartoonizer handle and the
//! parameters of the classical styles. Every call is an independent pure
//! pipeline; nothing is retained between requests.

use image::{DynamicImage, RgbImage};
use std::sync::Arc;
use tracing::debug;

use super::cartoon::{cartoonize, CartoonBackend};
use super::error::StylizeError;
use super::painting::{oil_painting_soft, OilPaintingParams};
use super::sketch::{pencil_sketch, PencilSketchParams};
use super::style::Style;

/// Applies one of the supported styles to RGB images
#[derive(Clone)]
pub struct Stylizer {
    cartoonizer: Option<Arc<dyn CartoonBackend>>,
    sketch: PencilSketchParams,
    painting: OilPaintingParams,
}

impl std::fmt::Debug for Stylizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stylizer")
            .field("cartoonizer_loaded", &self.cartoonizer.is_some())
            .field("sketch", &self.sketch)
            .field("painting", &self.painting)
            .finish()
    }
}

impl Stylizer {
    /// Create a stylizer; without a backend the cartoon style is unavailable.
    pub fn new(cartoonizer: Option<Arc<dyn CartoonBackend>>) -> Self {
        Self {
            cartoonizer,
            sketch: PencilSketchParams::default(),
            painting: OilPaintingParams::default(),
        }
    }

    pub fn with_sketch_params(mut self, params: PencilSketchParams) -> Self {
        self.sketch = params;
        self
    }

    pub fn with_painting_params(mut self, params: OilPaintingParams) -> Self {
        self.painting = params;
        self
    }

    pub fn has_cartoonizer(&self) -> bool {
        self.cartoonizer.is_some()
    }

    /// Whether `style` can currently be served
    pub fn is_available(&self, style: Style) -> bool {
        !style.requires_model() || self.has_cartoonizer()
    }

    /// Apply `style` to `image` and return a new image.
    ///
    /// Cartoon and oil painting produce RGB; pencil sketch produces a
    /// single-channel image with the input's dimensions.
    pub fn select(&self, style: Style, image: &RgbImage) -> Result<DynamicImage, StylizeError> {
        debug!(
            "Stylizing {}x{} image as '{}'",
            image.width(),
            image.height(),
            style
        );

        match style {
            Style::Cartoon => {
                let backend = self
                    .cartoonizer
                    .as_deref()
                    .ok_or(StylizeError::ModelUnavailable)?;
                cartoonize(backend, image).map(DynamicImage::ImageRgb8)
            }
            Style::PencilSketch => Ok(DynamicImage::ImageLuma8(pencil_sketch(
                image,
                &self.sketch,
            ))),
            Style::OilPainting => Ok(DynamicImage::ImageRgb8(oil_painting_soft(
                image,
                &self.painting,
            ))),
        }
    }
}
