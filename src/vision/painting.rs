// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Soft oil-painting style
//!
//! Three stacked edge-aware filters: a bilateral pass flattens colour
//! regions, a strong domain-transform pass gives the brushed look, and a
//! detail-enhancement pass restores local contrast.

use image::RgbImage;
use serde::{Deserialize, Serialize};

use super::filters::{bilateral_filter, detail_enhance, edge_preserving_filter, DomainTransformMode};

/// Parameters for the oil painting style
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OilPaintingParams {
    pub bilateral_diameter: u32,
    pub bilateral_sigma_color: f32,
    pub bilateral_sigma_space: f32,
    pub edge_mode: DomainTransformMode,
    pub edge_sigma_s: f32,
    pub edge_sigma_r: f32,
    pub detail_sigma_s: f32,
    pub detail_sigma_r: f32,
}

impl Default for OilPaintingParams {
    fn default() -> Self {
        Self {
            bilateral_diameter: 9,
            bilateral_sigma_color: 100.0,
            bilateral_sigma_space: 100.0,
            edge_mode: DomainTransformMode::NormalizedConvolution,
            edge_sigma_s: 80.0,
            edge_sigma_r: 0.3,
            detail_sigma_s: 10.0,
            detail_sigma_r: 0.15,
        }
    }
}

/// Apply the oil painting pipeline to an RGB photo.
pub fn oil_painting_soft(image: &RgbImage, params: &OilPaintingParams) -> RgbImage {
    let smoothed = bilateral_filter(
        image,
        params.bilateral_diameter,
        params.bilateral_sigma_color,
        params.bilateral_sigma_space,
    );
    let painted = edge_preserving_filter(
        &smoothed,
        params.edge_mode,
        params.edge_sigma_s,
        params.edge_sigma_r,
    );
    detail_enhance(&painted, params.detail_sigma_s, params.detail_sigma_r)
}
