// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Pencil sketch style (dodge blend)

use image::{GrayImage, Luma, RgbImage};

use super::filters::{gaussian_blur_gray, rgb_to_gray};

/// Parameters for the pencil sketch style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PencilSketchParams {
    /// Side of the square Gaussian kernel (odd)
    pub blur_ksize: usize,
    /// Gaussian sigma, `0` derives it from the kernel size
    pub blur_sigma: f32,
    /// Scale applied to the dodge quotient
    pub dodge_scale: f32,
}

impl Default for PencilSketchParams {
    fn default() -> Self {
        Self {
            blur_ksize: 21,
            blur_sigma: 0.0,
            dodge_scale: 256.0,
        }
    }
}

/// Per-pixel `saturate(round(numerator * scale / denominator))`, zero where
/// the denominator is zero.
pub fn dodge_divide(numerator: &GrayImage, denominator: &GrayImage, scale: f32) -> GrayImage {
    let (width, height) = numerator.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        let n = numerator.get_pixel(x, y)[0] as f32;
        let d = denominator.get_pixel(x, y)[0] as f32;
        if d == 0.0 {
            Luma([0])
        } else {
            Luma([(n * scale / d).round().clamp(0.0, 255.0) as u8])
        }
    })
}

/// Turn an RGB photo into a single-channel pencil sketch.
pub fn pencil_sketch(image: &RgbImage, params: &PencilSketchParams) -> GrayImage {
    let gray = rgb_to_gray(image);

    let mut inverted = gray.clone();
    for p in inverted.pixels_mut() {
        p[0] = 255 - p[0];
    }

    let mut blurred = gaussian_blur_gray(&inverted, params.blur_ksize, params.blur_sigma);
    for p in blurred.pixels_mut() {
        p[0] = 255 - p[0];
    }

    dodge_divide(&gray, &blurred, params.dodge_scale)
}
