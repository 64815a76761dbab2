// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tensor conversion for the cartoonizer model

use image::{Rgb, RgbImage};
use ndarray::Array4;

use crate::vision::error::StylizeError;
use crate::vision::filters::resize_area;

/// Longest side allowed after the optional downscale
pub const MAX_DIM: u32 = 720;

/// Model input sides must be multiples of this (its downsampling factor)
pub const DIM_MULTIPLE: u32 = 8;

/// Dimensions after the optional downscale.
///
/// Images whose shorter side is at most [`MAX_DIM`] keep their size; larger
/// ones are scaled so the longer side equals [`MAX_DIM`], truncating the
/// derived side.
pub fn scaled_dimensions(width: u32, height: u32) -> (u32, u32) {
    if width.min(height) <= MAX_DIM {
        return (width, height);
    }
    let (w, h) = (width as u64, height as u64);
    let max = MAX_DIM as u64;
    if h > w {
        ((max * w / h) as u32, MAX_DIM)
    } else {
        (MAX_DIM, (max * h / w) as u32)
    }
}

/// Dimensions after truncating both sides to a multiple of [`DIM_MULTIPLE`].
pub fn cropped_dimensions(width: u32, height: u32) -> (u32, u32) {
    (
        width / DIM_MULTIPLE * DIM_MULTIPLE,
        height / DIM_MULTIPLE * DIM_MULTIPLE,
    )
}

/// Final model input dimensions (width, height) for a source image.
pub fn model_input_dimensions(width: u32, height: u32) -> (u32, u32) {
    let (w, h) = scaled_dimensions(width, height);
    cropped_dimensions(w, h)
}

/// Build the `[1, H, W, 3]` model input from an RGB image.
///
/// Steps:
/// 1. Downscale with area averaging if the shorter side exceeds 720
/// 2. Crop top-left to multiples of 8
/// 3. Write channels in BGR order
/// 4. Normalize `x / 127.5 - 1` into `[-1, 1]`
pub fn preprocess(image: &RgbImage) -> Result<Array4<f32>, StylizeError> {
    let (width, height) = image.dimensions();
    let (scaled_w, scaled_h) = scaled_dimensions(width, height);
    let (crop_w, crop_h) = cropped_dimensions(scaled_w, scaled_h);

    if crop_w == 0 || crop_h == 0 {
        return Err(StylizeError::ImageTooSmall {
            width,
            height,
            min_side: DIM_MULTIPLE,
        });
    }

    let scaled;
    let source = if (scaled_w, scaled_h) != (width, height) {
        scaled = resize_area(image, scaled_w, scaled_h);
        &scaled
    } else {
        image
    };

    let tensor = Array4::from_shape_fn(
        (1, crop_h as usize, crop_w as usize, 3),
        |(_, y, x, c)| {
            let p = source.get_pixel(x as u32, y as u32);
            p[2 - c] as f32 / 127.5 - 1.0
        },
    );

    Ok(tensor)
}

/// Map one model output sample back to 8 bits (NaN becomes 0).
pub fn denormalize(value: f32) -> u8 {
    ((value + 1.0) * 127.5).clamp(0.0, 255.0) as u8
}

/// Convert the `[1, H, W, 3]` BGR model output into an RGB image.
pub fn postprocess(output: &Array4<f32>) -> Result<RgbImage, StylizeError> {
    let (batch, height, width, channels) = output.dim();
    if batch != 1 || channels != 3 || height == 0 || width == 0 {
        return Err(StylizeError::InvalidModelOutput(format!(
            "expected [1, H, W, 3], got {:?}",
            output.shape()
        )));
    }

    Ok(RgbImage::from_fn(width as u32, height as u32, |x, y| {
        let (x, y) = (x as usize, y as usize);
        Rgb([
            denormalize(output[[0, y, x, 2]]),
            denormalize(output[[0, y, x, 1]]),
            denormalize(output[[0, y, x, 0]]),
        ])
    }))
}
