// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Colour space conversions
//!
//! Grayscale uses the BT.601 luma weights in 14-bit fixed point, the same
//! integer arithmetic OpenCV applies to 8-bit images. Lab conversion is
//! sRGB (D65) with gamma, on float samples in `[0, 1]`.

use image::{GrayImage, Luma, RgbImage};

const GRAY_SHIFT: u32 = 14;
const R2Y: u32 = 4899;
const G2Y: u32 = 9617;
const B2Y: u32 = 1868;

/// D65 white point used to normalize X and Z
const WHITE_X: f32 = 0.950456;
const WHITE_Z: f32 = 1.088754;

/// CIE threshold between the cube-root and linear segments
const LAB_EPSILON: f32 = 0.008856;
const LAB_KAPPA: f32 = 903.3;

/// Convert an RGB image to single-channel luma
pub fn rgb_to_gray(image: &RgbImage) -> GrayImage {
    let (width, height) = image.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        let p = image.get_pixel(x, y);
        let luma = (p[0] as u32 * R2Y + p[1] as u32 * G2Y + p[2] as u32 * B2Y
            + (1 << (GRAY_SHIFT - 1)))
            >> GRAY_SHIFT;
        Luma([luma as u8])
    })
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> f32 {
    let c = c.clamp(0.0, 1.0);
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

fn lab_f(t: f32) -> f32 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

fn lab_f_inv(f: f32) -> f32 {
    let cube = f * f * f;
    if cube > LAB_EPSILON {
        cube
    } else {
        (f - 16.0 / 116.0) / 7.787
    }
}

/// Convert one RGB sample (channels in `[0, 1]`) to CIE Lab.
///
/// Returns `[L, a, b]` with `L` in `[0, 100]`.
pub fn rgb_to_lab(rgb: [f32; 3]) -> [f32; 3] {
    let r = srgb_to_linear(rgb[0]);
    let g = srgb_to_linear(rgb[1]);
    let b = srgb_to_linear(rgb[2]);

    let x = (0.412_453 * r + 0.357_580 * g + 0.180_423 * b) / WHITE_X;
    let y = 0.212_671 * r + 0.715_160 * g + 0.072_169 * b;
    let z = (0.019_334 * r + 0.119_193 * g + 0.950_227 * b) / WHITE_Z;

    let fx = lab_f(x);
    let fy = lab_f(y);
    let fz = lab_f(z);

    let l = if y > LAB_EPSILON {
        116.0 * fy - 16.0
    } else {
        LAB_KAPPA * y
    };

    [l, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

/// Convert one CIE Lab sample back to RGB with channels clamped to `[0, 1]`.
pub fn lab_to_rgb(lab: [f32; 3]) -> [f32; 3] {
    let [l, a, b] = lab;

    let (y, fy) = if l <= LAB_KAPPA * LAB_EPSILON {
        let y = l / LAB_KAPPA;
        (y, 7.787 * y + 16.0 / 116.0)
    } else {
        let fy = (l + 16.0) / 116.0;
        (fy * fy * fy, fy)
    };

    let x = lab_f_inv(fy + a / 500.0) * WHITE_X;
    let z = lab_f_inv(fy - b / 200.0) * WHITE_Z;

    let r = 3.240_479 * x - 1.537_150 * y - 0.498_535 * z;
    let g = -0.969_256 * x + 1.875_991 * y + 0.041_556 * z;
    let bl = 0.055_648 * x - 0.204_043 * y + 1.057_311 * z;

    [linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(bl)]
}
