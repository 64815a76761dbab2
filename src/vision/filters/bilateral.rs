// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Bilateral filter for 8-bit RGB images

use image::{Rgb, RgbImage};

use super::{reflect101, saturate_u8};

/// Largest possible sum of absolute channel differences between two pixels
const MAX_COLOR_DISTANCE: usize = 255 * 3;

/// Smooth an RGB image while keeping strong edges.
///
/// Neighbours inside a disc of radius `diameter / 2` are weighted by
/// `exp(-r^2 / 2 sigma_space^2) * exp(-d^2 / 2 sigma_color^2)` where `d`
/// is the sum of absolute channel differences to the centre pixel.
pub fn bilateral_filter(
    image: &RgbImage,
    diameter: u32,
    sigma_color: f32,
    sigma_space: f32,
) -> RgbImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    let sigma_color = if sigma_color <= 0.0 { 1.0 } else { sigma_color };
    let sigma_space = if sigma_space <= 0.0 { 1.0 } else { sigma_space };
    let radius = if diameter > 0 {
        (diameter / 2).max(1) as isize
    } else {
        (sigma_space * 1.5).round().max(1.0) as isize
    };

    let color_coeff = -0.5 / (sigma_color * sigma_color);
    let space_coeff = -0.5 / (sigma_space * sigma_space);

    let color_weights: Vec<f32> = (0..=MAX_COLOR_DISTANCE)
        .map(|d| (d as f32 * d as f32 * color_coeff).exp())
        .collect();

    let mut taps = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let r = ((dy * dy + dx * dx) as f32).sqrt();
            if r > radius as f32 {
                continue;
            }
            taps.push((dy, dx, (r * r * space_coeff).exp()));
        }
    }

    let (w, h) = (width as usize, height as usize);
    RgbImage::from_fn(width, height, |x, y| {
        let center = image.get_pixel(x, y);
        let mut sum = [0f32; 3];
        let mut weight_sum = 0f32;

        for &(dy, dx, space_weight) in &taps {
            let sx = reflect101(x as isize + dx, w) as u32;
            let sy = reflect101(y as isize + dy, h) as u32;
            let p = image.get_pixel(sx, sy);

            let distance = (0..3)
                .map(|c| (p[c] as i32 - center[c] as i32).unsigned_abs() as usize)
                .sum::<usize>();
            let weight = space_weight * color_weights[distance];

            for c in 0..3 {
                sum[c] += p[c] as f32 * weight;
            }
            weight_sum += weight;
        }

        Rgb([
            saturate_u8(sum[0] / weight_sum),
            saturate_u8(sum[1] / weight_sum),
            saturate_u8(sum[2] / weight_sum),
        ])
    })
}
