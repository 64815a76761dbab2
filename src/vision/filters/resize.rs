// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Area-averaging resize
//!
//! Every destination pixel is the coverage-weighted mean of the source
//! pixels under its footprint. Best suited to downscaling, where it avoids
//! the aliasing of point-sampled filters.

use image::{Rgb, RgbImage};

use super::saturate_u8;

/// Source taps (index, weight) contributing to each destination index.
fn area_taps(src_len: usize, dst_len: usize) -> Vec<Vec<(usize, f32)>> {
    let scale = src_len as f64 / dst_len as f64;

    (0..dst_len)
        .map(|d| {
            let start = d as f64 * scale;
            let end = (start + scale).min(src_len as f64);
            let mut taps = Vec::new();
            let mut s = start.floor() as usize;
            while s < src_len && (s as f64) < end {
                let lo = start.max(s as f64);
                let hi = end.min(s as f64 + 1.0);
                let coverage = hi - lo;
                if coverage > 1e-9 {
                    taps.push((s, coverage as f32));
                }
                s += 1;
            }
            let total: f32 = taps.iter().map(|(_, w)| w).sum();
            for tap in &mut taps {
                tap.1 /= total;
            }
            taps
        })
        .collect()
}

/// Resize an RGB image to `new_width x new_height` by area averaging.
pub fn resize_area(image: &RgbImage, new_width: u32, new_height: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    if (width, height) == (new_width, new_height) {
        return image.clone();
    }
    if width == 0 || height == 0 || new_width == 0 || new_height == 0 {
        return RgbImage::new(new_width, new_height);
    }

    let x_taps = area_taps(width as usize, new_width as usize);
    let y_taps = area_taps(height as usize, new_height as usize);
    let dst_w = new_width as usize;

    // Horizontal pass: (height x new_width) float buffer
    let mut horizontal = vec![[0f32; 3]; height as usize * dst_w];
    for y in 0..height {
        for (dx, taps) in x_taps.iter().enumerate() {
            let mut acc = [0f32; 3];
            for &(sx, weight) in taps {
                let p = image.get_pixel(sx as u32, y);
                for c in 0..3 {
                    acc[c] += p[c] as f32 * weight;
                }
            }
            horizontal[y as usize * dst_w + dx] = acc;
        }
    }

    RgbImage::from_fn(new_width, new_height, |x, y| {
        let mut acc = [0f32; 3];
        for &(sy, weight) in &y_taps[y as usize] {
            let row = &horizontal[sy * dst_w + x as usize];
            for c in 0..3 {
                acc[c] += row[c] * weight;
            }
        }
        Rgb([saturate_u8(acc[0]), saturate_u8(acc[1]), saturate_u8(acc[2])])
    })
}
