// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Separable Gaussian blur with an explicit kernel size

use image::{GrayImage, Luma};

use super::{reflect101, saturate_u8};

/// Sigma derived from kernel size when the caller passes `sigma <= 0`
pub fn auto_sigma(ksize: usize) -> f32 {
    0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Build a normalized 1-D Gaussian kernel of odd length `ksize`.
///
/// A non-positive `sigma` is replaced by [`auto_sigma`].
pub fn gaussian_kernel(ksize: usize, sigma: f32) -> Vec<f32> {
    let sigma = if sigma > 0.0 { sigma } else { auto_sigma(ksize) };
    let center = (ksize as f32 - 1.0) * 0.5;
    let scale = -0.5 / (sigma * sigma);

    let mut kernel: Vec<f32> = (0..ksize)
        .map(|i| {
            let d = i as f32 - center;
            (scale * d * d).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for k in &mut kernel {
        *k /= sum;
    }
    kernel
}

/// Blur a grayscale image with a `ksize x ksize` Gaussian kernel.
///
/// Borders are reflected (reflect-101) and the result is rounded back
/// to 8 bits.
pub fn gaussian_blur_gray(image: &GrayImage, ksize: usize, sigma: f32) -> GrayImage {
    let (width, height) = image.dimensions();
    let (w, h) = (width as usize, height as usize);
    if w == 0 || h == 0 {
        return image.clone();
    }

    let kernel = gaussian_kernel(ksize, sigma);
    let radius = (ksize / 2) as isize;

    // Horizontal pass into a float buffer
    let mut horizontal = vec![0f32; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let sx = reflect101(x as isize + k as isize - radius, w);
                acc += weight * image.get_pixel(sx as u32, y as u32)[0] as f32;
            }
            horizontal[y * w + x] = acc;
        }
    }

    // Vertical pass
    GrayImage::from_fn(width, height, |x, y| {
        let (x, y) = (x as usize, y as usize);
        let mut acc = 0.0;
        for (k, weight) in kernel.iter().enumerate() {
            let sy = reflect101(y as isize + k as isize - radius, h);
            acc += weight * horizontal[sy * w + x];
        }
        Luma([saturate_u8(acc)])
    })
}
