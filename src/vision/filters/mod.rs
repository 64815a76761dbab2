// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Classical image filters used by the sketch and painting styles
//!
//! Each filter follows the stock OpenCV routine of the same name
//! parameter-for-parameter (kernel sizes, sigmas, border handling).
//!
//! Components:
//! - `color` - RGB/grayscale/Lab conversions
//! - `gaussian` - Separable Gaussian blur with explicit kernel size
//! - `bilateral` - Edge-aware bilateral smoothing
//! - `domain_transform` - Edge-preserving filter and detail enhancement
//! - `resize` - Area-averaging resize

pub mod bilateral;
pub mod color;
pub mod domain_transform;
pub mod gaussian;
pub mod resize;

pub use bilateral::bilateral_filter;
pub use color::{lab_to_rgb, rgb_to_gray, rgb_to_lab};
pub use domain_transform::{detail_enhance, edge_preserving_filter, DomainTransformMode};
pub use gaussian::{auto_sigma, gaussian_blur_gray, gaussian_kernel};
pub use resize::resize_area;

/// Map an out-of-range index back into `0..len` by mirroring around the
/// edge pixels without repeating them (`gfedcb|abcdefgh|gfedcba`).
pub(crate) fn reflect101(idx: isize, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    let len = len as isize;
    let period = 2 * (len - 1);
    let mut i = idx.rem_euclid(period);
    if i >= len {
        i = period - i;
    }
    i as usize
}

/// Round and saturate a float sample to the `u8` range.
pub(crate) fn saturate_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
