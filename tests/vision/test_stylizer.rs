// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Stylizer routing across all styles
//!
//! These tests verify that:
//! - Each style produces the channel count it advertises
//! - A model manager without a model yields a stylizer without cartoonization
//! - Large photos are downscaled before reaching the model

use artifice_stylizer::vision::{
    CartoonBackend, ModelManager, Style, StylizeError, Stylizer,
};
use image::{Rgb, RgbImage};
use mockall::mock;
use ndarray::Array4;
use std::sync::Arc;

mock! {
    Backend {}
    impl CartoonBackend for Backend {
        fn infer(&self, input: Array4<f32>) -> anyhow::Result<Array4<f32>>;
    }
}

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 3 % 256) as u8, (y * 5 % 256) as u8, 128])
    })
}

#[test]
fn test_every_style_matches_advertised_channels() {
    let mut backend = MockBackend::new();
    backend.expect_infer().returning(Ok);
    let stylizer = Stylizer::new(Some(Arc::new(backend)));
    let input = gradient(48, 32);

    for style in Style::ALL {
        let out = stylizer.select(style, &input).unwrap();
        assert_eq!(
            out.color().channel_count(),
            style.output_channels(),
            "style {}",
            style
        );
    }
}

#[test]
fn test_manager_without_model_disables_cartoon() {
    let manager = ModelManager::without_model();
    let stylizer = Stylizer::new(manager.cartoonizer());

    assert!(!stylizer.has_cartoonizer());
    assert!(matches!(
        stylizer.select(Style::Cartoon, &gradient(16, 16)),
        Err(StylizeError::ModelUnavailable)
    ));
    assert!(stylizer.select(Style::PencilSketch, &gradient(16, 16)).is_ok());
}

#[test]
fn test_large_photo_is_downscaled_for_model() {
    let mut backend = MockBackend::new();
    backend
        .expect_infer()
        .withf(|input| {
            let shape = input.shape();
            shape[1] <= 720 && shape[2] <= 720 && shape[1] % 8 == 0 && shape[2] % 8 == 0
        })
        .times(1)
        .returning(Ok);

    let stylizer = Stylizer::new(Some(Arc::new(backend)));
    let out = stylizer.select(Style::Cartoon, &gradient(1000, 800)).unwrap();
    assert_eq!((out.width(), out.height()), (720, 576));
}
