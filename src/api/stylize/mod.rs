// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Stylize API endpoint module
//!
//! Provides POST /stylize for turning an uploaded photo into a cartoon,
//! pencil sketch or oil painting.

pub mod handler;
pub mod request;

pub use handler::stylize_handler;
pub use request::StylizeRequest;
