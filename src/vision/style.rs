// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Style selector

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::StylizeError;

/// Label used when the client does not pick a style
pub const DEFAULT_STYLE_LABEL: &str = "White-box Cartoonizer";

/// Transformation applied to an uploaded photo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    /// Neural cartoonization (White-box Cartoonizer model)
    #[default]
    Cartoon,
    /// Dodge-blend pencil sketch
    PencilSketch,
    /// Soft oil-painting look from stacked edge-aware filters
    OilPainting,
}

impl Style {
    pub const ALL: [Style; 3] = [Style::Cartoon, Style::PencilSketch, Style::OilPainting];

    /// Human-readable label, as sent by the web front-end
    pub fn label(self) -> &'static str {
        match self {
            Style::Cartoon => DEFAULT_STYLE_LABEL,
            Style::PencilSketch => "Pencil Sketch",
            Style::OilPainting => "Oil Painting",
        }
    }

    /// Short machine identifier
    pub fn id(self) -> &'static str {
        match self {
            Style::Cartoon => "cartoon",
            Style::PencilSketch => "pencil-sketch",
            Style::OilPainting => "oil-painting",
        }
    }

    /// Channel count of the image this style produces
    pub fn output_channels(self) -> u8 {
        match self {
            Style::PencilSketch => 1,
            Style::Cartoon | Style::OilPainting => 3,
        }
    }

    /// Whether the style needs the cartoonizer model
    pub fn requires_model(self) -> bool {
        matches!(self, Style::Cartoon)
    }

    /// Match a label exactly, or an identifier case-insensitively
    pub fn from_label(label: &str) -> Option<Self> {
        Style::ALL
            .into_iter()
            .find(|s| s.label() == label || s.id().eq_ignore_ascii_case(label))
    }

    /// Resolve a client-supplied label.
    ///
    /// With `legacy_fallback` set, anything unrecognized becomes
    /// [`Style::OilPainting`], matching older clients that relied on it.
    pub fn resolve(label: &str, legacy_fallback: bool) -> Result<Self, StylizeError> {
        match Style::from_label(label) {
            Some(style) => Ok(style),
            None if legacy_fallback => Ok(Style::OilPainting),
            None => Err(StylizeError::UnknownStyle {
                label: label.to_string(),
                supported: Style::ALL.iter().map(|s| s.label()).collect(),
            }),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Style {
    type Err = StylizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Style::resolve(s, false)
    }
}
