//! Composition parameters for an overlay render.

use serde::{Deserialize, Serialize};

use inlay_common::{InlayError, InlayResult};

/// Corner placement for the overlay on the base video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverlayPosition {
    #[default]
    RightBottom,
    RightTop,
    LeftBottom,
    LeftTop,
    Center,
}

impl OverlayPosition {
    /// Parse a position name. Unknown names fall back to the
    /// right-bottom corner rather than failing.
    pub fn from_name(name: &str) -> Self {
        match name {
            "right_bottom" => Self::RightBottom,
            "right_top" => Self::RightTop,
            "left_bottom" => Self::LeftBottom,
            "left_top" => Self::LeftTop,
            "center" => Self::Center,
            _ => Self::RightBottom,
        }
    }

    pub fn as_name(&self) -> &'static str {
        match self {
            Self::RightBottom => "right_bottom",
            Self::RightTop => "right_top",
            Self::LeftBottom => "left_bottom",
            Self::LeftTop => "left_top",
            Self::Center => "center",
        }
    }
}

/// Caller-supplied parameters controlling how the overlay is composited.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositionConfig {
    /// Overlay opacity in `[0.0, 1.0]`. Values below 1.0 scale the mask's
    /// white point down, making the overlay partially transparent.
    pub opacity: f64,

    /// Corner placement for the overlay.
    pub position: OverlayPosition,

    /// Horizontal margin from the chosen corner, in base pixels.
    pub margin_x: u32,

    /// Vertical margin from the chosen corner, in base pixels.
    pub margin_y: u32,

    /// Overlay height relative to base height, in `(0.0, 1.0]`.
    pub size_ratio: f64,

    /// Base audio gain (0 mutes the track).
    pub base_volume: f64,

    /// Overlay audio gain (0 mutes the track).
    pub overlay_volume: f64,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            position: OverlayPosition::RightBottom,
            margin_x: 0,
            margin_y: 0,
            size_ratio: 0.25,
            base_volume: 1.0,
            overlay_volume: 1.0,
        }
    }
}

impl CompositionConfig {
    /// Validate parameter ranges. Rejects NaN through the range checks.
    pub fn validate(&self) -> InlayResult<()> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(InlayError::config(format!(
                "opacity must be in [0.0, 1.0], got {}",
                self.opacity
            )));
        }
        if !(self.size_ratio > 0.0 && self.size_ratio <= 1.0) {
            return Err(InlayError::config(format!(
                "size_ratio must be in (0.0, 1.0], got {}",
                self.size_ratio
            )));
        }
        if !(self.base_volume >= 0.0 && self.base_volume.is_finite()) {
            return Err(InlayError::config(format!(
                "base_volume must be >= 0, got {}",
                self.base_volume
            )));
        }
        if !(self.overlay_volume >= 0.0 && self.overlay_volume.is_finite()) {
            return Err(InlayError::config(format!(
                "overlay_volume must be >= 0, got {}",
                self.overlay_volume
            )));
        }
        Ok(())
    }
}
