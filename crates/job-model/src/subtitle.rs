//! Subtitle segments, styling, and the boundary input form.
//!
//! Callers may hand over subtitles either as structured segments or as a
//! serialized JSON list (the form produced by upstream transcription
//! tooling). Both resolve to the same internal segment sequence; an
//! unparsable textual form means "no subtitles", never a failed render.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use inlay_common::{InlayError, InlayResult};

/// One timed subtitle line, independent of all others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleSegment {
    /// Text to burn in. Wrapping and escaping happen at render time.
    pub text: String,

    /// Timeline position where the segment becomes visible.
    #[serde(alias = "start")]
    pub start_secs: f64,

    /// Timeline position where the segment disappears.
    #[serde(alias = "end")]
    pub end_secs: f64,
}

impl SubtitleSegment {
    pub fn new(text: impl Into<String>, start_secs: f64, end_secs: f64) -> Self {
        Self {
            text: text.into(),
            start_secs,
            end_secs,
        }
    }

    /// Check timing constraints: non-negative start, end not before start.
    pub fn validate(&self) -> InlayResult<()> {
        if !(self.start_secs >= 0.0 && self.start_secs.is_finite()) {
            return Err(InlayError::subtitle_parse(format!(
                "segment start must be >= 0, got {}",
                self.start_secs
            )));
        }
        if !(self.end_secs >= self.start_secs && self.end_secs.is_finite()) {
            return Err(InlayError::subtitle_parse(format!(
                "segment end {} is before start {}",
                self.end_secs, self.start_secs
            )));
        }
        Ok(())
    }
}

/// Placement mode for burned-in subtitles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubtitlePosition {
    #[default]
    BottomCenter,
    TopCenter,
    BottomLeft,
    BottomRight,
    Center,
    Custom,
}

impl SubtitlePosition {
    /// Parse a placement name. Unknown names fall back to the
    /// bottom-center default rather than failing.
    pub fn from_name(name: &str) -> Self {
        match name {
            "bottom_center" => Self::BottomCenter,
            "top_center" => Self::TopCenter,
            "bottom_left" => Self::BottomLeft,
            "bottom_right" => Self::BottomRight,
            "center" => Self::Center,
            "custom" => Self::Custom,
            _ => Self::BottomCenter,
        }
    }

    pub fn as_name(&self) -> &'static str {
        match self {
            Self::BottomCenter => "bottom_center",
            Self::TopCenter => "top_center",
            Self::BottomLeft => "bottom_left",
            Self::BottomRight => "bottom_right",
            Self::Center => "center",
            Self::Custom => "custom",
        }
    }
}

/// Visual styling for burned-in subtitles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtitleStyle {
    /// Font file to render with. Must exist when subtitles are requested;
    /// no font discovery is attempted.
    pub font_path: PathBuf,

    /// Font size in pixels.
    pub font_size: u32,

    /// Text color (engine color name or hex).
    pub font_color: String,

    /// Background box color.
    pub box_color: String,

    /// Background box opacity in `[0.0, 1.0]`. 0 disables the box.
    pub box_opacity: f64,

    /// Maximum text width in pixels before wrapping.
    /// 0 means auto: 80% of the base video width.
    pub max_text_width_px: u32,

    /// Placement mode.
    pub position: SubtitlePosition,

    /// Literal X coordinate, used only with `SubtitlePosition::Custom`.
    pub custom_x: i32,

    /// Literal Y coordinate, used only with `SubtitlePosition::Custom`.
    pub custom_y: i32,
}

impl Default for SubtitleStyle {
    fn default() -> Self {
        Self {
            font_path: PathBuf::new(),
            font_size: 32,
            font_color: "white".to_string(),
            box_color: "black".to_string(),
            box_opacity: 0.5,
            max_text_width_px: 0,
            position: SubtitlePosition::BottomCenter,
            custom_x: 0,
            custom_y: 0,
        }
    }
}

impl SubtitleStyle {
    /// Check style constraints. Only called when subtitles are actually
    /// being rendered; an invalid style with no subtitles is harmless.
    pub fn validate(&self) -> InlayResult<()> {
        if self.font_size == 0 {
            return Err(InlayError::config("font_size must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.box_opacity) {
            return Err(InlayError::config(format!(
                "box_opacity must be in [0.0, 1.0], got {}",
                self.box_opacity
            )));
        }
        Ok(())
    }
}

/// Subtitle input as supplied at the boundary.
#[derive(Debug, Clone)]
pub enum SubtitleSource {
    /// Already-structured segments.
    Segments(Vec<SubtitleSegment>),

    /// A serialized JSON list of segments (`[{"text": .., "start": ..,
    /// "end": ..}, ..]`).
    Text(String),
}

impl SubtitleSource {
    /// Resolve to the internal segment sequence.
    ///
    /// Malformed input degrades to an empty sequence with a warning;
    /// subtitles are optional and never block a render.
    pub fn resolve(&self) -> Vec<SubtitleSegment> {
        let parsed = match self {
            Self::Segments(segments) => validate_segments(segments.clone()),
            Self::Text(raw) => parse_segments(raw),
        };
        match parsed {
            Ok(segments) => segments,
            Err(e) => {
                tracing::warn!("Ignoring subtitles: {}", e);
                Vec::new()
            }
        }
    }
}

/// Strict parse of the textual subtitle form.
pub fn parse_segments(raw: &str) -> InlayResult<Vec<SubtitleSegment>> {
    let segments: Vec<SubtitleSegment> = serde_json::from_str(raw)
        .map_err(|e| InlayError::subtitle_parse(format!("invalid segment list: {}", e)))?;
    validate_segments(segments)
}

fn validate_segments(segments: Vec<SubtitleSegment>) -> InlayResult<Vec<SubtitleSegment>> {
    for segment in &segments {
        segment.validate()?;
    }
    Ok(segments)
}
