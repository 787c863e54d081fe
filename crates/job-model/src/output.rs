//! Output file specification and encode parameters.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Video encode settings for the deliverable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoEncodeParams {
    /// Encoder name.
    pub codec: String,

    /// Encoder speed/quality preset.
    pub preset: String,

    /// Constant rate factor (lower = higher quality).
    pub crf: u32,
}

impl Default for VideoEncodeParams {
    fn default() -> Self {
        Self {
            codec: "libx264".to_string(),
            preset: "medium".to_string(),
            crf: 23,
        }
    }
}

/// Audio encode settings for the deliverable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioEncodeParams {
    /// Encoder name.
    pub codec: String,
}

impl Default for AudioEncodeParams {
    fn default() -> Self {
        Self {
            codec: "aac".to_string(),
        }
    }
}

/// Where to write the deliverable and how to encode it.
///
/// The container is always written with fast-start layout so the result
/// is progressively playable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSpec {
    /// Output file path.
    pub path: PathBuf,

    /// Hard trim limit in seconds; the render never exceeds this.
    pub duration_secs: f64,

    /// Video encode settings.
    pub video: VideoEncodeParams,

    /// Audio encode settings.
    pub audio: AudioEncodeParams,
}

impl OutputSpec {
    /// Output spec with default mezzanine-quality encode settings.
    pub fn new(path: impl Into<PathBuf>, duration_secs: f64) -> Self {
        Self {
            path: path.into(),
            duration_secs,
            video: VideoEncodeParams::default(),
            audio: AudioEncodeParams::default(),
        }
    }
}
