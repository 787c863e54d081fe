//! Probed stream metadata.

use serde::{Deserialize, Serialize};

/// Metadata for one input media file, produced once by probing.
///
/// Immutable after creation; all downstream planning reads from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreamInfo {
    /// Video width in pixels.
    pub width: u32,

    /// Video height in pixels.
    pub height: u32,

    /// Container duration in seconds.
    pub duration_secs: f64,

    /// Frame rate, reduced from the container's rational form.
    pub fps: f64,
}
