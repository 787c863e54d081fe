//! Inlay Render Engine
//!
//! Drives a complete overlay render: probe the inputs, plan the filter
//! graph, and supervise the transcode that writes the deliverable.
//!
//! # Pipeline
//!
//! ```text
//! base.mp4 ────┐
//!              ├── probe ── reconcile ── plan video
//! overlay.mp4 ─┤                            │
//!              │                       plan subtitles
//! mask.mp4 ────┘                            │
//!                                      plan audio
//!                                           │
//!                                           ▼
//!                                    ffmpeg transcode
//!                                           │
//!                                           ▼
//!                                       output.mp4
//! ```

pub mod executor;
pub mod job;
pub mod probe;

pub use executor::command_exists;
pub use job::{render_overlay, OverlayJob, RenderedOverlay};
pub use probe::probe_stream;
