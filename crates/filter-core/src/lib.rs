//! Inlay Filter Core: the composition planner.
//!
//! Turns probed stream facts and a composition request into a complete
//! filter graph for the transcoder:
//! - **Reconciliation:** pick a duration strategy for mismatched inputs
//! - **Video:** masked, scaled, positioned overlay stages
//! - **Audio:** per-track gain with padding or looping to match
//! - **Subtitles:** wrapped, escaped, time-gated text stages
//!
//! This crate is pure computation: no I/O, no process spawning.
//! All inputs are data; all outputs are data.

pub mod audio;
pub mod graph;
pub mod reconcile;
pub mod subtitle;
pub mod video;

pub use audio::plan_audio;
pub use graph::{FilterGraph, RenderPlan, StreamRef};
pub use reconcile::{reconcile, DurationStrategy, ReconciliationOutcome};
pub use subtitle::{escape_text, plan_subtitles, wrap_text};
pub use video::{overlay_position_exprs, plan_video, target_dimensions};

/// Input index of the base video on the transcoder command line.
pub const BASE_INPUT: usize = 0;
/// Input index of the overlay video.
pub const OVERLAY_INPUT: usize = 1;
/// Input index of the alpha mask video.
pub const MASK_INPUT: usize = 2;
