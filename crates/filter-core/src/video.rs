//! Video compositing stages: scale, mask-merge, opacity, overlay.
//!
//! # Stage order
//!
//! 1. Time-extend: freeze the overlay/mask last frame, or loop the base.
//! 2. Convert the mask to single-channel grayscale.
//! 3. Scale overlay and mask into the target box (never upscaling past it).
//! 4. If opacity < 1.0, pull the mask's white point down to `opacity`.
//! 5. Merge the scaled mask in as the overlay's alpha channel.
//! 6. Composite onto the base at the configured corner.

use inlay_job_model::{CompositionConfig, OverlayPosition, StreamInfo};

use crate::graph::{FilterGraph, StreamRef};
use crate::reconcile::{DurationStrategy, ReconciliationOutcome};
use crate::{BASE_INPUT, MASK_INPUT, OVERLAY_INPUT};

/// Target overlay box. Height is a floor of the scaled base height; width
/// follows from the overlay's own aspect ratio, so the overlay is never
/// distorted to match the base.
pub fn target_dimensions(base: &StreamInfo, overlay: &StreamInfo, size_ratio: f64) -> (u32, u32) {
    let target_height = (base.height as f64 * size_ratio) as u32;
    let target_width =
        (target_height as f64 * overlay.width as f64 / overlay.height as f64).round() as u32;
    (target_width, target_height)
}

/// X/Y expressions for the overlay filter, in its `main_w`/`overlay_w`
/// variable vocabulary. Evaluated by the engine per frame, not here.
pub fn overlay_position_exprs(
    position: OverlayPosition,
    margin_x: u32,
    margin_y: u32,
) -> (String, String) {
    match position {
        OverlayPosition::RightBottom => (
            format!("main_w-overlay_w-{margin_x}"),
            format!("main_h-overlay_h-{margin_y}"),
        ),
        OverlayPosition::RightTop => (
            format!("main_w-overlay_w-{margin_x}"),
            margin_y.to_string(),
        ),
        OverlayPosition::LeftBottom => (
            margin_x.to_string(),
            format!("main_h-overlay_h-{margin_y}"),
        ),
        OverlayPosition::LeftTop => (margin_x.to_string(), margin_y.to_string()),
        OverlayPosition::Center => (
            "(main_w-overlay_w)/2".to_string(),
            "(main_h-overlay_h)/2".to_string(),
        ),
    }
}

/// Build the video stage sequence and return the composited output pad.
///
/// The mask stream is consumed as-is; a duration mismatch against the
/// overlay is only reported, since the engine tolerates it (the shorter
/// stream ends and the last merged alpha holds).
pub fn plan_video(
    base: &StreamInfo,
    overlay: &StreamInfo,
    mask: &StreamInfo,
    config: &CompositionConfig,
    outcome: &ReconciliationOutcome,
    graph: &mut FilterGraph,
) -> StreamRef {
    if (mask.duration_secs - overlay.duration_secs).abs() > 0.1 {
        tracing::warn!(
            mask_secs = mask.duration_secs,
            overlay_secs = overlay.duration_secs,
            "Mask duration differs from overlay duration"
        );
    }

    let mut base_v = StreamRef::video_input(BASE_INPUT);
    let mut overlay_v = StreamRef::video_input(OVERLAY_INPUT);
    let mut mask_v = StreamRef::video_input(MASK_INPUT);

    match outcome.strategy {
        DurationStrategy::FreezeOverlay => {
            let hold = format!(
                "tpad=stop_mode=clone:stop_duration={}",
                outcome.pad_secs
            );
            overlay_v = graph.stage(&[&overlay_v], hold.clone(), "overlay_padded");
            mask_v = graph.stage(&[&mask_v], hold, "mask_padded");
        }
        DurationStrategy::LoopBase => {
            base_v = graph.stage(&[&base_v], "loop=loop=-1:size=32767:start=0", "base_loop");
        }
    }

    mask_v = graph.stage(&[&mask_v], "format=gray", "mask_gray");

    let (target_width, target_height) = target_dimensions(base, overlay, config.size_ratio);
    let scale = format!("scale={target_width}:{target_height}:force_original_aspect_ratio=decrease");
    overlay_v = graph.stage(&[&overlay_v], scale.clone(), "overlay_scaled");
    mask_v = graph.stage(&[&mask_v], scale, "mask_scaled");

    if config.opacity < 1.0 {
        mask_v = graph.stage(
            &[&mask_v],
            format!("colorlevels=romax={}", config.opacity),
            "mask_alpha",
        );
    }

    let merged = graph.stage(&[&overlay_v, &mask_v], "alphamerge", "overlay_alpha");

    let (x, y) = overlay_position_exprs(config.position, config.margin_x, config.margin_y);
    graph.stage(
        &[&base_v, &merged],
        format!("overlay=x={x}:y={y}:format=auto"),
        "vout",
    )
}
