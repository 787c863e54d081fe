//! Overlay job orchestration.

use std::path::{Path, PathBuf};
use std::time::Instant;

use inlay_common::{EngineDefaults, InlayError, InlayResult};
use inlay_filter_core::{
    plan_audio, plan_subtitles, plan_video, reconcile, FilterGraph, RenderPlan,
};
use inlay_job_model::{
    CompositionConfig, OutputSpec, StreamInfo, SubtitleSource, SubtitleStyle,
};

use crate::executor::{build_ffmpeg_args, command_exists, run_transcode};
use crate::probe::probe_stream;

/// A fully-specified overlay render, ready to run.
#[derive(Debug, Clone)]
pub struct OverlayJob {
    /// Full-frame background video.
    pub base_path: PathBuf,

    /// Foreground clip to inlay onto the base.
    pub overlay_path: PathBuf,

    /// Grayscale alpha mask for the overlay.
    pub mask_path: PathBuf,

    /// Output file path.
    pub output_path: PathBuf,

    /// Placement, sizing, opacity, and volume settings.
    pub config: CompositionConfig,

    /// Subtitles to burn in, in either boundary form.
    pub subtitles: SubtitleSource,

    /// Styling for burned-in subtitles.
    pub subtitle_style: SubtitleStyle,
}

/// Summary of a finished render.
#[derive(Debug, Clone)]
pub struct RenderedOverlay {
    /// Where the deliverable was written.
    pub path: PathBuf,

    /// File name component, for upstream galleries and logs.
    pub file_name: String,

    /// Final clip duration in seconds.
    pub duration_secs: f64,
}

/// Render an overlay composition end to end.
///
/// Probes the three inputs, reconciles their durations, plans the filter
/// graph, and supervises the transcode. The deliverable always covers
/// the longer of base and overlay.
pub fn render_overlay(job: &OverlayJob, engine: &EngineDefaults) -> InlayResult<RenderedOverlay> {
    let started = Instant::now();

    for path in [&job.base_path, &job.overlay_path, &job.mask_path] {
        if !path.exists() {
            return Err(InlayError::InputNotFound { path: path.clone() });
        }
    }
    job.config.validate()?;

    if !command_exists(&engine.ffmpeg_bin) {
        return Err(InlayError::config(format!(
            "{} not found in PATH",
            engine.ffmpeg_bin
        )));
    }

    let base = probe_input(&engine.ffprobe_bin, &job.base_path, "base")?;
    let overlay = probe_input(&engine.ffprobe_bin, &job.overlay_path, "overlay")?;
    let mask = probe_input(&engine.ffprobe_bin, &job.mask_path, "mask")?;

    let outcome = reconcile(base.duration_secs, overlay.duration_secs);
    tracing::info!(
        strategy = ?outcome.strategy,
        pad_secs = outcome.pad_secs,
        output_secs = outcome.output_duration_secs,
        "Reconciled input durations"
    );

    let mut graph = FilterGraph::new();
    let mut video_out = plan_video(&base, &overlay, &mask, &job.config, &outcome, &mut graph);

    let segments = job.subtitles.resolve();
    if !segments.is_empty() {
        job.subtitle_style.validate()?;
        if !job.subtitle_style.font_path.exists() {
            return Err(InlayError::FontNotFound {
                path: job.subtitle_style.font_path.clone(),
            });
        }
        video_out = plan_subtitles(
            &segments,
            &job.subtitle_style,
            base.width,
            &mut graph,
            video_out,
        );
    }

    let audio_out = plan_audio(&job.config, &outcome, &mut graph);
    let plan = RenderPlan {
        graph,
        video_out,
        audio_out,
    };

    if let Some(parent) = job.output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let spec = OutputSpec::new(job.output_path.clone(), outcome.output_duration_secs);
    let args = build_ffmpeg_args(
        &job.base_path,
        &job.overlay_path,
        &job.mask_path,
        &plan,
        &spec,
    );
    run_transcode(&engine.ffmpeg_bin, &args)?;

    let file_name = job
        .output_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    tracing::info!(
        output = %job.output_path.display(),
        duration_secs = outcome.output_duration_secs,
        subtitle_segments = segments.len(),
        elapsed_ms = started.elapsed().as_millis(),
        "Overlay render complete"
    );

    Ok(RenderedOverlay {
        path: job.output_path.clone(),
        file_name,
        duration_secs: outcome.output_duration_secs,
    })
}

fn probe_input(ffprobe_bin: &str, path: &Path, role: &str) -> InlayResult<StreamInfo> {
    let info = probe_stream(ffprobe_bin, path)?;
    tracing::info!(
        role,
        path = %path.display(),
        width = info.width,
        height = info.height,
        duration_secs = info.duration_secs,
        fps = info.fps,
        "Probed input"
    );
    Ok(info)
}
