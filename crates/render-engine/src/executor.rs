//! Transcode execution: argument assembly and process supervision.

use std::io::{BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};

use inlay_common::{InlayError, InlayResult};
use inlay_filter_core::RenderPlan;
use inlay_job_model::OutputSpec;

/// Assemble the full ffmpeg invocation for a plan.
///
/// Input order is fixed (base, overlay, mask) and must match the input
/// indices baked into the planned graph.
pub fn build_ffmpeg_args(
    base: &Path,
    overlay: &Path,
    mask: &Path,
    plan: &RenderPlan,
    spec: &OutputSpec,
) -> Vec<String> {
    let mut args = vec![
        "-y".to_string(),
        "-hide_banner".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-i".to_string(),
        base.display().to_string(),
        "-i".to_string(),
        overlay.display().to_string(),
        "-i".to_string(),
        mask.display().to_string(),
    ];

    args.push("-filter_complex".to_string());
    args.push(plan.graph.filter_complex());
    args.push("-map".to_string());
    args.push(plan.video_out.to_string());
    args.push("-map".to_string());
    args.push(plan.audio_out.to_string());
    args.push("-t".to_string());
    args.push(format!("{:.6}", spec.duration_secs));

    let mut codec_args = codec_args_for_spec(spec);
    args.append(&mut codec_args);

    args.push(spec.path.display().to_string());
    args
}

fn codec_args_for_spec(spec: &OutputSpec) -> Vec<String> {
    vec![
        "-c:v".to_string(),
        spec.video.codec.clone(),
        "-preset".to_string(),
        spec.video.preset.clone(),
        "-crf".to_string(),
        spec.video.crf.to_string(),
        "-c:a".to_string(),
        spec.audio.codec.clone(),
        "-movflags".to_string(),
        "+faststart".to_string(),
    ]
}

/// Run the assembled transcode and wait for it to finish.
///
/// The engine's own log output is suppressed to errors by the argument
/// list; whatever it does print is attached verbatim to the failure.
pub fn run_transcode(ffmpeg_bin: &str, args: &[String]) -> InlayResult<()> {
    tracing::debug!(args = ?args, "Running ffmpeg");

    let mut child = Command::new(ffmpeg_bin)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| InlayError::transcode(format!("Failed to start {ffmpeg_bin}: {e}")))?;

    tracing::info!(
        pid = child.id(),
        args_len = args.len(),
        "ffmpeg process started"
    );

    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| InlayError::transcode("Failed to capture ffmpeg stderr"))?;

    // Drain stderr concurrently to avoid ffmpeg blocking on a full stderr pipe.
    let stderr_task = std::thread::spawn(move || -> String {
        let mut reader = BufReader::new(stderr);
        let mut output = String::new();
        match reader.read_to_string(&mut output) {
            Ok(_) => output,
            Err(err) => format!("<failed to read ffmpeg stderr: {err}>"),
        }
    });

    let status = child
        .wait()
        .map_err(|e| InlayError::transcode(format!("Failed to wait on ffmpeg: {e}")))?;

    let stderr_output = stderr_task
        .join()
        .unwrap_or_else(|_| "<failed to join stderr reader>".to_string());

    if !status.success() {
        return Err(InlayError::transcode(format!(
            "ffmpeg transcode failed (status {}): {}",
            status,
            stderr_output.trim()
        )));
    }

    Ok(())
}

/// Check a binary is resolvable in PATH.
pub fn command_exists(binary: &str) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {binary} >/dev/null 2>&1"))
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
