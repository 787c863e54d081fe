//! Stream probing via ffprobe.
//!
//! Each input is probed once, up front. The JSON report parsing lives in
//! [`parse_probe_output`], which is pure so the format handling stays
//! testable without media files on disk.

use std::path::Path;
use std::process::Command;

use inlay_common::{InlayError, InlayResult};
use inlay_job_model::StreamInfo;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ProbeReport {
    #[serde(default)]
    streams: Vec<ProbeStream>,

    #[serde(default)]
    format: ProbeFormat,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    #[serde(default)]
    codec_type: Option<String>,

    #[serde(default)]
    width: Option<u32>,

    #[serde(default)]
    height: Option<u32>,

    #[serde(default)]
    r_frame_rate: Option<String>,

    #[serde(default)]
    duration: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ProbeFormat {
    #[serde(default)]
    duration: Option<String>,
}

/// Run ffprobe on `path` and extract the facts of its first video stream.
pub fn probe_stream(ffprobe_bin: &str, path: &Path) -> InlayResult<StreamInfo> {
    let output = Command::new(ffprobe_bin)
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(path)
        .output()
        .map_err(|e| InlayError::probe(format!("Failed to start {ffprobe_bin}: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(InlayError::probe(format!(
            "ffprobe failed on {} (status {}): {}",
            path.display(),
            output.status,
            stderr.trim()
        )));
    }

    let raw = String::from_utf8_lossy(&output.stdout);
    parse_probe_output(&raw).map_err(|e| match e {
        InlayError::Probe { message } => {
            InlayError::probe(format!("{}: {message}", path.display()))
        }
        other => other,
    })
}

/// Parse an ffprobe JSON report into stream facts.
///
/// The first stream with `codec_type == "video"` wins. Duration comes
/// from the container entry, which covers the whole mux; the per-stream
/// value is only a fallback for reports that omit the container one.
pub fn parse_probe_output(raw: &str) -> InlayResult<StreamInfo> {
    let report: ProbeReport = serde_json::from_str(raw)
        .map_err(|e| InlayError::probe(format!("Unreadable ffprobe report: {e}")))?;

    let stream = report
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| InlayError::probe("No video stream found"))?;

    let width = stream
        .width
        .ok_or_else(|| InlayError::probe("Video stream reports no width"))?;
    let height = stream
        .height
        .ok_or_else(|| InlayError::probe("Video stream reports no height"))?;
    if width == 0 || height == 0 {
        return Err(InlayError::probe("Video stream reports zero dimensions"));
    }

    let rate = stream
        .r_frame_rate
        .as_deref()
        .ok_or_else(|| InlayError::probe("Video stream reports no frame rate"))?;
    let fps = parse_frame_rate(rate)?;

    let duration_raw = report
        .format
        .duration
        .as_deref()
        .or(stream.duration.as_deref())
        .ok_or_else(|| InlayError::probe("Neither container nor stream reports a duration"))?;
    let duration_secs = duration_raw
        .trim()
        .parse::<f64>()
        .map_err(|_| InlayError::probe(format!("Unparseable duration {duration_raw:?}")))?;
    if !(duration_secs > 0.0) {
        return Err(InlayError::probe(format!(
            "Non-positive duration {duration_secs}"
        )));
    }

    Ok(StreamInfo {
        width,
        height,
        duration_secs,
        fps,
    })
}

/// Parse an ffprobe rational like `30000/1001`. A bare number is taken
/// as a whole frame rate. A zero denominator is rejected rather than
/// propagated as infinity, and the reduced rate must be positive.
fn parse_frame_rate(rate: &str) -> InlayResult<f64> {
    let (num, den) = rate.split_once('/').unwrap_or((rate, "1"));
    let num: f64 = num
        .trim()
        .parse()
        .map_err(|_| InlayError::probe(format!("Unparseable frame rate {rate:?}")))?;
    let den: f64 = den
        .trim()
        .parse()
        .map_err(|_| InlayError::probe(format!("Unparseable frame rate {rate:?}")))?;
    if den == 0.0 {
        return Err(InlayError::probe(format!("Invalid frame rate {rate:?}")));
    }
    let fps = num / den;
    if !(fps > 0.0) {
        return Err(InlayError::probe(format!("Non-positive frame rate {rate:?}")));
    }
    Ok(fps)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_REPORT: &str = r#"{
        "streams": [
            {"codec_type": "audio", "r_frame_rate": "0/0"},
            {"codec_type": "video", "width": 1920, "height": 1080,
             "r_frame_rate": "30000/1001", "duration": "12.012000"}
        ],
        "format": {"duration": "12.054000"}
    }"#;

    #[test]
    fn test_picks_first_video_stream() {
        let info = parse_probe_output(FULL_REPORT).unwrap();
        assert_eq!(info.width, 1920);
        assert_eq!(info.height, 1080);
        assert!((info.fps - 30000.0 / 1001.0).abs() < 1e-9);
        assert!((info.duration_secs - 12.054).abs() < 1e-9);
    }

    #[test]
    fn test_container_duration_wins_over_stream() {
        // Both levels report a duration; the container value drives the
        // render length, so it must be the one probed.
        let raw = r#"{
            "streams": [{"codec_type": "video", "width": 640, "height": 480,
                         "r_frame_rate": "25/1", "duration": "7.940000"}],
            "format": {"duration": "8.000000"}
        }"#;
        let info = parse_probe_output(raw).unwrap();
        assert!((info.duration_secs - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_falls_back_to_stream_duration() {
        let raw = r#"{
            "streams": [{"codec_type": "video", "width": 640, "height": 480,
                         "r_frame_rate": "25/1", "duration": "8.000000"}],
            "format": {}
        }"#;
        let info = parse_probe_output(raw).unwrap();
        assert!((info.duration_secs - 8.0).abs() < 1e-9);
        assert!((info.fps - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_report_without_video_stream() {
        let raw = r#"{"streams": [{"codec_type": "audio"}], "format": {"duration": "3"}}"#;
        let err = parse_probe_output(raw).unwrap_err();
        assert!(err.to_string().contains("No video stream"));
    }

    #[test]
    fn test_rejects_zero_frame_rate_denominator() {
        let raw = r#"{
            "streams": [{"codec_type": "video", "width": 640, "height": 480,
                         "r_frame_rate": "0/0", "duration": "8.0"}]
        }"#;
        let err = parse_probe_output(raw).unwrap_err();
        assert!(err.to_string().contains("Invalid frame rate"));
    }

    #[test]
    fn test_rejects_zero_frame_rate_numerator() {
        let raw = r#"{
            "streams": [{"codec_type": "video", "width": 640, "height": 480,
                         "r_frame_rate": "0/1", "duration": "8.0"}]
        }"#;
        let err = parse_probe_output(raw).unwrap_err();
        assert!(err.to_string().contains("Non-positive frame rate"));
        assert!(parse_frame_rate("-30/1").is_err());
    }

    #[test]
    fn test_accepts_bare_frame_rate() {
        assert!((parse_frame_rate("24").unwrap() - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_garbage_report() {
        let err = parse_probe_output("not json at all").unwrap_err();
        assert!(err.to_string().contains("Unreadable ffprobe report"));
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let raw = r#"{
            "streams": [{"codec_type": "video", "width": 0, "height": 480,
                         "r_frame_rate": "25/1", "duration": "8.0"}]
        }"#;
        let err = parse_probe_output(raw).unwrap_err();
        assert!(err.to_string().contains("zero dimensions"));
    }

    #[test]
    fn test_rejects_missing_duration() {
        let raw = r#"{
            "streams": [{"codec_type": "video", "width": 640, "height": 480,
                         "r_frame_rate": "25/1"}]
        }"#;
        let err = parse_probe_output(raw).unwrap_err();
        assert!(err.to_string().contains("duration"));
    }

    #[test]
    fn test_rejects_non_positive_duration() {
        let raw = r#"{
            "streams": [{"codec_type": "video", "width": 640, "height": 480,
                         "r_frame_rate": "25/1", "duration": "0.0"}]
        }"#;
        let err = parse_probe_output(raw).unwrap_err();
        assert!(err.to_string().contains("Non-positive duration"));
    }
}
