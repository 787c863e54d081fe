//! Composite an overlay clip onto a base video.

use std::path::PathBuf;

use inlay_common::config::AppConfig;
use inlay_job_model::{
    CompositionConfig, OverlayPosition, SubtitlePosition, SubtitleSource, SubtitleStyle,
};
use inlay_render_engine::{render_overlay, OverlayJob};

use crate::RenderArgs;

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let app_config = AppConfig::load();

    let output_path = args
        .output
        .unwrap_or_else(|| generated_output_path(&app_config));

    let config = CompositionConfig {
        opacity: args.opacity,
        position: OverlayPosition::from_name(&args.position),
        margin_x: args.margin_x,
        margin_y: args.margin_y,
        size_ratio: args.size_ratio,
        base_volume: args.base_volume,
        overlay_volume: args.overlay_volume,
    };

    let subtitles = match (&args.subtitles, args.subtitle_json) {
        (Some(path), _) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
            SubtitleSource::Text(raw)
        }
        (None, Some(raw)) => SubtitleSource::Text(raw),
        (None, None) => SubtitleSource::Segments(Vec::new()),
    };

    let subtitle_style = SubtitleStyle {
        font_path: args.font.unwrap_or_default(),
        font_size: args.font_size,
        font_color: args.font_color,
        box_color: args.box_color,
        box_opacity: args.box_opacity,
        max_text_width_px: args.max_text_width,
        position: SubtitlePosition::from_name(&args.subtitle_position),
        custom_x: args.subtitle_x,
        custom_y: args.subtitle_y,
    };

    println!("Compositing onto: {}", args.base.display());
    println!("  Overlay: {}", args.overlay.display());
    println!("  Mask: {}", args.mask.display());
    println!("  Output: {}", output_path.display());

    let job = OverlayJob {
        base_path: args.base,
        overlay_path: args.overlay,
        mask_path: args.mask,
        output_path,
        config,
        subtitles,
        subtitle_style,
    };

    let rendered = render_overlay(&job, &app_config.engine)
        .map_err(|e| anyhow::anyhow!("Render failed: {e}"))?;

    println!(
        "\nRender complete: {} ({:.1}s)",
        rendered.path.display(),
        rendered.duration_secs
    );
    println!("  File name: {}", rendered.file_name);

    Ok(())
}

/// Fresh output path in the configured render directory.
fn generated_output_path(config: &AppConfig) -> PathBuf {
    let id = uuid::Uuid::new_v4().simple().to_string();
    config.output_dir.join(format!("overlay_{}.mp4", &id[..8]))
}
