//! Check engine availability.

use inlay_common::config::AppConfig;
use inlay_render_engine::command_exists;

pub fn run() -> anyhow::Result<()> {
    let config = AppConfig::load();

    println!("Inlay System Check");
    println!("{}", "=".repeat(50));

    let ffmpeg_ok = command_exists(&config.engine.ffmpeg_bin);
    let ffprobe_ok = command_exists(&config.engine.ffprobe_bin);

    if ffmpeg_ok {
        println!("[OK] Transcoder: {}", config.engine.ffmpeg_bin);
    } else {
        println!(
            "[MISSING] Transcoder: {} (install ffmpeg or set engine.ffmpeg_bin)",
            config.engine.ffmpeg_bin
        );
    }

    if ffprobe_ok {
        println!("[OK] Prober: {}", config.engine.ffprobe_bin);
    } else {
        println!(
            "[MISSING] Prober: {} (install ffmpeg or set engine.ffprobe_bin)",
            config.engine.ffprobe_bin
        );
    }

    println!("[OK] Output directory: {}", config.output_dir.display());

    println!();
    if ffmpeg_ok && ffprobe_ok {
        println!("All required tools are available. Inlay is ready.");
    } else {
        println!("Some required tools are missing. See above for fixes.");
    }

    Ok(())
}
