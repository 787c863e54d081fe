//! Inlay CLI: command-line interface for overlay composition.
//!
//! Usage:
//!   inlay render [OPTIONS]    Composite an overlay onto a base video
//!   inlay probe <PATH>        Probe a media file and print stream facts
//!   inlay check               Check engine availability

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "inlay",
    about = "Masked video overlays with burned-in subtitles",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Composite an overlay clip onto a base video
    Render(RenderArgs),

    /// Probe a media file and print its stream facts as JSON
    Probe {
        /// Media file to probe
        path: PathBuf,
    },

    /// Check that the transcoding engine is available
    Check,
}

#[derive(Args)]
struct RenderArgs {
    /// Full-frame background video
    #[arg(long)]
    base: PathBuf,

    /// Foreground clip to inlay onto the base
    #[arg(long)]
    overlay: PathBuf,

    /// Grayscale alpha mask for the overlay
    #[arg(long)]
    mask: PathBuf,

    /// Output file path (default: a generated name in the configured output directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overlay opacity [0.0, 1.0]
    #[arg(long, default_value = "1.0")]
    opacity: f64,

    /// Overlay placement: right_bottom, right_top, left_bottom, left_top, center
    #[arg(long, default_value = "right_bottom")]
    position: String,

    /// Horizontal margin from the placed edge, in pixels
    #[arg(long, default_value = "0")]
    margin_x: u32,

    /// Vertical margin from the placed edge, in pixels
    #[arg(long, default_value = "0")]
    margin_y: u32,

    /// Overlay height as a fraction of the base height, in (0.0, 1.0]
    #[arg(long, default_value = "0.25")]
    size_ratio: f64,

    /// Base audio gain; 0 mutes the track
    #[arg(long, default_value = "1.0")]
    base_volume: f64,

    /// Overlay audio gain; 0 mutes the track
    #[arg(long, default_value = "1.0")]
    overlay_volume: f64,

    /// File containing subtitle segments as a JSON list
    #[arg(long, conflicts_with = "subtitle_json")]
    subtitles: Option<PathBuf>,

    /// Subtitle segments as an inline JSON list
    #[arg(long)]
    subtitle_json: Option<String>,

    /// Font file for burned-in subtitles
    #[arg(long)]
    font: Option<PathBuf>,

    /// Subtitle font size in pixels
    #[arg(long, default_value = "32")]
    font_size: u32,

    /// Subtitle text color
    #[arg(long, default_value = "white")]
    font_color: String,

    /// Subtitle background box color
    #[arg(long, default_value = "black")]
    box_color: String,

    /// Subtitle background box opacity [0.0, 1.0]; 0 disables the box
    #[arg(long, default_value = "0.5")]
    box_opacity: f64,

    /// Maximum subtitle width in pixels before wrapping; 0 means 80% of the base width
    #[arg(long, default_value = "0")]
    max_text_width: u32,

    /// Subtitle placement: bottom_center, top_center, bottom_left, bottom_right, center, custom
    #[arg(long, default_value = "bottom_center")]
    subtitle_position: String,

    /// Literal X coordinate when the subtitle placement is custom
    #[arg(long, default_value = "0")]
    subtitle_x: i32,

    /// Literal Y coordinate when the subtitle placement is custom
    #[arg(long, default_value = "0")]
    subtitle_y: i32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    inlay_common::logging::init_logging(&inlay_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Probe { path } => commands::probe::run(path),
        Commands::Check => commands::check::run(),
    }
}
