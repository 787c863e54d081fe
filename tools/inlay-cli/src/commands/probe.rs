//! Probe a media file and print its stream facts.

use std::path::PathBuf;

use inlay_common::config::AppConfig;
use inlay_render_engine::probe_stream;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let config = AppConfig::load();
    let info = probe_stream(&config.engine.ffprobe_bin, &path)?;
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}
