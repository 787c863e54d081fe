//! Error types shared across Inlay crates.

use std::path::PathBuf;

/// Top-level error type for Inlay operations.
#[derive(Debug, thiserror::Error)]
pub enum InlayError {
    #[error("Input file not found: {}", .path.display())]
    InputNotFound { path: PathBuf },

    #[error("Probe error: {message}")]
    Probe { message: String },

    #[error("Subtitle parse error: {message}")]
    SubtitleParse { message: String },

    #[error("Font file not found: {}", .path.display())]
    FontNotFound { path: PathBuf },

    #[error("Transcode error: {message}")]
    Transcode { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using InlayError.
pub type InlayResult<T> = Result<T, InlayError>;

impl InlayError {
    pub fn probe(msg: impl Into<String>) -> Self {
        Self::Probe {
            message: msg.into(),
        }
    }

    pub fn subtitle_parse(msg: impl Into<String>) -> Self {
        Self::SubtitleParse {
            message: msg.into(),
        }
    }

    pub fn transcode(msg: impl Into<String>) -> Self {
        Self::Transcode {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
