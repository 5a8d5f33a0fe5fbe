use std::path::PathBuf;

use crate::types::Frame;

/// Errors at the edges of the engine: config, props and composition lookup.
///
/// Frame evaluation itself never fails; authoring mistakes are clamped.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown composition: {0}")]
    UnknownComposition(String),

    #[error("Invalid props for {id}: {source}")]
    InvalidProps {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Frame {frame} is outside {id} (0..{duration})")]
    FrameOutOfRange {
        id: String,
        frame: Frame,
        duration: Frame,
    },

    #[error("Invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
