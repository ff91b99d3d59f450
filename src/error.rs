use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("unsupported media type: {mime}")]
    UnsupportedMediaType { mime: String },

    #[error("media file not found: {}", .0.display())]
    MediaNotFound(PathBuf),

    #[error("fullscreen request failed: {0}")]
    FullscreenRequestFailed(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("decoder error: {0}")]
    Decoder(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type OverlayResult<T> = Result<T, OverlayError>;
