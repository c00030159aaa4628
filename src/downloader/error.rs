use std::path::PathBuf;
use thiserror::Error;

use crate::common::error::ApiError;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("access denied (HTTP {status}) for {url}; the session may have expired")]
    AccessDenied { status: u16, url: String },

    #[error("request for {url} failed with HTTP {status}")]
    BadStatus { status: u16, url: String },

    #[error("stream interrupted: {0}")]
    Stream(String),

    #[error("{}: wrote {written} bytes but the server announced {expected}", .path.display())]
    LengthMismatch {
        path: PathBuf,
        expected: u64,
        written: u64,
    },

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("ffmpeg not found; install it or point FFMPEG_PATH at the binary")]
    FfmpegNotFound,

    #[error("ffmpeg failed: {0}")]
    Ffmpeg(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}
