use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::downloader::error::DownloadError;

pub struct MediaMerger;

impl MediaMerger {
    /// Remux a video track and an audio track into one container with ffmpeg.
    /// The video stream is copied; audio is re-encoded to AAC so fragmented
    /// `.m4s` inputs come out as a plain MP4.
    pub async fn merge_av(
        video_path: &Path,
        audio_path: &Path,
        output_path: &Path,
    ) -> Result<(), DownloadError> {
        if !video_path.exists() {
            return Err(DownloadError::FileNotFound(video_path.to_path_buf()));
        }
        if !audio_path.exists() {
            return Err(DownloadError::FileNotFound(audio_path.to_path_buf()));
        }

        let ffmpeg_cmd = std::env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string());

        debug!("checking for ffmpeg ({})", ffmpeg_cmd);
        let ffmpeg_check = Command::new(&ffmpeg_cmd)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        if !ffmpeg_check.map(|status| status.success()).unwrap_or(false) {
            return Err(DownloadError::FfmpegNotFound);
        }

        let output = Command::new(&ffmpeg_cmd)
            .arg("-i")
            .arg(video_path)
            .arg("-i")
            .arg(audio_path)
            .arg("-c:v")
            .arg("copy")
            .arg("-c:a")
            .arg("aac")
            .arg("-y")
            .arg(output_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let err_msg = String::from_utf8_lossy(&output.stderr);
            error!("ffmpeg merge failed:\n{}", err_msg);
            return Err(DownloadError::Ffmpeg(err_msg.to_string()));
        }

        info!("merged tracks into {}", output_path.display());
        Ok(())
    }
}
