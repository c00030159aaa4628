use std::path::PathBuf;

use colored::Colorize;
use tracing::{error, info, warn};

use crate::common::client::EchoClient;
use crate::parser::models::{LectureManifest, StreamKind};
use crate::post_process::MediaMerger;

use engine::DownloadEngine;

pub mod engine;
pub mod error;

pub use error::DownloadError;

/// Downloads every stream of every manifest, strictly one file at a time,
/// then hands video+audio pairs to the merge step.
pub struct LectureDownloader {
    engine: DownloadEngine,
    output_dir: PathBuf,
    merge: bool,
}

impl LectureDownloader {
    pub fn new(client: EchoClient, output_dir: impl Into<PathBuf>, merge: bool) -> Self {
        Self {
            engine: DownloadEngine::new(client),
            output_dir: output_dir.into(),
            merge,
        }
    }

    pub async fn download_all(&self, manifests: &[LectureManifest]) -> Result<(), DownloadError> {
        for (index, manifest) in manifests.iter().enumerate() {
            println!("{}", "-".repeat(80));
            println!(
                "> [{}/{}] {}",
                index + 1,
                manifests.len(),
                manifest.title.bold()
            );
            self.download_one(manifest).await?;
        }
        Ok(())
    }

    pub async fn download_one(&self, manifest: &LectureManifest) -> Result<(), DownloadError> {
        tokio::fs::create_dir_all(&self.output_dir).await?;

        let mut video_path = None;
        let mut audio_path = None;

        for stream in &manifest.streams {
            let path = self.output_dir.join(manifest.stream_file_name(stream));
            println!("> downloading {} track", stream.kind.suffix());

            let written = self.engine.download_to(&stream.url, &path).await?;
            info!("wrote {} ({} bytes)", path.display(), written);

            match stream.kind {
                StreamKind::Video => video_path = Some(path),
                StreamKind::Audio => audio_path = Some(path),
                StreamKind::Screen => {}
            }
        }

        if self.merge {
            if let (Some(video), Some(audio)) = (&video_path, &audio_path) {
                let merged = self.output_dir.join(format!("{}.mp4", manifest.output_stem()));
                println!("> merging video and audio tracks");
                match MediaMerger::merge_av(video, audio, &merged).await {
                    Ok(()) => println!("{} {}", "✓".green(), merged.display()),
                    Err(DownloadError::FfmpegNotFound) => {
                        warn!("ffmpeg unavailable, leaving tracks unmerged");
                    }
                    Err(e) => {
                        // The downloaded tracks are intact; merging is best-effort.
                        error!("merge failed: {}", e);
                    }
                }
            }
        }

        Ok(())
    }
}
