use std::path::Path;

use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::common::client::EchoClient;

use super::error::DownloadError;

/// Streams single URLs to disk. One transfer at a time; the caller drives
/// iteration over a manifest's streams.
pub struct DownloadEngine {
    client: EchoClient,
}

impl DownloadEngine {
    pub fn new(client: EchoClient) -> Self {
        Self { client }
    }

    /// Download `url` into `dest`, creating parent directories as needed.
    /// Returns the number of bytes written; a known content length that does
    /// not match it is an error.
    pub async fn download_to(&self, url: &str, dest: &Path) -> Result<u64, DownloadError> {
        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let response = self.client.get_raw_response(url).await?;
        check_response_status(&response, url)?;

        let total_size = response
            .headers()
            .get(reqwest::header::CONTENT_LENGTH)
            .and_then(|len| len.to_str().ok())
            .and_then(|len| len.parse().ok())
            .unwrap_or(0u64);

        let pb = if total_size > 0 {
            let pb = ProgressBar::new(total_size);
            pb.set_style(
                ProgressStyle::with_template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})",
                )
                .unwrap()
                .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        debug!("downloading {} -> {}", url, dest.display());

        let mut file = tokio::fs::File::create(dest).await?;
        let mut stream = response.bytes_stream();
        let mut written = 0u64;

        while let Some(chunk_result) = stream.next().await {
            let chunk = match chunk_result {
                Ok(chunk) => chunk,
                Err(error) => {
                    if let Some(pb) = &pb {
                        pb.abandon();
                    }
                    return Err(DownloadError::Stream(error.to_string()));
                }
            };

            file.write_all(&chunk).await?;
            written += chunk.len() as u64;

            if let Some(pb) = &pb {
                pb.set_position(written);
            }
        }

        file.flush().await?;
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        if total_size > 0 && written != total_size {
            return Err(DownloadError::LengthMismatch {
                path: dest.to_path_buf(),
                expected: total_size,
                written,
            });
        }

        Ok(written)
    }
}

fn check_response_status(response: &reqwest::Response, url: &str) -> Result<(), DownloadError> {
    let status = response.status();
    match status.as_u16() {
        401 | 403 => Err(DownloadError::AccessDenied {
            status: status.as_u16(),
            url: url.to_string(),
        }),
        _ if status.is_success() => Ok(()),
        code => Err(DownloadError::BadStatus {
            status: code,
            url: url.to_string(),
        }),
    }
}
