use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::session::BrowserSession;

use super::errors::ParseError;
use super::models::{LectureManifest, StreamKind, StreamSource};
use super::parser_trait::Parser;

lazy_static! {
    /// Stream payloads the player is known to fetch; anything else in the
    /// network trace (page assets, analytics, thumbnails) is noise.
    static ref MEDIA_STREAM_PATTERN: Regex =
        Regex::new(r"(?i)^https?://[^?\s]+\.(m4s|mp4|m3u8|m4a|aac)(\?\S*)?$").unwrap();

    /// The platform names HLS tracks `s{source}q{quality}`, e.g. `s1q1.m4s`.
    static ref TRACK_VARIANT_PATTERN: Regex = Regex::new(r"s(\d+)q(\d+)").unwrap();
}

const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Resolves a public video without authentication. The platform exposes no
/// enumeration API for these, so the player page is loaded in the browser and
/// the captured network trace is filtered for stream URLs.
pub struct PublicMediaParser<'a> {
    session: &'a BrowserSession,
    hostname: String,
    media_id: String,
    timeout: Duration,
}

impl<'a> PublicMediaParser<'a> {
    pub fn new(
        session: &'a BrowserSession,
        hostname: &str,
        media_id: &str,
        timeout: Duration,
    ) -> Self {
        Self {
            session,
            hostname: hostname.to_string(),
            media_id: media_id.to_string(),
            timeout,
        }
    }

    fn player_url(&self) -> String {
        format!("{}/media/{}/public", self.hostname, self.media_id)
    }

    /// Poll the performance log until stream URLs stop appearing or the
    /// deadline passes. Order of first appearance is preserved.
    async fn collect_stream_urls(&self) -> Result<Vec<String>, ParseError> {
        let deadline = Instant::now() + self.timeout;
        let mut seen: Vec<String> = Vec::new();

        while Instant::now() < deadline {
            tokio::time::sleep(POLL_INTERVAL).await;

            let mut fresh = 0;
            for url in self.session.drain_resource_urls().await? {
                if is_media_stream_url(&url) && !seen.contains(&url) {
                    debug!("observed stream URL: {}", url);
                    seen.push(url);
                    fresh += 1;
                }
            }

            // One quiet tick after the first hit means the player has settled.
            if !seen.is_empty() && fresh == 0 {
                break;
            }
        }

        Ok(seen)
    }
}

#[async_trait]
impl Parser for PublicMediaParser<'_> {
    async fn parse(&mut self) -> Result<Vec<LectureManifest>, ParseError> {
        let player_url = self.player_url();
        info!("loading player page: {}", player_url);
        self.session.goto(&player_url).await?;

        let observed = self.collect_stream_urls().await?;
        let selected = select_best_variants(&observed);
        if selected.is_empty() {
            return Err(ParseError::NoStreamsFound);
        }

        let streams = selected
            .into_iter()
            .map(|url| StreamSource {
                kind: classify_stream(&url),
                url,
            })
            .collect();

        Ok(vec![LectureManifest {
            media_id: self.media_id.clone(),
            title: self.media_id.clone(),
            captured_at: None,
            streams,
        }])
    }
}

pub fn is_media_stream_url(url: &str) -> bool {
    MEDIA_STREAM_PATTERN.is_match(url)
}

/// Keep the highest quality variant per source track; URLs outside the
/// `s{N}q{M}` scheme pass through deduplicated.
pub fn select_best_variants(urls: &[String]) -> Vec<String> {
    let mut tracks: BTreeMap<u32, (u32, String)> = BTreeMap::new();
    let mut plain: Vec<String> = Vec::new();

    for url in urls {
        match TRACK_VARIANT_PATTERN.captures(url) {
            Some(caps) => {
                let source: u32 = caps[1].parse().unwrap_or(0);
                let quality: u32 = caps[2].parse().unwrap_or(0);
                let entry = tracks.entry(source).or_insert((quality, url.clone()));
                if quality > entry.0 {
                    *entry = (quality, url.clone());
                }
            }
            None => {
                if !plain.contains(url) {
                    plain.push(url.clone());
                }
            }
        }
    }

    tracks
        .into_values()
        .map(|(_, url)| url)
        .chain(plain)
        .collect()
}

/// Track `s0` is the audio-only rendition and `s2` the screen-share source;
/// anything else is camera video. Extension is the fallback signal.
pub fn classify_stream(url: &str) -> StreamKind {
    if let Some(caps) = TRACK_VARIANT_PATTERN.captures(url) {
        return match &caps[1] {
            "0" => StreamKind::Audio,
            "2" => StreamKind::Screen,
            _ => StreamKind::Video,
        };
    }

    let lower = url.to_ascii_lowercase();
    if lower.contains(".m4a") || lower.contains(".aac") {
        StreamKind::Audio
    } else {
        StreamKind::Video
    }
}
