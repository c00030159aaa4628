use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::common::client::EchoClient;

use super::errors::ParseError;
use super::models::{
    LectureManifest, MediaFile, StreamKind, StreamSource, SyllabusResponse,
};
use super::parser_trait::Parser;

/// Enumerates the videos of a course section through the syllabus API.
/// Requires the session cookies of a logged-in browser session to be present
/// on the client.
pub struct SectionParser<'a> {
    client: &'a EchoClient,
    hostname: String,
    section_id: String,
}

impl<'a> SectionParser<'a> {
    pub fn new(client: &'a EchoClient, hostname: &str, section_id: &str) -> Self {
        Self {
            client,
            hostname: hostname.to_string(),
            section_id: section_id.to_string(),
        }
    }

    fn syllabus_url(&self) -> String {
        format!("{}/section/{}/syllabus", self.hostname, self.section_id)
    }

    /// Map the syllabus payload to one manifest per video lesson.
    pub fn build_manifests(response: &SyllabusResponse) -> Vec<LectureManifest> {
        let mut manifests = Vec::new();

        for entry in &response.data {
            let lesson = &entry.lesson;

            for media in &lesson.medias {
                if !media.media_type.eq_ignore_ascii_case("video") {
                    debug!("skipping non-video media {} ({})", media.id, media.media_type);
                    continue;
                }
                let Some(revision) = &media.current else {
                    warn!("media {} has no current revision, skipping", media.id);
                    continue;
                };

                let mut streams = Vec::new();
                if let Some(file) = best_file(&revision.primary_files) {
                    streams.push(StreamSource {
                        kind: StreamKind::Video,
                        url: file.s3_url.clone(),
                    });
                }
                if let Some(file) = best_file(&revision.secondary_files) {
                    streams.push(StreamSource {
                        kind: StreamKind::Screen,
                        url: file.s3_url.clone(),
                    });
                }
                if let Some(file) = revision.audio_files.first() {
                    streams.push(StreamSource {
                        kind: StreamKind::Audio,
                        url: file.s3_url.clone(),
                    });
                }

                if streams.is_empty() {
                    warn!("media {} has no resolvable files, skipping", media.id);
                    continue;
                }

                manifests.push(LectureManifest {
                    media_id: media.id.clone(),
                    title: lesson.lesson.name.clone(),
                    captured_at: capture_date(lesson.lesson.timing.as_ref().and_then(|t| t.start.as_deref())),
                    streams,
                });
            }
        }

        manifests
    }
}

#[async_trait]
impl Parser for SectionParser<'_> {
    async fn parse(&mut self) -> Result<Vec<LectureManifest>, ParseError> {
        let url = self.syllabus_url();
        debug!("fetching syllabus: {}", url);

        let response: SyllabusResponse = self.client.get_json(&url).await?;
        if !response.status.eq_ignore_ascii_case("ok") {
            return Err(ParseError::SyllabusRejected(response.status.clone()));
        }

        let manifests = Self::build_manifests(&response);
        if manifests.is_empty() {
            return Err(ParseError::EmptyCourse);
        }
        Ok(manifests)
    }
}

/// Highest-quality variant of a track: widest first, then largest, then the
/// later entry.
fn best_file(files: &[MediaFile]) -> Option<&MediaFile> {
    files
        .iter()
        .enumerate()
        .max_by_key(|(index, file)| (file.width.unwrap_or(0), file.size.unwrap_or(0), *index))
        .map(|(_, file)| file)
}

/// Lesson start timestamps come as ISO datetimes; only the date part is used.
fn capture_date(start: Option<&str>) -> Option<NaiveDate> {
    let start = start?;
    NaiveDate::parse_from_str(start.get(..10)?, "%Y-%m-%d").ok()
}
