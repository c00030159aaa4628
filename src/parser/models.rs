use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;

use super::utils::{extension_from_url, sanitize_title};

#[derive(Debug, Clone, PartialEq)]
pub enum UrlType {
    /// A course section; enumerating its videos requires a logged-in session.
    CourseSection {
        hostname: String,
        section_id: String,
    },

    /// A single video reachable without authentication.
    PublicMedia { hostname: String, media_id: String },
}

impl UrlType {
    pub fn hostname(&self) -> &str {
        match self {
            Self::CourseSection { hostname, .. } => hostname,
            Self::PublicMedia { hostname, .. } => hostname,
        }
    }

    pub fn need_login(&self) -> bool {
        matches!(self, Self::CourseSection { .. })
    }
}

impl fmt::Display for UrlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CourseSection { section_id, .. } => write!(f, "course section {}", section_id),
            Self::PublicMedia { media_id, .. } => write!(f, "public video {}", media_id),
        }
    }
}

// Stream kinds ---------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    /// Camera recording.
    Video,
    /// Screen-share recording.
    Screen,
    /// Audio-only track.
    Audio,
}

impl StreamKind {
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Screen => "screen",
            Self::Audio => "audio",
        }
    }

    pub fn default_extension(&self) -> &'static str {
        match self {
            Self::Video | Self::Screen => "mp4",
            Self::Audio => "m4a",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StreamSource {
    pub kind: StreamKind,
    pub url: String,
}

/// The set of resolvable media stream URLs for one lecture recording.
#[derive(Debug, Clone)]
pub struct LectureManifest {
    pub media_id: String,
    pub title: String,
    pub captured_at: Option<NaiveDate>,
    pub streams: Vec<StreamSource>,
}

impl LectureManifest {
    /// Filename stem shared by every file of this lecture,
    /// e.g. `2024-03-01_Week_1_Lecture`.
    pub fn output_stem(&self) -> String {
        let title = sanitize_title(&self.title);
        match self.captured_at {
            Some(date) => format!("{}_{}", date.format("%Y-%m-%d"), title),
            None => title,
        }
    }

    pub fn stream_file_name(&self, stream: &StreamSource) -> String {
        let extension = extension_from_url(&stream.url)
            .unwrap_or_else(|| stream.kind.default_extension().to_string());
        format!("{}_{}.{}", self.output_stem(), stream.kind.suffix(), extension)
    }

    pub fn stream(&self, kind: StreamKind) -> Option<&StreamSource> {
        self.streams.iter().find(|s| s.kind == kind)
    }
}

// Syllabus API payload -------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SyllabusResponse {
    pub status: String,
    #[serde(default)]
    pub data: Vec<SyllabusEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SyllabusEntry {
    pub lesson: LessonEntry,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonEntry {
    pub lesson: LessonInfo,
    #[serde(default)]
    pub medias: Vec<LessonMedia>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub timing: Option<LessonTiming>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonTiming {
    #[serde(default)]
    pub start: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonMedia {
    pub id: String,
    pub media_type: String,
    #[serde(default)]
    pub current: Option<MediaRevision>,
}

/// The current revision of a media entry: camera, screen-share and audio
/// tracks, each offered in one or more qualities.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRevision {
    #[serde(default)]
    pub primary_files: Vec<MediaFile>,
    #[serde(default)]
    pub secondary_files: Vec<MediaFile>,
    #[serde(default)]
    pub audio_files: Vec<MediaFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFile {
    #[serde(rename = "s3Url")]
    pub s3_url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub size: Option<u64>,
}
