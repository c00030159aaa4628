use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

use super::errors::ParseError;
use super::models::UrlType;

lazy_static! {
    static ref HOSTNAME_PATTERN: Regex = Regex::new(r"^https?://[^/\s]+").unwrap();

    // The two public URL shapes the platform serves:
    //   https://echo360.net.au/media/{uuid}/public
    //   https://echo360.net.au/public/media/{uuid}
    static ref MEDIA_PATTERNS: [Regex; 2] = [
        Regex::new(r"/media/([0-9a-fA-F-]+)(?:/public)?").unwrap(),
        Regex::new(r"/public/media/([0-9a-fA-F-]+)").unwrap(),
    ];

    static ref SECTION_PATTERN: Regex = Regex::new(r"/section/([0-9a-fA-F-]+)").unwrap();

    static ref GENERIC_UUID_PATTERN: Regex = Regex::new(
        r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}"
    )
    .unwrap();
}

pub struct UrlParser;

impl UrlParser {
    pub fn new() -> Self {
        Self
    }

    /// Classify a free-form input URL as a public video or a course section.
    pub fn parse(&self, input: &str) -> Result<UrlType, ParseError> {
        let input = input.trim();
        let hostname = Self::extract_hostname(input)?;

        if Self::is_public_url(input) {
            Ok(UrlType::PublicMedia {
                hostname,
                media_id: Self::extract_media_id(input)?,
            })
        } else {
            Ok(UrlType::CourseSection {
                hostname,
                section_id: Self::extract_section_id(input)?,
            })
        }
    }

    pub fn extract_hostname(url: &str) -> Result<String, ParseError> {
        HOSTNAME_PATTERN
            .find(url)
            .map(|m| m.as_str().to_string())
            .ok_or(ParseError::MissingHostname)
    }

    pub fn is_public_url(url: &str) -> bool {
        url.contains("/public/media/") || (url.contains("/media/") && url.contains("/public"))
    }

    /// Extract the media UUID out of a public video URL. The captured
    /// substring is returned verbatim; hex-ish matches that are not actually
    /// UUIDs are rejected.
    pub fn extract_media_id(url: &str) -> Result<String, ParseError> {
        for pattern in MEDIA_PATTERNS.iter() {
            if let Some(caps) = pattern.captures(url) {
                let candidate = &caps[1];
                if Uuid::parse_str(candidate).is_ok() {
                    return Ok(candidate.to_string());
                }
            }
        }
        Err(ParseError::MissingMediaId)
    }

    pub fn extract_section_id(url: &str) -> Result<String, ParseError> {
        if let Some(caps) = SECTION_PATTERN.captures(url) {
            let candidate = &caps[1];
            if Uuid::parse_str(candidate).is_ok() {
                return Ok(candidate.to_string());
            }
        }

        // Some deployments link courses without the /section/ segment; accept
        // any well-formed UUID in the URL in that case.
        GENERIC_UUID_PATTERN
            .find(url)
            .map(|m| m.as_str().to_string())
            .ok_or(ParseError::MissingSectionId)
    }
}

impl Default for UrlParser {
    fn default() -> Self {
        Self::new()
    }
}
