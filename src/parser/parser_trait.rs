use async_trait::async_trait;

use super::errors::ParseError;
use super::models::LectureManifest;

/// Resolves a target into the manifests of everything downloadable under it.
#[async_trait]
pub trait Parser {
    async fn parse(&mut self) -> Result<Vec<LectureManifest>, ParseError>;
}
