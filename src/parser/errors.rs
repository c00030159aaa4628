use thiserror::Error;

use crate::common::error::ApiError;
use crate::session::SessionError;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("could not extract a media UUID from the URL")]
    MissingMediaId,

    #[error("could not extract a section UUID from the URL")]
    MissingSectionId,

    #[error("URL has no scheme and hostname")]
    MissingHostname,

    #[error("syllabus API rejected the request (status: {0})")]
    SyllabusRejected(String),

    #[error("course contains no downloadable videos")]
    EmptyCourse,

    #[error("no media streams observed while loading the player page")]
    NoStreamsFound,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),
}
