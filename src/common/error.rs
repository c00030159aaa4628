use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("failed to parse response: {0}")]
    InvalidResponse(String),

    #[error("authentication required (HTTP {0})")]
    AuthRequired(u16),

    #[error("unexpected HTTP status {0} for {1}")]
    HttpStatus(u16, String),

    #[error("cookie store error: {0}")]
    CookieStore(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidResponse(e.to_string())
    }
}
