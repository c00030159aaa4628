use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to spawn webdriver {path}: {source}")]
    DriverSpawn {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("webdriver did not become ready on port {0}")]
    DriverUnresponsive(u16),

    #[error("failed to open browser session: {0}")]
    NewSession(#[from] fantoccini::error::NewSessionError),

    #[error("browser command failed: {0}")]
    Cmd(#[from] fantoccini::error::CmdError),

    #[error("could not parse performance log: {0}")]
    LogParse(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
