use thiserror::Error;

/// Application-level failures: setup, configuration, terminal I/O. The
/// recoverable feed-level failures never reach this type; they become
/// symbolic message codes at the adapter boundary and live in state.
#[derive(Error, Debug)]
pub enum FreshetError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T, E = FreshetError> = std::result::Result<T, E>;
