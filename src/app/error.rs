use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubtitleError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SubtitleError>;
