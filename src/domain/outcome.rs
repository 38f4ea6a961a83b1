use std::fmt;

use thiserror::Error;

/// How a single logical fetch concluded. Delivered to the sink exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Title(String),
    NoTitle,
    Error(FetchError),
}

impl Outcome {
    pub fn title(&self) -> Option<&str> {
        match self {
            Outcome::Title(title) => Some(title),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }
}

impl From<FetchError> for Outcome {
    fn from(error: FetchError) -> Self {
        Outcome::Error(error)
    }
}

/// Terminal failure of a fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Retries exhausted after {attempts} attempts (last failure: {last})")]
    RetriesExhausted { attempts: u32, last: String },

    #[error("Too many redirects ({0})")]
    TooManyRedirects(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidUrl,
    Transport,
    UnexpectedResponse,
    RetriesExhausted,
    TooManyRedirects,
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::InvalidUrl(_) => ErrorKind::InvalidUrl,
            FetchError::Transport(_) => ErrorKind::Transport,
            FetchError::UnexpectedResponse(_) => ErrorKind::UnexpectedResponse,
            FetchError::RetriesExhausted { .. } => ErrorKind::RetriesExhausted,
            FetchError::TooManyRedirects(_) => ErrorKind::TooManyRedirects,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidUrl => "invalid-url",
            ErrorKind::Transport => "transport",
            ErrorKind::UnexpectedResponse => "unexpected-response",
            ErrorKind::RetriesExhausted => "retries-exhausted",
            ErrorKind::TooManyRedirects => "too-many-redirects",
        };
        f.write_str(name)
    }
}
