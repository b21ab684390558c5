//! Error returned by a single API call, kept typed so retry can classify it.

use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    /// Curl reported an error (timeout, connection, etc.).
    Transport(curl::Error),
    /// HTTP response had a non-2xx status.
    Status(u32),
    /// Body could not be decoded (bad JSON, not UTF-8, missing fields).
    Decode(String),
    /// The API answered 2xx but reported an error in the payload.
    Rejected(String),
}

impl ApiError {
    /// Upstream HTTP status, if this error came from one.
    pub fn status(&self) -> Option<u32> {
        match self {
            ApiError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "{}", e),
            ApiError::Status(code) => write!(f, "HTTP {}", code),
            ApiError::Decode(msg) => write!(f, "decode: {}", msg),
            ApiError::Rejected(msg) => write!(f, "rejected: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(e) => Some(e),
            ApiError::Status(_) | ApiError::Decode(_) | ApiError::Rejected(_) => None,
        }
    }
}

impl From<curl::Error> for ApiError {
    fn from(e: curl::Error) -> Self {
        ApiError::Transport(e)
    }
}
