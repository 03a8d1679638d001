use reqwest::StatusCode;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

/// Message surfaced when an error body cannot be decoded as the API error
/// envelope. Usually the host points at something that is not the catalog API.
pub const MALFORMED_ERROR_MESSAGE: &str =
    "content type mismatch or invalid provider api host or path";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Login(String),

    /// Non-2xx business response. Displays the translated message verbatim.
    #[error("{message}")]
    RemoteApi { status: u16, message: String },

    #[error("{}", MALFORMED_ERROR_MESSAGE)]
    Malformed,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue)
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteApi { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED.as_u16())
    }
}
