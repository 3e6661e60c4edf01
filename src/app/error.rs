use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum RadiationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("Server unavailable after {attempts} attempts: {source}")]
    RemoteUnavailable {
        attempts: u32,
        #[source]
        source: Box<RadiationError>,
    },

    #[error("Malformed server response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Render failed: {0}")]
    Render(String),

    #[error("No entry at index {index} ({len} entries listed)")]
    OutOfBounds { index: i64, len: usize },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(String),
}

impl RadiationError {
    /// Whether the retrying client may attempt the request again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RadiationError::Http(_) | RadiationError::UnexpectedStatus { .. } | RadiationError::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RadiationError>;
