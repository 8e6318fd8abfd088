use folio_core::error::FolioError;
use reqwest::{StatusCode, header::InvalidHeaderValue};

/// High-level error type covering every failure mode the client can hit.
#[derive(Debug, thiserror::Error)]
pub enum OpenAiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("couldn’t serialise body: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("invalid header value: {0}")]
    Header(#[from] InvalidHeaderValue),

    #[error("provider returned non-success status {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("provider returned status {status} without a body")]
    MissingBody { status: StatusCode },

    #[error("provider format error: {0}")]
    Format(String),
}

impl From<OpenAiError> for FolioError {
    fn from(value: OpenAiError) -> Self {
        match value {
            OpenAiError::MissingBody { .. } => FolioError::MissingBody,
            other => FolioError::Backend(Box::new(other)),
        }
    }
}
