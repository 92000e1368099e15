use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Failed to read document '{0}'")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Invalid site code '{0}'")]
    InvalidKey(String),

    #[error("Injected failure for {0}")]
    Injected(String),
}

impl SourceError {
    /// True when the document simply does not exist at its location.
    pub fn is_not_found(&self) -> bool {
        match self {
            SourceError::NotFound(_) => true,
            SourceError::HttpStatus { status, .. } => *status == reqwest::StatusCode::NOT_FOUND,
            _ => false,
        }
    }
}
