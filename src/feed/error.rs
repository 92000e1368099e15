use crate::source::error::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteHistoryError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Site document for '{code}' is not valid JSON")]
    Decode {
        code: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Site document for '{code}' has neither month buckets nor a data array")]
    UnrecognizedShape { code: String },
}

impl SiteHistoryError {
    /// True when the document was fetched but held nothing usable.
    pub fn is_invalid_document(&self) -> bool {
        matches!(
            self,
            SiteHistoryError::Decode { .. } | SiteHistoryError::UnrecognizedShape { .. }
        )
    }
}
