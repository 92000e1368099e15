//! Retrieval of raw feed documents.
//!
//! The feed is a set of static JSON files laid out as `{YYYY-MM-DD}.json` for the
//! daily snapshots and `spots/{code}.json` for per-site histories. A
//! [`DocumentSource`] knows how to fetch those bytes from somewhere: a web
//! server ([`HttpSource`]), a directory on disk ([`LocalDirSource`]) or memory
//! ([`MemorySource`]).

pub mod error;
pub mod http_source;
pub mod local_source;
pub mod memory_source;

use crate::source::error::SourceError;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt;

/// Identifies one document of the feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentKey {
    /// The daily snapshot for a calendar day.
    Daily(NaiveDate),
    /// The history document of one site, keyed by its code.
    Site(String),
}

impl DocumentKey {
    /// Path of the document relative to the feed root.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use shanghai_tourist::DocumentKey;
    ///
    /// let day = NaiveDate::from_ymd_opt(2025, 11, 7).unwrap();
    /// assert_eq!(DocumentKey::Daily(day).relative_path(), "2025-11-07.json");
    /// assert_eq!(DocumentKey::Site("474".into()).relative_path(), "spots/474.json");
    /// ```
    pub fn relative_path(&self) -> String {
        match self {
            DocumentKey::Daily(date) => format!("{}.json", date.format("%Y-%m-%d")),
            DocumentKey::Site(code) => format!("spots/{}.json", code),
        }
    }
}

/// True when `code` can name a document without escaping the `spots/`
/// directory or changing the requested URL.
///
/// ```
/// use shanghai_tourist::is_valid_site_code;
///
/// assert!(is_valid_site_code("474"));
/// assert!(!is_valid_site_code("../../secret"));
/// assert!(!is_valid_site_code("a#frag"));
/// ```
pub fn is_valid_site_code(code: &str) -> bool {
    !code.is_empty()
        && !code.contains("..")
        && !code
            .chars()
            .any(|c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_control())
}

impl DocumentKey {
    /// Rejects site codes that would not map to a single file below `spots/`.
    pub fn validate(&self) -> Result<(), SourceError> {
        match self {
            DocumentKey::Site(code) if !is_valid_site_code(code) => {
                Err(SourceError::InvalidKey(code.clone()))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.relative_path())
    }
}

/// A place the feed documents can be read from.
///
/// Implementations return the raw document bytes; decoding happens in the
/// loaders so every source shares one ingestion path.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Short tag used in log lines.
    fn source_tag(&self) -> &'static str;

    async fn fetch(&self, key: &DocumentKey) -> Result<Vec<u8>, SourceError>;
}

#[async_trait]
impl<S: DocumentSource + ?Sized> DocumentSource for std::sync::Arc<S> {
    fn source_tag(&self) -> &'static str {
        (**self).source_tag()
    }

    async fn fetch(&self, key: &DocumentKey) -> Result<Vec<u8>, SourceError> {
        (**self).fetch(key).await
    }
}
