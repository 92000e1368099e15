use crate::source::error::SourceError;
use crate::source::{DocumentKey, DocumentSource};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

enum Stored {
    Document(Vec<u8>),
    Failure,
}

/// Serves documents from memory.
///
/// Useful for rendering pre-fetched feeds and for exercising the loaders
/// without a network. Keys can be made to fail or to answer after a delay.
#[derive(Default)]
pub struct MemorySource {
    documents: HashMap<DocumentKey, Stored>,
    delays: HashMap<DocumentKey, Duration>,
    fetch_calls: AtomicU64,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, key: DocumentKey, body: impl Into<Vec<u8>>) -> Self {
        self.documents.insert(key, Stored::Document(body.into()));
        self
    }

    pub fn with_json(self, key: DocumentKey, value: &serde_json::Value) -> Self {
        self.with_document(key, value.to_string())
    }

    /// Makes every fetch of `key` fail.
    pub fn with_failure(mut self, key: DocumentKey) -> Self {
        self.documents.insert(key, Stored::Failure);
        self
    }

    /// Delays the answer for `key`, successful or not.
    pub fn with_delay(mut self, key: DocumentKey, delay: Duration) -> Self {
        self.delays.insert(key, delay);
        self
    }

    /// Number of fetches served so far, including failed ones.
    pub fn fetch_calls(&self) -> u64 {
        self.fetch_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DocumentSource for MemorySource {
    fn source_tag(&self) -> &'static str {
        "memory"
    }

    async fn fetch(&self, key: &DocumentKey) -> Result<Vec<u8>, SourceError> {
        self.fetch_calls.fetch_add(1, Ordering::Relaxed);
        key.validate()?;
        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }
        match self.documents.get(key) {
            Some(Stored::Document(bytes)) => Ok(bytes.clone()),
            Some(Stored::Failure) => Err(SourceError::Injected(key.to_string())),
            None => Err(SourceError::NotFound(key.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_failures_and_counts_calls() {
        let ok = DocumentKey::Site("1".to_string());
        let broken = DocumentKey::Site("2".to_string());
        let source = MemorySource::new()
            .with_document(ok.clone(), "{}")
            .with_failure(broken.clone());

        assert_eq!(source.fetch(&ok).await.unwrap(), b"{}".to_vec());
        assert!(matches!(
            source.fetch(&broken).await,
            Err(SourceError::Injected(_))
        ));
        assert!(source
            .fetch(&DocumentKey::Site("3".to_string()))
            .await
            .unwrap_err()
            .is_not_found());
        assert_eq!(source.fetch_calls(), 3);
    }
}
