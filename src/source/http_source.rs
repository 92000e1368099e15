use crate::source::error::SourceError;
use crate::source::{DocumentKey, DocumentSource};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Url};

/// Reads feed documents over HTTP, relative to a base url such as
/// `https://example.org/data/`.
pub struct HttpSource {
    base_url: Url,
    download_client: Client,
}

impl HttpSource {
    /// Creates a source rooted at `base_url`.
    ///
    /// A trailing slash is added when missing so relative document paths are
    /// appended to the base instead of replacing its last segment.
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized).map_err(|e| SourceError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            base_url,
            download_client: Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn document_url(&self, key: &DocumentKey) -> Result<Url, SourceError> {
        key.validate()?;
        self.base_url
            .join(&key.relative_path())
            .map_err(|e| SourceError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    fn source_tag(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, key: &DocumentKey) -> Result<Vec<u8>, SourceError> {
        let url = self.document_url(key)?;
        debug!("Requesting {}", url);

        let response = self
            .download_client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| SourceError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    SourceError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    SourceError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SourceError::NetworkRequest(url.to_string(), e))?;
        Ok(bytes.to_vec())
    }
}
