use crate::source::error::SourceError;
use crate::source::{DocumentKey, DocumentSource};
use async_trait::async_trait;
use log::debug;
use std::io;
use std::path::{Path, PathBuf};

/// Reads feed documents from a directory laid out like the published feed.
#[derive(Debug, Clone)]
pub struct LocalDirSource {
    root: PathBuf,
}

impl LocalDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, key: &DocumentKey) -> PathBuf {
        self.root.join(key.relative_path())
    }
}

#[async_trait]
impl DocumentSource for LocalDirSource {
    fn source_tag(&self) -> &'static str {
        "local"
    }

    async fn fetch(&self, key: &DocumentKey) -> Result<Vec<u8>, SourceError> {
        key.validate()?;
        let path = self.document_path(key);
        debug!("Reading {}", path.display());
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(SourceError::NotFound(path.display().to_string()))
            }
            Err(e) => Err(SourceError::Io(path, e)),
        }
    }
}
