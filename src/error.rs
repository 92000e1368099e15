use crate::feed::error::SiteHistoryError;
use crate::source::error::SourceError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    SiteHistory(#[from] SiteHistoryError),

    #[error("Data directory '{0}' does not exist")]
    DataDirMissing(PathBuf),
}
