//! Entry point tying a document source to the loaders and view models.

use crate::error::DashboardError;
use crate::feed::daily_loader::load_daily_window;
use crate::feed::history_loader::load_site_history;
use crate::settings::FeedSettings;
use crate::source::error::SourceError;
use crate::source::http_source::HttpSource;
use crate::source::local_source::LocalDirSource;
use crate::source::DocumentSource;
use crate::types::daily_snapshot::DailySnapshot;
use crate::types::site_history::SiteHistory;
use crate::view::home_view::HomeView;
use crate::view::site_detail_view::SiteDetailView;
use bon::bon;
use chrono::{NaiveDate, Utc};
use std::io;
use std::path::PathBuf;

/// Reads the occupancy feed and turns it into page data.
///
/// Pick where the feed lives with [`Dashboard::with_base_url`],
/// [`Dashboard::with_data_dir`] or [`Dashboard::with_source`].
///
/// # Examples
///
/// ```no_run
/// # use shanghai_tourist::{Dashboard, DashboardError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), DashboardError> {
/// let dashboard = Dashboard::with_base_url("https://example.org/data/")?;
///
/// let home = dashboard.home_view().call().await;
/// for district in &home.district_stats {
///     println!("{}: {} visitors", district.name, district.total_visitors);
/// }
///
/// let detail = dashboard.site_view("474").await?;
/// println!("{} has {} records", detail.name, detail.total_records);
/// # Ok(())
/// # }
/// ```
pub struct Dashboard<S> {
    source: S,
    settings: FeedSettings,
}

impl Dashboard<HttpSource> {
    /// Reads the feed from a web server, e.g. `https://example.org/data/`.
    pub fn with_base_url(base_url: &str) -> Result<Self, DashboardError> {
        Ok(Self::with_source(HttpSource::new(base_url)?))
    }
}

impl Dashboard<LocalDirSource> {
    /// Reads the feed from a directory laid out like the published one.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::DataDirMissing`] if `data_dir` does not exist or
    /// is not a directory, and [`SourceError::Io`] if it cannot be inspected.
    pub async fn with_data_dir(data_dir: PathBuf) -> Result<Self, DashboardError> {
        match tokio::fs::metadata(&data_dir).await {
            Ok(meta) if meta.is_dir() => Ok(Self::with_source(LocalDirSource::new(data_dir))),
            Ok(_) => Err(DashboardError::DataDirMissing(data_dir)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(DashboardError::DataDirMissing(data_dir))
            }
            Err(e) => Err(SourceError::Io(data_dir, e).into()),
        }
    }
}

#[bon]
impl<S: DocumentSource> Dashboard<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            settings: FeedSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: FeedSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &FeedSettings {
        &self.settings
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Loads the trailing window of daily snapshots, oldest first.
    ///
    /// * `.today(NaiveDate)`: last day of the window (default: the current UTC date).
    /// * `.window_days(u32)`: days to request (default: [`FeedSettings::window_days`]).
    ///
    /// Days that fail to load are left out, so the result may be short or empty.
    #[builder]
    pub async fn daily_feed(
        &self,
        today: Option<NaiveDate>,
        window_days: Option<u32>,
    ) -> Vec<DailySnapshot> {
        let today = today.unwrap_or_else(|| Utc::now().date_naive());
        let window_days = window_days.unwrap_or(self.settings.window_days);
        load_daily_window(&self.source, today, window_days).await
    }

    /// Loads and normalizes the history of one site.
    pub async fn site_history(&self, code: &str) -> Result<SiteHistory, DashboardError> {
        Ok(load_site_history(&self.source, code).await?)
    }

    /// Loads the daily window and builds the home page for its oldest day.
    #[builder]
    pub async fn home_view(&self, today: Option<NaiveDate>) -> HomeView {
        let snapshots = self.daily_feed().maybe_today(today).call().await;
        HomeView::new(snapshots, self.settings.top_sites)
    }

    /// Loads one site and builds its detail page.
    pub async fn site_view(&self, code: &str) -> Result<SiteDetailView, DashboardError> {
        let history = self.site_history(code).await?;
        Ok(SiteDetailView::new(&history, &self.settings))
    }
}
