mod aggregate;
mod dashboard;
mod error;
mod feed;
mod settings;
mod source;
mod types;
mod view;

pub use dashboard::Dashboard;
pub use error::DashboardError;
pub use settings::FeedSettings;

pub use source::error::SourceError;
pub use source::http_source::HttpSource;
pub use source::local_source::LocalDirSource;
pub use source::memory_source::MemorySource;
pub use source::{is_valid_site_code, DocumentKey, DocumentSource};

pub use feed::daily_loader::{load_daily_window, window_dates, DEFAULT_WINDOW_DAYS};
pub use feed::error::SiteHistoryError;
pub use feed::history_loader::load_site_history;

pub use types::comfort_level::{ComfortLevel, UNKNOWN_LABEL};
pub use types::daily_snapshot::{DailyDocument, DailySnapshot, RowGroup};
pub use types::site_history::{
    LegacyDocument, MonthBucket, PartitionedDocument, RawSiteDocument, SiteDocument, SiteHistory,
    SiteMeta,
};
pub use types::site_record::{RawSiteRow, SiteRecord, SiteStatus, Weather, OPEN_STATUS_LABEL};
pub use types::timestamp::{chart_label, parse_feed_instant};

pub use aggregate::site_aggregator::{DaySummary, DistrictStat, SiteAggregator, DEFAULT_TOP_SITES};
pub use aggregate::trends::{
    capacity_utilization_trend, chronological, comfort_distribution, latest_observation,
    recent_records, visitor_trend, ComfortShare, HistoryRow, TrendPoint, UtilizationPoint,
    DEFAULT_HISTORY_ROWS, DEFAULT_UTILIZATION_WINDOW,
};

pub use view::home_view::HomeView;
pub use view::navigator::{Navigator, RequestToken, View};
pub use view::route::Route;
pub use view::site_detail_view::SiteDetailView;
