use crate::aggregate::site_aggregator::DEFAULT_TOP_SITES;
use crate::aggregate::trends::{DEFAULT_HISTORY_ROWS, DEFAULT_UTILIZATION_WINDOW};
use crate::feed::daily_loader::DEFAULT_WINDOW_DAYS;
use bon::Builder;

/// Tunables of the dashboard. Unset options keep the published layout.
///
/// ```
/// use shanghai_tourist::FeedSettings;
///
/// let settings = FeedSettings::builder().top_sites(3).build();
/// assert_eq!(settings.top_sites, 3);
/// assert_eq!(settings.window_days, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct FeedSettings {
    /// Days of daily snapshots to request, ending today.
    #[builder(default = DEFAULT_WINDOW_DAYS)]
    pub window_days: u32,
    /// Length of the busiest-sites ranking.
    #[builder(default = DEFAULT_TOP_SITES)]
    pub top_sites: usize,
    /// Newest points kept by the capacity utilization chart.
    #[builder(default = DEFAULT_UTILIZATION_WINDOW)]
    pub utilization_window: usize,
    #[builder(default = DEFAULT_HISTORY_ROWS)]
    pub history_table_rows: usize,
}

impl Default for FeedSettings {
    fn default() -> Self {
        FeedSettings::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = FeedSettings::default();
        assert_eq!(settings.window_days, 5);
        assert_eq!(settings.top_sites, 10);
        assert_eq!(settings.utilization_window, 20);
        assert_eq!(settings.history_table_rows, 50);
    }
}
