use crate::aggregate::site_aggregator::{DaySummary, DistrictStat, SiteAggregator};
use crate::types::daily_snapshot::DailySnapshot;
use crate::types::site_record::SiteRecord;
use chrono::NaiveDate;
use serde::Serialize;

/// Everything the home page shows, for one selected day of the loaded window.
///
/// The oldest loaded day is selected initially. Selecting another day yields a
/// new view; nothing is recomputed in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeView {
    /// Days that loaded, oldest first.
    pub dates: Vec<NaiveDate>,
    pub selected: Option<NaiveDate>,
    pub summary: Option<DaySummary>,
    pub district_stats: Vec<DistrictStat>,
    pub top_sites: Vec<SiteRecord>,
    pub sites: Vec<SiteRecord>,
    #[serde(skip)]
    snapshots: Vec<DailySnapshot>,
    #[serde(skip)]
    top_n: usize,
}

impl HomeView {
    pub fn new(snapshots: Vec<DailySnapshot>, top_n: usize) -> Self {
        Self::build(snapshots, 0, top_n)
    }

    fn build(snapshots: Vec<DailySnapshot>, index: usize, top_n: usize) -> Self {
        let dates = snapshots.iter().map(|s| s.date).collect();
        let mut view = HomeView {
            dates,
            selected: None,
            summary: None,
            district_stats: Vec::new(),
            top_sites: Vec::new(),
            sites: Vec::new(),
            snapshots: Vec::new(),
            top_n,
        };

        if let Some(snapshot) = snapshots.get(index) {
            let aggregator = SiteAggregator::new(snapshot);
            view.selected = Some(snapshot.date);
            view.summary = Some(aggregator.summary());
            view.district_stats = aggregator.district_stats();
            view.top_sites = aggregator
                .top_open_sites(top_n)
                .into_iter()
                .cloned()
                .collect();
            view.sites = aggregator.current_sites().to_vec();
        }
        view.snapshots = snapshots;
        view
    }

    /// The same window with `date` selected, or `None` when that day did not
    /// load.
    pub fn select(&self, date: NaiveDate) -> Option<HomeView> {
        let index = self.dates.iter().position(|d| *d == date)?;
        Some(Self::build(self.snapshots.clone(), index, self.top_n))
    }

    /// True when no day of the window could be loaded.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
