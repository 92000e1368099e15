use crate::aggregate::trends::{
    capacity_utilization_trend, comfort_distribution, latest_observation, recent_records,
    visitor_trend, ComfortShare, HistoryRow, TrendPoint, UtilizationPoint,
};
use crate::settings::FeedSettings;
use crate::types::site_history::SiteHistory;
use crate::types::site_record::SiteRecord;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Everything the detail page of one site shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteDetailView {
    pub code: String,
    pub name: String,
    pub district: Option<String>,
    pub last_updated: Option<NaiveDateTime>,
    pub total_records: u64,
    /// Current status cards.
    pub latest: Option<SiteRecord>,
    pub visitor_trend: Vec<TrendPoint>,
    pub comfort_distribution: Vec<ComfortShare>,
    pub utilization_trend: Vec<UtilizationPoint>,
    pub recent_records: Vec<HistoryRow>,
}

impl SiteDetailView {
    pub fn new(history: &SiteHistory, settings: &FeedSettings) -> Self {
        SiteDetailView {
            code: history.code.clone(),
            name: history.name.clone(),
            district: history.district.clone(),
            last_updated: history.last_updated,
            total_records: history.total_records,
            latest: latest_observation(history).cloned(),
            visitor_trend: visitor_trend(history),
            comfort_distribution: comfort_distribution(history),
            utilization_trend: capacity_utilization_trend(history, settings.utilization_window),
            recent_records: recent_records(history, settings.history_table_rows),
        }
    }

    /// Sum of the distribution counts, the denominator of
    /// [`ComfortShare::percent`].
    pub fn comfort_total(&self) -> usize {
        self.comfort_distribution.iter().map(|s| s.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::site_history::{RawSiteDocument, SiteDocument};
    use serde_json::{json, Value};

    fn history() -> SiteHistory {
        let points: Vec<Value> = (0..60)
            .map(|i| {
                json!({
                    "TIME": format!("2025-11-{:02} {:02}:00", i / 24 + 1, i % 24),
                    "NUM": i,
                    "MAX_NUM": if i % 2 == 0 { 100 } else { 0 },
                    "SSD": if i < 40 { "舒适" } else { "一般" },
                    "TYPE": "正常"
                })
            })
            .collect();
        let raw: RawSiteDocument = serde_json::from_value(json!({
            "spot_name": "东方明珠",
            "spot_code": "91",
            "district": "浦东新区",
            "data": points
        }))
        .unwrap();
        SiteDocument::classify(raw).unwrap().normalize()
    }

    #[test]
    fn test_detail_view_uses_settings() {
        let settings = FeedSettings::builder()
            .utilization_window(5)
            .history_table_rows(7)
            .build();
        let view = SiteDetailView::new(&history(), &settings);

        assert_eq!(view.name, "东方明珠");
        assert_eq!(view.total_records, 60);
        assert_eq!(view.visitor_trend.len(), 60);
        assert_eq!(view.utilization_trend.len(), 5);
        assert_eq!(view.recent_records.len(), 7);
        assert_eq!(view.recent_records[0].visitor_count, 59);
        assert_eq!(view.latest.as_ref().unwrap().visitor_count, 59);
        assert_eq!(view.comfort_total(), 60);
        assert_eq!(view.comfort_distribution[1].label, "一般");
    }

    #[test]
    fn test_default_limits() {
        let view = SiteDetailView::new(&history(), &FeedSettings::default());

        assert_eq!(view.utilization_trend.len(), 20);
        assert_eq!(view.recent_records.len(), 50);
    }
}
