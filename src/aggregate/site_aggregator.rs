//! Same-day rollups over one [`DailySnapshot`].

use crate::types::comfort_level::UNKNOWN_LABEL;
use crate::types::daily_snapshot::DailySnapshot;
use crate::types::site_record::SiteRecord;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashMap;

/// Ranking length used by the home page.
pub const DEFAULT_TOP_SITES: usize = 10;

/// Per-district rollup of the deduplicated sites of a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistrictStat {
    pub name: String,
    pub total_sites: usize,
    pub total_visitors: u64,
    pub open_sites: usize,
}

/// Headline numbers for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub total_sites: usize,
    pub open_sites: usize,
    pub total_visitors: u64,
    pub last_updated: Option<NaiveDateTime>,
}

/// Deduplicates the rows of a snapshot and derives the home-page collections.
///
/// A site is usually reported once per crawler run, so the same `code` shows up
/// several times a day. The last row seen for a code wins, while the site keeps
/// the position where its code first appeared.
#[derive(Debug, Clone)]
pub struct SiteAggregator {
    date: NaiveDate,
    last_updated: Option<NaiveDateTime>,
    sites: Vec<SiteRecord>,
}

impl SiteAggregator {
    pub fn new(snapshot: &DailySnapshot) -> Self {
        let mut slots: HashMap<&str, usize> = HashMap::new();
        let mut sites: Vec<SiteRecord> = Vec::new();

        for row in snapshot.rows() {
            match slots.get(row.code.as_str()) {
                Some(&slot) => sites[slot] = row.clone(),
                None => {
                    slots.insert(row.code.as_str(), sites.len());
                    sites.push(row.clone());
                }
            }
        }

        Self {
            date: snapshot.date,
            last_updated: snapshot.last_updated,
            sites,
        }
    }

    /// One record per site code.
    pub fn current_sites(&self) -> &[SiteRecord] {
        &self.sites
    }

    /// Rollups per district, in the order districts are first met.
    /// Sites without a district are grouped under [`UNKNOWN_LABEL`].
    pub fn district_stats(&self) -> Vec<DistrictStat> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut stats: Vec<DistrictStat> = Vec::new();

        for site in &self.sites {
            let district = site.district_label();
            let slot = *index.entry(district).or_insert_with(|| {
                stats.push(DistrictStat {
                    name: district.to_string(),
                    total_sites: 0,
                    total_visitors: 0,
                    open_sites: 0,
                });
                stats.len() - 1
            });

            let stat = &mut stats[slot];
            stat.total_sites += 1;
            stat.total_visitors = stat.total_visitors.saturating_add(site.visitor_count);
            if site.is_open() {
                stat.open_sites += 1;
            }
        }
        stats
    }

    /// The `n` busiest open sites. Ties keep their current order.
    pub fn top_open_sites(&self, n: usize) -> Vec<&SiteRecord> {
        let mut open: Vec<&SiteRecord> = self.sites.iter().filter(|s| s.is_open()).collect();
        open.sort_by_key(|s| Reverse(s.visitor_count));
        open.truncate(n);
        open
    }

    pub fn summary(&self) -> DaySummary {
        DaySummary {
            date: self.date,
            total_sites: self.sites.len(),
            open_sites: self.sites.iter().filter(|s| s.is_open()).count(),
            total_visitors: self
                .sites
                .iter()
                .fold(0u64, |total, s| total.saturating_add(s.visitor_count)),
            last_updated: self.last_updated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::daily_snapshot::DailyDocument;
    use serde_json::{json, Value};

    fn snapshot(groups: Value) -> DailySnapshot {
        let document: DailyDocument = serde_json::from_value(json!({
            "last_updated": "2025-11-07T21:00:00",
            "data": groups
        }))
        .unwrap();
        DailySnapshot::from_document(NaiveDate::from_ymd_opt(2025, 11, 7).unwrap(), document)
    }

    fn site(code: &str, district: Option<&str>, visitors: u64, open: bool) -> Value {
        let mut row = json!({
            "CODE": code,
            "NAME": format!("site {}", code),
            "NUM": visitors,
            "TYPE": if open { "正常" } else { "闭园" }
        });
        if let Some(district) = district {
            row["DNAME"] = json!(district);
        }
        row
    }

    fn sample() -> DailySnapshot {
        snapshot(json!([
            {"rows": [
                site("1", Some("黄浦区"), 100, true),
                site("2", Some("浦东新区"), 300, true),
                site("3", None, 50, false),
            ]},
            {"rows": [
                site("2", Some("浦东新区"), 320, true),
                site("4", Some("黄浦区"), 320, true),
                site("1", Some("黄浦区"), 90, false),
                site("5", Some("徐汇区"), 0, true),
            ]}
        ]))
    }

    #[test]
    fn test_last_occurrence_wins_in_first_seen_slot() {
        let aggregator = SiteAggregator::new(&sample());
        let sites = aggregator.current_sites();

        assert_eq!(
            sites.iter().map(|s| s.code.as_str()).collect::<Vec<_>>(),
            vec!["1", "2", "3", "4", "5"]
        );
        assert_eq!(sites[0].visitor_count, 90);
        assert!(!sites[0].is_open());
        assert_eq!(sites[1].visitor_count, 320);
    }

    #[test]
    fn test_district_stats_cover_every_site() {
        let aggregator = SiteAggregator::new(&sample());
        let stats = aggregator.district_stats();

        assert_eq!(
            stats.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            vec!["黄浦区", "浦东新区", UNKNOWN_LABEL, "徐汇区"]
        );
        assert_eq!(
            stats[0],
            DistrictStat {
                name: "黄浦区".to_string(),
                total_sites: 2,
                total_visitors: 410,
                open_sites: 1,
            }
        );

        let sites = aggregator.current_sites();
        assert_eq!(
            stats.iter().map(|s| s.total_visitors).sum::<u64>(),
            sites.iter().map(|s| s.visitor_count).sum::<u64>()
        );
        assert_eq!(
            stats.iter().map(|s| s.total_sites).sum::<usize>(),
            sites.len()
        );
    }

    #[test]
    fn test_top_open_sites_is_stable_and_open_only() {
        let aggregator = SiteAggregator::new(&sample());

        let top = aggregator.top_open_sites(DEFAULT_TOP_SITES);
        assert_eq!(
            top.iter().map(|s| s.code.as_str()).collect::<Vec<_>>(),
            vec!["2", "4", "5"]
        );
        assert!(top.iter().all(|s| s.is_open()));
        assert!(top.windows(2).all(|w| w[0].visitor_count >= w[1].visitor_count));

        assert_eq!(aggregator.top_open_sites(1).len(), 1);
        assert!(aggregator.top_open_sites(0).is_empty());
    }

    #[test]
    fn test_summary() {
        let summary = SiteAggregator::new(&sample()).summary();

        assert_eq!(summary.total_sites, 5);
        assert_eq!(summary.open_sites, 3);
        assert_eq!(summary.total_visitors, 90 + 320 + 50 + 320);
        assert!(summary.last_updated.is_some());
    }

    #[test]
    fn test_empty_snapshot() {
        let aggregator = SiteAggregator::new(&snapshot(json!([])));

        assert!(aggregator.current_sites().is_empty());
        assert!(aggregator.district_stats().is_empty());
        assert!(aggregator.top_open_sites(10).is_empty());
        assert_eq!(aggregator.summary().total_visitors, 0);
    }

    #[test]
    fn test_oversized_counts_saturate() {
        let aggregator = SiteAggregator::new(&snapshot(json!([{"rows": [
            {"CODE": "1", "DNAME": "黄浦区", "NUM": 1e30, "TYPE": "正常"},
            {"CODE": "2", "DNAME": "黄浦区", "NUM": 1e30, "TYPE": "正常"},
        ]}])));

        assert_eq!(aggregator.current_sites()[0].visitor_count, u64::MAX);
        assert_eq!(aggregator.summary().total_visitors, u64::MAX);
        assert_eq!(aggregator.district_stats()[0].total_visitors, u64::MAX);
        assert_eq!(aggregator.top_open_sites(10).len(), 2);
    }

    #[test]
    fn test_many_duplicates_collapse_to_one_per_code() {
        let rows: Vec<Value> = (0..60)
            .map(|i| site(&(i % 7).to_string(), Some("静安区"), i, true))
            .collect();
        let aggregator = SiteAggregator::new(&snapshot(json!([{"rows": rows}])));
        let sites = aggregator.current_sites();

        assert_eq!(sites.len(), 7);
        for site in sites {
            let code: u64 = site.code.parse().unwrap();
            let last = (0..60u64).filter(|i| i % 7 == code).max().unwrap();
            assert_eq!(site.visitor_count, last);
        }
    }
}
