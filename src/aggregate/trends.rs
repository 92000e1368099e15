//! Chart series and tables derived from a [`SiteHistory`].
//!
//! Every function here is pure: the same history always yields the same
//! output, and the history itself is never reordered in place.

use crate::types::comfort_level::{ComfortLevel, UNKNOWN_LABEL};
use crate::types::site_history::SiteHistory;
use crate::types::site_record::SiteRecord;
use crate::types::timestamp::chart_label;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;

/// Points kept by the capacity utilization chart.
pub const DEFAULT_UTILIZATION_WINDOW: usize = 20;
/// Rows shown in the history table.
pub const DEFAULT_HISTORY_ROWS: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub label: String,
    pub visitor_count: u64,
}

/// How often one comfort label occurs in a history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComfortShare {
    pub label: String,
    pub count: usize,
}

impl ComfortShare {
    /// Share of `total` in percent, `0.0` for an empty total.
    pub fn percent(&self, total: usize) -> f64 {
        if total == 0 {
            return 0.0;
        }
        self.count as f64 / total as f64 * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtilizationPoint {
    pub label: String,
    pub percent: f64,
}

/// One row of the history table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRow {
    pub timestamp: Option<NaiveDateTime>,
    pub visitor_count: u64,
    pub max_capacity: u64,
    pub comfort_level: String,
    pub status: String,
    /// `None` when the capacity is unknown.
    pub utilization_percent: Option<f64>,
}

impl From<&SiteRecord> for HistoryRow {
    fn from(point: &SiteRecord) -> Self {
        HistoryRow {
            timestamp: point.timestamp,
            visitor_count: point.visitor_count,
            max_capacity: point.max_capacity,
            comfort_level: point.comfort_label().to_string(),
            status: point.status.label().to_string(),
            utilization_percent: point.utilization_percent(),
        }
    }
}

/// Points ordered by timestamp, oldest first.
///
/// The sort is stable. Points without a timestamp come before all others.
pub fn chronological<'a, I>(points: I) -> Vec<&'a SiteRecord>
where
    I: IntoIterator<Item = &'a SiteRecord>,
{
    let mut sorted: Vec<&SiteRecord> = points.into_iter().collect();
    sorted.sort_by_key(|p| p.timestamp);
    sorted
}

fn point_label(point: &SiteRecord) -> String {
    point
        .timestamp
        .as_ref()
        .map(chart_label)
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
}

/// Visitor counts over time.
pub fn visitor_trend(history: &SiteHistory) -> Vec<TrendPoint> {
    chronological(&history.points)
        .into_iter()
        .map(|point| TrendPoint {
            label: point_label(point),
            visitor_count: point.visitor_count,
        })
        .collect()
}

/// Frequency of each comfort label, in the order labels first appear.
pub fn comfort_distribution(history: &SiteHistory) -> Vec<ComfortShare> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut shares: Vec<ComfortShare> = Vec::new();

    for point in &history.points {
        let label = ComfortLevel::label_or_unknown(point.comfort_level.as_ref());
        match index.get(label) {
            Some(&slot) => shares[slot].count += 1,
            None => {
                index.insert(label, shares.len());
                shares.push(ComfortShare {
                    label: label.to_string(),
                    count: 1,
                });
            }
        }
    }
    shares
}

/// Utilization of the last `window` points that declare a capacity.
pub fn capacity_utilization_trend(history: &SiteHistory, window: usize) -> Vec<UtilizationPoint> {
    let sorted = chronological(history.points.iter().filter(|p| p.max_capacity > 0));
    let skip = sorted.len().saturating_sub(window);

    sorted
        .into_iter()
        .skip(skip)
        .filter_map(|point| {
            point.utilization_percent().map(|percent| UtilizationPoint {
                label: point_label(point),
                percent,
            })
        })
        .collect()
}

/// The most recent observation. On equal timestamps the earlier point wins.
pub fn latest_observation(history: &SiteHistory) -> Option<&SiteRecord> {
    let mut latest: Option<&SiteRecord> = None;
    for point in &history.points {
        if latest.map_or(true, |current| point.timestamp > current.timestamp) {
            latest = Some(point);
        }
    }
    latest
}

/// Newest `limit` observations, newest first.
pub fn recent_records(history: &SiteHistory, limit: usize) -> Vec<HistoryRow> {
    let mut sorted: Vec<&SiteRecord> = history.points.iter().collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted.into_iter().take(limit).map(HistoryRow::from).collect()
}
