//! The daily snapshot document and its normalized form.

use crate::types::site_record::{RawSiteRow, SiteRecord};
use crate::types::timestamp::parse_feed_instant;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Wire shape of `{YYYY-MM-DD}.json`.
///
/// Each entry of `data` is one crawler run; its `rows` are the sites it saw.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyDocument {
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<RowGroup>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RowGroup {
    #[serde(default)]
    pub rows: Option<Vec<RawSiteRow>>,
}

/// All observations collected for one calendar day.
///
/// Row groups are kept as they were published; the same site typically shows
/// up once per crawler run, and [`crate::SiteAggregator`] resolves that.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySnapshot {
    pub date: NaiveDate,
    pub last_updated: Option<NaiveDateTime>,
    pub row_groups: Vec<Vec<SiteRecord>>,
}

impl DailySnapshot {
    pub fn from_document(date: NaiveDate, document: DailyDocument) -> Self {
        DailySnapshot {
            date,
            last_updated: document
                .last_updated
                .as_deref()
                .and_then(parse_feed_instant),
            row_groups: document
                .data
                .unwrap_or_default()
                .into_iter()
                .map(|group| {
                    group
                        .rows
                        .unwrap_or_default()
                        .into_iter()
                        .map(SiteRecord::from_row)
                        .collect()
                })
                .collect(),
        }
    }

    /// Every row of every group, in publication order.
    pub fn rows(&self) -> impl Iterator<Item = &SiteRecord> {
        self.row_groups.iter().flatten()
    }

    pub fn row_count(&self) -> usize {
        self.row_groups.iter().map(Vec::len).sum()
    }
}
