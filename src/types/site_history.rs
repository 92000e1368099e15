//! Site history documents and their canonical form.
//!
//! Two encodings are in circulation. The older writer produced a single
//! flat document per site; the current one splits the history into month
//! buckets. Both are recognized here, at the ingestion boundary, and collapse
//! into one [`SiteHistory`]. Nothing downstream knows which encoding a history
//! came from.

use crate::types::site_record::{count, text, RawSiteRow, SiteRecord};
use crate::types::timestamp::parse_feed_instant;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire shape of `spots/{code}.json`, covering both encodings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSiteDocument {
    #[serde(default)]
    pub spot_name: Option<Value>,
    #[serde(default)]
    pub spot_code: Option<Value>,
    #[serde(default)]
    pub district: Option<Value>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub total_records: Option<Value>,
    #[serde(default)]
    pub data: Option<Vec<RawSiteRow>>,
    #[serde(default)]
    pub months_data: Option<Vec<MonthBucket>>,
}

/// One month of a partitioned site history.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthBucket {
    #[serde(default)]
    pub district: Option<Value>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub total_records: Option<Value>,
    #[serde(default)]
    pub data: Option<Vec<RawSiteRow>>,
}

impl MonthBucket {
    fn has_points(&self) -> bool {
        self.data.as_ref().is_some_and(|points| !points.is_empty())
    }
}

/// Document-level identity shared by both encodings.
#[derive(Debug, Clone, Default)]
pub struct SiteMeta {
    pub name: String,
    pub code: String,
    pub last_updated: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct LegacyDocument {
    pub meta: SiteMeta,
    pub district: Option<String>,
    /// Declared record count. A missing or zero declaration is replaced by the
    /// number of points, so unlike the other fields it is not passed through
    /// verbatim.
    pub total_records: u64,
    pub points: Vec<RawSiteRow>,
}

#[derive(Debug, Clone)]
pub struct PartitionedDocument {
    pub meta: SiteMeta,
    /// Buckets that carry at least one point, in published order.
    pub buckets: Vec<MonthBucket>,
}

/// A site document after its encoding has been recognized.
#[derive(Debug, Clone)]
pub enum SiteDocument {
    Legacy(LegacyDocument),
    Partitioned(PartitionedDocument),
}

impl SiteDocument {
    /// Recognizes the encoding of a raw document.
    ///
    /// The partitioned form wins when it has at least one non-empty bucket;
    /// otherwise a flat `data` array marks the legacy form. Returns `None` when
    /// neither applies.
    pub fn classify(raw: RawSiteDocument) -> Option<Self> {
        let meta = SiteMeta {
            name: text(raw.spot_name).unwrap_or_default(),
            code: text(raw.spot_code).unwrap_or_default(),
            last_updated: raw.last_updated.as_deref().and_then(parse_feed_instant),
        };

        let buckets: Vec<MonthBucket> = raw
            .months_data
            .unwrap_or_default()
            .into_iter()
            .filter(MonthBucket::has_points)
            .collect();
        if !buckets.is_empty() {
            return Some(SiteDocument::Partitioned(PartitionedDocument { meta, buckets }));
        }

        let points = raw.data?;
        let declared = count(raw.total_records);
        Some(SiteDocument::Legacy(LegacyDocument {
            meta,
            district: text(raw.district),
            total_records: if declared > 0 {
                declared
            } else {
                points.len() as u64
            },
            points,
        }))
    }

    /// Collapses either encoding into the canonical history.
    pub fn normalize(self) -> SiteHistory {
        match self {
            SiteDocument::Legacy(doc) => {
                let points = doc
                    .points
                    .into_iter()
                    .map(|row| SiteRecord::from_history_row(row, &doc.meta.code, &doc.meta.name))
                    .collect();
                SiteHistory {
                    name: doc.meta.name,
                    code: doc.meta.code,
                    district: doc.district,
                    last_updated: doc.meta.last_updated,
                    total_records: doc.total_records,
                    points,
                }
            }
            SiteDocument::Partitioned(doc) => merge_buckets(doc),
        }
    }
}

fn merge_buckets(doc: PartitionedDocument) -> SiteHistory {
    let PartitionedDocument { meta, buckets } = doc;
    let mut points = Vec::new();
    let mut total_records = 0u64;
    let mut district: Option<String> = None;
    let mut last_updated = meta.last_updated;

    for bucket in buckets {
        let rows = bucket.data.unwrap_or_default();
        let declared = count(bucket.total_records);
        total_records = total_records.saturating_add(if declared > 0 {
            declared
        } else {
            rows.len() as u64
        });

        if district.is_none() {
            district = text(bucket.district);
        }

        if let Some(bucket_updated) = bucket.last_updated.as_deref().and_then(parse_feed_instant) {
            if last_updated.map_or(true, |current| bucket_updated > current) {
                last_updated = Some(bucket_updated);
            }
        }

        points.extend(
            rows.into_iter()
                .map(|row| SiteRecord::from_history_row(row, &meta.code, &meta.name)),
        );
    }

    SiteHistory {
        name: meta.name,
        code: meta.code,
        district,
        last_updated,
        total_records,
        points,
    }
}

/// The full observation history of one site.
///
/// `points` keep document order; chronological views are derived by
/// [`crate::aggregate::trends`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteHistory {
    pub name: String,
    pub code: String,
    pub district: Option<String>,
    pub last_updated: Option<NaiveDateTime>,
    /// Record count as declared by the publisher.
    pub total_records: u64,
    pub points: Vec<SiteRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};
    use serde_json::{json, Value};

    fn raw(value: Value) -> RawSiteDocument {
        serde_json::from_value(value).unwrap()
    }

    fn points(n: usize, month: u32) -> Value {
        Value::Array(
            (0..n)
                .map(|i| {
                    json!({
                        "TIME": format!("2024-{:02}-{:02} 10:00", month, i % 28 + 1),
                        "NUM": i,
                        "MAX_NUM": 100,
                        "SSD": "舒适",
                        "TYPE": "正常"
                    })
                })
                .collect(),
        )
    }

    #[test]
    fn test_two_month_buckets_merge() {
        let document = raw(json!({
            "spot_name": "上海豫园",
            "spot_code": "7",
            "last_updated": "2024-01-31T00:00:00",
            "months_data": [
                {"district": "黄浦区", "last_updated": "2024-01-31T00:00:00", "total_records": 100, "data": points(100, 1)},
                {"district": "黄浦区", "last_updated": "2024-02-15T00:00:00", "total_records": 50, "data": points(50, 2)}
            ]
        }));

        let document = SiteDocument::classify(document).unwrap();
        assert!(matches!(document, SiteDocument::Partitioned(_)));
        let history = document.normalize();

        assert_eq!(history.total_records, 150);
        assert_eq!(history.points.len(), 150);
        assert_eq!(
            history.last_updated.unwrap().date(),
            NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
        );
        assert_eq!(history.district.as_deref(), Some("黄浦区"));
        assert_eq!(history.code, "7");
        assert!(history.points.iter().all(|p| p.code == "7" && p.name == "上海豫园"));
        // Concatenated in bucket order, not re-sorted.
        assert_eq!(history.points[99].timestamp.unwrap().date().month0(), 0);
        assert_eq!(history.points[100].timestamp.unwrap().date().month0(), 1);
    }

    #[test]
    fn test_missing_counts_fall_back_to_length() {
        let history = SiteDocument::classify(raw(json!({
            "spot_code": "6",
            "months_data": [
                {"data": points(3, 1)},
                {"total_records": 0, "data": points(2, 2)},
                {"total_records": 10, "data": points(4, 3)}
            ]
        })))
        .unwrap()
        .normalize();

        assert_eq!(history.total_records, 3 + 2 + 10);
        assert_eq!(history.points.len(), 9);
    }

    #[test]
    fn test_oversized_declared_counts_saturate() {
        let history = SiteDocument::classify(raw(json!({
            "months_data": [
                {"total_records": 1e30, "data": points(1, 1)},
                {"total_records": 1e30, "data": points(1, 2)}
            ]
        })))
        .unwrap()
        .normalize();

        assert_eq!(history.total_records, u64::MAX);
    }

    #[test]
    fn test_district_comes_from_first_bucket_declaring_one() {
        let history = SiteDocument::classify(raw(json!({
            "months_data": [
                {"data": points(1, 1)},
                {"district": "", "data": points(1, 2)},
                {"district": "浦东新区", "data": points(1, 3)},
                {"district": "黄浦区", "data": points(1, 4)}
            ]
        })))
        .unwrap()
        .normalize();

        assert_eq!(history.district.as_deref(), Some("浦东新区"));
    }

    #[test]
    fn test_older_bucket_does_not_override_newer_document_timestamp() {
        let history = SiteDocument::classify(raw(json!({
            "last_updated": "2024-03-01T12:00:00",
            "months_data": [
                {"last_updated": "2024-01-31T00:00:00", "data": points(1, 1)}
            ]
        })))
        .unwrap()
        .normalize();

        assert_eq!(
            history.last_updated.unwrap().date(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_empty_buckets_are_ignored() {
        let history = SiteDocument::classify(raw(json!({
            "months_data": [
                {"district": "闵行区", "last_updated": "2030-01-01T00:00:00", "total_records": 99, "data": []},
                {"district": "徐汇区", "data": points(2, 5)}
            ]
        })))
        .unwrap()
        .normalize();

        assert_eq!(history.district.as_deref(), Some("徐汇区"));
        assert_eq!(history.total_records, 2);
        assert!(history.last_updated.is_none());
    }

    #[test]
    fn test_legacy_document_passes_through() {
        let document = SiteDocument::classify(raw(json!({
            "spot_name": "上海博物馆",
            "spot_code": "6",
            "district": "黄浦区",
            "last_updated": "2025-11-07T16:53:00",
            "total_records": 2,
            "data": points(2, 11)
        })))
        .unwrap();
        assert!(matches!(document, SiteDocument::Legacy(_)));

        let history = document.normalize();
        assert_eq!(history.name, "上海博物馆");
        assert_eq!(history.district.as_deref(), Some("黄浦区"));
        assert_eq!(history.total_records, 2);
        assert_eq!(history.points.len(), 2);
    }

    #[test]
    fn test_legacy_zero_count_becomes_point_count() {
        let history = SiteDocument::classify(raw(json!({
            "spot_code": "6",
            "total_records": 0,
            "data": points(3, 11)
        })))
        .unwrap()
        .normalize();
        assert_eq!(history.total_records, 3);
    }

    #[test]
    fn test_all_empty_buckets_fall_back_to_legacy_data() {
        let document = SiteDocument::classify(raw(json!({
            "months_data": [{"data": []}],
            "data": points(3, 6)
        })))
        .unwrap();

        assert!(matches!(document, SiteDocument::Legacy(_)));
        assert_eq!(document.normalize().total_records, 3);
    }

    #[test]
    fn test_unrecognized_shapes() {
        assert!(SiteDocument::classify(raw(json!({}))).is_none());
        assert!(SiteDocument::classify(raw(json!({"months_data": []}))).is_none());
        assert!(SiteDocument::classify(raw(json!({"months_data": [{"data": null}]}))).is_none());
    }
}
