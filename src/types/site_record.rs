//! Site observations as published by the feed and as used by the pipeline.
//!
//! [`RawSiteRow`] mirrors the upper-case wire format and accepts whatever the
//! publisher wrote. [`SiteRecord`] is the normalized form. All defaulting of
//! missing or malformed fields happens in this module.

use crate::types::comfort_level::{ComfortLevel, UNKNOWN_LABEL};
use crate::types::timestamp::parse_feed_instant;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Status label the feed uses for a site that is open to visitors.
pub const OPEN_STATUS_LABEL: &str = "正常";

/// One row as it appears in daily documents and site histories.
///
/// Every field is optional and loosely typed: counts have been seen both as
/// numbers and as numeric strings, codes both as strings and as numbers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSiteRow {
    #[serde(rename = "CODE", default)]
    pub code: Option<Value>,
    #[serde(rename = "NAME", default)]
    pub name: Option<Value>,
    #[serde(rename = "DNAME", default)]
    pub district_name: Option<Value>,
    #[serde(rename = "NUM", default)]
    pub visitor_count: Option<Value>,
    #[serde(rename = "MAX_NUM", default)]
    pub max_capacity: Option<Value>,
    #[serde(rename = "SSD", default)]
    pub comfort_level: Option<Value>,
    #[serde(rename = "TYPE", default)]
    pub status: Option<Value>,
    #[serde(rename = "GRADE", default)]
    pub grade: Option<Value>,
    #[serde(rename = "T_TIME", default)]
    pub opening_hours: Option<Value>,
    #[serde(rename = "TIME", default)]
    pub time: Option<Value>,
    #[serde(rename = "WDES", default)]
    pub weather_description: Option<Value>,
    #[serde(rename = "WLOW", default)]
    pub temperature_low: Option<Value>,
    #[serde(rename = "WHIGH", default)]
    pub temperature_high: Option<Value>,
    #[serde(rename = "WDIRECTION", default)]
    pub wind_direction: Option<Value>,
    #[serde(rename = "WPOWER", default)]
    pub wind_power: Option<Value>,
}

/// Whether a site is open. Anything other than the open label counts as closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteStatus {
    Open,
    /// Closed, with the label the feed used (e.g. `闭园`) when it gave one.
    Closed(Option<String>),
}

impl SiteStatus {
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            Some(OPEN_STATUS_LABEL) => SiteStatus::Open,
            Some(l) if l.eq_ignore_ascii_case("open") => SiteStatus::Open,
            Some("") | None => SiteStatus::Closed(None),
            Some(other) => SiteStatus::Closed(Some(other.to_string())),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, SiteStatus::Open)
    }

    pub fn label(&self) -> &str {
        match self {
            SiteStatus::Open => OPEN_STATUS_LABEL,
            SiteStatus::Closed(Some(label)) => label,
            SiteStatus::Closed(None) => UNKNOWN_LABEL,
        }
    }
}

impl Serialize for SiteStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Weather reported alongside an observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Weather {
    pub description: String,
    pub temperature_low: Option<f64>,
    pub temperature_high: Option<f64>,
    pub wind_direction: Option<String>,
    pub wind_power: Option<String>,
}

/// One normalized observation of a tourist site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteRecord {
    pub code: String,
    pub name: String,
    pub district_name: Option<String>,
    pub visitor_count: u64,
    /// Declared maximum capacity; `0` means unknown.
    pub max_capacity: u64,
    pub comfort_level: Option<ComfortLevel>,
    pub status: SiteStatus,
    pub grade: Option<String>,
    pub opening_hours: Option<String>,
    pub weather: Option<Weather>,
    pub timestamp: Option<NaiveDateTime>,
}

impl SiteRecord {
    /// Normalizes a wire row.
    pub fn from_row(row: RawSiteRow) -> Self {
        let weather = text(row.weather_description).map(|description| Weather {
            description,
            temperature_low: number(row.temperature_low),
            temperature_high: number(row.temperature_high),
            wind_direction: text(row.wind_direction),
            wind_power: text(row.wind_power),
        });

        SiteRecord {
            code: text(row.code).unwrap_or_default(),
            name: text(row.name).unwrap_or_default(),
            district_name: text(row.district_name),
            visitor_count: count(row.visitor_count),
            max_capacity: count(row.max_capacity),
            comfort_level: text(row.comfort_level)
                .as_deref()
                .and_then(ComfortLevel::from_label),
            status: SiteStatus::from_label(text(row.status).as_deref()),
            grade: text(row.grade),
            opening_hours: text(row.opening_hours),
            weather,
            timestamp: text(row.time).as_deref().and_then(parse_feed_instant),
        }
    }

    /// Normalizes a row from a site history, where identity lives on the
    /// document rather than on each point.
    pub(crate) fn from_history_row(row: RawSiteRow, code: &str, name: &str) -> Self {
        let mut record = Self::from_row(row);
        if record.code.is_empty() {
            record.code = code.to_string();
        }
        if record.name.is_empty() {
            record.name = name.to_string();
        }
        record
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// District name, or [`UNKNOWN_LABEL`] when the feed left it out.
    pub fn district_label(&self) -> &str {
        self.district_name.as_deref().unwrap_or(UNKNOWN_LABEL)
    }

    pub fn comfort_label(&self) -> &str {
        ComfortLevel::label_or_unknown(self.comfort_level.as_ref())
    }

    /// Visitors as a percentage of capacity, rounded to one decimal.
    /// `None` when the capacity is unknown.
    pub fn utilization_percent(&self) -> Option<f64> {
        if self.max_capacity == 0 {
            return None;
        }
        let percent = self.visitor_count as f64 / self.max_capacity as f64 * 100.0;
        Some((percent * 10.0).round() / 10.0)
    }
}

impl From<RawSiteRow> for SiteRecord {
    fn from(row: RawSiteRow) -> Self {
        SiteRecord::from_row(row)
    }
}

pub(crate) fn text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn number(value: Option<Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// Non-negative count; anything missing, negative or unparseable is `0`.
pub(crate) fn count(value: Option<Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f.round() as u64))
            .unwrap_or(0),
        value @ Some(Value::String(_)) => number(value)
            .filter(|f| *f > 0.0)
            .map(|f| f.round() as u64)
            .unwrap_or(0),
        _ => 0,
    }
}
