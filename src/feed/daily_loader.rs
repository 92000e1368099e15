//! Fetches the trailing window of daily snapshots.

use crate::source::{DocumentKey, DocumentSource};
use crate::types::daily_snapshot::{DailyDocument, DailySnapshot};
use chrono::{Days, NaiveDate};
use futures_util::future::join_all;
use log::{info, warn};

/// Days attempted when no window is given.
pub const DEFAULT_WINDOW_DAYS: u32 = 5;

/// Calendar days of the window ending at `today`, oldest first.
pub fn window_dates(today: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..days)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
        .collect()
}

/// Loads the daily snapshots of `[today - (days - 1), today]`.
///
/// All days are requested at once. A day whose document cannot be fetched or
/// decoded is left out and logged; the remaining days are returned oldest
/// first. The result may be empty.
pub async fn load_daily_window<S>(source: &S, today: NaiveDate, days: u32) -> Vec<DailySnapshot>
where
    S: DocumentSource + ?Sized,
{
    let dates = window_dates(today, days);
    let fetches = dates.iter().map(|date| load_day(source, *date));
    let snapshots: Vec<DailySnapshot> = join_all(fetches).await.into_iter().flatten().collect();

    info!(
        "Loaded {}/{} daily snapshots from {} source",
        snapshots.len(),
        dates.len(),
        source.source_tag()
    );
    snapshots
}

async fn load_day<S>(source: &S, date: NaiveDate) -> Option<DailySnapshot>
where
    S: DocumentSource + ?Sized,
{
    let key = DocumentKey::Daily(date);
    let bytes = match source.fetch(&key).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Skipping {}: {}", key, e);
            return None;
        }
    };
    match serde_json::from_slice::<DailyDocument>(&bytes) {
        Ok(document) => Some(DailySnapshot::from_document(date, document)),
        Err(e) => {
            warn!("Skipping {}: malformed document: {}", key, e);
            None
        }
    }
}
