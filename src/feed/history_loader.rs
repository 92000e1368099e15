use crate::feed::error::SiteHistoryError;
use crate::source::{DocumentKey, DocumentSource};
use crate::types::site_history::{RawSiteDocument, SiteDocument, SiteHistory};
use crate::types::site_record::text;
use log::{error, info};
use serde_json::Value;

/// Fetches `spots/{code}.json` and normalizes it, whichever encoding it uses.
///
/// Failures are logged here; callers only need to decide how to show them.
pub async fn load_site_history<S>(source: &S, code: &str) -> Result<SiteHistory, SiteHistoryError>
where
    S: DocumentSource + ?Sized,
{
    let result = fetch_and_normalize(source, code).await;
    match &result {
        Ok(history) => info!(
            "Loaded history for site {} ({} points, {} declared)",
            code,
            history.points.len(),
            history.total_records
        ),
        Err(SiteHistoryError::Source(e)) => {
            error!("Failed to fetch history for site {}: {}", code, e)
        }
        Err(e) => error!("No usable history for site {}: {}", code, e),
    }
    result
}

async fn fetch_and_normalize<S>(source: &S, code: &str) -> Result<SiteHistory, SiteHistoryError>
where
    S: DocumentSource + ?Sized,
{
    let bytes = source.fetch(&DocumentKey::Site(code.to_string())).await?;
    let mut raw: RawSiteDocument =
        serde_json::from_slice(&bytes).map_err(|e| SiteHistoryError::Decode {
            code: code.to_string(),
            source: e,
        })?;
    // Points inherit the document code, so fill it in before normalizing.
    if text(raw.spot_code.clone()).is_none() {
        raw.spot_code = Some(Value::String(code.to_string()));
    }
    let document = SiteDocument::classify(raw).ok_or_else(|| SiteHistoryError::UnrecognizedShape {
        code: code.to_string(),
    })?;

    Ok(document.normalize())
}
