//! Shared timestamp and date helpers.

use crate::core::error::AssetOsError;
use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use ulid::Ulid;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns unix-epoch seconds with `Z` suffix (e.g. `1771220592Z`).
pub fn now_epoch_z() -> String {
    format!("{}Z", Utc::now().timestamp())
}

pub fn new_event_id() -> String {
    Ulid::new().to_string()
}

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date as typed at a prompt. Years outside 1..=9999 are rejected.
pub fn parse_date(input: &str) -> Result<NaiveDate, AssetOsError> {
    let date = NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|e| AssetOsError::ValidationError(format!("invalid date '{}': {}", input.trim(), e)))?;
    if !(1..=9999).contains(&date.year()) {
        return Err(AssetOsError::ValidationError(format!(
            "date '{}' is outside years 1-9999",
            input.trim()
        )));
    }
    Ok(date)
}

/// Latest date whose `YYYY-MM-DD` text still sorts correctly against stored dates.
pub fn last_storable_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX)
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format(DATE_FORMAT).to_string(),
        None => "N/A".to_string(),
    }
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Last calendar day (inclusive) of a warranty window `days` long, starting today.
///
/// Negative windows have no cutoff. Windows reaching past year 9999 are
/// clamped to [`last_storable_date`].
pub fn window_cutoff(today: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days < 0 {
        return None;
    }
    let last = last_storable_date();
    let cutoff = today
        .checked_add_days(Days::new(days.unsigned_abs()))
        .unwrap_or(last);
    Some(cutoff.min(last))
}
