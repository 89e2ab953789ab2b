use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

use crate::error::{ApiError, ApiResult};

/// Parses an optional instant from the wire.
///
/// Accepts a full RFC 3339 timestamp or a bare `YYYY-MM-DD` date, which is
/// taken as midnight local time (the calendar-day convention rate
/// submissions use).
pub fn parse_instant_optional(
    value: Option<String>,
    field: &str,
) -> ApiResult<Option<DateTime<Utc>>> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(instant.with_timezone(&Utc)));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        ApiError::BadRequest(format!(
            "Invalid {} '{}': expected RFC 3339 or YYYY-MM-DD",
            field, raw
        ))
    })?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time");
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|local| Some(local.with_timezone(&Utc)))
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid {} '{}'", field, raw)))
}
