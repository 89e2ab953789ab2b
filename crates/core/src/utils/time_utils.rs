use chrono::{DateTime, Local, NaiveDate, Utc};

/// Truncates an instant to the start of its calendar day in the system
/// timezone.
///
/// This is the single source of truth for deriving a "business date" from a
/// timestamp; the one-closing-rate-per-day uniqueness key is computed here.
pub fn calendar_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&Local).date_naive()
}

/// Today's calendar date in the system timezone.
pub fn today() -> NaiveDate {
    calendar_date(Utc::now())
}
