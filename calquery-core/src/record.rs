//! JSON shape of a reported event.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Serialize;

use crate::event::Event;

/// Timestamp format for `start`/`end`, always rendered in UTC.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// One event as printed by the CLI. Absent text fields are empty strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub title: String,
    pub start: String,
    pub end: String,
    pub location: String,
    pub url: String,
    pub notes: String,
    pub all_day: bool,
    #[serde(skip)]
    pub starts_at: DateTime<Utc>,
}

impl EventRecord {
    /// Build the record, resolving floating and all-day times in `local`.
    ///
    /// All-day events end one second before the midnight that closes them.
    pub fn from_event<Tz: TimeZone>(event: &Event, local: &Tz) -> Self {
        let (start, end) = event.span(local);
        let all_day = event.is_all_day();
        let end = if all_day && end > start {
            end - Duration::seconds(1)
        } else {
            end
        };

        EventRecord {
            title: event.summary.clone().unwrap_or_default(),
            start: format_timestamp(start),
            end: format_timestamp(end),
            location: event.location.clone().unwrap_or_default(),
            url: event.url.clone().unwrap_or_default(),
            notes: event.description.clone().unwrap_or_default(),
            all_day,
            starts_at: start,
        }
    }
}

fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// Order records by start instant. The sort is stable.
pub fn sort_by_start(records: &mut [EventRecord]) {
    records.sort_by_key(|r| r.starts_at);
}
