//! Event types read from the calendar store.
//!
//! Only the attributes calquery reports are kept. Times stay in the form
//! the `.ics` file used and are resolved to UTC instants against a caller
//! supplied "local" zone, so queries can be evaluated in any zone.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// A calendar event snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub uid: String,
    pub summary: Option<String>,
    /// Free-text notes (DESCRIPTION)
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    pub start: EventTime,
    /// Exclusive end, as stored in DTEND
    pub end: EventTime,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventTime {
    /// All-day value (VALUE=DATE)
    Date(NaiveDate),
    /// Absolute instant (trailing Z)
    DateTimeUtc(DateTime<Utc>),
    /// Wall-clock time without zone, read in the local zone
    DateTimeFloating(NaiveDateTime),
    /// Wall-clock time in an IANA zone (TZID parameter)
    DateTimeZoned {
        datetime: NaiveDateTime,
        tzid: String,
    },
}

impl EventTime {
    pub fn is_date(&self) -> bool {
        matches!(self, EventTime::Date(_))
    }

    /// Resolve to an instant. Dates resolve to midnight in `local`.
    pub fn resolve<Tz: TimeZone>(&self, local: &Tz) -> DateTime<Utc> {
        match self {
            EventTime::Date(d) => local_to_utc(d.and_time(NaiveTime::MIN), local),
            EventTime::DateTimeUtc(dt) => *dt,
            EventTime::DateTimeFloating(dt) => local_to_utc(*dt, local),
            EventTime::DateTimeZoned { datetime, tzid } => match tzid.parse::<chrono_tz::Tz>() {
                Ok(tz) => local_to_utc(*datetime, &tz),
                Err(_) => {
                    tracing::debug!(tzid = %tzid, "unknown TZID, using local zone");
                    local_to_utc(*datetime, local)
                }
            },
        }
    }

    /// Shift by a duration, keeping the variant. Dates move by whole days.
    ///
    /// Returns `None` when the result is outside the representable range.
    pub fn shifted(&self, by: Duration) -> Option<EventTime> {
        Some(match self {
            EventTime::Date(d) => {
                let days = Duration::try_days(by.num_days().max(1))?;
                EventTime::Date(d.checked_add_signed(days)?)
            }
            EventTime::DateTimeUtc(dt) => EventTime::DateTimeUtc(dt.checked_add_signed(by)?),
            EventTime::DateTimeFloating(dt) => {
                EventTime::DateTimeFloating(dt.checked_add_signed(by)?)
            }
            EventTime::DateTimeZoned { datetime, tzid } => EventTime::DateTimeZoned {
                datetime: datetime.checked_add_signed(by)?,
                tzid: tzid.clone(),
            },
        })
    }
}

impl Event {
    pub fn is_all_day(&self) -> bool {
        self.start.is_date()
    }

    /// Start and exclusive end as instants.
    pub fn span<Tz: TimeZone>(&self, local: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.start.resolve(local);
        let end = self.end.resolve(local).max(start);
        (start, end)
    }

    /// Whether any part of the event falls inside `[from, to)`.
    ///
    /// Zero-length events count when their start is inside the range.
    pub fn overlaps<Tz: TimeZone>(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        local: &Tz,
    ) -> bool {
        let (start, end) = self.span(local);
        if start == end {
            return start >= from && start < to;
        }
        start < to && end > from
    }
}

/// Map a wall-clock time in `tz` to UTC.
///
/// Ambiguous times (DST fall-back) take the earlier instant. Times inside a
/// DST gap are pushed forward by an hour.
pub fn local_to_utc<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> DateTime<Utc> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            let later = naive.checked_add_signed(Duration::hours(1))?;
            tz.from_local_datetime(&later).earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}
