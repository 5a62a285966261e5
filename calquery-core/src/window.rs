//! Query window built from day offsets around local midnight.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::error::{CalQueryError, CalQueryResult};
use crate::event::{Event, local_to_utc};

/// Half-open range `[from, to)` of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl QueryWindow {
    /// Window from `today + start_offset` midnight to `today + end_offset`
    /// midnight, with midnights taken in `tz`.
    pub fn from_offsets<Tz: TimeZone>(
        today: NaiveDate,
        start_offset: i64,
        end_offset: i64,
        tz: &Tz,
    ) -> CalQueryResult<Self> {
        Ok(QueryWindow {
            from: midnight_after(today, start_offset, tz)?,
            to: midnight_after(today, end_offset, tz)?,
        })
    }

    /// A window whose end is not after its start matches nothing.
    pub fn is_empty(&self) -> bool {
        self.to <= self.from
    }

    pub fn matches<Tz: TimeZone>(&self, event: &Event, local: &Tz) -> bool {
        !self.is_empty() && event.overlaps(self.from, self.to, local)
    }
}

fn midnight_after<Tz: TimeZone>(
    today: NaiveDate,
    offset_days: i64,
    tz: &Tz,
) -> CalQueryResult<DateTime<Utc>> {
    let day = Duration::try_days(offset_days)
        .and_then(|d| today.checked_add_signed(d))
        .ok_or_else(|| {
            CalQueryError::InvalidRange(format!("day offset {} is out of range", offset_days))
        })?;

    Ok(local_to_utc(day.and_time(NaiveTime::MIN), tz))
}
