//! Calendar store access.

mod calendar_config;
mod directory;

use chrono::TimeZone;
use serde::Serialize;

use crate::error::{CalQueryError, CalQueryResult};
use crate::event::Event;
use crate::record::{EventRecord, sort_by_start};
use crate::window::QueryWindow;

pub use calendar_config::CalendarConfig;
pub use directory::DirectoryStore;

/// A calendar as listed by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarInfo {
    /// Stable identifier (directory name for `DirectoryStore`)
    pub identifier: String,
    /// Display title
    pub title: String,
}

impl CalendarInfo {
    pub fn matches(&self, name: &str) -> bool {
        self.title == name || self.identifier == name
    }
}

/// Read-only view of a calendar store.
pub trait CalendarStore {
    /// Every calendar, in a stable order.
    fn calendars(&self) -> CalQueryResult<Vec<CalendarInfo>>;

    /// Events of `calendar` overlapping `window`, in store order.
    fn events<Tz: TimeZone>(
        &self,
        calendar: &CalendarInfo,
        window: &QueryWindow,
        local: &Tz,
    ) -> CalQueryResult<Vec<Event>>;

    /// First calendar whose title or identifier equals `name`.
    fn find_calendar(&self, name: &str) -> CalQueryResult<CalendarInfo> {
        self.calendars()?
            .into_iter()
            .find(|c| c.matches(name))
            .ok_or_else(|| CalQueryError::CalendarNotFound(name.to_string()))
    }

    /// Resolve `name`, query `window` and return records sorted by start.
    fn query<Tz: TimeZone>(
        &self,
        name: &str,
        window: &QueryWindow,
        local: &Tz,
    ) -> CalQueryResult<Vec<EventRecord>> {
        let calendar = self.find_calendar(name)?;
        tracing::debug!(
            calendar = %calendar.identifier,
            from = %window.from,
            to = %window.to,
            "querying events"
        );

        let mut records: Vec<EventRecord> = self
            .events(&calendar, window, local)?
            .iter()
            .map(|event| EventRecord::from_event(event, local))
            .collect();
        sort_by_start(&mut records);

        tracing::debug!(count = records.len(), "query finished");
        Ok(records)
    }
}
