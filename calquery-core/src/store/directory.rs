//! Calendar store backed by a caldir directory.
//!
//! Layout:
//!
//! ```text
//! ~/calendar/
//!   work/
//!     .caldir/config.toml
//!     2025-03-20T1500__planning.ics
//!   personal/
//!     ...
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::TimeZone;

use super::{CalendarConfig, CalendarInfo, CalendarStore};
use crate::error::{CalQueryError, CalQueryResult};
use crate::event::Event;
use crate::ics::parse_events;
use crate::store_config::StoreConfig;
use crate::window::QueryWindow;

#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryStore { root: root.into() }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.data_path())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn calendar_info(path: &Path) -> Option<CalendarInfo> {
        let identifier = path.file_name()?.to_str()?.to_string();

        let title = match CalendarConfig::load(path) {
            Ok(config) => config.name,
            Err(e) => {
                tracing::warn!(calendar = %identifier, error = %e, "ignoring calendar config");
                None
            }
        }
        .unwrap_or_else(|| identifier.clone());

        Some(CalendarInfo { identifier, title })
    }
}

impl CalendarStore for DirectoryStore {
    /// Calendars are subdirectories holding a `.caldir` directory, sorted by
    /// identifier. A missing root means an empty store.
    fn calendars(&self) -> CalQueryResult<Vec<CalendarInfo>> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(root = %self.root.display(), "calendar directory does not exist");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut calendars: Vec<CalendarInfo> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir() && path.join(".caldir").exists())
            .filter_map(|path| Self::calendar_info(&path))
            .collect();

        calendars.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        tracing::debug!(root = %self.root.display(), count = calendars.len(), "scanned calendars");
        Ok(calendars)
    }

    /// Every `.ics` file in the calendar directory is read. Files that fail
    /// to parse are skipped.
    fn events<Tz: TimeZone>(
        &self,
        calendar: &CalendarInfo,
        window: &QueryWindow,
        local: &Tz,
    ) -> CalQueryResult<Vec<Event>> {
        let dir = self.root.join(&calendar.identifier);

        let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|e| e == "ics"))
            .collect();
        paths.sort();

        let mut events = Vec::new();
        for path in paths {
            let parsed = std::fs::read_to_string(&path)
                .map_err(CalQueryError::from)
                .and_then(|content| parse_events(&content));

            match parsed {
                Ok(parsed) => {
                    events.extend(parsed.into_iter().filter(|e| window.matches(e, local)));
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping event file");
                }
            }
        }

        Ok(events)
    }
}
