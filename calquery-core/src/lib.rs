//! Core types for calquery.
//!
//! This crate provides read-only access to a caldir directory:
//! - `event` for the parsed event model and time resolution
//! - `store` for resolving calendars and querying their events
//! - `window` for day-offset query ranges
//! - `record` for the JSON shape printed by the CLI

pub mod error;
pub mod event;
pub mod ics;
pub mod record;
pub mod store;
pub mod store_config;
pub mod window;

pub use error::{CalQueryError, CalQueryResult};
pub use event::{Event, EventTime};
pub use record::EventRecord;
pub use store::{CalendarInfo, CalendarStore, DirectoryStore};
pub use window::QueryWindow;
