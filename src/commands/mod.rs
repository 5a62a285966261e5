pub mod calendars;
pub mod query;
