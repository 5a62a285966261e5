use calquery_core::{CalQueryResult, CalendarStore, QueryWindow};
use chrono::{Local, NaiveDate, TimeZone};

use crate::output::{JsonStyle, to_json};

/// Query `calendar` for the day-offset range around today, in the system zone.
pub fn run<S: CalendarStore>(
    store: &S,
    calendar: &str,
    start_offset: i64,
    end_offset: i64,
    style: JsonStyle,
) -> CalQueryResult<String> {
    let today = Local::now().date_naive();
    render(store, calendar, start_offset, end_offset, today, &Local, style)
}

fn render<S: CalendarStore, Tz: TimeZone>(
    store: &S,
    calendar: &str,
    start_offset: i64,
    end_offset: i64,
    today: NaiveDate,
    tz: &Tz,
    style: JsonStyle,
) -> CalQueryResult<String> {
    let window = QueryWindow::from_offsets(today, start_offset, end_offset, tz)?;
    let records = store.query(calendar, &window, tz)?;
    to_json(&records, style)
}
