use calquery_core::{CalQueryResult, CalendarStore};

use crate::output::{JsonStyle, to_json};

pub fn run<S: CalendarStore>(store: &S, style: JsonStyle) -> CalQueryResult<String> {
    let calendars = store.calendars()?;
    to_json(&calendars, style)
}
