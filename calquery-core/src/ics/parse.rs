//! ICS file parsing using the icalendar crate's parser.

use crate::error::{CalQueryError, CalQueryResult};
use crate::event::{Event, EventTime};
use chrono::Duration;
use icalendar::{
    DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

/// Parse every VEVENT in ICS content.
///
/// Components missing a UID or a usable DTSTART are skipped.
pub fn parse_events(content: &str) -> CalQueryResult<Vec<Event>> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| CalQueryError::IcsParse(e.to_string()))?;

    Ok(calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .filter_map(parse_vevent)
        .collect())
}

/// Parse the first VEVENT in ICS content
#[cfg(test)]
fn parse_event(content: &str) -> Option<Event> {
    parse_events(content).ok()?.into_iter().next()
}

fn parse_vevent(vevent: &Component) -> Option<Event> {
    let uid = vevent.find_prop("UID")?.val.to_string();
    let start = to_event_time(DatePerhapsTime::try_from(vevent.find_prop("DTSTART")?).ok()?);

    let end = vevent
        .find_prop("DTEND")
        .and_then(|p| DatePerhapsTime::try_from(p).ok())
        .map(to_event_time)
        .unwrap_or_else(|| {
            let duration = vevent
                .find_prop("DURATION")
                .and_then(|p| parse_duration(p.val.as_ref()));
            let shifted = match (duration, &start) {
                (Some(d), _) => start.shifted(d),
                (None, EventTime::Date(_)) => start.shifted(Duration::days(1)),
                (None, _) => None,
            };
            shifted.unwrap_or_else(|| start.clone())
        });

    let text = |name: &str| {
        vevent
            .find_prop(name)
            .map(|p| unescape_text(p.val.as_ref()))
            .filter(|s| !s.is_empty())
    };

    Some(Event {
        uid,
        summary: text("SUMMARY"),
        description: text("DESCRIPTION"),
        location: text("LOCATION"),
        url: vevent
            .find_prop("URL")
            .map(|p| p.val.to_string())
            .filter(|s| !s.is_empty()),
        start,
        end,
    })
}

/// Convert icalendar's DatePerhapsTime to our EventTime, preserving timezone info
fn to_event_time(dpt: DatePerhapsTime) -> EventTime {
    match dpt {
        DatePerhapsTime::Date(d) => EventTime::Date(d),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            icalendar::CalendarDateTime::Utc(dt) => EventTime::DateTimeUtc(dt),
            icalendar::CalendarDateTime::Floating(naive) => EventTime::DateTimeFloating(naive),
            icalendar::CalendarDateTime::WithTimezone { date_time, tzid } => {
                EventTime::DateTimeZoned {
                    datetime: date_time,
                    tzid,
                }
            }
        },
    }
}

/// Parse a DURATION value (PT1H30M, P1D, -PT15M)
fn parse_duration(value: &str) -> Option<Duration> {
    let is_negative = value.starts_with('-');
    let duration_str = value.trim_start_matches(['-', '+']);

    let duration = iso8601::duration(duration_str).ok()?;
    let std_duration: std::time::Duration = duration.into();
    let seconds = i64::try_from(std_duration.as_secs()).ok()?;

    Duration::try_seconds(if is_negative { -seconds } else { seconds })
}

/// Undo RFC 5545 TEXT escaping (\n, \, \; \\)
fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
