use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use icalendar::{Alarm, Calendar, CalendarDateTime, Component, DatePerhapsTime, Event, EventLike};
use log::info;
use std::fs;
use std::path::Path;

use crate::domain::{CalendarEntry, MatchCalendar};

/// Serialize to iCalendar text, one VEVENT with one VALARM per entry
pub fn to_ics(calendar: &MatchCalendar) -> String {
    let mut ics = Calendar::new();
    ics.name(&calendar.name).timezone(calendar.timezone.name());

    for entry in &calendar.entries {
        ics.push(to_event(entry));
    }

    with_product_id(ics.to_string(), &calendar.product_id)
}

/// Overwrite `path` with the serialized calendar
pub fn write_calendar(path: &Path, calendar: &MatchCalendar) -> Result<()> {
    fs::write(path, to_ics(calendar))
        .with_context(|| format!("Failed to write calendar file {}", path.display()))?;

    info!("Saved calendar: {}", path.display());
    Ok(())
}

fn to_event(entry: &CalendarEntry) -> Event {
    Event::new()
        .uid(&entry.uid)
        .summary(&entry.summary)
        .description(&entry.description)
        .starts(utc(&entry.start))
        .ends(utc(&entry.end))
        .alarm(to_alarm(entry))
        .done()
}

fn to_alarm(entry: &CalendarEntry) -> Alarm {
    Alarm::display(&entry.reminder.text, entry.reminder.offset)
        .uid(&format!("{}-alarm", entry.uid))
        .done()
}

// UTC instants need no VTIMEZONE; X-WR-TIMEZONE carries the venue zone for display
fn utc(instant: &DateTime<Tz>) -> DatePerhapsTime {
    DatePerhapsTime::DateTime(CalendarDateTime::Utc(instant.with_timezone(&Utc)))
}

// The writer always emits its own PRODID line; swap in ours
fn with_product_id(mut ics: String, product_id: &str) -> String {
    let line = format!("PRODID:{}", product_id);

    match ics.find("PRODID:") {
        Some(start) => {
            let end = ics[start..].find("\r\n").map_or(ics.len(), |len| start + len);
            ics.replace_range(start..end, &line);
        }
        None => {
            let at = ics.find("\r\n").map_or(ics.len(), |len| len + 2);
            ics.insert_str(at, &format!("{}\r\n", line));
        }
    }
    ics
}
