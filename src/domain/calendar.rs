use chrono::{DateTime, TimeDelta};
use chrono_tz::Tz;

/// Display alarm attached to a calendar entry
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    /// Offset relative to the entry start (negative = before)
    pub offset: TimeDelta,
    pub trigger: DateTime<Tz>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEntry {
    pub uid: String,
    pub summary: String,
    pub description: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub reminder: Reminder,
}

impl CalendarEntry {
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}

/// In-memory calendar, one entry per match in source order
#[derive(Debug, Clone)]
pub struct MatchCalendar {
    pub name: String,
    pub product_id: String,
    pub timezone: Tz,
    pub entries: Vec<CalendarEntry>,
}

impl MatchCalendar {
    pub fn new(name: &str, product_id: &str, timezone: Tz) -> Self {
        Self {
            name: name.to_string(),
            product_id: product_id.to_string(),
            timezone,
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, entry: CalendarEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
