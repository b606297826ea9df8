mod calendar;
mod schedule;

pub use calendar::{CalendarEntry, MatchCalendar, Reminder};
pub use schedule::{MatchRecord, MatchSlot, ScheduleSnapshot, SourceKind};
