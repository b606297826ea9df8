mod builder;
mod ics;

pub use builder::CalendarBuilder;
pub use ics::{to_ics, write_calendar};
