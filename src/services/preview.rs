use anyhow::{Context, Result};
use colored::Colorize;

use crate::domain::{MatchCalendar, ScheduleSnapshot, SourceKind};

/// Plain listing of the entries a run would write
pub fn render_table(snapshot: &ScheduleSnapshot, calendar: &MatchCalendar) -> String {
    let source = match snapshot.source {
        SourceKind::Live => "live (approximate times)".yellow(),
        SourceKind::Fallback => "fallback file".green(),
    };

    let mut out = format!(
        "{}: {} matches from {}\n",
        calendar.name.bold(),
        calendar.len(),
        source
    );

    for entry in &calendar.entries {
        out.push_str(&format!(
            "  {} - {}  {}\n      {}\n",
            entry.start.format("%a %d %b %H:%M"),
            entry.end.format("%H:%M %Z"),
            entry.summary.bold(),
            entry.description.dimmed()
        ));
    }

    out
}

/// Normalized records as pretty JSON
pub fn render_json(snapshot: &ScheduleSnapshot) -> Result<String> {
    serde_json::to_string_pretty(snapshot).context("Failed to serialize schedule")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarBuilder;
    use crate::config::atp_finals_2025;
    use crate::config::settings::CalendarSettings;
    use crate::domain::MatchRecord;
    use chrono::{NaiveDate, NaiveTime};

    fn snapshot() -> ScheduleSnapshot {
        ScheduleSnapshot::new(
            SourceKind::Fallback,
            vec![MatchRecord::scheduled(
                NaiveDate::from_ymd_opt(2025, 11, 10).unwrap(),
                NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
                "Alice",
                "Bob",
                "Day",
            )],
        )
    }

    #[test]
    fn test_table_lists_each_entry() {
        let snapshot = snapshot();
        let tournament = atp_finals_2025();
        let settings = CalendarSettings::default();
        let calendar = CalendarBuilder::new(&tournament, &settings).build(&snapshot).unwrap();

        let table = render_table(&snapshot, &calendar);

        assert!(table.contains("1 matches"));
        assert!(table.contains("Mon 10 Nov 13:00"));
        assert!(table.contains("Alice vs Bob (Turin)"));
    }

    #[test]
    fn test_json_keeps_slot_kind() {
        let json = render_json(&snapshot()).unwrap();

        assert!(json.contains("\"source\": \"fallback\""));
        assert!(json.contains("\"kind\": \"scheduled\""));
        assert!(json.contains("\"date\": \"2025-11-10\""));
    }
}
