use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeDelta, TimeZone};
use chrono_tz::Tz;
use log::{info, warn};
use std::collections::HashSet;

use crate::config::TournamentConfig;
use crate::config::settings::CalendarSettings;
use crate::domain::{
    CalendarEntry, MatchCalendar, MatchRecord, MatchSlot, Reminder, ScheduleSnapshot, SourceKind,
};

/// Turns normalized match records into timed calendar entries
pub struct CalendarBuilder<'a> {
    tournament: &'a TournamentConfig,
    settings: &'a CalendarSettings,
}

impl<'a> CalendarBuilder<'a> {
    pub fn new(tournament: &'a TournamentConfig, settings: &'a CalendarSettings) -> Self {
        Self {
            tournament,
            settings,
        }
    }

    /// One entry with one reminder per record, in input order
    pub fn build(&self, snapshot: &ScheduleSnapshot) -> Result<MatchCalendar> {
        let mut calendar = MatchCalendar::new(
            self.tournament.calendar_name,
            self.tournament.product_id,
            self.settings.timezone,
        );
        let mut seen_uids = HashSet::new();

        for (index, record) in snapshot.records.iter().enumerate() {
            let entry = self
                .build_entry(index, record, snapshot.source)
                .with_context(|| {
                    format!(
                        "Failed to build event for {} vs {} on {}",
                        record.player1, record.player2, record.date
                    )
                })?;

            if !seen_uids.insert(entry.uid.clone()) {
                warn!("Duplicate event UID {} (same date, time and players)", entry.uid);
            }
            calendar.add(entry);
        }

        info!(
            "  → Built {} calendar entries from {} source",
            calendar.len(),
            snapshot.source
        );
        Ok(calendar)
    }

    fn build_entry(
        &self,
        index: usize,
        record: &MatchRecord,
        source: SourceKind,
    ) -> Result<CalendarEntry> {
        let start = self.localize(record.date, record.start_time())?;
        let end = self.resolve_end(record, start)?;

        Ok(CalendarEntry {
            uid: self.uid(index, record, source),
            summary: self.summary(record),
            description: self.description(record),
            start,
            end,
            reminder: self.reminder(start),
        })
    }

    // --- Timing ---

    fn localize(&self, date: NaiveDate, time: NaiveTime) -> Result<DateTime<Tz>> {
        let naive = date.and_time(time);
        self.settings
            .timezone
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| anyhow!("{} does not exist in {}", naive, self.settings.timezone))
    }

    fn resolve_end(&self, record: &MatchRecord, start: DateTime<Tz>) -> Result<DateTime<Tz>> {
        let end = match &record.slot {
            MatchSlot::Scheduled {
                start: start_time,
                end: end_time,
                ..
            } => {
                if end_time == start_time {
                    bail!("start and end time are both {}", start_time.format("%H:%M"));
                }
                // An end before the start means the match runs past midnight
                let end_date = if end_time < start_time {
                    record.date + Days::new(1)
                } else {
                    record.date
                };
                self.localize(end_date, *end_time)?
            }
            MatchSlot::Approximate { .. } => {
                start + TimeDelta::minutes(self.settings.live_match_minutes)
            }
        };

        if end <= start {
            bail!("end {} is not after start {}", end, start);
        }
        Ok(end)
    }

    fn reminder(&self, start: DateTime<Tz>) -> Reminder {
        let offset = -TimeDelta::minutes(self.settings.reminder_minutes);
        Reminder {
            offset,
            trigger: start + offset,
            text: self.settings.reminder_text.to_string(),
        }
    }

    // --- Text Fields ---

    fn summary(&self, record: &MatchRecord) -> String {
        format!(
            "{} vs {} ({})",
            record.player1, record.player2, self.tournament.location
        )
    }

    fn description(&self, record: &MatchRecord) -> String {
        match &record.slot {
            MatchSlot::Scheduled { session, .. } => {
                format!("{} - {} Session", self.tournament.name, session)
            }
            MatchSlot::Approximate { label, .. } => format!(
                "{} - Tour-reported scheduled time: {}. Not a confirmed slot; \
                 date and time are approximated from the live order of play.",
                self.tournament.name, label
            ),
        }
    }

    fn uid(&self, index: usize, record: &MatchRecord, source: SourceKind) -> String {
        match source {
            SourceKind::Fallback => format!(
                "{}-{}-{}-{}@{}",
                record.date.format("%Y-%m-%d"),
                record.start_time().format("%H:%M"),
                uid_part(&record.player1),
                uid_part(&record.player2),
                self.tournament.uid_domain
            ),
            SourceKind::Live => format!("live-{:03}@{}", index + 1, self.tournament.uid_domain),
        }
    }
}

/// Injective name encoding: spaces become `_`, separators and anything else
/// outside letters, digits, `.` and `'` are percent-escaped
fn uid_part(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        match ch {
            ' ' => out.push('_'),
            c if c.is_alphanumeric() || c == '.' || c == '\'' => out.push(c),
            c => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    out.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::atp_finals_2025;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn build(snapshot: &ScheduleSnapshot) -> Result<MatchCalendar> {
        let tournament = atp_finals_2025();
        let settings = CalendarSettings::default();
        CalendarBuilder::new(&tournament, &settings).build(snapshot)
    }

    fn fallback_snapshot() -> ScheduleSnapshot {
        ScheduleSnapshot::new(
            SourceKind::Fallback,
            vec![
                MatchRecord::scheduled(date(10), time(13, 0), time(15, 0), "Alice", "Bob", "Day"),
                MatchRecord::scheduled(date(10), time(21, 0), time(23, 0), "Carol", "Dave", "Night"),
                MatchRecord::scheduled(date(11), time(22, 30), time(0, 45), "Erin", "Frank", "Night"),
            ],
        )
    }

    #[test]
    fn test_fallback_entries_take_times_literally() {
        let calendar = build(&fallback_snapshot()).unwrap();
        let first = &calendar.entries[0];

        assert_eq!(calendar.len(), 3);
        assert_eq!(first.summary, "Alice vs Bob (Turin)");
        assert_eq!(first.description, "ATP Finals 2025 Singles - Day Session");
        assert_eq!(first.start.naive_local(), date(10).and_time(time(13, 0)));
        assert_eq!(first.end.naive_local(), date(10).and_time(time(15, 0)));
        assert_eq!(first.start.timezone(), chrono_tz::Europe::Rome);
        assert_eq!(first.uid, "2025-11-10-13:00-Alice-Bob@atp2025");
    }

    #[test]
    fn test_end_is_after_start_across_midnight() {
        let calendar = build(&fallback_snapshot()).unwrap();

        assert!(calendar.entries.iter().all(|e| e.end > e.start));
        let late = &calendar.entries[2];
        assert_eq!(late.end.naive_local(), date(12).and_time(time(0, 45)));
        assert_eq!(late.duration(), TimeDelta::minutes(135));
    }

    #[test]
    fn test_zero_length_match_is_rejected() {
        let snapshot = ScheduleSnapshot::new(
            SourceKind::Fallback,
            vec![MatchRecord::scheduled(date(10), time(13, 0), time(13, 0), "A", "B", "Day")],
        );
        assert!(build(&snapshot).is_err());
    }

    #[test]
    fn test_every_entry_has_one_reminder_thirty_minutes_before() {
        let calendar = build(&fallback_snapshot()).unwrap();

        for entry in &calendar.entries {
            assert_eq!(entry.reminder.trigger, entry.start - TimeDelta::minutes(30));
            assert_eq!(entry.reminder.offset, TimeDelta::minutes(-30));
            assert_eq!(entry.reminder.text, "Reminder");
        }
    }

    #[test]
    fn test_uids_are_unique() {
        let calendar = build(&fallback_snapshot()).unwrap();
        let uids: HashSet<_> = calendar.entries.iter().map(|e| e.uid.as_str()).collect();
        assert_eq!(uids.len(), calendar.len());
    }

    #[test]
    fn test_live_entries_get_two_hours_and_a_confidence_note() {
        let snapshot = ScheduleSnapshot::new(
            SourceKind::Live,
            vec![
                MatchRecord::approximate(date(9), time(14, 0), "Jannik Sinner", "Ben Shelton", "TBD"),
                MatchRecord::approximate(date(9), time(20, 30), "Jannik Sinner", "Ben Shelton", "TBD"),
            ],
        );

        let calendar = build(&snapshot).unwrap();

        assert_eq!(calendar.entries[0].duration(), TimeDelta::hours(2));
        assert_eq!(calendar.entries[0].uid, "live-001@atp2025");
        assert_eq!(calendar.entries[1].uid, "live-002@atp2025");
        assert!(calendar.entries[0].description.contains("Tour-reported scheduled time: TBD"));
        assert!(calendar.entries[0].description.contains("Not a confirmed slot"));
    }

    #[test]
    fn test_names_with_spaces_in_uid() {
        let snapshot = ScheduleSnapshot::new(
            SourceKind::Fallback,
            vec![MatchRecord::scheduled(
                date(12),
                time(14, 0),
                time(16, 0),
                "Alex de Minaur",
                "Taylor Fritz",
                "Day",
            )],
        );

        let calendar = build(&snapshot).unwrap();

        assert_eq!(calendar.entries[0].uid, "2025-11-12-14:00-Alex_de_Minaur-Taylor_Fritz@atp2025");
    }

    #[test]
    fn test_uids_of_distinct_players_never_collide() {
        let pairs = [
            ("Auger-Aliassime", "X"),
            ("Auger", "Aliassime-X"),
            ("Alex de Minaur", "Y"),
            ("Alex_de_Minaur", "Y"),
            ("A@b", "C"),
            ("A%40b", "C"),
        ];
        let snapshot = ScheduleSnapshot::new(
            SourceKind::Fallback,
            pairs
                .iter()
                .map(|(p1, p2)| MatchRecord::scheduled(date(13), time(14, 0), time(16, 0), p1, p2, "Day"))
                .collect(),
        );

        let calendar = build(&snapshot).unwrap();

        let uids: HashSet<_> = calendar.entries.iter().map(|e| e.uid.as_str()).collect();
        assert_eq!(uids.len(), pairs.len());
        assert_eq!(calendar.entries[0].uid, "2025-11-13-14:00-Auger%2DAliassime-X@atp2025");
        assert_eq!(calendar.entries[3].uid, "2025-11-13-14:00-Alex%5Fde%5FMinaur-Y@atp2025");
    }

    #[test]
    fn test_ambiguous_local_time_takes_earlier_instant() {
        // Clocks in Rome fall back from 03:00 CEST to 02:00 CET on 2025-10-26
        let day = NaiveDate::from_ymd_opt(2025, 10, 26).unwrap();
        let snapshot = ScheduleSnapshot::new(
            SourceKind::Fallback,
            vec![MatchRecord::scheduled(day, time(2, 30), time(4, 0), "A", "B", "Night")],
        );

        let calendar = build(&snapshot).unwrap();
        let entry = &calendar.entries[0];

        let expected = day.and_time(time(0, 30)).and_utc();
        assert_eq!(entry.start.with_timezone(&chrono::Utc), expected);
        assert_eq!(entry.duration(), TimeDelta::minutes(150));
    }

    #[test]
    fn test_nonexistent_local_time_is_an_error() {
        // Clocks in Rome jump from 02:00 to 03:00 on 2025-03-30
        let snapshot = ScheduleSnapshot::new(
            SourceKind::Fallback,
            vec![MatchRecord::scheduled(
                NaiveDate::from_ymd_opt(2025, 3, 30).unwrap(),
                time(2, 30),
                time(4, 0),
                "A",
                "B",
                "Night",
            )],
        );
        assert!(build(&snapshot).is_err());
    }

    #[test]
    fn test_empty_snapshot_builds_empty_calendar() {
        let calendar = build(&ScheduleSnapshot::new(SourceKind::Fallback, Vec::new())).unwrap();
        assert!(calendar.is_empty());
        assert_eq!(calendar.name, "ATP Finals 2025 Singles (Turin)");
    }
}
