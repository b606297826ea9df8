use anyhow::{Context, Result};
use chrono::{Days, NaiveDate, NaiveTime};
use regex::Regex;

use super::schedule_scraper::LiveEntry;
use crate::config::TournamentConfig;
use crate::domain::MatchRecord;

/// Places live matches on the tournament calendar.
///
/// The schedule page has no machine-readable dates, so this is a heuristic:
/// match `i` lands on `first_match_day + i / matches_per_day`. The time comes
/// from the page label when it holds a clock time, otherwise from the
/// early/late session hour for the match's position within its day.
pub struct SessionSlotPlanner {
    first_match_day: NaiveDate,
    matches_per_day: usize,
    early_session: NaiveTime,
    late_session: NaiveTime,
    clock_regex: Regex,
}

impl SessionSlotPlanner {
    pub fn new(tournament: &TournamentConfig) -> Result<Self> {
        let clock_regex = Regex::new(
            r"(?i)(?:^|[^\d.:])(\d{1,2})[:.](\d{2})(?:\s*([ap])\.?\s*m\b\.?)?(?:$|[^\d.:])",
        )
        .context("Failed to compile clock time regex")?;

        Ok(Self {
            first_match_day: tournament.first_match_day,
            matches_per_day: tournament.matches_per_day.max(1) as usize,
            early_session: tournament.early_session,
            late_session: tournament.late_session,
            clock_regex,
        })
    }

    /// Turn scraped blocks into records, in page order
    pub fn plan(&self, entries: &[LiveEntry]) -> Vec<MatchRecord> {
        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                MatchRecord::approximate(
                    self.date_for(index),
                    self.time_for(index, &entry.time_label),
                    &entry.player1,
                    &entry.player2,
                    &entry.time_label,
                )
            })
            .collect()
    }

    pub fn date_for(&self, index: usize) -> NaiveDate {
        let offset = (index / self.matches_per_day) as u64;
        self.first_match_day + Days::new(offset)
    }

    pub fn time_for(&self, index: usize, label: &str) -> NaiveTime {
        self.parse_clock_time(label)
            .unwrap_or_else(|| self.session_hour(index))
    }

    fn session_hour(&self, index: usize) -> NaiveTime {
        if index % self.matches_per_day == 0 {
            self.early_session
        } else {
            self.late_session
        }
    }

    /// First clock time in a label: `14:00`, `2:00 PM`, `8.30pm`
    pub fn parse_clock_time(&self, label: &str) -> Option<NaiveTime> {
        let captures = self.clock_regex.captures(label)?;
        let hour: u32 = captures.get(1)?.as_str().parse().ok()?;
        let minute: u32 = captures.get(2)?.as_str().parse().ok()?;

        let hour = match captures.get(3).map(|m| m.as_str().to_ascii_lowercase()) {
            Some(meridiem) => {
                if !(1..=12).contains(&hour) {
                    return None;
                }
                if meridiem == "p" { hour % 12 + 12 } else { hour % 12 }
            }
            None => hour,
        };

        NaiveTime::from_hms_opt(hour, minute, 0)
    }
}
