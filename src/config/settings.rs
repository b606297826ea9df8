use std::path::PathBuf;

use chrono_tz::Tz;
use clap::ValueEnum;

use super::tournament::{TournamentConfig, atp_finals_2025};

pub struct CalendarSettings {
    pub timezone: Tz,
    pub reminder_minutes: i64,
    pub reminder_text: &'static str,
    pub live_match_minutes: i64,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Europe::Rome,
            reminder_minutes: 30,
            reminder_text: "Reminder",
            live_match_minutes: 120, // tour pages publish no end times
        }
    }
}

pub struct LiveSourceSettings {
    pub url: String,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub entry_selector: &'static str,
    pub name_selector: &'static str,
    pub time_selector: &'static str,
}

impl Default for LiveSourceSettings {
    fn default() -> Self {
        Self {
            url: "https://www.nittoatpfinals.com/en/schedule".to_string(),
            user_agent: "AtpFinalsCalendar/1.0",
            timeout_secs: 10,
            entry_selector: ".entry-box",
            name_selector: ".name",
            time_selector: ".time",
        }
    }
}

pub struct OutputSettings {
    pub fallback_path: PathBuf,
    pub calendar_path: PathBuf,
    pub log_path: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            fallback_path: PathBuf::from("matches.csv"),
            calendar_path: PathBuf::from("ATP_Finals_2025_Singles_Turin.ics"),
            log_path: PathBuf::from("atp_finals_calendar.log"),
        }
    }
}

/// Which schedule sources a run may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SourcePolicy {
    /// Live page first, fallback file when it yields nothing
    #[default]
    Auto,
    /// Live page only; no data means an empty calendar
    Live,
    /// Fallback file only, no network access
    Fallback,
}

pub struct AppConfig {
    pub source_policy: SourcePolicy,
    pub tournament: TournamentConfig,
    pub calendar: CalendarSettings,
    pub live: LiveSourceSettings,
    pub output: OutputSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            source_policy: SourcePolicy::default(),
            tournament: atp_finals_2025(),
            calendar: CalendarSettings::default(),
            live: LiveSourceSettings::default(),
            output: OutputSettings::default(),
        }
    }
}
