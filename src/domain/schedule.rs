use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::fmt;

/// Origin of a schedule snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Live,
    Fallback,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Live => write!(f, "live"),
            SourceKind::Fallback => write!(f, "fallback"),
        }
    }
}

/// When a match is played, as far as its source knows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchSlot {
    /// Explicit start and end from the fallback file
    Scheduled {
        start: NaiveTime,
        end: NaiveTime,
        session: String,
    },
    /// Single tour-reported time; `label` is the raw text from the page
    Approximate { start: NaiveTime, label: String },
}

/// One scheduled singles match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    pub date: NaiveDate,
    pub player1: String,
    pub player2: String,
    pub slot: MatchSlot,
}

impl MatchRecord {
    pub fn scheduled(
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        player1: &str,
        player2: &str,
        session: &str,
    ) -> Self {
        Self {
            date,
            player1: player1.to_string(),
            player2: player2.to_string(),
            slot: MatchSlot::Scheduled {
                start,
                end,
                session: session.to_string(),
            },
        }
    }

    pub fn approximate(
        date: NaiveDate,
        start: NaiveTime,
        player1: &str,
        player2: &str,
        label: &str,
    ) -> Self {
        Self {
            date,
            player1: player1.to_string(),
            player2: player2.to_string(),
            slot: MatchSlot::Approximate {
                start,
                label: label.to_string(),
            },
        }
    }

    pub fn start_time(&self) -> NaiveTime {
        match &self.slot {
            MatchSlot::Scheduled { start, .. } | MatchSlot::Approximate { start, .. } => *start,
        }
    }

    pub fn session(&self) -> Option<&str> {
        match &self.slot {
            MatchSlot::Scheduled { session, .. } => Some(session),
            MatchSlot::Approximate { .. } => None,
        }
    }
}

/// Records from whichever source won, tagged with that source
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleSnapshot {
    pub source: SourceKind,
    pub records: Vec<MatchRecord>,
}

impl ScheduleSnapshot {
    pub fn new(source: SourceKind, records: Vec<MatchRecord>) -> Self {
        Self { source, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
