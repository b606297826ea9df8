use anyhow::{Context, Result};
use log::{error, info, warn};
use std::path::PathBuf;

use super::run_log::RunLog;
use crate::calendar::{CalendarBuilder, write_calendar};
use crate::config::{AppConfig, SourcePolicy};
use crate::domain::{MatchCalendar, MatchRecord, ScheduleSnapshot, SourceKind};
use crate::fetchers::SourceAdapter;

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub source: SourceKind,
    pub matches: usize,
    pub calendar_path: PathBuf,
}

/// Live page or fallback file in, calendar file and status log out
pub struct GenerationService {
    config: AppConfig,
}

impl GenerationService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        info!("=== Generating Match Calendar ===\n");

        let mut log = RunLog::new();
        let outcome = self.prepare(&mut log).await;

        let (snapshot, calendar) = match outcome {
            Ok(prepared) => prepared,
            Err(e) => {
                error!("No calendar written: {:#}", e);
                log.note(format!("Run failed, no calendar written: {:#}", e));
                self.write_log(&log);
                return Err(e);
            }
        };

        info!("Step 3: Writing calendar...");
        let calendar_path = self.config.output.calendar_path.clone();
        if let Err(e) = write_calendar(&calendar_path, &calendar) {
            log.note(format!("Run failed, no calendar written: {:#}", e));
            self.write_log(&log);
            return Err(e);
        }

        log.note(format!(
            "Wrote {} from {} source: {} matches",
            calendar_path.display(),
            snapshot.source,
            calendar.len()
        ));
        self.write_log(&log);

        info!("=== Calendar Complete ===");
        Ok(RunSummary {
            source: snapshot.source,
            matches: calendar.len(),
            calendar_path,
        })
    }

    /// Acquire a snapshot and build the calendar without writing anything
    pub async fn prepare(&self, log: &mut RunLog) -> Result<(ScheduleSnapshot, MatchCalendar)> {
        info!("Step 1: Acquiring schedule ({:?} policy)...", self.config.source_policy);
        let snapshot = self.acquire(log).await?;
        info!("  → Using {} source with {} matches\n", snapshot.source, snapshot.len());

        info!("Step 2: Building calendar entries...");
        let builder = CalendarBuilder::new(&self.config.tournament, &self.config.calendar);
        let calendar = builder.build(&snapshot)?;

        Ok((snapshot, calendar))
    }

    async fn acquire(&self, log: &mut RunLog) -> Result<ScheduleSnapshot> {
        match self.config.source_policy {
            SourcePolicy::Fallback => self.read_fallback(),
            SourcePolicy::Live => {
                let records = self.try_live(log).await.unwrap_or_default();
                Ok(ScheduleSnapshot::new(SourceKind::Live, records))
            }
            SourcePolicy::Auto => match self.try_live(log).await {
                Some(records) => Ok(ScheduleSnapshot::new(SourceKind::Live, records)),
                None => self.read_fallback(),
            },
        }
    }

    /// `None` when the live page failed or had no usable blocks
    async fn try_live(&self, log: &mut RunLog) -> Option<Vec<MatchRecord>> {
        let adapter = SourceAdapter::new(&self.config);

        match adapter.fetch_live().await {
            Ok(records) if !records.is_empty() => Some(records),
            Ok(_) => {
                warn!("Live schedule had no matches with two players");
                log.note("Live schedule unavailable: no matches with two players on the page");
                None
            }
            Err(e) => {
                warn!("Live schedule unavailable: {:#}", e);
                log.note(format!("Live schedule unavailable: {:#}", e));
                None
            }
        }
    }

    fn read_fallback(&self) -> Result<ScheduleSnapshot> {
        let adapter = SourceAdapter::new(&self.config);
        let records = adapter.read_fallback().context("Fallback schedule failed")?;
        Ok(ScheduleSnapshot::new(SourceKind::Fallback, records))
    }

    fn write_log(&self, log: &RunLog) {
        let path = &self.config.output.log_path;
        match log.write(path) {
            Ok(()) => info!("Saved run log: {}", path.display()),
            Err(e) => warn!("{:#}", e),
        }
    }
}
