mod csv_schedule;
mod schedule_scraper;
mod session_slots;

pub use csv_schedule::{REQUIRED_COLUMNS, read_schedule, read_schedule_file};
pub use schedule_scraper::{LiveEntry, ScheduleScraper};
pub use session_slots::SessionSlotPlanner;

use anyhow::Result;

use crate::config::AppConfig;
use crate::domain::MatchRecord;
use crate::errors::FallbackError;

/// Normalizes both schedule origins into [`MatchRecord`]s
pub struct SourceAdapter<'a> {
    config: &'a AppConfig,
}

impl<'a> SourceAdapter<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    /// One attempt at the live page. `Ok` with no records means the page had
    /// no block with exactly two players.
    pub async fn fetch_live(&self) -> Result<Vec<MatchRecord>> {
        let scraper = ScheduleScraper::new(&self.config.live)?;
        let entries = scraper.scrape_entries().await?;

        let planner = SessionSlotPlanner::new(&self.config.tournament)?;
        Ok(planner.plan(&entries))
    }

    pub fn read_fallback(&self) -> Result<Vec<MatchRecord>, FallbackError> {
        read_schedule_file(&self.config.output.fallback_path)
    }
}
