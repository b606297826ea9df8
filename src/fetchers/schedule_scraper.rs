use anyhow::{Result, anyhow};
use log::{debug, info, warn};
use scraper::{ElementRef, Html, Selector};

use crate::config::settings::LiveSourceSettings;
use crate::http::TimeoutClient;

const UNKNOWN_TIME_LABEL: &str = "TBD";

/// One match block from the live schedule page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveEntry {
    pub player1: String,
    pub player2: String,
    pub time_label: String,
}

struct EntrySelectors {
    entry: Selector,
    name: Selector,
    time: Selector,
}

impl EntrySelectors {
    fn compile(settings: &LiveSourceSettings) -> Result<Self> {
        Ok(Self {
            entry: compile_selector(settings.entry_selector)?,
            name: compile_selector(settings.name_selector)?,
            time: compile_selector(settings.time_selector)?,
        })
    }
}

/// Scraper for the tournament's daily order-of-play page
pub struct ScheduleScraper {
    client: TimeoutClient,
    url: String,
    selectors: EntrySelectors,
}

impl ScheduleScraper {
    pub fn new(settings: &LiveSourceSettings) -> Result<Self> {
        let client = TimeoutClient::new(settings.user_agent, settings.timeout_secs)?;
        let selectors = EntrySelectors::compile(settings)?;

        Ok(Self {
            client,
            url: settings.url.clone(),
            selectors,
        })
    }

    /// Fetch the page once and extract every block with exactly two players
    pub async fn scrape_entries(&self) -> Result<Vec<LiveEntry>> {
        info!("Fetching live schedule: {}", self.url);

        let html = self.fetch_page().await?;
        let entries = self.extract_entries(&html);

        if entries.is_empty() {
            warn!("No match blocks found on {}", self.url);
            let body_text = html.root_element().text().collect::<String>();
            debug!("Page content snippet: {}", body_text.chars().take(500).collect::<String>());
        } else {
            info!("  → Found {} match blocks", entries.len());
        }

        Ok(entries)
    }

    async fn fetch_page(&self) -> Result<Html> {
        let html_text = self.client.get_text(&self.url).await?;
        Ok(Html::parse_document(&html_text))
    }

    // --- Entry Extraction ---

    pub fn extract_entries(&self, html: &Html) -> Vec<LiveEntry> {
        html.select(&self.selectors.entry)
            .filter_map(|block| self.parse_entry(block))
            .collect()
    }

    fn parse_entry(&self, block: ElementRef<'_>) -> Option<LiveEntry> {
        let names: Vec<String> = block
            .select(&self.selectors.name)
            .map(element_text)
            .filter(|name| !name.is_empty())
            .collect();

        let [player1, player2] = match <[String; 2]>::try_from(names) {
            Ok(pair) => pair,
            Err(names) => {
                debug!("Skipping block with {} player names", names.len());
                return None;
            }
        };

        let time_label = block
            .select(&self.selectors.time)
            .next()
            .map(element_text)
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| UNKNOWN_TIME_LABEL.to_string());

        Some(LiveEntry {
            player1,
            player2,
            time_label,
        })
    }
}

fn compile_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid CSS selector '{}': {}", css, e))
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scraper() -> ScheduleScraper {
        ScheduleScraper::new(&LiveSourceSettings::default()).unwrap()
    }

    #[test]
    fn test_entry_extraction() {
        let html = Html::parse_document(
            r#"
            <html>
                <body>
                    <div class="entry-box">
                        <span class="time">Not Before 2:00 PM</span>
                        <a class="name">Jannik  Sinner</a>
                        <a class="name">Alexander
                            Zverev</a>
                    </div>
                    <div class="entry-box">
                        <span class="time">TBD</span>
                        <a class="name">Carlos Alcaraz</a>
                        <a class="name">Taylor Fritz</a>
                    </div>
                </body>
            </html>
            "#,
        );

        let entries = scraper().extract_entries(&html);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].player1, "Jannik Sinner");
        assert_eq!(entries[0].player2, "Alexander Zverev");
        assert_eq!(entries[0].time_label, "Not Before 2:00 PM");
        assert_eq!(entries[1].time_label, "TBD");
    }

    #[test]
    fn test_blocks_without_two_names_are_skipped() {
        let html = Html::parse_document(
            r#"
            <html>
                <body>
                    <div class="entry-box">
                        <span class="time">11:30</span>
                        <a class="name">Only One</a>
                    </div>
                    <div class="entry-box">
                        <a class="name">A</a><a class="name">B</a><a class="name">C</a>
                    </div>
                    <div class="entry-box">
                        <a class="name">Ben Shelton</a>
                        <a class="name">   </a>
                    </div>
                    <div class="entry-box">
                        <a class="name">Lorenzo Musetti</a>
                        <a class="name">Alex de Minaur</a>
                    </div>
                </body>
            </html>
            "#,
        );

        let entries = scraper().extract_entries(&html);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].player1, "Lorenzo Musetti");
        assert_eq!(entries[0].time_label, "TBD");
    }

    #[test]
    fn test_page_without_blocks_yields_nothing() {
        let html = Html::parse_document("<html><body><p>Schedule coming soon</p></body></html>");
        assert!(scraper().extract_entries(&html).is_empty());
    }

    #[test]
    fn test_invalid_selector_is_rejected() {
        let settings = LiveSourceSettings {
            entry_selector: "div[",
            ..LiveSourceSettings::default()
        };
        assert!(ScheduleScraper::new(&settings).is_err());
    }
}
