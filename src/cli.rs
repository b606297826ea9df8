use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{AppConfig, SourcePolicy};

#[derive(Parser, Debug)]
#[command(author, version, about = "ATP Finals singles schedule to iCalendar converter")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Write the calendar file and the run log
    Generate {
        #[command(flatten)]
        args: SourceArgs,
        /// Calendar output path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Run log path
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Print the calendar entries without writing any file
    Preview {
        #[command(flatten)]
        args: SourceArgs,
        /// Print the normalized matches as JSON instead
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct SourceArgs {
    /// Schedule source selection
    #[arg(long, value_enum, default_value_t = SourcePolicy::Auto)]
    pub source: SourcePolicy,
    /// Fallback CSV schedule (defaults to matches.csv)
    #[arg(long)]
    pub fallback: Option<PathBuf>,
    /// Live schedule page URL
    #[arg(long)]
    pub url: Option<String>,
    /// Venue timezone as an IANA name, e.g. Europe/Rome
    #[arg(long, value_parser = parse_timezone)]
    pub timezone: Option<Tz>,
}

impl SourceArgs {
    pub fn apply(&self, config: &mut AppConfig) {
        config.source_policy = self.source;
        if let Some(path) = &self.fallback {
            config.output.fallback_path = path.clone();
        }
        if let Some(url) = &self.url {
            config.live.url = url.clone();
        }
        if let Some(timezone) = self.timezone {
            config.calendar.timezone = timezone;
        }
    }
}

fn parse_timezone(name: &str) -> Result<Tz, String> {
    name.parse::<Tz>().map_err(|e| e.to_string())
}
