pub mod calendar;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fetchers;
pub mod http;
pub mod services;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use std::path::Path;
use tokio::runtime::Runtime;

use crate::cli::{Command, SourceArgs};
use crate::config::AppConfig;
use crate::services::preview::{render_json, render_table};
use crate::services::{GenerationService, RunLog};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_generate(args: &SourceArgs, output: Option<&Path>, log: Option<&Path>) -> Result<()> {
    let mut config = AppConfig::new();
    args.apply(&mut config);
    if let Some(path) = output {
        config.output.calendar_path = path.to_path_buf();
    }
    if let Some(path) = log {
        config.output.log_path = path.to_path_buf();
    }

    let runtime = build_runtime()?;
    let service = GenerationService::new(config);
    let summary = runtime.block_on(service.run())?;

    println!(
        "Calendar {} generated: {} matches from {} source",
        summary.calendar_path.display(),
        summary.matches,
        summary.source
    );
    Ok(())
}

pub fn handle_preview(args: &SourceArgs, json: bool) -> Result<()> {
    let mut config = AppConfig::new();
    args.apply(&mut config);

    let runtime = build_runtime()?;
    let service = GenerationService::new(config);
    let mut log = RunLog::new();
    let (snapshot, calendar) = runtime.block_on(service.prepare(&mut log))?;

    for line in log.lines() {
        eprintln!("{}", line);
    }

    if json {
        println!("{}", render_json(&snapshot)?);
    } else {
        print!("{}", render_table(&snapshot, &calendar));
    }
    Ok(())
}

// One live request at most, so a single-threaded runtime is enough
fn build_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}
