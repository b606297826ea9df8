use anyhow::Result;

use atp_finals_calendar::cli::Command;
use atp_finals_calendar::{handle_generate, handle_preview, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Generate { args, output, log } => {
            handle_generate(args, output.as_deref(), log.as_deref())
        }
        Command::Preview { args, json } => handle_preview(args, *json),
    }
}
