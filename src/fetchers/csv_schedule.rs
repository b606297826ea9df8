use chrono::{NaiveDate, NaiveTime};
use csv::{Reader, ReaderBuilder, StringRecord, Trim};
use log::info;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::domain::MatchRecord;
use crate::errors::FallbackError;

pub const REQUIRED_COLUMNS: [&str; 6] = [
    "date",
    "start_time",
    "end_time",
    "player1",
    "player2",
    "session",
];

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

// Line 1 holds the header
const FIRST_DATA_ROW: usize = 2;

#[derive(Debug, Deserialize)]
struct ScheduleRow {
    date: String,
    start_time: String,
    end_time: String,
    player1: String,
    player2: String,
    session: String,
}

impl ScheduleRow {
    fn into_record(self, row: usize) -> Result<MatchRecord, FallbackError> {
        let date = parse_date(row, required(row, "date", &self.date)?)?;
        let start = parse_time(row, "start_time", required(row, "start_time", &self.start_time)?)?;
        let end = parse_time(row, "end_time", required(row, "end_time", &self.end_time)?)?;
        let player1 = required(row, "player1", &self.player1)?;
        let player2 = required(row, "player2", &self.player2)?;
        let session = required(row, "session", &self.session)?;

        Ok(MatchRecord::scheduled(date, start, end, player1, player2, session))
    }
}

/// Read the fallback schedule file; any bad row fails the whole read
pub fn read_schedule_file(path: &Path) -> Result<Vec<MatchRecord>, FallbackError> {
    if !path.exists() {
        return Err(FallbackError::NotFound {
            path: path.to_path_buf(),
        });
    }

    info!("Reading fallback schedule: {}", path.display());
    let reader = reader_builder().from_path(path)?;
    read_records(reader)
}

/// Same as [`read_schedule_file`] over any reader
pub fn read_schedule<R: Read>(input: R) -> Result<Vec<MatchRecord>, FallbackError> {
    read_records(reader_builder().from_reader(input))
}

fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.trim(Trim::All);
    builder
}

fn read_records<R: Read>(mut reader: Reader<R>) -> Result<Vec<MatchRecord>, FallbackError> {
    check_headers(reader.headers()?)?;

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<ScheduleRow>().enumerate() {
        records.push(row?.into_record(index + FIRST_DATA_ROW)?);
    }

    info!("  → Read {} fallback matches", records.len());
    Ok(records)
}

fn check_headers(headers: &StringRecord) -> Result<(), FallbackError> {
    match REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|header| header == **column))
    {
        Some(column) => Err(FallbackError::MissingColumn { column: *column }),
        None => Ok(()),
    }
}

fn required<'a>(row: usize, column: &'static str, value: &'a str) -> Result<&'a str, FallbackError> {
    if value.is_empty() {
        return Err(FallbackError::EmptyField { row, column });
    }
    Ok(value)
}

fn parse_date(row: usize, value: &str) -> Result<NaiveDate, FallbackError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| FallbackError::InvalidValue {
        row,
        column: "date",
        value: value.to_string(),
        expected: "YYYY-MM-DD",
    })
}

fn parse_time(row: usize, column: &'static str, value: &str) -> Result<NaiveTime, FallbackError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| FallbackError::InvalidValue {
        row,
        column,
        value: value.to_string(),
        expected: "HH:MM",
    })
}
