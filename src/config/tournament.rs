use chrono::{NaiveDate, NaiveTime};

/// Tournament the calendar is generated for
///
/// The live schedule page lists a single day without machine-readable dates,
/// so live matches get synthetic slots anchored at `first_match_day`:
/// `matches_per_day` matches per day, alternating between the early and late
/// session hours when the page does not show a usable clock time.
#[derive(Debug, Clone)]
pub struct TournamentConfig {
    pub name: &'static str,
    pub location: &'static str,
    pub calendar_name: &'static str,
    pub product_id: &'static str,
    pub uid_domain: &'static str,
    pub first_match_day: NaiveDate,
    pub matches_per_day: u32,
    pub early_session: NaiveTime,
    pub late_session: NaiveTime,
}

const FIRST_MATCH_DAY: NaiveDate = NaiveDate::from_ymd_opt(2025, 11, 9).unwrap();
const EARLY_SESSION: NaiveTime = NaiveTime::from_hms_opt(14, 0, 0).unwrap();
const LATE_SESSION: NaiveTime = NaiveTime::from_hms_opt(20, 30, 0).unwrap();

/// Nitto ATP Finals 2025, singles draw, Inalpi Arena Turin
pub fn atp_finals_2025() -> TournamentConfig {
    TournamentConfig {
        name: "ATP Finals 2025 Singles",
        location: "Turin",
        calendar_name: "ATP Finals 2025 Singles (Turin)",
        product_id: "-//ATP Finals 2025//Singles//PL",
        uid_domain: "atp2025",
        first_match_day: FIRST_MATCH_DAY,
        matches_per_day: 2,
        early_session: EARLY_SESSION,
        late_session: LATE_SESSION,
    }
}
