use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use thiserror::Error;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%B %d, %Y", "%B %d %Y", "%b %d, %Y", "%b %d %Y",
    "%d %B %Y", "%d %b %Y", "%A, %B %d, %Y", "%a, %b %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum DateError {
    #[error("empty date")]
    Empty,
    #[error("ambiguous date {0:?}: could be either month/day or day/month")]
    Ambiguous(String),
    #[error("unrecognized date {0:?}")]
    Unrecognized(String),
}

/// Resolves a user supplied date: `today`, or a date in one of the
/// supported formats.
pub(crate) fn resolve(input: &str) -> Result<NaiveDate, DateError> {
    resolve_relative_to(input, Local::now().date_naive())
}

pub(crate) fn resolve_relative_to(input: &str, today: NaiveDate) -> Result<NaiveDate, DateError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(DateError::Empty);
    }
    if input.eq_ignore_ascii_case("today") {
        return Ok(today);
    }

    if let Some(date) = parse_compact(input) {
        return Ok(date);
    }
    if let Some(result) = parse_numeric_slashes(input) {
        return result;
    }
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
    {
        return Ok(date);
    }
    if let Some(datetime) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
    {
        return Ok(datetime.date());
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        return Ok(datetime.date_naive());
    }
    if let Ok(datetime) = DateTime::parse_from_rfc2822(input) {
        return Ok(datetime.date_naive());
    }

    Err(DateError::Unrecognized(input.to_string()))
}

pub(crate) fn format(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// `YYYYMMDD`
fn parse_compact(input: &str) -> Option<NaiveDate> {
    if input.len() != 8 || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = input[..4].parse().ok()?;
    let month = input[4..6].parse().ok()?;
    let day = input[6..].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// `MM/DD/YYYY` or `DD/MM/YYYY`, whichever reading is unambiguous.
/// Returns `None` when the input is not of that shape.
fn parse_numeric_slashes(input: &str) -> Option<Result<NaiveDate, DateError>> {
    let parts: Vec<&str> = input.split('/').collect();
    let [first, second, year] = parts.as_slice() else {
        return None;
    };
    if year.len() != 4 || first.len() > 2 || second.len() > 2 {
        return None;
    }
    let first: u32 = first.parse().ok()?;
    let second: u32 = second.parse().ok()?;
    let year: i32 = year.parse().ok()?;

    let (month, day) = match (first, second) {
        (a, b) if a == b || b > 12 => (a, b),
        (a, b) if a > 12 => (b, a),
        _ => return Some(Err(DateError::Ambiguous(input.to_string()))),
    };
    Some(
        NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| DateError::Unrecognized(input.to_string())),
    )
}
