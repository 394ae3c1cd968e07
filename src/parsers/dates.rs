use crate::results::DateRange;
use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// `DD.MM.YYYY`
static FULL_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2})\.(\d{2})\.(\d{4})").expect("invalid regex: full date")
});

/// `DD.MM.` with no year directly after it
static SHORT_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2})\.(\d{2})\.(?:\D|$)").expect("invalid regex: short date")
});

static STANDALONE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})\b").expect("invalid regex: year"));

/// Reasons a validity text could not be turned into two dates
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error("expected 2 '-'-separated parts, found {0}")]
    SegmentCount(usize),

    #[error("empty date segment")]
    EmptySegment,

    #[error("segments match neither DD.MM.YYYY nor DD.MM.")]
    NoMatch,

    #[error("not a calendar date: {year}-{month}-{day}")]
    InvalidDate {
        year: String,
        month: String,
        day: String,
    },
}

/// Parses a validity text such as `01.03.2024 - 15.03.2024` or `01.03. - 15.03.`
///
/// Short dates take their year from the first standalone four-digit number in
/// the whole text, or the current year when there is none. Failures are logged
/// and yield a range with both ends absent.
pub fn parse_date_range(text: &str) -> DateRange {
    parse_date_range_with_year(text, Local::now().year())
}

/// Same as [`parse_date_range`] with an explicit fallback year for short dates
pub fn parse_date_range_with_year(text: &str, fallback_year: i32) -> DateRange {
    match try_parse_date_range(text, fallback_year) {
        Ok((from, to)) => {
            if from > to {
                ::log::warn!("Validity range ends before it starts: {}", text);
            }
            DateRange::new(from, to)
        }
        Err(e) => {
            ::log::warn!("Could not parse validity dates from {:?}: {}", text, e);
            DateRange::invalid()
        }
    }
}

/// Parses a validity text, reporting why it failed
pub fn try_parse_date_range(
    text: &str,
    fallback_year: i32,
) -> Result<(NaiveDate, NaiveDate), DateRangeError> {
    let parts: Vec<&str> = text.trim().split('-').map(str::trim).collect();
    if parts.len() != 2 {
        return Err(DateRangeError::SegmentCount(parts.len()));
    }
    if parts.iter().any(|p| p.is_empty()) {
        return Err(DateRangeError::EmptySegment);
    }
    let (from_part, to_part) = (parts[0], parts[1]);

    if let (Some(from), Some(to)) = (FULL_DATE.captures(from_part), FULL_DATE.captures(to_part)) {
        return Ok((
            build_date(&from[3], &from[2], &from[1])?,
            build_date(&to[3], &to[2], &to[1])?,
        ));
    }

    if let (Some(from), Some(to)) = (SHORT_DATE.captures(from_part), SHORT_DATE.captures(to_part))
    {
        let year = STANDALONE_YEAR
            .captures(text)
            .map(|c| c[1].to_string())
            .unwrap_or_else(|| fallback_year.to_string());
        return Ok((
            build_date(&year, &from[2], &from[1])?,
            build_date(&year, &to[2], &to[1])?,
        ));
    }

    Err(DateRangeError::NoMatch)
}

fn build_date(year: &str, month: &str, day: &str) -> Result<NaiveDate, DateRangeError> {
    let invalid = || DateRangeError::InvalidDate {
        year: year.to_string(),
        month: month.to_string(),
        day: day.to_string(),
    };

    let y: i32 = year.parse().map_err(|_| invalid())?;
    let m: u32 = month.parse().map_err(|_| invalid())?;
    let d: u32 = day.parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(invalid)
}
