//! Order date parsing and decomposition.
//!
//! Extracts carry US-style timestamps (`2/24/2003 0:00`). After parsing,
//! dates are held as canonical `YYYY-MM-DD HH:MM:SS` text, which sorts
//! chronologically and round-trips through CSV and SQLite unchanged.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Storage format for parsed order dates.
pub const CANONICAL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DATETIME_FORMATS: [&str; 6] = [
    CANONICAL_DATETIME_FORMAT,
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Parse an order date in any accepted layout.
///
/// Returns `None` for blank or unrecognized input; callers turn that into a
/// null cell.
///
/// ```
/// use sales_transform::normalization::parse_order_date;
///
/// let parsed = parse_order_date("2/24/2003 0:00").unwrap();
/// assert_eq!(parsed.to_string(), "2003-02-24 00:00:00");
/// assert!(parse_order_date("not a date").is_none());
/// ```
pub fn parse_order_date(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

pub fn format_order_date(value: &NaiveDateTime) -> String {
    value.format(CANONICAL_DATETIME_FORMAT).to_string()
}

/// Parse a value already in canonical form.
pub fn parse_canonical(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, CANONICAL_DATETIME_FORMAT).ok()
}

/// Calendar components of an order date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParts {
    pub day: i32,
    pub day_of_week: String,
    /// ISO 8601 week number.
    pub week: i32,
    pub month_name: String,
    /// `YYYY-MM`.
    pub year_month: String,
}

impl DateParts {
    pub fn of(value: &NaiveDateTime) -> Self {
        let date = value.date();
        Self {
            day: date.day() as i32,
            day_of_week: date.format("%A").to_string(),
            week: date.iso_week().week() as i32,
            month_name: date.format("%B").to_string(),
            year_month: date.format("%Y-%m").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_us_timestamps_without_padding() {
        let parsed = parse_order_date("5/7/2003 0:00").unwrap();
        assert_eq!(format_order_date(&parsed), "2003-05-07 00:00:00");
        let parsed = parse_order_date("12/31/2004 13:45:10").unwrap();
        assert_eq!(format_order_date(&parsed), "2004-12-31 13:45:10");
    }

    #[test]
    fn parses_iso_layouts() {
        for value in [
            "2003-02-24",
            "2003-02-24 00:00",
            "2003-02-24 00:00:00",
            "2003-02-24T00:00:00",
        ] {
            let parsed = parse_order_date(value).unwrap();
            assert_eq!(format_order_date(&parsed), "2003-02-24 00:00:00", "{value}");
        }
    }

    #[test]
    fn rejects_garbage_and_impossible_dates() {
        assert!(parse_order_date("").is_none());
        assert!(parse_order_date("   ").is_none());
        assert!(parse_order_date("not a date").is_none());
        assert!(parse_order_date("2/30/2003 0:00").is_none());
        assert!(parse_order_date("13/01/2003").is_none());
    }

    #[test]
    fn canonical_form_round_trips() {
        let parsed = parse_order_date("2/24/2003 0:00").unwrap();
        let text = format_order_date(&parsed);
        assert_eq!(parse_canonical(&text), Some(parsed));
        assert_eq!(parse_order_date(&text), Some(parsed));
    }

    #[test]
    fn date_parts() {
        let parsed = parse_order_date("2/24/2003 0:00").unwrap();
        let parts = DateParts::of(&parsed);
        assert_eq!(
            parts,
            DateParts {
                day: 24,
                day_of_week: "Monday".to_string(),
                week: 9,
                month_name: "February".to_string(),
                year_month: "2003-02".to_string(),
            }
        );
    }

    #[test]
    fn iso_week_crosses_year_boundary() {
        // 2004-01-01 is a Thursday and belongs to ISO week 1; 2005-01-01 is
        // a Saturday and belongs to week 53 of 2004.
        let parts = DateParts::of(&parse_order_date("1/1/2004").unwrap());
        assert_eq!(parts.week, 1);
        let parts = DateParts::of(&parse_order_date("1/1/2005").unwrap());
        assert_eq!(parts.week, 53);
    }
}
