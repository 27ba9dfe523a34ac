//! Calendar date parsing.
//!
//! Source systems hand over dates as free text in many arrangements
//! (`1990-03-03`, `March 3rd, 1990`, `1990 March 03`, `03/03/1990`). This
//! module resolves them to a [`NaiveDate`] or gives up. There is no time zone
//! handling: values are calendar dates, and any time part is discarded.

use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime};
use rdc_model::{DateOrder, FieldOutcome, RawValue};
use regex::Regex;

struct DatePatterns {
    ordinal: Regex,
    numeric: Regex,
}

impl DatePatterns {
    fn instance() -> &'static Self {
        static PATTERNS: OnceLock<DatePatterns> = OnceLock::new();
        PATTERNS.get_or_init(|| DatePatterns {
            ordinal: Regex::new(r"(?i)\b(\d{1,2})(st|nd|rd|th)\b").expect("valid ordinal pattern"),
            numeric: Regex::new(r"^(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{4})$")
                .expect("valid numeric date pattern"),
        })
    }
}

/// Unambiguous year-first formats.
const YEAR_FIRST_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

/// Formats with a month name. Chrono accepts full and abbreviated names for
/// both `%B` and `%b` when parsing.
const MONTH_NAME_FORMATS: [&str; 8] = [
    "%B %d %Y",  // March 3 1990
    "%d %B %Y",  // 3 March 1990
    "%Y %B %d",  // 1990 March 03
    "%B %Y %d",  // March 1990 03
    "%d-%b-%Y",  // 03-Mar-1990
    "%Y-%b-%d",  // 1990-Mar-03
    "%d %b. %Y", // 3 Mar. 1990
    "%b. %d %Y", // Mar. 3 1990
];

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a free-text date.
///
/// Numeric day/month forms where both readings are valid are resolved with
/// `order`; when only one reading is a real date, that one wins.
///
/// ```
/// use chrono::NaiveDate;
/// use rdc_model::DateOrder;
/// use rdc_normalization::parse_calendar_date;
///
/// let expected = NaiveDate::from_ymd_opt(1990, 3, 3);
/// assert_eq!(parse_calendar_date("March 3rd, 1990", DateOrder::MonthFirst), expected);
/// assert_eq!(parse_calendar_date("1990-03-03", DateOrder::MonthFirst), expected);
/// assert_eq!(parse_calendar_date("not a date", DateOrder::MonthFirst), None);
/// ```
pub fn parse_calendar_date(value: &str, order: DateOrder) -> Option<NaiveDate> {
    let cleaned = clean_date_text(value);
    if cleaned.is_empty() {
        return None;
    }

    if let Some(date) = parse_compact(&cleaned) {
        return Some(date);
    }

    for fmt in YEAR_FIRST_FORMATS.iter().chain(MONTH_NAME_FORMATS.iter()) {
        if let Ok(date) = NaiveDate::parse_from_str(&cleaned, fmt) {
            return Some(date);
        }
    }

    if let Some(date) = parse_numeric_day_month(&cleaned, order) {
        return Some(date);
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&cleaned, fmt).ok())
        .map(|dt| dt.date())
}

/// Normalize one raw cell to a calendar date.
pub fn normalize_date(value: &RawValue, order: DateOrder) -> FieldOutcome<NaiveDate> {
    match value {
        RawValue::Absent => FieldOutcome::Absent,
        RawValue::Text(text) => parse_calendar_date(text, order).into(),
        RawValue::Numeric(_) => value
            .to_text()
            .and_then(|text| parse_calendar_date(&text, order))
            .into(),
    }
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Drop ordinal suffixes and commas, collapse whitespace.
fn clean_date_text(value: &str) -> String {
    let patterns = DatePatterns::instance();
    let without_ordinals = patterns.ordinal.replace_all(value.trim(), "${1}");
    without_ordinals
        .replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// `YYYYMMDD`
fn parse_compact(value: &str) -> Option<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = value[0..4].parse().ok()?;
    let month = value[4..6].parse().ok()?;
    let day = value[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_numeric_day_month(value: &str, order: DateOrder) -> Option<NaiveDate> {
    let caps = DatePatterns::instance().numeric.captures(value)?;
    let first: u32 = caps[1].parse().ok()?;
    let second: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;

    let month_first = NaiveDate::from_ymd_opt(year, first, second);
    let day_first = NaiveDate::from_ymd_opt(year, second, first);
    match (month_first, day_first) {
        (Some(mf), Some(df)) => Some(match order {
            DateOrder::MonthFirst => mf,
            DateOrder::DayFirst => df,
        }),
        (Some(date), None) | (None, Some(date)) => Some(date),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn parse(value: &str) -> Option<NaiveDate> {
        parse_calendar_date(value, DateOrder::MonthFirst)
    }

    #[test]
    fn test_iso_and_slashes() {
        assert_eq!(parse("1990-03-03"), Some(ymd(1990, 3, 3)));
        assert_eq!(parse("2006/02/04"), Some(ymd(2006, 2, 4)));
        assert_eq!(parse("19900303"), Some(ymd(1990, 3, 3)));
    }

    #[test]
    fn test_month_names_in_any_arrangement() {
        assert_eq!(parse("March 3rd, 1990"), Some(ymd(1990, 3, 3)));
        assert_eq!(parse("1968 October 16"), Some(ymd(1968, 10, 16)));
        assert_eq!(parse("October 1968 16"), Some(ymd(1968, 10, 16)));
        assert_eq!(parse("16 Oct 1968"), Some(ymd(1968, 10, 16)));
        assert_eq!(parse("21st December 2001"), Some(ymd(2001, 12, 21)));
    }

    #[test]
    fn test_datetime_keeps_date_part() {
        assert_eq!(parse("2009-10-14 00:00:00"), Some(ymd(2009, 10, 14)));
        assert_eq!(parse("2009-10-14T08:30:00"), Some(ymd(2009, 10, 14)));
    }

    #[test]
    fn test_numeric_order_resolution() {
        assert_eq!(
            parse_calendar_date("03/04/1990", DateOrder::MonthFirst),
            Some(ymd(1990, 3, 4))
        );
        assert_eq!(
            parse_calendar_date("03/04/1990", DateOrder::DayFirst),
            Some(ymd(1990, 4, 3))
        );
        // Only one reading is a real date.
        assert_eq!(
            parse_calendar_date("25/12/1990", DateOrder::MonthFirst),
            Some(ymd(1990, 12, 25))
        );
        assert_eq!(parse("31/31/1990"), None);
    }

    #[test]
    fn test_gibberish() {
        assert_eq!(parse("not a date"), None);
        assert_eq!(parse("GFJQ2AAEQ8"), None);
        assert_eq!(parse(""), None);
        assert_eq!(parse("1990-13-01"), None);
    }

    #[test]
    fn test_normalize_distinguishes_absent_from_invalid() {
        assert_eq!(
            normalize_date(&RawValue::Absent, DateOrder::MonthFirst),
            FieldOutcome::Absent
        );
        assert_eq!(
            normalize_date(&RawValue::text("not a date"), DateOrder::MonthFirst),
            FieldOutcome::Invalid
        );
        assert_eq!(
            normalize_date(&RawValue::Numeric(19900303.0), DateOrder::MonthFirst),
            FieldOutcome::Value(ymd(1990, 3, 3))
        );
    }

    #[test]
    fn test_format_roundtrips_through_parse() {
        let date = ymd(1990, 3, 3);
        assert_eq!(parse(&format_iso_date(date)), Some(date));
    }
}
