//! Date phrase detection.
//!
//! Finds date-like phrases ("April 13, 2000", "6th of October 2000",
//! "2024-01-15", "4/13/00") in free text and resolves each one to a calendar
//! date. Phrases that carry no year resolve against [`relative_base`], a year
//! no article is ever written in, so callers can tell a real date from a
//! half-parsed one by its distance to that base.

use std::cmp::Reverse;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::{Captures, Regex};

use crate::locate::Span;

const MONTH: &str = r"(?P<month>jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

/// "April 13, 2000", "Oct. 6th 2000", "June 5"
static MONTH_DAY_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b{MONTH}\.?\s+(?P<day>\d{{1,2}})(?P<suffix>st|nd|rd|th)?\b(?:,?\s+(?P<year>\d{{4}})\b)?"
    ))
    .unwrap()
});

/// "13 April 2000", "6th of October, 2000"
static DAY_MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?P<day>\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?{MONTH}\.?,?\s+(?P<year>\d{{4}})\b"
    ))
    .unwrap()
});

/// "April 2000"
static MONTH_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\b{MONTH}\.?,?\s+(?P<year>\d{{4}})\b")).unwrap());

/// "2000-04-13", including the date part of a full timestamp
static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?P<year>\d{4})-(?P<month>\d{2})-(?P<day>\d{2})").unwrap());

/// "04/13/2000", "4/13/00"
static NUMERIC_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?P<month>\d{1,2})/(?P<day>\d{1,2})/(?P<year>\d{4}|\d{2})\b").unwrap());

/// Canonical `MM/DD/YY` field value.
static CANONICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{1,2})/(\d{1,2})/(\d{2})\s*$").unwrap());

/// Minimum distance from [`relative_base`] for a parse to count as a real date.
pub const MIN_DAYS_FROM_BASE: i64 = 2 * 365;

/// A date phrase found in text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    /// Byte span of the phrase in the searched text.
    pub span: Span,
    /// The calendar date the phrase resolves to.
    pub date: NaiveDate,
}

/// The date that year-less phrases resolve against.
///
/// Relative words ("today", "yesterday") are never recognised at all, and a
/// phrase like "June 5" lands in the year 1000.
pub fn relative_base() -> NaiveDate {
    NaiveDate::from_ymd_opt(1000, 1, 1).unwrap_or_default()
}

/// Finds every date phrase in `text`, ordered by position.
///
/// Overlapping candidates are resolved in favour of the one starting first,
/// then the longest.
pub fn search_dates(text: &str) -> Vec<DateMatch> {
    let mut candidates: Vec<DateMatch> = Vec::new();

    for caps in MONTH_DAY_YEAR.captures_iter(text) {
        candidates.extend(named_month_date(&caps, true));
    }
    for caps in DAY_MONTH_YEAR.captures_iter(text) {
        candidates.extend(named_month_date(&caps, true));
    }
    for caps in MONTH_YEAR.captures_iter(text) {
        candidates.extend(named_month_date(&caps, false));
    }
    for caps in ISO_DATE.captures_iter(text).chain(NUMERIC_DATE.captures_iter(text)) {
        candidates.extend(numeric_date(&caps));
    }

    candidates.sort_by_key(|m| (m.span.start, Reverse(m.span.len())));

    let mut matches: Vec<DateMatch> = Vec::new();
    for candidate in candidates {
        if matches.last().is_none_or(|last| candidate.span.start >= last.span.end) {
            matches.push(candidate);
        }
    }
    matches
}

/// Parses the first date phrase in `text`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    search_dates(text).into_iter().next().map(|m| m.date)
}

/// Whether `date` is far enough from [`relative_base`] to be trusted.
pub fn is_confident(date: NaiveDate) -> bool {
    (date - relative_base()).num_days().abs() > MIN_DAYS_FROM_BASE
}

/// Formats a date as the canonical `MM/DD/YY` field value.
pub fn format_canonical(date: NaiveDate) -> String {
    date.format("%m/%d/%y").to_string()
}

/// Parses a canonical `MM/DD/YY` field value.
pub fn parse_canonical(value: &str) -> Option<NaiveDate> {
    let caps = CANONICAL.captures(value)?;
    let month = caps[1].parse().ok()?;
    let day = caps[2].parse().ok()?;
    let year = expand_year(&caps[3])?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn named_month_date(caps: &Captures<'_>, has_day: bool) -> Option<DateMatch> {
    let whole = caps.get(0)?;
    let month_name = caps.name("month")?.as_str();

    // "may 10" is far more often the verb than a date
    if month_name.eq_ignore_ascii_case("may") && caps.name("year").is_none() && caps.name("suffix").is_none() {
        return None;
    }

    let month = month_number(month_name)?;
    let day = if has_day { caps.name("day")?.as_str().parse().ok()? } else { 1 };
    let year = match caps.name("year") {
        Some(year) => year.as_str().parse().ok()?,
        None => relative_base().year(),
    };

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(DateMatch { span: Span::new(whole.start(), whole.end()), date })
}

fn numeric_date(caps: &Captures<'_>) -> Option<DateMatch> {
    let whole = caps.get(0)?;
    let month = caps.name("month")?.as_str().parse().ok()?;
    let day = caps.name("day")?.as_str().parse().ok()?;
    let year = expand_year(caps.name("year")?.as_str())?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(DateMatch { span: Span::new(whole.start(), whole.end()), date })
}

fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Two-digit years pivot at 69: `00..=68` are 2000s, `69..=99` are 1900s.
fn expand_year(year: &str) -> Option<i32> {
    let value: i32 = year.parse().ok()?;
    match year.len() {
        2 if value < 69 => Some(2000 + value),
        2 => Some(1900 + value),
        _ => Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case("April 13, 2000", ymd(2000, 4, 13))]
    #[case("october 6th 2000", ymd(2000, 10, 6))]
    #[case("Oct. 6 2000", ymd(2000, 10, 6))]
    #[case("13 April 2000", ymd(2000, 4, 13))]
    #[case("6th of October, 2000", ymd(2000, 10, 6))]
    #[case("September 2011", ymd(2011, 9, 1))]
    #[case("2024-01-15T10:30:00Z", ymd(2024, 1, 15))]
    #[case("4/13/00", ymd(2000, 4, 13))]
    #[case("04/13/1999", ymd(1999, 4, 13))]
    fn test_parse_date(#[case] text: &str, #[case] expected: NaiveDate) {
        assert_eq!(parse_date(text), Some(expected));
    }

    #[test]
    fn test_search_dates_spans() {
        let text = "How many dates are in this sentence October 6th 2000, January 1st 1999";
        let matches = search_dates(text);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].span, Span::new(36, 52));
        assert_eq!(matches[0].date, ymd(2000, 10, 6));
        assert_eq!(matches[1].date, ymd(1999, 1, 1));
        assert_eq!(&text[matches[1].span.start..matches[1].span.end], "January 1st 1999");
    }

    #[test]
    fn test_yearless_phrase_resolves_to_base() {
        let date = parse_date("published June 5").unwrap();
        assert_eq!(date, ymd(1000, 6, 5));
        assert!(!is_confident(date));
    }

    #[rstest]
    #[case("prices may 10 percent higher", None)]
    #[case("published May 10th", Some(ymd(1000, 5, 10)))]
    #[case("published May 10, 2012", Some(ymd(2012, 5, 10)))]
    fn test_bare_may_needs_year_or_suffix(#[case] text: &str, #[case] expected: Option<NaiveDate>) {
        assert_eq!(parse_date(text), expected);
    }

    #[test]
    fn test_relative_words_are_ignored() {
        assert!(search_dates("posted today, updated yesterday").is_empty());
    }

    #[test]
    fn test_invalid_calendar_dates_are_skipped() {
        assert!(search_dates("February 30, 2001").is_empty());
    }

    #[test]
    fn test_overlapping_candidates_keep_earliest() {
        let matches = search_dates("13 april 2000");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].span, Span::new(0, 13));
    }

    #[rstest]
    #[case("04/13/00", Some(ymd(2000, 4, 13)))]
    #[case("10/06/69", Some(ymd(1969, 10, 6)))]
    #[case("13/04/00", None)]
    #[case("April 13, 2000", None)]
    fn test_parse_canonical(#[case] value: &str, #[case] expected: Option<NaiveDate>) {
        assert_eq!(parse_canonical(value), expected);
    }

    #[test]
    fn test_format_canonical_round_trips_pivot() {
        let date = ymd(1969, 7, 20);
        assert_eq!(format_canonical(date), "07/20/69");
        assert_eq!(parse_canonical(&format_canonical(date)), Some(date));
    }
}
