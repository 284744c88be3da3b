//! Date expressions: weekday names, relative days and explicit calendar dates.

use crate::core::lexer::normalize;
use crate::domain::model::{DateSpec, ReferenceClock, RelativeDay};
use chrono::{Datelike, NaiveDate, Weekday};
use std::ops::Range;

const WEEKDAYS: &[(&str, Weekday)] = &[
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sunday", Weekday::Sun),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    pub spec: DateSpec,
    pub index: usize,
}

/// Interprets a single normalized token as a date expression.
///
/// `DD/MM` without a year takes the year of `reference_year`.
pub fn parse_date_token(token: &str, reference_year: i32) -> Option<DateSpec> {
    let relative = match token {
        "yesterday" => Some(RelativeDay::Yesterday),
        "today" => Some(RelativeDay::Today),
        "tomorrow" => Some(RelativeDay::Tomorrow),
        _ => None,
    };
    if let Some(day) = relative {
        return Some(DateSpec::Relative(day));
    }

    // full names only, "sun" or "sat" are ordinary words
    if let Some(&(_, weekday)) = WEEKDAYS.iter().find(|(name, _)| *name == token) {
        return Some(DateSpec::Weekday(weekday));
    }

    parse_calendar(token, reference_year).map(DateSpec::Calendar)
}

fn parse_calendar(token: &str, reference_year: i32) -> Option<NaiveDate> {
    if !token.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(token, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(token, "%d/%m/%Y") {
        return Some(date);
    }
    if token.matches('/').count() == 1 {
        let with_year = format!("{}/{}", token, reference_year);
        return NaiveDate::parse_from_str(&with_year, "%d/%m/%Y").ok();
    }
    None
}

/// Finds the earliest date expression in `tokens`, skipping `consumed`.
pub fn find_date(
    tokens: &[String],
    consumed: Option<&Range<usize>>,
    clock: &ReferenceClock,
) -> Option<DateMatch> {
    let year = clock.today().year();
    tokens
        .iter()
        .enumerate()
        .filter(|(index, _)| !consumed.is_some_and(|span| span.contains(index)))
        .find_map(|(index, token)| {
            parse_date_token(token, year).map(|spec| DateMatch { spec, index })
        })
}

/// Resolves the first date expression in `phrase` relative to `clock`.
pub fn resolve_date(phrase: &str, clock: &ReferenceClock) -> Option<NaiveDate> {
    let tokens = normalize(phrase);
    find_date(&tokens, None, clock).and_then(|found| found.spec.resolve(clock))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // Friday
    fn reference() -> ReferenceClock {
        ReferenceClock::at_date(date(2024, 3, 15))
    }

    #[test]
    fn test_relative_nouns() {
        assert_eq!(resolve_date("yesterday", &reference()), Some(date(2024, 3, 14)));
        assert_eq!(resolve_date("today", &reference()), Some(date(2024, 3, 15)));
        assert_eq!(resolve_date("tomorrow", &reference()), Some(date(2024, 3, 16)));
        assert_eq!(resolve_date("TOMORROW", &reference()), Some(date(2024, 3, 16)));
    }

    #[test]
    fn test_monday_from_wednesday_is_next_week() {
        let wednesday = ReferenceClock::at_date(date(2024, 3, 13));
        assert_eq!(resolve_date("monday", &wednesday), Some(date(2024, 3, 18)));
    }

    #[test]
    fn test_monday_on_monday_is_today() {
        let monday = ReferenceClock::at_date(date(2024, 3, 11));
        assert_eq!(resolve_date("Monday", &monday), Some(date(2024, 3, 11)));
    }

    #[test]
    fn test_every_weekday_from_friday() {
        let expected = [
            ("monday", date(2024, 3, 18)),
            ("tuesday", date(2024, 3, 19)),
            ("wednesday", date(2024, 3, 20)),
            ("thursday", date(2024, 3, 21)),
            ("friday", date(2024, 3, 15)),
            ("saturday", date(2024, 3, 16)),
            ("sunday", date(2024, 3, 17)),
        ];
        for (name, want) in expected {
            assert_eq!(resolve_date(name, &reference()), Some(want), "{}", name);
        }
    }

    #[test]
    fn test_weekday_abbreviations_are_plain_words() {
        assert_eq!(resolve_date("is the sun out", &reference()), None);
        assert_eq!(resolve_date("I sat at stad", &reference()), None);
        assert_eq!(resolve_date("wed mon tue", &reference()), None);
    }

    #[test]
    fn test_calendar_dates() {
        assert_eq!(resolve_date("2024-04-02", &reference()), Some(date(2024, 4, 2)));
        assert_eq!(resolve_date("02/04/2024", &reference()), Some(date(2024, 4, 2)));
        assert_eq!(resolve_date("2/4", &reference()), Some(date(2024, 4, 2)));
        assert_eq!(resolve_date("31/02", &reference()), None);
    }

    #[test]
    fn test_earliest_token_wins() {
        assert_eq!(
            resolve_date("tomorrow or yesterday", &reference()),
            Some(date(2024, 3, 16))
        );
    }

    #[test]
    fn test_no_date_found() {
        assert_eq!(resolve_date("what is for lunch", &reference()), None);
        assert_eq!(resolve_date("", &reference()), None);
    }

    #[test]
    fn test_consumed_tokens_are_skipped() {
        let tokens = normalize("today tomorrow");
        let found = find_date(&tokens, Some(&(0..1)), &reference()).unwrap();
        assert_eq!(found.index, 1);
        assert_eq!(found.spec, DateSpec::Relative(RelativeDay::Tomorrow));
    }
}
