//! Start Date Helpers
//!
//! Dates are shown as `8th Dec 2018`.

use chrono::{Datelike, Local, NaiveDate};

/// Today in the runtime's local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{}{} {}",
        date.day(),
        ordinal_suffix(date.day()),
        date.format("%b %Y")
    )
}

/// Parse the display format back into a date
///
/// Accepts the day with or without its ordinal suffix.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let mut parts = input.split_whitespace();
    let day = parts.next()?;
    let month = parts.next()?;
    let year = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let day = day.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    NaiveDate::parse_from_str(&format!("{day} {month} {year}"), "%d %b %Y").ok()
}

/// Whether the date picker offers this day; past days are disabled
pub fn is_selectable(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(date(2018, 12, 8)), "8th Dec 2018");
        assert_eq!(format_date(date(2019, 1, 1)), "1st Jan 2019");
        assert_eq!(format_date(date(2019, 3, 22)), "22nd Mar 2019");
        assert_eq!(format_date(date(2019, 5, 13)), "13th May 2019");
        assert_eq!(format_date(date(2019, 5, 31)), "31st May 2019");
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("8th Dec 2018"), Some(date(2018, 12, 8)));
        assert_eq!(parse_date("23rd Mar 2019"), Some(date(2019, 3, 23)));
        assert_eq!(parse_date("23 Mar 2019"), Some(date(2019, 3, 23)));
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("31st Feb 2019"), None);
    }

    #[test]
    fn test_past_days_not_selectable() {
        let today = date(2019, 6, 10);
        assert!(is_selectable(today, today));
        assert!(is_selectable(date(2019, 6, 11), today));
        assert!(!is_selectable(date(2019, 6, 9), today));
    }
}
