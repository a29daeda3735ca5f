//! Date, time and duration parsing and formatting.
//!
//! Dates are stored on disk as `YYYY-MM-DD` and times as `HH:MM` (24 hour).
//! For display they are rendered as `28 October 2010`, `6:05pm` and
//! `(1 hour, 15 minutes)`.

use std::fmt;

use chrono::Month;

use crate::error::DateTimeError;

/// Accepted date string lengths, as a half-open range.
pub const MIN_DATE_STR_LEN: usize = 6;
pub const MAX_DATE_STR_LEN: usize = 20;

/// Accepted time string lengths, as a half-open range.
pub const MIN_TIME_STR_LEN: usize = 3;
pub const MAX_TIME_STR_LEN: usize = 8;

const MAX_HOURS: i64 = 24;
const MAX_MINUTES: i64 = 59;

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A calendar date. Either fully valid, or all zero (the default).
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    year: i32,
    month: u32,
    day: u32,
}

impl Date {
    /// Build a date from its parts, validating year, then month, then day.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, DateTimeError> {
        validate_date(i64::from(year), i64::from(month), i64::from(day))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// False for the all-zero sentinel.
    pub fn is_set(&self) -> bool {
        self.year != 0
    }
}

/// The on-disk form, `YYYY-MM-DD`.
impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A time of day. `24:00` is allowed and means the end of the day, so it
/// orders after `23:59`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time {
    hour: u32,
    minutes: u32,
}

impl Time {
    pub fn new(hour: u32, minutes: u32) -> Result<Self, DateTimeError> {
        validate_time(i64::from(hour), i64::from(minutes))
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }
}

/// The on-disk form, `HH:MM`.
impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minutes)
    }
}

/// Parse a `YYYY-MM-DD` string.
///
/// The year may run past four digits, month and day take one or two digits
/// each. On error the most specific problem is reported: length, then shape,
/// then year, month and day in that order.
pub fn parse_date(text: &str) -> Result<Date, DateTimeError> {
    check_length(text, MIN_DATE_STR_LEN, MAX_DATE_STR_LEN)?;

    let mut scanner = Scanner::new(text);
    let year = scanner.int(None).ok_or(DateTimeError::Invalid)?;
    let month = scanner.sep('-').and_then(|s| s.int(Some(2)));
    let day = month.and(scanner.sep('-')).and_then(|s| s.int(Some(2)));

    match (month, day) {
        (Some(month), Some(day)) if scanner.is_done() => validate_date(year, month, day),
        _ => Err(DateTimeError::Invalid),
    }
}

/// Parse a 24 hour `HH:MM` string.
pub fn parse_time(text: &str) -> Result<Time, DateTimeError> {
    check_length(text, MIN_TIME_STR_LEN, MAX_TIME_STR_LEN)?;

    let mut scanner = Scanner::new(text);
    let hour = scanner.int(Some(2)).ok_or(DateTimeError::Invalid)?;
    let minutes = scanner.sep(':').and_then(|s| s.int(Some(2)));

    match minutes {
        Some(minutes) if scanner.is_done() => validate_time(hour, minutes),
        _ => Err(DateTimeError::Invalid),
    }
}

/// Render a date as `28 October 2010`.
pub fn format_date(date: &Date) -> String {
    let month = u8::try_from(date.month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map_or("", |m| m.name());

    format!("{} {} {}", date.day, month, date.year)
}

/// Render a time on the 12 hour clock, `12am`, `6:05pm`.
pub fn format_time(time: &Time) -> String {
    let meridiem = if (12..24).contains(&time.hour) { "pm" } else { "am" };
    let hour = match time.hour % 12 {
        0 => 12,
        h => h,
    };

    if time.minutes == 0 {
        format!("{hour}{meridiem}")
    } else {
        format!("{hour}:{:02}{meridiem}", time.minutes)
    }
}

/// Render a duration in minutes as `(1 hour, 15 minutes)`.
///
/// Zero-valued units are left out unless the whole duration is zero, which
/// renders as `(0 minutes)`.
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let minutes = minutes % 60;

    match (hours, minutes) {
        (0, m) => format!("({})", unit(m, "minute")),
        (h, 0) => format!("({})", unit(h, "hour")),
        (h, m) => format!("({}, {})", unit(h, "hour"), unit(m, "minute")),
    }
}

fn unit(value: u32, label: &str) -> String {
    if value == 1 {
        format!("{value} {label}")
    } else {
        format!("{value} {label}s")
    }
}

fn check_length(text: &str, min: usize, max: usize) -> Result<(), DateTimeError> {
    if text.len() >= max {
        Err(DateTimeError::TooLong)
    } else if text.len() < min {
        Err(DateTimeError::TooShort)
    } else {
        Ok(())
    }
}

fn is_leap_year(year: i64) -> bool {
    year % 400 == 0 || (year % 4 == 0 && year % 100 != 0)
}

fn validate_date(year: i64, month: i64, day: i64) -> Result<Date, DateTimeError> {
    let year = i32::try_from(year)
        .ok()
        .filter(|y| *y >= 1)
        .ok_or(DateTimeError::YearInvalid)?;
    let month = u32::try_from(month)
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or(DateTimeError::MonthInvalid)?;

    let max_day = if month == 2 && is_leap_year(i64::from(year)) {
        29
    } else {
        DAYS_IN_MONTH[month as usize - 1]
    };

    let day = u32::try_from(day)
        .ok()
        .filter(|d| (1..=max_day).contains(d))
        .ok_or(DateTimeError::DayInvalid)?;

    Ok(Date { year, month, day })
}

fn validate_time(hour: i64, minutes: i64) -> Result<Time, DateTimeError> {
    if !(0..=MAX_HOURS).contains(&hour) {
        return Err(DateTimeError::HourInvalid);
    }
    if !(0..=MAX_MINUTES).contains(&minutes) || (hour == MAX_HOURS && minutes > 0) {
        return Err(DateTimeError::MinutesInvalid);
    }

    // Both ranges were checked above.
    Ok(Time {
        hour: hour as u32,
        minutes: minutes as u32,
    })
}

/// Minimal left-to-right integer scanner for the date and time shapes.
struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Scanner { rest: text }
    }

    fn is_done(&self) -> bool {
        self.rest.is_empty()
    }

    /// Consume `sep`, returning the scanner for chaining.
    fn sep(&mut self, sep: char) -> Option<&mut Self> {
        self.rest = self.rest.strip_prefix(sep)?;
        Some(self)
    }

    /// Consume an optionally signed integer of at most `max_digits` digits.
    fn int(&mut self, max_digits: Option<usize>) -> Option<i64> {
        let (negative, body) = match self.rest.as_bytes().first() {
            Some(b'-') => (true, &self.rest[1..]),
            Some(b'+') => (false, &self.rest[1..]),
            _ => (false, self.rest),
        };

        let mut digits = body.bytes().take_while(u8::is_ascii_digit).count();
        if let Some(max) = max_digits {
            digits = digits.min(max);
        }
        if digits == 0 {
            return None;
        }

        let value: i64 = body[..digits].parse().ok()?;
        self.rest = &body[digits..];

        Some(if negative { -value } else { value })
    }
}
