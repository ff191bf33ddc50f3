//! Expiration expressions.
//!
//! Operators give expirations either as an absolute date (`2025-01-15`) or
//! relative to now (`90m`, `12h`, `3d`, `2w`, `6M`, `1y`). Both resolve to a
//! Unix timestamp in seconds, where `0` means "never expires".
//!
//! Minutes and hours add a fixed duration. Days, weeks, months and years are
//! calendar arithmetic: adding a month to January 31st lands on the last day
//! of February.

pub mod error;

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Days, Months, NaiveDate, NaiveTime, TimeDelta, Utc};
use error::Error;
use regex::Regex;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Unit of a relative expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    /// `m`
    Minute,
    /// `h`
    Hour,
    /// `d`
    Day,
    /// `w`, seven calendar days
    Week,
    /// `M`
    Month,
    /// `y`
    Year,
}

impl Interval {
    /// Maps a unit letter to its interval. Case matters: `m` is a minute and
    /// `M` a month.
    pub fn from_unit(unit: char) -> Option<Interval> {
        match unit {
            'm' => Some(Interval::Minute),
            'h' => Some(Interval::Hour),
            'd' => Some(Interval::Day),
            'w' => Some(Interval::Week),
            'M' => Some(Interval::Month),
            'y' => Some(Interval::Year),
            _ => None,
        }
    }

    /// Advances `from` by `count` units, or `None` when the result leaves
    /// the representable calendar.
    pub fn advance(self, from: DateTime<Utc>, count: u32) -> Option<DateTime<Utc>> {
        match self {
            Interval::Minute => {
                TimeDelta::try_minutes(count.into()).and_then(|d| from.checked_add_signed(d))
            }
            Interval::Hour => {
                TimeDelta::try_hours(count.into()).and_then(|d| from.checked_add_signed(d))
            }
            Interval::Day => from.checked_add_days(Days::new(count.into())),
            Interval::Week => from.checked_add_days(Days::new(u64::from(count) * 7)),
            Interval::Month => from.checked_add_months(Months::new(count)),
            Interval::Year => count
                .checked_mul(12)
                .and_then(|months| from.checked_add_months(Months::new(months))),
        }
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let unit = match self {
            Interval::Minute => 'm',
            Interval::Hour => 'h',
            Interval::Day => 'd',
            Interval::Week => 'w',
            Interval::Month => 'M',
            Interval::Year => 'y',
        };
        write!(f, "{}", unit)
    }
}

/// Parses an expiration expression against the current wall clock.
///
/// See [`parse_expiry_at`] for the accepted forms.
pub fn parse_expiry(s: &str) -> Result<i64, Error> {
    parse_expiry_at(s, Utc::now())
}

/// Parses an expiration expression relative to `now`.
///
/// * `""` and `"0"` return `0` (no expiration)
/// * `YYYY-MM-DD` returns midnight UTC of that day
/// * `<count><unit>` returns `now` advanced by `count` units; a zero count
///   returns `0`
///
/// # Errors
///
/// * [`Error::UnknownIntervalUnit`] for a count followed by an unsupported letter
/// * [`Error::OutOfRange`] when the count or the result overflows the calendar
/// * [`Error::InvalidExpirySyntax`] for everything else, including impossible dates
pub fn parse_expiry_at(s: &str, now: DateTime<Utc>) -> Result<i64, Error> {
    if s.is_empty() || s == "0" {
        return Ok(0);
    }

    let invalid = || Error::InvalidExpirySyntax(s.to_string());

    let date_re = Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").map_err(|_| invalid())?;
    if date_re.is_match(s) {
        let date = NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| invalid())?;
        let expires = date.and_time(NaiveTime::MIN).and_utc().timestamp();
        tracing::debug!(input = s, expires, "resolved absolute expiry");
        return Ok(expires);
    }

    let interval_re =
        Regex::new(r"^(?P<count>[0-9]+)(?P<unit>[[:alpha:]])$").map_err(|_| invalid())?;
    let captured = interval_re.captures(s).ok_or_else(invalid)?;
    let (Some(count), Some(unit)) = (
        captured.name("count"),
        captured
            .name("unit")
            .and_then(|m| m.as_str().chars().next()),
    ) else {
        return Err(invalid());
    };

    let interval = Interval::from_unit(unit).ok_or_else(|| Error::UnknownIntervalUnit {
        unit,
        input: s.to_string(),
    })?;
    let count: u32 = count
        .as_str()
        .parse()
        .map_err(|_| Error::OutOfRange(s.to_string()))?;
    if count == 0 {
        return Ok(0);
    }

    let expires = interval
        .advance(now, count)
        .ok_or_else(|| Error::OutOfRange(s.to_string()))?
        .timestamp();
    tracing::debug!(input = s, %interval, count, expires, "resolved relative expiry");
    Ok(expires)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use rstest::rstest;

    use crate::error::Error;
    use crate::{Interval, parse_expiry, parse_expiry_at};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn reference() -> DateTime<Utc> {
        at(2024, 1, 31, 12, 0, 0)
    }

    #[rstest(
        input,
        expected,
        case("", 0),
        case("0", 0),
        case("0d", 0),
        case("00M", 0),
        case("2025-01-15", 1_736_899_200),
        case("1970-01-01", 0),
        case("2024-02-29", 1_709_164_800)
    )]
    fn test_parse_expiry_fixed(input: &str, expected: i64) {
        assert_eq!(expected, parse_expiry_at(input, reference()).unwrap());
    }

    #[rstest(
        input,
        expected,
        case("90m", at(2024, 1, 31, 13, 30, 0)),
        case("36h", at(2024, 2, 2, 0, 0, 0)),
        case("3d", at(2024, 2, 3, 12, 0, 0)),
        case("2w", at(2024, 2, 14, 12, 0, 0)),
        // clamps to the last day of a leap February
        case("1M", at(2024, 2, 29, 12, 0, 0)),
        case("13M", at(2025, 2, 28, 12, 0, 0)),
        case("1y", at(2025, 1, 31, 12, 0, 0))
    )]
    fn test_parse_expiry_relative(input: &str, expected: DateTime<Utc>) {
        assert_eq!(
            expected.timestamp(),
            parse_expiry_at(input, reference()).unwrap()
        );
    }

    #[test]
    fn test_parse_expiry_year_from_leap_day() {
        let leap_day = at(2024, 2, 29, 0, 0, 0);
        let got = parse_expiry_at("1y", leap_day).unwrap();
        assert_eq!(at(2025, 2, 28, 0, 0, 0).timestamp(), got);
    }

    #[test]
    fn test_parse_expiry_uses_wall_clock() {
        let before = Utc::now().timestamp();
        let got = parse_expiry("2w").unwrap();
        let after = Utc::now().timestamp();
        let two_weeks = 14 * 24 * 60 * 60;
        assert!(got >= before + two_weeks, "{got} < {}", before + two_weeks);
        assert!(got <= after + two_weeks, "{got} > {}", after + two_weeks);
    }

    #[rstest(
        input,
        expected,
        case("3q", Error::UnknownIntervalUnit { unit: 'q', input: "3q".to_string() }),
        case("0q", Error::UnknownIntervalUnit { unit: 'q', input: "0q".to_string() }),
        case("1D", Error::UnknownIntervalUnit { unit: 'D', input: "1D".to_string() }),
        case("2025-13-01", Error::InvalidExpirySyntax("2025-13-01".to_string())),
        case("2023-02-29", Error::InvalidExpirySyntax("2023-02-29".to_string())),
        case("2025-1-15", Error::InvalidExpirySyntax("2025-1-15".to_string())),
        case("tomorrow", Error::InvalidExpirySyntax("tomorrow".to_string())),
        case("2w3d", Error::InvalidExpirySyntax("2w3d".to_string())),
        case(" 2w", Error::InvalidExpirySyntax(" 2w".to_string())),
        case("-1d", Error::InvalidExpirySyntax("-1d".to_string())),
        case("1.5h", Error::InvalidExpirySyntax("1.5h".to_string())),
        case("w", Error::InvalidExpirySyntax("w".to_string())),
        case("99999999999d", Error::OutOfRange("99999999999d".to_string())),
        case("4000000000y", Error::OutOfRange("4000000000y".to_string())),
        case("3000000000d", Error::OutOfRange("3000000000d".to_string()))
    )]
    fn test_parse_expiry_with_error(input: &str, expected: Error) {
        match parse_expiry_at(input, reference()) {
            Err(e) => assert_eq!(expected, e),
            Ok(v) => panic!("{input:?} should fail, got {v}"),
        }
    }

    #[rstest(
        unit,
        expected,
        case('m', Some(Interval::Minute)),
        case('M', Some(Interval::Month)),
        case('w', Some(Interval::Week)),
        case('s', None)
    )]
    fn test_interval_from_unit(unit: char, expected: Option<Interval>) {
        assert_eq!(expected, Interval::from_unit(unit));
        if let Some(interval) = expected {
            assert_eq!(unit.to_string(), interval.to_string());
        }
    }
}
