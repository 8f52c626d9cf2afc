//! Date and timestamp values, normalized to UTC.
//!
//! Dates are days since the Unix epoch (the Arrow `Date32` encoding).
//! Timestamps are nanoseconds since the Unix epoch, kept in an `i128` so the
//! full `0001-01-01 ..= 9999-12-31` calendar range is representable.
//! Conversions to calendar form go through the `time` crate.

use std::fmt;
use std::str::FromStr;

use arith_result::{Error, Result};
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};

pub const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub const SECONDS_PER_DAY: i64 = 86_400;
pub const NANOS_PER_DAY: i128 = SECONDS_PER_DAY as i128 * NANOS_PER_SECOND as i128;

/// Julian day number of 1970-01-01.
const UNIX_EPOCH_JULIAN_DAY: i32 = 2_440_588;

/// Calendar date stored as days since 1970-01-01.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateValue {
    days: i32,
}

impl DateValue {
    pub const fn from_epoch_days(days: i32) -> Self {
        Self { days }
    }

    #[inline]
    pub const fn epoch_days(self) -> i32 {
        self.days
    }

    pub fn from_date(date: Date) -> Self {
        Self {
            days: date.to_julian_day() - UNIX_EPOCH_JULIAN_DAY,
        }
    }

    /// Calendar form, or `None` when the day count is outside the supported years.
    pub fn to_date(self) -> Option<Date> {
        let julian = self.days.checked_add(UNIX_EPOCH_JULIAN_DAY)?;
        Date::from_julian_day(julian).ok()
    }

    pub fn from_ymd(year: i32, month: u8, day: u8) -> Result<Self> {
        let month = month_from_number(month)?;
        Date::from_calendar_date(year, month, day)
            .map(Self::from_date)
            .map_err(|err| Error::InvalidArgumentError(format!("invalid date: {err}")))
    }

    /// Timestamp at midnight UTC of this date.
    #[inline]
    pub fn midnight(self) -> TimestampValue {
        TimestampValue::from_epoch_nanos(i128::from(self.days) * NANOS_PER_DAY)
    }
}

impl FromStr for DateValue {
    type Err = Error;

    /// Parse a `YYYY-MM-DD` literal.
    fn from_str(s: &str) -> Result<Self> {
        parse_date(s.trim()).map(Self::from_date)
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_date() {
            Some(date) => write_date(f, date),
            None => write!(f, "{}", self.days),
        }
    }
}

/// Instant stored as nanoseconds since 1970-01-01 00:00:00 UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimestampValue {
    nanos: i128,
}

impl TimestampValue {
    pub const fn from_epoch_nanos(nanos: i128) -> Self {
        Self { nanos }
    }

    #[inline]
    pub const fn epoch_nanos(self) -> i128 {
        self.nanos
    }

    pub fn from_datetime(datetime: PrimitiveDateTime) -> Self {
        Self {
            nanos: datetime.assume_utc().unix_timestamp_nanos(),
        }
    }

    /// Calendar form in UTC, or `None` outside the supported years.
    pub fn to_datetime(self) -> Option<PrimitiveDateTime> {
        let utc = OffsetDateTime::from_unix_timestamp_nanos(self.nanos).ok()?;
        Some(PrimitiveDateTime::new(utc.date(), utc.time()))
    }
}

impl FromStr for TimestampValue {
    type Err = Error;

    /// Parse `YYYY-MM-DD[ H:M:S[.fffffffff]]`; a `T` separator is accepted too.
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let (date_part, clock_part) = match text.split_once([' ', 'T']) {
            Some((date, clock)) => (date, Some(clock.trim())),
            None => (text, None),
        };
        let date = parse_date(date_part)?;
        let time = match clock_part {
            Some(clock) => {
                let (hour, minute, second, nanos) = parse_clock(clock)?;
                Time::from_hms_nano(hour, minute, second, nanos).map_err(|err| {
                    Error::InvalidArgumentError(format!(
                        "invalid TIMESTAMP literal '{text}': {err}"
                    ))
                })?
            }
            None => Time::MIDNIGHT,
        };
        Ok(Self::from_datetime(PrimitiveDateTime::new(date, time)))
    }
}

impl fmt::Display for TimestampValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(datetime) = self.to_datetime() else {
            return write!(f, "{}", self.nanos);
        };
        write_date(f, datetime.date())?;
        write!(
            f,
            " {:02}:{:02}:{:02}",
            datetime.hour(),
            datetime.minute(),
            datetime.second()
        )?;
        write_fraction(f, datetime.nanosecond())
    }
}

fn write_date(f: &mut fmt::Formatter<'_>, date: Date) -> fmt::Result {
    let (year, month, day) = date.to_calendar_date();
    write!(f, "{:04}-{:02}-{:02}", year, month as u8, day)
}

/// Write `.fff` with trailing zeros trimmed; nothing for a whole second.
pub(crate) fn write_fraction(f: &mut fmt::Formatter<'_>, nanos: u32) -> fmt::Result {
    if nanos == 0 {
        return Ok(());
    }
    let digits = format!("{nanos:09}");
    write!(f, ".{}", digits.trim_end_matches('0'))
}

fn parse_date(text: &str) -> Result<Date> {
    let invalid = || Error::InvalidArgumentError(format!("invalid DATE literal '{text}'"));
    let mut parts = text.split('-');
    let year_str = parts.next().ok_or_else(invalid)?;
    let month_str = parts.next().ok_or_else(invalid)?;
    let day_str = parts.next().ok_or_else(invalid)?;
    if parts.next().is_some() {
        return Err(invalid());
    }

    let year = year_str.parse::<i32>().map_err(|_| {
        Error::InvalidArgumentError(format!("invalid year in DATE literal '{text}'"))
    })?;
    let month_num = month_str.parse::<u8>().map_err(|_| {
        Error::InvalidArgumentError(format!("invalid month in DATE literal '{text}'"))
    })?;
    let day = day_str.parse::<u8>().map_err(|_| {
        Error::InvalidArgumentError(format!("invalid day in DATE literal '{text}'"))
    })?;

    let month = month_from_number(month_num)?;
    Date::from_calendar_date(year, month, day).map_err(|err| {
        Error::InvalidArgumentError(format!("invalid DATE literal '{text}': {err}"))
    })
}

/// Parse `H:M:S[.fffffffff]` into `(hours, minutes, seconds, nanoseconds)`.
///
/// Fields may be one or two digits; hours are limited to a single day.
pub(crate) fn parse_clock(text: &str) -> Result<(u8, u8, u8, u32)> {
    let invalid = || Error::InvalidArgumentError(format!("invalid time of day '{text}'"));
    let mut parts = text.split(':');
    let (Some(hours), Some(minutes), Some(seconds), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };
    let (whole_seconds, fraction) = seconds.split_once('.').unwrap_or((seconds, ""));

    let field = |raw: &str, limit: u8| -> Result<u8> {
        if raw.is_empty() || raw.len() > 2 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let value: u8 = raw.parse().map_err(|_| invalid())?;
        if value >= limit {
            return Err(invalid());
        }
        Ok(value)
    };

    let hours = field(hours, 24)?;
    let minutes = field(minutes, 60)?;
    let seconds = field(whole_seconds, 60)?;
    let nanos = parse_fraction(fraction).ok_or_else(invalid)?;
    Ok((hours, minutes, seconds, nanos))
}

/// Fractional-second digits to nanoseconds (`"445"` -> `445_000_000`).
fn parse_fraction(raw: &str) -> Option<u32> {
    if raw.len() > 9 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if raw.is_empty() {
        return Some(0);
    }
    let value: u32 = raw.parse().ok()?;
    Some(value * 10u32.pow(9 - raw.len() as u32))
}

pub(crate) fn month_from_number(raw: u8) -> Result<Month> {
    Month::try_from(raw)
        .map_err(|_| Error::InvalidArgumentError(format!("invalid month '{raw}'")))
}
