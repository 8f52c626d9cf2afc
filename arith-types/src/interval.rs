//! Year-month and day-time interval values.

use std::fmt;
use std::str::FromStr;

use arith_result::{Error, Result};

use crate::temporal::{NANOS_PER_SECOND, SECONDS_PER_DAY, parse_clock};

/// A span of whole months, stored as a signed month count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct IntervalYearMonth {
    total_months: i32,
}

impl IntervalYearMonth {
    pub const fn from_months(total_months: i32) -> Self {
        Self { total_months }
    }

    /// Build from a year and month component, `years * 12 + months`.
    pub fn new(years: i32, months: i32) -> Result<Self> {
        years
            .checked_mul(12)
            .and_then(|m| m.checked_add(months))
            .map(Self::from_months)
            .ok_or_else(|| Error::overflow("interval_year_month out of range"))
    }

    #[inline]
    pub const fn total_months(self) -> i32 {
        self.total_months
    }

    pub const fn years(self) -> i32 {
        self.total_months / 12
    }

    pub const fn months(self) -> i32 {
        self.total_months % 12
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.total_months.checked_sub(rhs.total_months).map(Self::from_months)
    }

    pub fn checked_neg(self) -> Option<Self> {
        self.total_months.checked_neg().map(Self::from_months)
    }
}

impl FromStr for IntervalYearMonth {
    type Err = Error;

    /// Parse `[-]Y-M` where `M` is `0..=11`.
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let invalid =
            || Error::InvalidArgumentError(format!("invalid INTERVAL_YEAR_MONTH literal '{text}'"));
        let (negative, body) = split_sign(text);
        let (years, months) = body.split_once('-').ok_or_else(invalid)?;
        let years: i32 = parse_digits(years).ok_or_else(invalid)?;
        let months: i32 = parse_digits(months).ok_or_else(invalid)?;
        if months > 11 {
            return Err(invalid());
        }
        let interval = Self::new(years, months)?;
        if negative {
            interval
                .checked_neg()
                .ok_or_else(|| Error::overflow("interval_year_month out of range"))
        } else {
            Ok(interval)
        }
    }
}

impl fmt::Display for IntervalYearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.total_months < 0 { "-" } else { "" };
        let magnitude = self.total_months.unsigned_abs();
        write!(f, "{sign}{}-{}", magnitude / 12, magnitude % 12)
    }
}

/// An exact elapsed duration with nanosecond resolution.
///
/// Stored as whole seconds plus a nanosecond adjustment. Both parts always
/// share the same sign and `|nanos| < 1_000_000_000`, so every duration has
/// exactly one representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct IntervalDayTime {
    seconds: i64,
    nanos: i32,
}

impl IntervalDayTime {
    /// Build from possibly unnormalized parts.
    pub fn new(seconds: i64, nanos: i64) -> Result<Self> {
        let total = i128::from(seconds) * i128::from(NANOS_PER_SECOND) + i128::from(nanos);
        Self::from_total_nanos(total)
            .ok_or_else(|| Error::overflow("interval_day_time out of range"))
    }

    /// Build from a signed nanosecond count, or `None` if the seconds part
    /// does not fit an `i64`.
    pub fn from_total_nanos(total: i128) -> Option<Self> {
        let per_second = i128::from(NANOS_PER_SECOND);
        // Truncating division keeps both parts on the same side of zero.
        let seconds = i64::try_from(total / per_second).ok()?;
        let nanos = (total % per_second) as i32;
        Some(Self { seconds, nanos })
    }

    #[inline]
    pub fn total_nanos(self) -> i128 {
        i128::from(self.seconds) * i128::from(NANOS_PER_SECOND) + i128::from(self.nanos)
    }

    #[inline]
    pub const fn seconds(self) -> i64 {
        self.seconds
    }

    #[inline]
    pub const fn nanos(self) -> i32 {
        self.nanos
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        Self::from_total_nanos(self.total_nanos() - rhs.total_nanos())
    }
}

impl FromStr for IntervalDayTime {
    type Err = Error;

    /// Parse `[-]D H:M:S[.fffffffff]`.
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let invalid =
            || Error::InvalidArgumentError(format!("invalid INTERVAL_DAY_TIME literal '{text}'"));
        let (negative, body) = split_sign(text);
        let (days, clock) = body.split_once(' ').ok_or_else(invalid)?;
        let days: i64 = parse_digits(days).ok_or_else(invalid)?;
        let (hours, minutes, seconds, nanos) = parse_clock(clock.trim()).map_err(|_| invalid())?;

        let clock_seconds =
            i64::from(hours) * 3_600 + i64::from(minutes) * 60 + i64::from(seconds);
        let whole_seconds = days
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|s| s.checked_add(clock_seconds))
            .ok_or_else(|| Error::overflow("interval_day_time out of range"))?;
        let interval = Self::new(whole_seconds, i64::from(nanos))?;
        if negative {
            Self::from_total_nanos(-interval.total_nanos())
                .ok_or_else(|| Error::overflow("interval_day_time out of range"))
        } else {
            Ok(interval)
        }
    }
}

impl fmt::Display for IntervalDayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.seconds < 0 || self.nanos < 0 { "-" } else { "" };
        let seconds = self.seconds.unsigned_abs();
        let nanos = self.nanos.unsigned_abs();
        let day_seconds = SECONDS_PER_DAY as u64;
        let days = seconds / day_seconds;
        let rem = seconds % day_seconds;
        write!(
            f,
            "{sign}{days} {:02}:{:02}:{:02}",
            rem / 3_600,
            (rem % 3_600) / 60,
            rem % 60
        )?;
        if nanos == 0 {
            Ok(())
        } else {
            write!(f, ".{nanos:09}")
        }
    }
}

fn split_sign(text: &str) -> (bool, &str) {
    match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    }
}

fn parse_digits<T: FromStr>(raw: &str) -> Option<T> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
