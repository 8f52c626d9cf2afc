//! Calendar and clock arithmetic between temporal values and intervals.
//!
//! Month shifts keep the day-of-month and clamp it to the length of the
//! target month (`2001-03-31` minus one month is `2001-02-28`). Day-time
//! shifts are exact nanosecond offsets on the UTC timeline. Every result is
//! checked against the supported calendar range; nothing wraps.

use arith_result::{Error, Result};
use arith_types::{DateValue, IntervalDayTime, IntervalYearMonth, TimestampValue};
use time::{Date, Month, PrimitiveDateTime};

/// `date - months`, clamping the day to the target month.
pub fn subtract_months_from_date(
    date: DateValue,
    months: IntervalYearMonth,
) -> Result<DateValue> {
    let calendar = date
        .to_date()
        .ok_or_else(|| Error::overflow("date out of range"))?;
    let shifted = add_months(calendar, negate(months)?)?;
    Ok(DateValue::from_date(shifted))
}

/// `timestamp - months`; the time of day is kept.
pub fn subtract_months_from_timestamp(
    ts: TimestampValue,
    months: IntervalYearMonth,
) -> Result<TimestampValue> {
    let datetime = ts
        .to_datetime()
        .ok_or_else(|| Error::overflow("timestamp out of range"))?;
    let shifted = add_months(datetime.date(), negate(months)?)?;
    Ok(TimestampValue::from_datetime(PrimitiveDateTime::new(
        shifted,
        datetime.time(),
    )))
}

/// `timestamp - duration` on the nanosecond timeline.
pub fn subtract_duration_from_timestamp(
    ts: TimestampValue,
    duration: IntervalDayTime,
) -> Result<TimestampValue> {
    let nanos = ts
        .epoch_nanos()
        .checked_sub(duration.total_nanos())
        .ok_or_else(|| Error::overflow("timestamp out of range"))?;
    let result = TimestampValue::from_epoch_nanos(nanos);
    if result.to_datetime().is_none() {
        return Err(Error::overflow("timestamp out of range"));
    }
    Ok(result)
}

/// Elapsed time from `rhs` to `lhs`, negative when `lhs` is earlier.
pub fn elapsed_between(lhs: TimestampValue, rhs: TimestampValue) -> Result<IntervalDayTime> {
    if lhs.to_datetime().is_none() || rhs.to_datetime().is_none() {
        return Err(Error::overflow("timestamp out of range"));
    }
    lhs.epoch_nanos()
        .checked_sub(rhs.epoch_nanos())
        .and_then(IntervalDayTime::from_total_nanos)
        .ok_or_else(|| Error::overflow("interval_day_time out of range"))
}

fn negate(months: IntervalYearMonth) -> Result<i32> {
    months
        .total_months()
        .checked_neg()
        .ok_or_else(|| Error::overflow("interval overflow while negating for date arithmetic"))
}

fn add_months(date: Date, months_delta: i32) -> Result<Date> {
    if months_delta == 0 {
        return Ok(date);
    }

    let current_year = i64::from(date.year());
    let current_month = i64::from(date.month() as u8);
    let target_index = current_year * 12 + (current_month - 1) + i64::from(months_delta);

    let new_year = i32::try_from(target_index.div_euclid(12))
        .map_err(|_| Error::overflow("resulting date year out of range after month arithmetic"))?;
    let month_index = target_index.rem_euclid(12) as u8;
    let new_month = Month::January.nth_next(month_index);

    let new_day = date.day().min(new_month.length(new_year));

    Date::from_calendar_date(new_year, new_month, new_day).map_err(|err| {
        Error::overflow(format!("resulting date is out of range after month arithmetic: {err}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(text: &str) -> DateValue {
        text.parse().unwrap()
    }

    fn ts(text: &str) -> TimestampValue {
        text.parse().unwrap()
    }

    #[test]
    fn month_subtraction_keeps_day_of_month() {
        let out = subtract_months_from_date(date("2004-02-15"), "2-8".parse().unwrap()).unwrap();
        assert_eq!(out, date("2001-06-15"));
    }

    #[test]
    fn month_subtraction_clamps_to_month_end() {
        let one_month = IntervalYearMonth::from_months(1);
        assert_eq!(
            subtract_months_from_date(date("2001-03-31"), one_month).unwrap(),
            date("2001-02-28")
        );
        assert_eq!(
            subtract_months_from_date(date("2004-03-31"), one_month).unwrap(),
            date("2004-02-29")
        );
    }

    #[test]
    fn negative_months_move_forward() {
        let out =
            subtract_months_from_date(date("2001-01-31"), IntervalYearMonth::from_months(-13))
                .unwrap();
        assert_eq!(out, date("2002-02-28"));
    }

    #[test]
    fn timestamp_month_shift_keeps_time_of_day() {
        let out = subtract_months_from_timestamp(
            ts("2004-01-15 01:02:03.123456789"),
            "2-2".parse().unwrap(),
        )
        .unwrap();
        assert_eq!(out, ts("2001-11-15 01:02:03.123456789"));
    }

    #[test]
    fn duration_shift_crosses_midnight() {
        let out = subtract_duration_from_timestamp(
            date("2001-01-01").midnight(),
            "1 0:0:0.555".parse().unwrap(),
        )
        .unwrap();
        assert_eq!(out.to_string(), "2000-12-30 23:59:59.445");
    }

    #[test]
    fn results_outside_calendar_overflow() {
        let err =
            subtract_months_from_date(date("0001-01-01"), IntervalYearMonth::from_months(i32::MAX))
                .unwrap_err();
        assert!(matches!(err, Error::ArithmeticOverflow(_)));

        let earliest = DateValue::from_ymd(-9999, 1, 1).unwrap().midnight();
        let err = subtract_duration_from_timestamp(earliest, IntervalDayTime::new(1, 0).unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::ArithmeticOverflow(_)));
    }

    #[test]
    fn elapsed_time_is_signed() {
        let gap = elapsed_between(ts("2001-01-02 00:00:00"), ts("2001-01-01 12:00:00")).unwrap();
        assert_eq!(gap.to_string(), "0 12:00:00");
        let gap = elapsed_between(ts("2001-01-01 12:00:00"), ts("2001-01-02 00:00:00")).unwrap();
        assert_eq!(gap.to_string(), "-0 12:00:00");
    }

    #[test]
    fn elapsed_time_rejects_instants_outside_calendar() {
        let far = TimestampValue::from_epoch_nanos(i128::MAX);
        let err = elapsed_between(far, TimestampValue::from_epoch_nanos(-1)).unwrap_err();
        assert!(matches!(err, Error::ArithmeticOverflow(_)));

        let ancient = TimestampValue::from_epoch_nanos(i128::MIN);
        let err = elapsed_between(ts("2001-01-01 00:00:00"), ancient).unwrap_err();
        assert!(matches!(err, Error::ArithmeticOverflow(_)));
    }
}
