//! Per-row evaluation of a resolved subtraction.

use arith_result::{Error, Result};
use arith_types::{DecimalValue, RuntimeValue, TimestampValue, TypeKind};

use crate::date::{
    elapsed_between, subtract_duration_from_timestamp, subtract_months_from_date,
    subtract_months_from_timestamp,
};
use crate::deferred::DeferredValue;
use crate::promotion::ResolvedOperation;
use crate::scalar::decimal;

/// Force both operands and compute `left - right` as `op` prescribes.
///
/// Producer faults are returned unchanged. A forced value whose variant
/// disagrees with its accessor's declared kind is a [`Error::TypeMismatch`];
/// a decimal with more digits than its declared type allows is an
/// [`Error::ArithmeticOverflow`].
pub fn evaluate(
    left: &dyn DeferredValue,
    right: &dyn DeferredValue,
    op: &ResolvedOperation,
) -> Result<RuntimeValue> {
    let lhs = force(left)?;
    let rhs = force(right)?;

    match op.dispatch_kind {
        TypeKind::Byte => {
            let diff = integral_difference(&lhs, &rhs, op.dispatch_kind)?;
            narrow(diff, op.dispatch_kind).map(RuntimeValue::Byte)
        }
        TypeKind::Short => {
            let diff = integral_difference(&lhs, &rhs, op.dispatch_kind)?;
            narrow(diff, op.dispatch_kind).map(RuntimeValue::Short)
        }
        TypeKind::Int => {
            let diff = integral_difference(&lhs, &rhs, op.dispatch_kind)?;
            narrow(diff, op.dispatch_kind).map(RuntimeValue::Int)
        }
        TypeKind::Long => {
            let diff = integral_difference(&lhs, &rhs, op.dispatch_kind)?;
            narrow(diff, op.dispatch_kind).map(RuntimeValue::Long)
        }
        TypeKind::Float => Ok(RuntimeValue::Float(as_f32(&lhs)? - as_f32(&rhs)?)),
        TypeKind::Double => Ok(RuntimeValue::Double(as_f64(&lhs)? - as_f64(&rhs)?)),
        TypeKind::Decimal => {
            let target = op.output_type.as_decimal().ok_or_else(|| {
                Error::Internal(format!(
                    "decimal dispatch with non-decimal output type {}",
                    op.output_type
                ))
            })?;
            let diff = decimal::subtract(as_decimal(&lhs)?, as_decimal(&rhs)?, target)?;
            Ok(RuntimeValue::Decimal(diff))
        }
        TypeKind::VarcharLike => Err(Error::Internal(
            "string is never a subtraction dispatch kind".into(),
        )),
        TypeKind::Date
        | TypeKind::Timestamp
        | TypeKind::IntervalYearMonth
        | TypeKind::IntervalDayTime => temporal_difference(lhs, rhs, op.dispatch_kind),
    }
}

fn force(operand: &dyn DeferredValue) -> Result<RuntimeValue> {
    let descriptor = operand.descriptor();
    let declared = descriptor.kind();
    let value = operand.get().inspect_err(|err| {
        tracing::debug!(declared = %declared, error = %err, "operand producer failed");
    })?;
    if value.kind() != declared {
        return Err(mismatch(declared, &value));
    }
    if let (Some(ty), RuntimeValue::Decimal(v)) = (descriptor.as_decimal(), &value) {
        if !v.fits(ty) {
            return Err(Error::overflow(format!("decimal value {v} does not fit {ty}")));
        }
    }
    Ok(value)
}

fn mismatch(expected: TypeKind, got: &RuntimeValue) -> Error {
    Error::TypeMismatch {
        expected: expected.name(),
        got: got.kind().name(),
    }
}

fn as_i64(value: &RuntimeValue, dispatch: TypeKind) -> Result<i64> {
    match value {
        RuntimeValue::Byte(v) => Ok(i64::from(*v)),
        RuntimeValue::Short(v) => Ok(i64::from(*v)),
        RuntimeValue::Int(v) => Ok(i64::from(*v)),
        RuntimeValue::Long(v) => Ok(*v),
        other => Err(mismatch(dispatch, other)),
    }
}

fn integral_difference(lhs: &RuntimeValue, rhs: &RuntimeValue, dispatch: TypeKind) -> Result<i64> {
    as_i64(lhs, dispatch)?
        .checked_sub(as_i64(rhs, dispatch)?)
        .ok_or_else(|| Error::overflow(format!("{dispatch} subtraction overflow")))
}

fn narrow<T: TryFrom<i64>>(diff: i64, dispatch: TypeKind) -> Result<T> {
    T::try_from(diff).map_err(|_| Error::overflow(format!("{dispatch} subtraction overflow")))
}

fn as_f64(value: &RuntimeValue) -> Result<f64> {
    match value {
        RuntimeValue::Byte(v) => Ok(f64::from(*v)),
        RuntimeValue::Short(v) => Ok(f64::from(*v)),
        RuntimeValue::Int(v) => Ok(f64::from(*v)),
        RuntimeValue::Long(v) => Ok(*v as f64),
        RuntimeValue::Float(v) => Ok(f64::from(*v)),
        RuntimeValue::Double(v) => Ok(*v),
        RuntimeValue::Decimal(v) => Ok(v.to_f64()),
        RuntimeValue::Varchar(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|err| Error::expr_cast(format!("cannot convert '{text}' to double: {err}"))),
        other => Err(mismatch(TypeKind::Double, other)),
    }
}

fn as_f32(value: &RuntimeValue) -> Result<f32> {
    match value {
        RuntimeValue::Byte(v) => Ok(f32::from(*v)),
        RuntimeValue::Short(v) => Ok(f32::from(*v)),
        RuntimeValue::Int(v) => Ok(*v as f32),
        RuntimeValue::Long(v) => Ok(*v as f32),
        RuntimeValue::Float(v) => Ok(*v),
        RuntimeValue::Decimal(v) => Ok(v.to_f64() as f32),
        other => Err(mismatch(TypeKind::Float, other)),
    }
}

fn as_decimal(value: &RuntimeValue) -> Result<DecimalValue> {
    match value {
        RuntimeValue::Decimal(v) => Ok(*v),
        RuntimeValue::Byte(v) => Ok(DecimalValue::from_i64(i64::from(*v))),
        RuntimeValue::Short(v) => Ok(DecimalValue::from_i64(i64::from(*v))),
        RuntimeValue::Int(v) => Ok(DecimalValue::from_i64(i64::from(*v))),
        RuntimeValue::Long(v) => Ok(DecimalValue::from_i64(*v)),
        other => Err(mismatch(TypeKind::Decimal, other)),
    }
}

fn as_timestamp(value: &RuntimeValue) -> Option<TimestampValue> {
    match value {
        RuntimeValue::Timestamp(ts) => Some(*ts),
        RuntimeValue::Date(date) => Some(date.midnight()),
        _ => None,
    }
}

fn temporal_difference(
    lhs: RuntimeValue,
    rhs: RuntimeValue,
    dispatch: TypeKind,
) -> Result<RuntimeValue> {
    use RuntimeValue as V;

    match (dispatch, &lhs, &rhs) {
        (TypeKind::IntervalYearMonth, V::IntervalYearMonth(a), V::IntervalYearMonth(b)) => a
            .checked_sub(*b)
            .map(V::IntervalYearMonth)
            .ok_or_else(|| Error::overflow("interval_year_month subtraction overflow")),
        (TypeKind::IntervalDayTime, V::IntervalDayTime(a), V::IntervalDayTime(b)) => a
            .checked_sub(*b)
            .map(V::IntervalDayTime)
            .ok_or_else(|| Error::overflow("interval_day_time subtraction overflow")),
        (TypeKind::Date, V::Date(date), V::IntervalYearMonth(months)) => {
            subtract_months_from_date(*date, *months).map(V::Date)
        }
        (TypeKind::Timestamp, V::Timestamp(ts), V::IntervalYearMonth(months)) => {
            subtract_months_from_timestamp(*ts, *months).map(V::Timestamp)
        }
        (TypeKind::Timestamp, V::Date(_) | V::Timestamp(_), V::IntervalDayTime(duration)) => {
            let start = as_timestamp(&lhs).ok_or_else(|| mismatch(dispatch, &lhs))?;
            subtract_duration_from_timestamp(start, *duration).map(V::Timestamp)
        }
        (TypeKind::IntervalDayTime, V::Date(_) | V::Timestamp(_), V::Date(_) | V::Timestamp(_)) => {
            let end = as_timestamp(&lhs).ok_or_else(|| mismatch(dispatch, &lhs))?;
            let start = as_timestamp(&rhs).ok_or_else(|| mismatch(dispatch, &rhs))?;
            elapsed_between(end, start).map(V::IntervalDayTime)
        }
        (_, left, right) => {
            let offending = if as_timestamp(left).is_some() || left.kind() == dispatch {
                right
            } else {
                left
            };
            Err(mismatch(dispatch, offending))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deferred::{DeferredFn, DeferredLiteral};
    use crate::promotion::resolve;
    use arith_types::{CompatibilityMode, IntervalDayTime, IntervalYearMonth, TypeDescriptor};

    fn lit(ty: &str, text: &str) -> DeferredLiteral {
        DeferredLiteral::parse(ty.parse().unwrap(), text).unwrap()
    }

    fn sub(left: &DeferredLiteral, right: &DeferredLiteral) -> Result<RuntimeValue> {
        let op = resolve(
            left.descriptor(),
            right.descriptor(),
            CompatibilityMode::Standard,
        )?;
        evaluate(left, right, &op)
    }

    #[test]
    fn integral_overflow_in_widened_width_faults() {
        let err = sub(&lit("tinyint", "-128"), &lit("tinyint", "1")).unwrap_err();
        assert!(matches!(err, Error::ArithmeticOverflow(_)));
        assert_eq!(
            sub(&lit("tinyint", "-128"), &lit("smallint", "1")).unwrap(),
            RuntimeValue::Short(-129)
        );
        assert!(sub(&lit("bigint", "-9223372036854775808"), &lit("int", "1")).is_err());
    }

    #[test]
    fn non_numeric_string_is_a_cast_error() {
        let err = sub(&lit("string", "abc"), &lit("int", "1")).unwrap_err();
        assert!(matches!(err, Error::ExprCast(_)));
    }

    #[test]
    fn floating_edge_values_propagate() {
        let out = sub(&lit("double", "inf"), &lit("double", "inf")).unwrap();
        assert!(matches!(out, RuntimeValue::Double(v) if v.is_nan()));
    }

    #[test]
    fn mismatched_forced_value_is_reported() {
        let liar = DeferredFn::new(TypeDescriptor::Int, || Ok(RuntimeValue::Double(1.0)));
        let one = lit("int", "1");
        let op = resolve(TypeDescriptor::Int, TypeDescriptor::Int, CompatibilityMode::Standard)
            .unwrap();
        let err = evaluate(&liar, &one, &op).unwrap_err();
        assert_eq!(
            err,
            Error::TypeMismatch {
                expected: "int",
                got: "double"
            }
        );
    }

    #[test]
    fn decimal_wider_than_declared_type_is_rejected() {
        let ty = TypeDescriptor::decimal(5, 2).unwrap();
        let wide = DeferredFn::new(ty, || {
            Ok(RuntimeValue::Decimal(DecimalValue::new(1005, 3).unwrap()))
        });
        let zero = lit("decimal(5,2)", "0");
        let op = resolve(ty, ty, CompatibilityMode::Standard).unwrap();
        let err = evaluate(&wide, &zero, &op).unwrap_err();
        assert!(matches!(err, Error::ArithmeticOverflow(_)), "{err:?}");

        let too_tall = DeferredFn::new(ty, || {
            Ok(RuntimeValue::Decimal(DecimalValue::new(123_456, 2).unwrap()))
        });
        let err = evaluate(&zero, &too_tall, &op).unwrap_err();
        assert!(matches!(err, Error::ArithmeticOverflow(_)), "{err:?}");
    }

    #[test]
    fn float_minus_decimal_narrows_the_decimal() {
        let out = sub(&lit("float", "4.5"), &lit("decimal(5,2)", "1.25")).unwrap();
        assert_eq!(out, RuntimeValue::Float(3.25));
    }

    #[test]
    fn interval_overflow_faults() {
        let min = DeferredLiteral::new(
            TypeDescriptor::IntervalYearMonth,
            RuntimeValue::IntervalYearMonth(IntervalYearMonth::from_months(i32::MIN)),
        );
        let err = sub(&min, &lit("interval_year_month", "0-1")).unwrap_err();
        assert!(matches!(err, Error::ArithmeticOverflow(_)), "{err:?}");

        let min = DeferredLiteral::new(
            TypeDescriptor::IntervalDayTime,
            RuntimeValue::IntervalDayTime(IntervalDayTime::new(i64::MIN, 0).unwrap()),
        );
        let err = sub(&min, &lit("interval_day_time", "0 00:00:01")).unwrap_err();
        assert!(matches!(err, Error::ArithmeticOverflow(_)), "{err:?}");
    }

    #[test]
    fn elapsed_time_outside_calendar_faults() {
        let far = DeferredLiteral::new(
            TypeDescriptor::Timestamp,
            RuntimeValue::Timestamp(TimestampValue::from_epoch_nanos(i128::MAX)),
        );
        let err = sub(&far, &lit("timestamp", "2001-01-01 00:00:00")).unwrap_err();
        assert!(matches!(err, Error::ArithmeticOverflow(_)), "{err:?}");
        let err = sub(&lit("date", "2001-01-01"), &far).unwrap_err();
        assert!(matches!(err, Error::ArithmeticOverflow(_)), "{err:?}");
    }

    #[test]
    fn fault_in_right_operand_is_forwarded() {
        let left = lit("int", "1");
        let right = DeferredFn::new(TypeDescriptor::Int, || Err(Error::Eval("boom".into())));
        let op = resolve(TypeDescriptor::Int, TypeDescriptor::Int, CompatibilityMode::Standard)
            .unwrap();
        assert_eq!(evaluate(&left, &right, &op).unwrap_err(), Error::Eval("boom".into()));
    }
}
