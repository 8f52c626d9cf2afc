//! Result-type resolution for `left - right`.
//!
//! [`resolve`] runs once per compiled expression. It is a pure function of the
//! two operand descriptors and the compatibility mode; the returned
//! [`ResolvedOperation`] is cached by the caller and reused for every row.
//!
//! Rules, first match wins:
//!
//! 1. Temporal and interval pairs have fixed results that ignore the mode.
//!    Any other pairing that involves a temporal or interval kind is rejected,
//!    including `interval - date` since subtraction does not commute here.
//! 2. A string operand turns the whole operation into `double`.
//! 3. Two integral kinds produce the wider of the two.
//! 4. `double` wins over everything left, then `float`.
//! 5. Otherwise at least one side is a decimal; integral kinds join as
//!    `decimal(digits, 0)` and [`resolve_decimal`] derives the result.

use arith_result::{Error, Result};
use arith_types::{CompatibilityMode, TypeDescriptor, TypeKind};

pub use crate::scalar::decimal::PrecisionLoss;
use crate::scalar::decimal::resolve_decimal;

/// Cached outcome of type resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedOperation {
    /// Declared type of the result.
    pub output_type: TypeDescriptor,
    /// Kind both operands are coerced to before subtracting.
    pub dispatch_kind: TypeKind,
    /// Present when a decimal result type had to be capped.
    pub precision_loss: Option<PrecisionLoss>,
}

impl ResolvedOperation {
    fn plain(output_type: TypeDescriptor) -> Self {
        Self {
            output_type,
            dispatch_kind: output_type.kind(),
            precision_loss: None,
        }
    }
}

/// Resolve the result type of `left - right` under `mode`.
///
/// Fails with [`Error::UnsupportedTypePair`] for every pairing the rules do
/// not cover. Never panics.
pub fn resolve(
    left: TypeDescriptor,
    right: TypeDescriptor,
    mode: CompatibilityMode,
) -> Result<ResolvedOperation> {
    use TypeKind::*;

    let resolved = match (left.kind(), right.kind()) {
        (IntervalYearMonth, IntervalYearMonth) => {
            ResolvedOperation::plain(TypeDescriptor::IntervalYearMonth)
        }
        (IntervalDayTime, IntervalDayTime) => {
            ResolvedOperation::plain(TypeDescriptor::IntervalDayTime)
        }
        (Date, IntervalYearMonth) => ResolvedOperation::plain(TypeDescriptor::Date),
        (Date, IntervalDayTime) | (Timestamp, IntervalYearMonth | IntervalDayTime) => {
            ResolvedOperation::plain(TypeDescriptor::Timestamp)
        }
        (Date | Timestamp, Date | Timestamp) => {
            ResolvedOperation::plain(TypeDescriptor::IntervalDayTime)
        }
        (l, r) if is_calendar(l) || is_calendar(r) => return Err(reject(left, right)),

        (VarcharLike, _) | (_, VarcharLike) => ResolvedOperation::plain(TypeDescriptor::Double),

        (l, r) if l.is_integral() && r.is_integral() => {
            let wider = if l.integral_rank() >= r.integral_rank() {
                left
            } else {
                right
            };
            ResolvedOperation::plain(wider)
        }

        (l, r) if l.is_floating() || r.is_floating() => {
            if l == Double || r == Double {
                ResolvedOperation::plain(TypeDescriptor::Double)
            } else {
                ResolvedOperation::plain(TypeDescriptor::Float)
            }
        }

        (Decimal, _) | (_, Decimal) => match (left.to_decimal(), right.to_decimal()) {
            (Some(l), Some(r)) => {
                let res = resolve_decimal(l, r, mode);
                if let Some(loss) = res.precision_loss {
                    tracing::warn!(
                        %left,
                        %right,
                        %mode,
                        required_precision = loss.required_precision,
                        declared_scale = loss.declared_scale,
                        adjusted_scale = loss.adjusted_scale,
                        "decimal result type capped at maximum precision"
                    );
                }
                ResolvedOperation {
                    output_type: TypeDescriptor::Decimal(res.result),
                    dispatch_kind: TypeKind::Decimal,
                    precision_loss: res.precision_loss,
                }
            }
            _ => return Err(reject(left, right)),
        },

        _ => return Err(reject(left, right)),
    };

    tracing::trace!(%left, %right, %mode, output = %resolved.output_type, "resolved subtraction");
    Ok(resolved)
}

fn is_calendar(kind: TypeKind) -> bool {
    kind.is_temporal() || kind.is_interval()
}

fn reject(left: TypeDescriptor, right: TypeDescriptor) -> Error {
    tracing::debug!(%left, %right, "rejected operand types for subtraction");
    Error::unsupported_pair(left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arith_types::DecimalType;

    fn ty(name: &str) -> TypeDescriptor {
        name.parse().unwrap()
    }

    fn output(left: &str, right: &str) -> Result<TypeDescriptor> {
        resolve(ty(left), ty(right), CompatibilityMode::Standard).map(|op| op.output_type)
    }

    #[test]
    fn integral_pairs_take_the_wider_kind() {
        assert_eq!(output("tinyint", "smallint").unwrap(), TypeDescriptor::Short);
        assert_eq!(output("bigint", "int").unwrap(), TypeDescriptor::Long);
        assert_eq!(output("tinyint", "tinyint").unwrap(), TypeDescriptor::Byte);
    }

    #[test]
    fn strings_force_double() {
        assert_eq!(output("string", "int").unwrap(), TypeDescriptor::Double);
        assert_eq!(output("decimal(5,2)", "varchar(10)").unwrap(), TypeDescriptor::Double);
        assert_eq!(output("string", "string").unwrap(), TypeDescriptor::Double);
    }

    #[test]
    fn floating_kinds_absorb_exact_kinds() {
        assert_eq!(output("float", "decimal(10,2)").unwrap(), TypeDescriptor::Float);
        assert_eq!(output("float", "bigint").unwrap(), TypeDescriptor::Float);
        assert_eq!(output("float", "double").unwrap(), TypeDescriptor::Double);
        assert_eq!(output("decimal(5,2)", "double").unwrap(), TypeDescriptor::Double);
    }

    #[test]
    fn integral_joins_decimal_with_its_digit_count() {
        assert_eq!(
            output("int", "decimal(10,2)").unwrap(),
            TypeDescriptor::Decimal(DecimalType::new(13, 2).unwrap())
        );
        assert_eq!(
            output("decimal(9,4)", "bigint").unwrap(),
            TypeDescriptor::Decimal(DecimalType::new(24, 4).unwrap())
        );
    }

    #[test]
    fn interval_minus_date_is_rejected() {
        let err = output("interval_year_month", "date").unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedTypePair {
                left: "interval_year_month".into(),
                right: "date".into(),
            }
        );
    }

    #[test]
    fn temporal_with_numeric_or_string_is_rejected() {
        for (l, r) in [
            ("date", "int"),
            ("timestamp", "string"),
            ("interval_day_time", "double"),
            ("decimal(5,2)", "date"),
            ("interval_year_month", "interval_day_time"),
            ("interval_day_time", "timestamp"),
        ] {
            assert!(
                matches!(output(l, r), Err(Error::UnsupportedTypePair { .. })),
                "{l} - {r}"
            );
        }
    }

    #[test]
    fn dispatch_kind_follows_output() {
        let op = resolve(ty("date"), ty("interval_day_time"), CompatibilityMode::Legacy).unwrap();
        assert_eq!(op.output_type, TypeDescriptor::Timestamp);
        assert_eq!(op.dispatch_kind, TypeKind::Timestamp);

        let op = resolve(ty("string"), ty("int"), CompatibilityMode::Legacy).unwrap();
        assert_eq!(op.dispatch_kind, TypeKind::Double);
    }
}
