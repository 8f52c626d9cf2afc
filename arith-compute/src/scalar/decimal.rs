//! Decimal result typing and overflow-checked decimal subtraction.

use arith_types::decimal::digit_count;
use arith_types::{
    CompatibilityMode, DecimalError, DecimalType, DecimalValue, MAX_DECIMAL_PRECISION,
};
use arrow_buffer::i256;

const POW10_BASE: i256 = i256::from_i128(10);

/// Fractional digits Standard mode keeps when a result type must be capped.
pub const MINIMUM_ADJUSTED_SCALE: u8 = 6;

/// Advisory recorded when a derived decimal type exceeds the maximum
/// precision and its scale had to be reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrecisionLoss {
    /// Precision the exact result type would have needed.
    pub required_precision: u8,
    /// Scale before adjustment, the larger of the operand scales.
    pub declared_scale: u8,
    /// Scale of the capped result type.
    pub adjusted_scale: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecimalResolution {
    pub result: DecimalType,
    pub precision_loss: Option<PrecisionLoss>,
}

/// Derive the result type of `left - right`.
///
/// The exact type is `decimal(max(p1 - s1, p2 - s2) + max(s1, s2) + 1, max(s1, s2))`.
/// When that exceeds 38 digits the precision is capped and the scale shrinks:
///
/// * Standard keeps at least `min(scale, 6)` fractional digits, so values near
///   the top of the integer range can overflow at evaluation time.
/// * Legacy keeps the whole integer range and drops fractional digits instead.
pub fn resolve_decimal(
    left: DecimalType,
    right: DecimalType,
    mode: CompatibilityMode,
) -> DecimalResolution {
    let scale = left.scale().max(right.scale());
    let integer_digits = left.integer_digits().max(right.integer_digits()) + 1;
    let required_precision = integer_digits + scale;

    if required_precision <= MAX_DECIMAL_PRECISION {
        return DecimalResolution {
            result: DecimalType::saturating(required_precision, scale),
            precision_loss: None,
        };
    }

    let room = MAX_DECIMAL_PRECISION.saturating_sub(integer_digits);
    let adjusted_scale = match mode {
        CompatibilityMode::Standard => room.max(scale.min(MINIMUM_ADJUSTED_SCALE)),
        CompatibilityMode::Legacy => room,
    };

    DecimalResolution {
        result: DecimalType::saturating(MAX_DECIMAL_PRECISION, adjusted_scale),
        precision_loss: Some(PrecisionLoss {
            required_precision,
            declared_scale: scale,
            adjusted_scale,
        }),
    }
}

/// Subtract `rhs` from `lhs` and store the result in `target`.
///
/// Both operands are aligned to the larger scale in 256-bit arithmetic, so the
/// difference is exact. It is then rounded half away from zero if `target`
/// has fewer fractional digits. The result always carries `target.scale()`.
pub fn subtract(
    lhs: DecimalValue,
    rhs: DecimalValue,
    target: DecimalType,
) -> Result<DecimalValue, DecimalError> {
    let work_scale = lhs.scale().max(rhs.scale());
    let l = align(lhs, work_scale)?;
    let r = align(rhs, work_scale)?;
    let diff = l.checked_sub(r).ok_or(DecimalError::Overflow)?;
    let scaled = rescale_rounded(diff, work_scale, target.scale())?;

    if digit_count(scaled) > target.precision() {
        return Err(DecimalError::PrecisionOverflow {
            precision: target.precision(),
            scale: target.scale(),
        });
    }
    let value = scaled.to_i128().ok_or(DecimalError::Overflow)?;
    DecimalValue::new(value, target.scale())
}

fn pow10(exp: u32) -> Result<i256, DecimalError> {
    let max = u32::from(MAX_DECIMAL_PRECISION) * 2;
    if exp > max {
        return Err(DecimalError::ScaleOutOfRange { scale: exp });
    }
    Ok(POW10_BASE.wrapping_pow(exp))
}

fn align(value: DecimalValue, scale: u8) -> Result<i256, DecimalError> {
    let factor = pow10(u32::from(scale - value.scale()))?;
    i256::from_i128(value.raw_value())
        .checked_mul(factor)
        .ok_or(DecimalError::Overflow)
}

fn rescale_rounded(value: i256, from: u8, to: u8) -> Result<i256, DecimalError> {
    if to >= from {
        let factor = pow10(u32::from(to - from))?;
        return value.checked_mul(factor).ok_or(DecimalError::Overflow);
    }

    let factor = pow10(u32::from(from - to))?;
    let quotient = value.checked_div(factor).ok_or(DecimalError::Overflow)?;
    let remainder = value.checked_rem(factor).ok_or(DecimalError::Overflow)?;
    if remainder == i256::ZERO {
        return Ok(quotient);
    }

    let abs_rem = if remainder < i256::ZERO {
        remainder.wrapping_neg()
    } else {
        remainder
    };
    let double_rem = abs_rem
        .checked_mul(i256::from_i128(2))
        .ok_or(DecimalError::Overflow)?;
    if double_rem < factor {
        return Ok(quotient);
    }
    if value > i256::ZERO {
        quotient.checked_add(i256::ONE).ok_or(DecimalError::Overflow)
    } else {
        quotient.checked_sub(i256::ONE).ok_or(DecimalError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(precision: u8, scale: u8) -> DecimalType {
        DecimalType::new(precision, scale).unwrap()
    }

    fn dec(text: &str) -> DecimalValue {
        text.parse().unwrap()
    }

    #[test]
    fn result_type_widens_by_one_integer_digit() {
        let res = resolve_decimal(dt(3, 1), dt(5, 2), CompatibilityMode::Standard);
        assert_eq!(res.result, dt(6, 2));
        assert_eq!(res.precision_loss, None);

        let res = resolve_decimal(dt(9, 4), dt(19, 0), CompatibilityMode::Legacy);
        assert_eq!(res.result, dt(24, 4));
    }

    #[test]
    fn capped_type_depends_on_mode() {
        let standard = resolve_decimal(dt(38, 4), dt(38, 4), CompatibilityMode::Standard);
        assert_eq!(standard.result, dt(38, 4));
        assert_eq!(
            standard.precision_loss,
            Some(PrecisionLoss {
                required_precision: 39,
                declared_scale: 4,
                adjusted_scale: 4,
            })
        );

        let legacy = resolve_decimal(dt(38, 4), dt(38, 4), CompatibilityMode::Legacy);
        assert_eq!(legacy.result, dt(38, 3));
    }

    #[test]
    fn standard_keeps_six_fractional_digits_when_integers_dominate() {
        let res = resolve_decimal(dt(38, 0), dt(38, 10), CompatibilityMode::Standard);
        assert_eq!(res.result, dt(38, 6));
        let res = resolve_decimal(dt(38, 0), dt(38, 10), CompatibilityMode::Legacy);
        assert_eq!(res.result, dt(38, 0));
    }

    #[test]
    fn subtracts_across_scales_exactly() {
        let out = subtract(dec("14.5"), dec("234.97"), dt(6, 2)).unwrap();
        assert_eq!(out.to_string(), "-220.47");
        assert_eq!(out.scale(), 2);

        let out = subtract(dec("104"), dec("234.97"), dt(24, 4)).unwrap();
        assert_eq!(out.to_string(), "-130.9700");
    }

    #[test]
    fn rounds_half_away_from_zero_when_scale_shrinks() {
        assert_eq!(subtract(dec("1.0005"), dec("0"), dt(38, 3)).unwrap().to_string(), "1.001");
        assert_eq!(subtract(dec("-1.0005"), dec("0"), dt(38, 3)).unwrap().to_string(), "-1.001");
        assert_eq!(subtract(dec("1.0004"), dec("0"), dt(38, 3)).unwrap().to_string(), "1.000");
    }

    #[test]
    fn rejects_results_wider_than_target() {
        let err = subtract(dec("999.99"), dec("-999.99"), dt(5, 2)).unwrap_err();
        assert_eq!(
            err,
            DecimalError::PrecisionOverflow {
                precision: 5,
                scale: 2
            }
        );
    }
}
