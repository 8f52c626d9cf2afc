//! Fixed-point decimal values.
//!
//! Decimals are stored as an unscaled `i128` plus a scale, following Arrow's
//! `Decimal128` layout. Digit counting goes through `i256` so that callers can
//! validate intermediate results wider than 38 digits without overflowing.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use arith_result::Error;
use arrow::datatypes::DECIMAL128_MAX_PRECISION;
use arrow_buffer::i256;

use crate::descriptor::DecimalType;

/// Maximum precision supported by `DecimalValue` (aligns with Arrow's Decimal128).
pub const MAX_DECIMAL_PRECISION: u8 = DECIMAL128_MAX_PRECISION;
const POW10_BASE: i256 = i256::from_i128(10);

/// Errors that can occur while manipulating decimal values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecimalError {
    /// Requested scale falls outside the supported range.
    #[error("decimal scale {scale} outside supported range")]
    ScaleOutOfRange { scale: u32 },
    /// Result needs more significant digits than the target precision allows.
    #[error("decimal result does not fit in precision {precision} with scale {scale}")]
    PrecisionOverflow { precision: u8, scale: u8 },
    /// Intermediate arithmetic overflowed the 256-bit working range.
    #[error("decimal arithmetic overflow")]
    Overflow,
    /// Literal text is not a decimal number.
    #[error("invalid decimal literal '{0}'")]
    InvalidLiteral(String),
}

impl From<DecimalError> for Error {
    fn from(err: DecimalError) -> Self {
        match err {
            DecimalError::PrecisionOverflow { .. } | DecimalError::Overflow => {
                Error::ArithmeticOverflow(err.to_string())
            }
            DecimalError::ScaleOutOfRange { .. } | DecimalError::InvalidLiteral(_) => {
                Error::InvalidArgumentError(err.to_string())
            }
        }
    }
}

/// Runtime representation of a Decimal128 value.
///
/// Equality is structural: `1.50` and `1.5` are different values because they
/// carry different scales. Use [`Ord`] for numeric comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecimalValue {
    value: i128,
    scale: u8,
}

impl DecimalValue {
    /// Create a decimal from its raw parts, validating precision bounds.
    pub fn new(value: i128, scale: u8) -> Result<Self, DecimalError> {
        if scale > MAX_DECIMAL_PRECISION {
            return Err(DecimalError::ScaleOutOfRange {
                scale: u32::from(scale),
            });
        }
        if digit_count(i256::from_i128(value)) > MAX_DECIMAL_PRECISION {
            return Err(DecimalError::PrecisionOverflow {
                precision: MAX_DECIMAL_PRECISION,
                scale,
            });
        }
        Ok(Self { value, scale })
    }

    /// Construct a decimal from an integer value with zero scale.
    pub fn from_i64(value: i64) -> Self {
        // 19 digits at most, well inside the 38-digit limit
        Self {
            value: i128::from(value),
            scale: 0,
        }
    }

    /// Return the scaled integer backing this decimal.
    #[inline]
    pub fn raw_value(self) -> i128 {
        self.value
    }

    /// Return the scale (number of fractional digits).
    #[inline]
    pub fn scale(self) -> u8 {
        self.scale
    }

    /// Return the number of significant digits in the unscaled value.
    #[inline]
    pub fn precision(self) -> u8 {
        digit_count(i256::from_i128(self.value))
    }

    /// Whether the value can be stored in `target` without losing digits,
    /// assuming it is rescaled to the target scale first.
    pub fn fits(self, target: DecimalType) -> bool {
        let integer_digits = self.precision().saturating_sub(self.scale);
        let integer_digits = if self.value == 0 { 0 } else { integer_digits };
        self.scale <= target.scale() && integer_digits <= target.integer_digits()
    }

    /// Convert the decimal into an `f64` (lossy for high precision inputs).
    pub fn to_f64(self) -> f64 {
        if self.value == 0 {
            return 0.0;
        }
        let denominator = 10_f64.powi(i32::from(self.scale));
        (self.value as f64) / denominator
    }
}

impl fmt::Display for DecimalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.value);
        }
        let negative = self.value < 0;
        let digits = digit_buffer(i256::from_i128(self.value));
        let scale = self.scale as usize;
        if negative {
            f.write_str("-")?;
        }
        if digits.len() <= scale {
            f.write_str("0.")?;
            for _ in digits.len()..scale {
                f.write_str("0")?;
            }
            return f.write_str(&digits);
        }
        let split = digits.len() - scale;
        f.write_str(&digits[..split])?;
        f.write_str(".")?;
        f.write_str(&digits[split..])
    }
}

impl FromStr for DecimalValue {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
        let unsigned = int_part.trim_start_matches(['-', '+']);
        let well_formed = int_part.len() - unsigned.len() <= 1
            && (!unsigned.is_empty() || !frac_part.is_empty())
            && unsigned.bytes().all(|b| b.is_ascii_digit())
            && frac_part.bytes().all(|b| b.is_ascii_digit());
        if !well_formed {
            return Err(DecimalError::InvalidLiteral(s.to_string()));
        }

        if frac_part.len() > MAX_DECIMAL_PRECISION as usize {
            return Err(DecimalError::ScaleOutOfRange {
                scale: frac_part.len() as u32,
            });
        }

        let combined = format!("{int_part}{frac_part}");
        // Only digits and at most one sign remain, so a parse failure means the
        // value is wider than i128.
        let value = combined
            .parse::<i128>()
            .map_err(|_| DecimalError::PrecisionOverflow {
                precision: MAX_DECIMAL_PRECISION,
                scale: frac_part.len() as u8,
            })?;

        Self::new(value, frac_part.len() as u8)
    }
}

impl PartialOrd for DecimalValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DecimalValue {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.scale == other.scale {
            return self.value.cmp(&other.value);
        }

        let max_scale = self.scale.max(other.scale);
        let l_scaled = i256::from_i128(self.value)
            .wrapping_mul(POW10_BASE.wrapping_pow(u32::from(max_scale - self.scale)));
        let r_scaled = i256::from_i128(other.value)
            .wrapping_mul(POW10_BASE.wrapping_pow(u32::from(max_scale - other.scale)));

        // |value| < 10^38 and the factor is at most 10^38, so neither product
        // leaves the i256 range.
        l_scaled.cmp(&r_scaled)
    }
}

/// Number of decimal digits in `value`, ignoring sign. Zero has one digit.
pub fn digit_count(mut value: i256) -> u8 {
    if value == i256::ZERO {
        return 1;
    }
    if value < i256::ZERO {
        value = value.wrapping_neg();
    }
    let mut count: u8 = 0;
    while value != i256::ZERO {
        value = value.wrapping_div(POW10_BASE);
        count += 1;
    }
    count
}

fn digit_buffer(mut value: i256) -> String {
    if value == i256::ZERO {
        return "0".to_owned();
    }
    if value < i256::ZERO {
        value = value.wrapping_neg();
    }
    let mut buf = Vec::new();
    let mut current = value;
    while current != i256::ZERO {
        let digit = current.wrapping_rem(POW10_BASE).as_i128() as u8;
        buf.push((b'0' + digit) as char);
        current = current.wrapping_div(POW10_BASE);
    }
    buf.iter().rev().collect()
}
