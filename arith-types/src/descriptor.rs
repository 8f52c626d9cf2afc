//! Compile-time type descriptors for arithmetic operands.
//!
//! A [`TypeDescriptor`] names an operand's logical kind and, for fixed-point
//! decimals, its declared precision and scale. Descriptors are produced by the
//! schema layer and are never mutated afterwards.

use std::fmt;
use std::str::FromStr;

use arith_result::{Error, Result};
use arrow::datatypes::{DataType, IntervalUnit, TimeUnit};

use crate::decimal::MAX_DECIMAL_PRECISION;

/// Logical kind of a value, without any type parameters.
///
/// This is the tag the evaluator dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Decimal,
    VarcharLike,
    Date,
    Timestamp,
    IntervalYearMonth,
    IntervalDayTime,
}

impl TypeKind {
    /// SQL name of the kind as used in type strings and error messages.
    pub fn name(self) -> &'static str {
        match self {
            TypeKind::Byte => "tinyint",
            TypeKind::Short => "smallint",
            TypeKind::Int => "int",
            TypeKind::Long => "bigint",
            TypeKind::Float => "float",
            TypeKind::Double => "double",
            TypeKind::Decimal => "decimal",
            TypeKind::VarcharLike => "string",
            TypeKind::Date => "date",
            TypeKind::Timestamp => "timestamp",
            TypeKind::IntervalYearMonth => "interval_year_month",
            TypeKind::IntervalDayTime => "interval_day_time",
        }
    }

    #[inline]
    pub fn is_integral(self) -> bool {
        matches!(
            self,
            TypeKind::Byte | TypeKind::Short | TypeKind::Int | TypeKind::Long
        )
    }

    #[inline]
    pub fn is_floating(self) -> bool {
        matches!(self, TypeKind::Float | TypeKind::Double)
    }

    /// Date or timestamp.
    #[inline]
    pub fn is_temporal(self) -> bool {
        matches!(self, TypeKind::Date | TypeKind::Timestamp)
    }

    #[inline]
    pub fn is_interval(self) -> bool {
        matches!(
            self,
            TypeKind::IntervalYearMonth | TypeKind::IntervalDayTime
        )
    }

    /// Position of an integral kind in the width order `Byte < Short < Int < Long`.
    pub fn integral_rank(self) -> Option<u8> {
        match self {
            TypeKind::Byte => Some(0),
            TypeKind::Short => Some(1),
            TypeKind::Int => Some(2),
            TypeKind::Long => Some(3),
            _ => None,
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared precision and scale of a fixed-point decimal.
///
/// Invariant: `1 <= precision <= 38` and `scale <= precision`. The only way to
/// build one from untrusted input is [`DecimalType::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecimalType {
    precision: u8,
    scale: u8,
}

impl DecimalType {
    /// `decimal` with no parameters.
    pub const DEFAULT: DecimalType = DecimalType::new_unchecked(10, 0);
    /// Widest representable decimal.
    pub const MAX_PRECISION: u8 = MAX_DECIMAL_PRECISION;

    pub fn new(precision: u8, scale: u8) -> Result<Self> {
        if precision == 0 || precision > Self::MAX_PRECISION {
            return Err(Error::InvalidArgumentError(format!(
                "decimal precision {precision} must be between 1 and {}",
                Self::MAX_PRECISION
            )));
        }
        if scale > precision {
            return Err(Error::InvalidArgumentError(format!(
                "decimal scale {scale} exceeds precision {precision}"
            )));
        }
        Ok(Self { precision, scale })
    }

    /// Caller guarantees the invariant; used for compile-time constants and for
    /// results the precision rules have already capped.
    pub(crate) const fn new_unchecked(precision: u8, scale: u8) -> Self {
        Self { precision, scale }
    }

    /// Clamp `precision` into `1..=38` and `scale` into `0..=precision`.
    ///
    /// Used when the parameters are derived from already-valid types.
    pub const fn saturating(precision: u8, scale: u8) -> Self {
        let precision = if precision == 0 {
            1
        } else if precision > Self::MAX_PRECISION {
            Self::MAX_PRECISION
        } else {
            precision
        };
        let scale = if scale > precision { precision } else { scale };
        Self { precision, scale }
    }

    #[inline]
    pub const fn precision(self) -> u8 {
        self.precision
    }

    #[inline]
    pub const fn scale(self) -> u8 {
        self.scale
    }

    /// Digits available left of the decimal point.
    #[inline]
    pub const fn integer_digits(self) -> u8 {
        self.precision - self.scale
    }
}

impl fmt::Display for DecimalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decimal({},{})", self.precision, self.scale)
    }
}

/// Logical type of an operand or result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Decimal(DecimalType),
    VarcharLike,
    Date,
    Timestamp,
    IntervalYearMonth,
    IntervalDayTime,
}

impl TypeDescriptor {
    /// Validated decimal descriptor.
    pub fn decimal(precision: u8, scale: u8) -> Result<Self> {
        DecimalType::new(precision, scale).map(TypeDescriptor::Decimal)
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            TypeDescriptor::Byte => TypeKind::Byte,
            TypeDescriptor::Short => TypeKind::Short,
            TypeDescriptor::Int => TypeKind::Int,
            TypeDescriptor::Long => TypeKind::Long,
            TypeDescriptor::Float => TypeKind::Float,
            TypeDescriptor::Double => TypeKind::Double,
            TypeDescriptor::Decimal(_) => TypeKind::Decimal,
            TypeDescriptor::VarcharLike => TypeKind::VarcharLike,
            TypeDescriptor::Date => TypeKind::Date,
            TypeDescriptor::Timestamp => TypeKind::Timestamp,
            TypeDescriptor::IntervalYearMonth => TypeKind::IntervalYearMonth,
            TypeDescriptor::IntervalDayTime => TypeKind::IntervalDayTime,
        }
    }

    pub fn as_decimal(&self) -> Option<DecimalType> {
        match self {
            TypeDescriptor::Decimal(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Maximum number of decimal digits an integral kind can hold.
    pub fn integral_decimal_digits(&self) -> Option<u8> {
        match self {
            TypeDescriptor::Byte => Some(3),
            TypeDescriptor::Short => Some(5),
            TypeDescriptor::Int => Some(10),
            TypeDescriptor::Long => Some(19),
            _ => None,
        }
    }

    /// Decimal view of the descriptor: decimals as declared, integral kinds as
    /// `decimal(digits, 0)`, anything else `None`.
    pub fn to_decimal(&self) -> Option<DecimalType> {
        match self {
            TypeDescriptor::Decimal(dt) => Some(*dt),
            other => other
                .integral_decimal_digits()
                .map(|digits| DecimalType::new_unchecked(digits, 0)),
        }
    }

    /// Arrow type the row pipeline uses to serialize values of this descriptor.
    pub fn to_arrow(&self) -> DataType {
        match self {
            TypeDescriptor::Byte => DataType::Int8,
            TypeDescriptor::Short => DataType::Int16,
            TypeDescriptor::Int => DataType::Int32,
            TypeDescriptor::Long => DataType::Int64,
            TypeDescriptor::Float => DataType::Float32,
            TypeDescriptor::Double => DataType::Float64,
            // scale <= 38 always fits in i8
            TypeDescriptor::Decimal(dt) => DataType::Decimal128(dt.precision(), dt.scale() as i8),
            TypeDescriptor::VarcharLike => DataType::Utf8,
            TypeDescriptor::Date => DataType::Date32,
            TypeDescriptor::Timestamp => {
                DataType::Timestamp(TimeUnit::Nanosecond, Some("UTC".into()))
            }
            TypeDescriptor::IntervalYearMonth => DataType::Interval(IntervalUnit::YearMonth),
            TypeDescriptor::IntervalDayTime => DataType::Duration(TimeUnit::Nanosecond),
        }
    }
}

impl From<DecimalType> for TypeDescriptor {
    fn from(dt: DecimalType) -> Self {
        TypeDescriptor::Decimal(dt)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Decimal(dt) => dt.fmt(f),
            other => f.write_str(other.kind().name()),
        }
    }
}

/// Parses SQL type names such as `int`, `decimal(10,2)`, or `varchar(20)`.
impl FromStr for TypeDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim().to_ascii_lowercase();
        let (name, args) = split_type_args(&text)?;
        let no_args = |desc: TypeDescriptor| {
            if args.is_some() {
                Err(Error::InvalidArgumentError(format!(
                    "type '{name}' does not take parameters"
                )))
            } else {
                Ok(desc)
            }
        };

        match name {
            "tinyint" => no_args(TypeDescriptor::Byte),
            "smallint" => no_args(TypeDescriptor::Short),
            "int" | "integer" => no_args(TypeDescriptor::Int),
            "bigint" => no_args(TypeDescriptor::Long),
            "float" => no_args(TypeDescriptor::Float),
            "double" => no_args(TypeDescriptor::Double),
            "string" => no_args(TypeDescriptor::VarcharLike),
            "date" => no_args(TypeDescriptor::Date),
            "timestamp" => no_args(TypeDescriptor::Timestamp),
            "interval_year_month" => no_args(TypeDescriptor::IntervalYearMonth),
            "interval_day_time" => no_args(TypeDescriptor::IntervalDayTime),
            "varchar" | "char" => match args.as_deref() {
                Some([len]) if parse_param::<u32>(len, "length").is_ok_and(|n| n > 0) => {
                    Ok(TypeDescriptor::VarcharLike)
                }
                _ => Err(Error::InvalidArgumentError(format!(
                    "type '{name}' requires a positive length"
                ))),
            },
            "decimal" | "numeric" => match args.as_deref() {
                None => Ok(TypeDescriptor::Decimal(DecimalType::DEFAULT)),
                Some([precision]) => {
                    TypeDescriptor::decimal(parse_param(precision, "precision")?, 0)
                }
                Some([precision, scale]) => TypeDescriptor::decimal(
                    parse_param(precision, "precision")?,
                    parse_param(scale, "scale")?,
                ),
                Some(_) => Err(Error::InvalidArgumentError(format!(
                    "too many parameters for type '{text}'"
                ))),
            },
            _ => Err(Error::InvalidArgumentError(format!(
                "unknown type name '{}'",
                s.trim()
            ))),
        }
    }
}

/// Split `name(a, b)` into `("name", Some(["a", "b"]))`.
fn split_type_args(text: &str) -> Result<(&str, Option<Vec<&str>>)> {
    let Some(open) = text.find('(') else {
        return Ok((text, None));
    };
    let inner = text[open + 1..].strip_suffix(')').ok_or_else(|| {
        Error::InvalidArgumentError(format!("unterminated parameter list in type '{text}'"))
    })?;
    let args = inner.split(',').map(str::trim).collect();
    Ok((text[..open].trim_end(), Some(args)))
}

fn parse_param<T: FromStr>(raw: &str, what: &str) -> Result<T> {
    raw.parse::<T>()
        .map_err(|_| Error::InvalidArgumentError(format!("invalid {what} '{raw}'")))
}
