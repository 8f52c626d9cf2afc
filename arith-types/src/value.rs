use std::fmt;

use arith_result::{Error, Result};

use crate::decimal::DecimalValue;
use crate::descriptor::{TypeDescriptor, TypeKind};
use crate::interval::{IntervalDayTime, IntervalYearMonth};
use crate::temporal::{DateValue, TimestampValue};

/// A single forced operand or result value.
///
/// Each variant corresponds to one [`TypeKind`]; decimals carry their own
/// scale, and the declared precision lives on the descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeValue {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Decimal(DecimalValue),
    Varchar(String),
    Date(DateValue),
    Timestamp(TimestampValue),
    IntervalYearMonth(IntervalYearMonth),
    IntervalDayTime(IntervalDayTime),
}

impl RuntimeValue {
    pub fn kind(&self) -> TypeKind {
        match self {
            RuntimeValue::Byte(_) => TypeKind::Byte,
            RuntimeValue::Short(_) => TypeKind::Short,
            RuntimeValue::Int(_) => TypeKind::Int,
            RuntimeValue::Long(_) => TypeKind::Long,
            RuntimeValue::Float(_) => TypeKind::Float,
            RuntimeValue::Double(_) => TypeKind::Double,
            RuntimeValue::Decimal(_) => TypeKind::Decimal,
            RuntimeValue::Varchar(_) => TypeKind::VarcharLike,
            RuntimeValue::Date(_) => TypeKind::Date,
            RuntimeValue::Timestamp(_) => TypeKind::Timestamp,
            RuntimeValue::IntervalYearMonth(_) => TypeKind::IntervalYearMonth,
            RuntimeValue::IntervalDayTime(_) => TypeKind::IntervalDayTime,
        }
    }

    /// Parse literal text as a value of `descriptor`.
    ///
    /// Decimal literals must fit the declared precision and scale. String
    /// literals are kept verbatim.
    pub fn parse(descriptor: &TypeDescriptor, text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let invalid = || {
            Error::InvalidArgumentError(format!("invalid {descriptor} literal '{trimmed}'"))
        };
        let value = match descriptor {
            TypeDescriptor::Byte => RuntimeValue::Byte(trimmed.parse().map_err(|_| invalid())?),
            TypeDescriptor::Short => RuntimeValue::Short(trimmed.parse().map_err(|_| invalid())?),
            TypeDescriptor::Int => RuntimeValue::Int(trimmed.parse().map_err(|_| invalid())?),
            TypeDescriptor::Long => RuntimeValue::Long(trimmed.parse().map_err(|_| invalid())?),
            TypeDescriptor::Float => RuntimeValue::Float(trimmed.parse().map_err(|_| invalid())?),
            TypeDescriptor::Double => {
                RuntimeValue::Double(trimmed.parse().map_err(|_| invalid())?)
            }
            TypeDescriptor::Decimal(dt) => {
                let value: DecimalValue = trimmed.parse()?;
                if !value.fits(*dt) {
                    return Err(Error::InvalidArgumentError(format!(
                        "literal '{trimmed}' does not fit {dt}"
                    )));
                }
                RuntimeValue::Decimal(value)
            }
            TypeDescriptor::VarcharLike => RuntimeValue::Varchar(text.to_owned()),
            TypeDescriptor::Date => RuntimeValue::Date(trimmed.parse()?),
            TypeDescriptor::Timestamp => RuntimeValue::Timestamp(trimmed.parse()?),
            TypeDescriptor::IntervalYearMonth => RuntimeValue::IntervalYearMonth(trimmed.parse()?),
            TypeDescriptor::IntervalDayTime => RuntimeValue::IntervalDayTime(trimmed.parse()?),
        };
        Ok(value)
    }
}

impl fmt::Display for RuntimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeValue::Byte(v) => write!(f, "{v}"),
            RuntimeValue::Short(v) => write!(f, "{v}"),
            RuntimeValue::Int(v) => write!(f, "{v}"),
            RuntimeValue::Long(v) => write!(f, "{v}"),
            RuntimeValue::Float(v) => write!(f, "{v}"),
            RuntimeValue::Double(v) => write!(f, "{v}"),
            RuntimeValue::Decimal(v) => write!(f, "{v}"),
            RuntimeValue::Varchar(v) => f.write_str(v),
            RuntimeValue::Date(v) => write!(f, "{v}"),
            RuntimeValue::Timestamp(v) => write!(f, "{v}"),
            RuntimeValue::IntervalYearMonth(v) => write!(f, "{v}"),
            RuntimeValue::IntervalDayTime(v) => write!(f, "{v}"),
        }
    }
}

impl From<DecimalValue> for RuntimeValue {
    fn from(value: DecimalValue) -> Self {
        RuntimeValue::Decimal(value)
    }
}

impl From<DateValue> for RuntimeValue {
    fn from(value: DateValue) -> Self {
        RuntimeValue::Date(value)
    }
}

impl From<TimestampValue> for RuntimeValue {
    fn from(value: TimestampValue) -> Self {
        RuntimeValue::Timestamp(value)
    }
}

impl From<IntervalYearMonth> for RuntimeValue {
    fn from(value: IntervalYearMonth) -> Self {
        RuntimeValue::IntervalYearMonth(value)
    }
}

impl From<IntervalDayTime> for RuntimeValue {
    fn from(value: IntervalDayTime) -> Self {
        RuntimeValue::IntervalDayTime(value)
    }
}
