//! Type descriptors and runtime values shared across the arith workspace.
//!
//! The compiler hands the resolver a pair of [`TypeDescriptor`]s; the row
//! pipeline hands the evaluator a pair of [`RuntimeValue`]s. Both are plain,
//! immutable data: nothing in this crate performs arithmetic beyond what the
//! value types need to validate and normalize themselves.

pub mod decimal;
pub mod descriptor;
pub mod interval;
pub mod mode;
pub mod temporal;
pub mod value;

pub use decimal::{DecimalError, DecimalValue, MAX_DECIMAL_PRECISION};
pub use descriptor::{DecimalType, TypeDescriptor, TypeKind};
pub use interval::{IntervalDayTime, IntervalYearMonth};
pub use mode::CompatibilityMode;
pub use temporal::{DateValue, TimestampValue};
pub use value::RuntimeValue;
