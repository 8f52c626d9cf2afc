//! arith: typed binary subtraction for a SQL value domain.
//!
//! This crate is the entrypoint to the workspace. It re-exports the pieces a
//! caller needs to resolve and evaluate `left - right` over integral, floating,
//! decimal, string, temporal and interval operands.
//!
//! # Quick Start
//!
//! ```rust
//! use arith::{CompatibilityMode, DeferredLiteral, DeferredValue, evaluate, resolve};
//!
//! let date = DeferredLiteral::parse("date".parse().unwrap(), "2004-02-15").unwrap();
//! let span = DeferredLiteral::parse("interval_year_month".parse().unwrap(), "2-8").unwrap();
//!
//! let op = resolve(date.descriptor(), span.descriptor(), CompatibilityMode::Standard).unwrap();
//! assert_eq!(evaluate(&date, &span, &op).unwrap().to_string(), "2001-06-15");
//! ```
//!
//! # Architecture
//!
//! - **Errors** (`arith-result`): the workspace-wide [`Error`] and [`Result`].
//! - **Types** (`arith-types`): descriptors, the compatibility mode and runtime values.
//! - **Compute** (`arith-compute`): type resolution, decimal arithmetic and evaluation.
//!
//! The [`repl`] module parses the expression syntax used by the `arith` binary.

pub mod repl;

pub use arith_compute::{
    DecimalResolution, DeferredFn, DeferredLiteral, DeferredValue, PrecisionLoss,
    ResolvedOperation, evaluate, resolve, resolve_decimal,
};
pub use arith_result::{Error, Result};
pub use arith_types::{
    CompatibilityMode, DateValue, DecimalType, DecimalValue, IntervalDayTime, IntervalYearMonth,
    RuntimeValue, TimestampValue, TypeDescriptor, TypeKind,
};
