//! Binary subtraction over the arith value domain.
//!
//! Resolution and evaluation are split so that callers pay for type analysis
//! once per expression:
//!
//! ```
//! use arith_compute::{CompatibilityMode, DeferredLiteral, DeferredValue, evaluate, resolve};
//!
//! let left = DeferredLiteral::parse("decimal(3,1)".parse().unwrap(), "14.5").unwrap();
//! let right = DeferredLiteral::parse("decimal(5,2)".parse().unwrap(), "234.97").unwrap();
//!
//! let op = resolve(left.descriptor(), right.descriptor(), CompatibilityMode::Standard).unwrap();
//! assert_eq!(op.output_type.to_string(), "decimal(6,2)");
//!
//! let value = evaluate(&left, &right, &op).unwrap();
//! assert_eq!(value.to_string(), "-220.47");
//! ```

pub mod date;
pub mod deferred;
pub mod eval;
pub mod promotion;
pub mod scalar;

pub use arith_types::CompatibilityMode;
pub use deferred::{DeferredFn, DeferredLiteral, DeferredValue};
pub use eval::evaluate;
pub use promotion::{PrecisionLoss, ResolvedOperation, resolve};
pub use scalar::decimal::{DecimalResolution, resolve_decimal};
