//! Error types and result definitions for the arith workspace.
//!
//! This crate provides the unified error type ([`Error`]) and result alias
//! ([`Result<T>`]) shared by every crate in the workspace. Decimal helpers keep
//! a narrower error of their own and convert into [`Error`] at the crate
//! boundary.
//!
//! # Error Categories
//!
//! - **Resolution errors** ([`Error::UnsupportedTypePair`]): the operand types
//!   cannot be combined. Fatal to the expression being compiled.
//! - **Row errors** ([`Error::ArithmeticOverflow`], [`Error::TypeMismatch`],
//!   [`Error::ExprCast`]): the current row cannot be evaluated.
//! - **Upstream faults** ([`Error::Eval`]): raised by whatever produces an
//!   operand value and passed through untouched.
//! - **User input errors** ([`Error::InvalidArgumentError`]): malformed
//!   literals, type names, or configuration values.
//! - **Internal errors** ([`Error::Internal`]): bugs or violated invariants.
//!
//! None of these errors are transient. Nothing in the workspace retries.

pub mod error;
pub mod result;

pub use error::Error;
pub use result::Result;
