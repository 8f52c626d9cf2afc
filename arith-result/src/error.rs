use std::fmt;
use thiserror::Error;

/// Unified error type for all arith operations.
///
/// Each variant carries enough context to report the failure to the author of
/// the expression. Variants are plain data (strings and static labels) so the
/// error stays `Send + Sync + Clone` and can cross thread boundaries when rows
/// are evaluated in parallel.
///
/// # Error Handling Strategy
///
/// Errors propagate upward with the `?` operator. Type resolution only ever
/// produces [`Error::UnsupportedTypePair`] or [`Error::Internal`]; everything
/// else is raised while parsing literals or evaluating a row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The two operand types cannot be combined by the operator.
    ///
    /// Raised once, at resolution time, for pairings such as
    /// `interval_year_month - date` or `date - int`. The expression cannot be
    /// compiled and the message should be surfaced to the query author.
    #[error("unsupported operand types for '-': {left} and {right}")]
    UnsupportedTypePair { left: String, right: String },

    /// The true result does not fit the resolved output type.
    ///
    /// Covers integral overflow in the widened width, decimal results that
    /// need more significant digits than the resolved precision, interval
    /// overflow, and temporal results outside the supported calendar range.
    /// The row fails; the value is never wrapped or clamped.
    #[error("arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    /// A forced operand value does not match the kind its accessor declared.
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },

    /// Expression type casting error.
    ///
    /// Raised when an operand must be coerced to another representation and
    /// the conversion is not possible, e.g. a string operand that does not
    /// parse as a number.
    #[error("expression cast error: {0}")]
    ExprCast(String),

    /// Invalid user input or API parameter.
    ///
    /// Malformed literal text, unknown type names, out-of-range decimal
    /// precision or scale, and unknown compatibility-mode values all land
    /// here.
    #[error("Invalid argument: {0}")]
    InvalidArgumentError(String),

    /// Fault raised by the producer of a deferred operand.
    ///
    /// The evaluator never constructs this variant itself; it forwards
    /// whatever the upstream producer returned.
    #[error("evaluation fault: {0}")]
    Eval(String),

    /// Internal error indicating a bug or unexpected state.
    #[error("An internal operation failed: {0}")]
    Internal(String),
}

impl Error {
    /// Create an expression cast error from any displayable error.
    ///
    /// # Examples
    ///
    /// ```
    /// use arith_result::Error;
    ///
    /// fn parse_number(input: &str) -> Result<f64, Error> {
    ///     input.trim().parse::<f64>().map_err(Error::expr_cast)
    /// }
    ///
    /// assert_eq!(parse_number(" 42 ").unwrap(), 42.0);
    /// assert!(matches!(parse_number("abc"), Err(Error::ExprCast(_))));
    /// ```
    #[inline]
    pub fn expr_cast<E: fmt::Display>(err: E) -> Self {
        Error::ExprCast(err.to_string())
    }

    /// Create an overflow error from any displayable description.
    #[inline]
    pub fn overflow<E: fmt::Display>(what: E) -> Self {
        Error::ArithmeticOverflow(what.to_string())
    }

    /// Create an unsupported-pair error from the two operand type names.
    #[inline]
    pub fn unsupported_pair(left: impl fmt::Display, right: impl fmt::Display) -> Self {
        Error::UnsupportedTypePair {
            left: left.to_string(),
            right: right.to_string(),
        }
    }

    /// `true` for errors that fail a single row rather than the whole expression.
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            Error::ArithmeticOverflow(_)
                | Error::TypeMismatch { .. }
                | Error::ExprCast(_)
                | Error::Eval(_)
        )
    }
}
