use crate::error::Error;

/// Result type alias used throughout the arith workspace.
///
/// Shorthand for `std::result::Result<T, Error>`. Every fallible operation in
/// type resolution, literal parsing, and row evaluation returns this type.
pub type Result<T> = std::result::Result<T, Error>;
