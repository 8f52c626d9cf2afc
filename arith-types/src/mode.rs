//! Legacy vs. standard-SQL arithmetic type promotion.

use std::fmt;
use std::str::FromStr;

use arith_result::Error;

/// Selects which arithmetic type-promotion behavior the resolver follows.
///
/// The mode is owned by the session and handed to every resolution call; the
/// resolver never reads it from ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompatibilityMode {
    /// Pre-standard behavior: when a decimal result needs more than the maximum
    /// precision, fractional digits are dropped until the integer part fits.
    Legacy,
    /// Standard-SQL behavior: a minimum number of fractional digits survives a
    /// precision reduction even if that narrows the integer range.
    #[default]
    Standard,
}

impl CompatibilityMode {
    pub fn as_str(self) -> &'static str {
        match self {
            CompatibilityMode::Legacy => "legacy",
            CompatibilityMode::Standard => "standard",
        }
    }
}

impl fmt::Display for CompatibilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the mode names as well as the version-style compatibility values
/// sessions use (`0.12` for legacy, `latest` for standard).
impl FromStr for CompatibilityMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" | "0.12" => Ok(CompatibilityMode::Legacy),
            "standard" | "latest" => Ok(CompatibilityMode::Standard),
            other => Err(Error::InvalidArgumentError(format!(
                "unknown compatibility mode '{other}'"
            ))),
        }
    }
}
