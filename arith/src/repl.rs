//! Expression syntax for the interactive shell.
//!
//! A line has the form `TYPE 'literal' - TYPE 'literal'`, for example
//!
//! ```text
//! decimal(3,1) '14.5' - decimal(5,2) '234.97'
//! timestamp '2001-01-02 2:3:4.567' - interval_day_time '1 2:3:4.567'
//! ```
//!
//! Literals may not contain a single quote.

use std::fmt;

use arith_compute::{
    CompatibilityMode, DeferredLiteral, DeferredValue, ResolvedOperation, evaluate, resolve,
};
use arith_result::{Error, Result};
use arith_types::{RuntimeValue, TypeDescriptor};

/// One side of a parsed expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    pub descriptor: TypeDescriptor,
    pub literal: String,
}

impl Operand {
    pub fn to_deferred(&self) -> Result<DeferredLiteral> {
        DeferredLiteral::parse(self.descriptor, &self.literal)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    pub left: Operand,
    pub right: Operand,
}

/// Result of running one expression line.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub resolved: ResolvedOperation,
    pub value: RuntimeValue,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.value, self.resolved.output_type)?;
        if let Some(loss) = self.resolved.precision_loss {
            write!(
                f,
                "  (precision capped: needed {} digits, scale {} -> {})",
                loss.required_precision, loss.declared_scale, loss.adjusted_scale
            )?;
        }
        Ok(())
    }
}

/// A shell directive: a line starting with `.`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotCommand<'a> {
    Help,
    /// Show the mode, or switch to the named one.
    Mode(Option<&'a str>),
    Exit,
    Unknown(&'a str),
}

/// Recognize a directive line; `None` for anything that is not one.
pub fn parse_command(line: &str) -> Option<DotCommand<'_>> {
    let line = line.trim();
    if !line.starts_with('.') {
        return None;
    }
    let mut parts = line.split_whitespace();
    let cmd = parts.next().unwrap_or(line);
    let command = match cmd {
        ".help" => DotCommand::Help,
        ".mode" => DotCommand::Mode(parts.next()),
        ".exit" | ".quit" => DotCommand::Exit,
        other => DotCommand::Unknown(other),
    };
    Some(command)
}

/// Parse `TYPE 'literal' - TYPE 'literal'`.
pub fn parse_expression(line: &str) -> Result<Expression> {
    let (left, rest) = parse_operand(line)?;
    let rest = rest.trim_start();
    let rest = rest.strip_prefix('-').ok_or_else(|| {
        Error::InvalidArgumentError(format!("expected '-' between operands in '{}'", line.trim()))
    })?;
    let (right, rest) = parse_operand(rest)?;
    if !rest.trim().is_empty() {
        return Err(Error::InvalidArgumentError(format!(
            "unexpected trailing input '{}'",
            rest.trim()
        )));
    }
    Ok(Expression { left, right })
}

/// Parse, resolve and evaluate one expression line.
pub fn run_line(line: &str, mode: CompatibilityMode) -> Result<Outcome> {
    let expr = parse_expression(line)?;
    let left = expr.left.to_deferred()?;
    let right = expr.right.to_deferred()?;
    let resolved = resolve(left.descriptor(), right.descriptor(), mode)?;
    let value = evaluate(&left, &right, &resolved)?;
    Ok(Outcome { resolved, value })
}

fn parse_operand(input: &str) -> Result<(Operand, &str)> {
    let open = input.find('\'').ok_or_else(|| {
        Error::InvalidArgumentError(format!("expected TYPE 'literal' in '{}'", input.trim()))
    })?;
    let type_name = input[..open].trim();
    if type_name.is_empty() {
        return Err(Error::InvalidArgumentError(format!(
            "missing type name before literal in '{}'",
            input.trim()
        )));
    }
    let descriptor: TypeDescriptor = type_name.parse()?;

    let body = &input[open + 1..];
    let close = body.find('\'').ok_or_else(|| {
        Error::InvalidArgumentError(format!("unterminated literal in '{}'", input.trim()))
    })?;
    let operand = Operand {
        descriptor,
        literal: body[..close].to_owned(),
    };
    Ok((operand, &body[close + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_operands() {
        let expr = parse_expression("decimal(3, 1) '14.5' - DECIMAL(5,2) '234.97'").unwrap();
        assert_eq!(expr.left.descriptor.to_string(), "decimal(3,1)");
        assert_eq!(expr.left.literal, "14.5");
        assert_eq!(expr.right.descriptor.to_string(), "decimal(5,2)");
        assert_eq!(expr.right.literal, "234.97");
    }

    #[test]
    fn negative_literals_stay_inside_quotes() {
        let expr =
            parse_expression("interval_year_month '-1-2'-interval_year_month '0-1'").unwrap();
        assert_eq!(expr.left.literal, "-1-2");
        assert_eq!(expr.right.literal, "0-1");
    }

    #[test]
    fn rejects_malformed_lines() {
        for line in [
            "",
            "int 1 - int 2",
            "int '1' + int '2'",
            "int '1' - int '2' extra",
            "'1' - int '2'",
            "int '1 - int '2'",
            "money '1' - int '2'",
        ] {
            assert!(parse_expression(line).is_err(), "{line}");
        }
    }

    #[test]
    fn recognizes_shell_directives() {
        assert_eq!(parse_command(".help"), Some(DotCommand::Help));
        assert_eq!(parse_command("  .quit "), Some(DotCommand::Exit));
        assert_eq!(parse_command(".exit"), Some(DotCommand::Exit));
        assert_eq!(parse_command(".mode"), Some(DotCommand::Mode(None)));
        assert_eq!(
            parse_command(".mode  legacy"),
            Some(DotCommand::Mode(Some("legacy")))
        );
        assert_eq!(parse_command(".bogus x"), Some(DotCommand::Unknown(".bogus")));
        assert_eq!(parse_command("int '1' - int '2'"), None);
    }

    #[test]
    fn runs_a_line_end_to_end() {
        let outcome = run_line(
            "decimal(3,1) '14.5' - decimal(5,2) '234.97'",
            CompatibilityMode::Standard,
        )
        .unwrap();
        assert_eq!(outcome.to_string(), "-220.47 : decimal(6,2)");
    }

    #[test]
    fn reports_precision_cap() {
        let outcome = run_line(
            "decimal(38,4) '1.0005' - decimal(38,4) '0'",
            CompatibilityMode::Legacy,
        )
        .unwrap();
        assert_eq!(
            outcome.to_string(),
            "1.001 : decimal(38,3)  (precision capped: needed 39 digits, scale 4 -> 3)"
        );
    }

    #[test]
    fn surfaces_resolution_errors() {
        let err = run_line(
            "interval_year_month '1-0' - date '2001-01-01'",
            CompatibilityMode::Standard,
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnsupportedTypePair { .. }));
    }
}
