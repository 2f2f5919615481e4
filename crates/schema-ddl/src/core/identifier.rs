//! Identifier validation, quoting and string-literal escaping.
//!
//! Identifiers cannot be bound as statement parameters, so every name that
//! reaches generated DDL passes through this module:
//!
//! 1. Validate the identifier (empty, null bytes, excessive length)
//! 2. Decide whether it needs quoting in the target dialect
//! 3. Quote and escape it with the dialect's delimiter
//!
//! Names are left bare when the database would read them back unchanged:
//! a plain identifier written in the dialect's folding case that is not a
//! reserved word. Anything else is delimited.

use crate::error::{DdlError, Result};

/// Maximum identifier length (conservative limit across databases).
/// - PostgreSQL: 63 bytes
/// - Exasol: 128 characters
/// - MySQL: 64 characters
const MAX_IDENTIFIER_LENGTH: usize = 128;

/// How a dialect folds unquoted identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentCase {
    /// Unquoted names are folded to upper case (Exasol).
    Upper,
    /// Unquoted names are folded to lower case (PostgreSQL, Greenplum).
    Lower,
    /// Unquoted names keep their case (MySQL).
    Preserve,
}

/// Validate an identifier for security issues.
///
/// Rejects:
/// - Empty identifiers
/// - Identifiers containing null bytes (injection vector)
/// - Identifiers exceeding maximum length
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(DdlError::invalid("identifier", "identifier cannot be empty"));
    }

    if name.contains('\0') {
        return Err(DdlError::invalid(
            "identifier",
            format!("identifier contains null byte: {:?}", name),
        ));
    }

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(DdlError::invalid(
            "identifier",
            format!(
                "identifier exceeds maximum length of {} bytes (got {} bytes): {:?}",
                MAX_IDENTIFIER_LENGTH,
                name.len(),
                name
            ),
        ));
    }

    Ok(())
}

/// Whether `name` can be written without delimiters.
pub fn is_plain_identifier(name: &str, case: IdentCase, reserved: &[&str]) -> bool {
    let mut chars = name.chars();
    let first_ok = match chars.next() {
        Some(c) => c == '_' || c.is_ascii_alphabetic(),
        None => return false,
    };
    if !first_ok {
        return false;
    }

    let body_ok = name
        .chars()
        .all(|c| c == '_' || c == '$' || c.is_ascii_alphanumeric());
    let case_ok = match case {
        IdentCase::Upper => !name.chars().any(|c| c.is_ascii_lowercase()),
        IdentCase::Lower => !name.chars().any(|c| c.is_ascii_uppercase()),
        IdentCase::Preserve => true,
    };

    body_ok && case_ok && !is_reserved(name, reserved)
}

fn is_reserved(name: &str, reserved: &[&str]) -> bool {
    reserved.iter().any(|word| word.eq_ignore_ascii_case(name))
}

/// Quote an identifier with double quotes (PostgreSQL, Greenplum, Exasol).
///
/// # Examples
///
/// ```ignore
/// assert_eq!(quote_double("users")?, "\"users\"");
/// assert_eq!(quote_double("table\"name")?, "\"table\"\"name\"");
/// ```
pub fn quote_double(name: &str) -> Result<String> {
    validate_identifier(name)?;
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}

/// Quote a MySQL identifier using backticks.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(quote_backtick("users")?, "`users`");
/// assert_eq!(quote_backtick("table`name")?, "`table``name`");
/// ```
pub fn quote_backtick(name: &str) -> Result<String> {
    validate_identifier(name)?;
    Ok(format!("`{}`", name.replace('`', "``")))
}

/// Render a SQL string literal, doubling embedded single quotes.
pub fn quote_string(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Validate a check constraint expression before it is embedded in DDL.
pub fn validate_check_expression(expression: &str) -> Result<()> {
    validate_sql_fragment("constraint", "check expression", expression)
}

/// Validate free-form SQL text (data type, default, partition bound) that
/// is copied verbatim into a statement.
///
/// Statement separators and comment markers are rejected, so `;` inside a
/// string literal is rejected too.
pub fn validate_sql_fragment(kind: &str, what: &str, text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(DdlError::invalid(kind, format!("{} cannot be empty", what)));
    }

    if text.contains(';') {
        return Err(DdlError::invalid(
            kind,
            format!("{} contains semicolon: {:?}", what, text),
        ));
    }

    if text.contains("--") || text.contains("/*") || text.contains("*/") {
        return Err(DdlError::invalid(
            kind,
            format!("{} contains comment markers: {:?}", what, text),
        ));
    }

    Ok(())
}
