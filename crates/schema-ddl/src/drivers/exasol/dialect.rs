//! Exasol SQL dialect (Strategy pattern).

use crate::core::identifier::{self, IdentCase};
use crate::core::traits::{Dialect, DialectKind};
use crate::error::Result;

/// Words Exasol will not accept as bare identifiers in DDL.
const RESERVED: &[&str] = &[
    "ALL", "ALTER", "AND", "AS", "BY", "CASCADE", "COMMENT", "CREATE", "DEFAULT", "DELETE",
    "DROP", "FROM", "GROUP", "IN", "INSERT", "IS", "NOT", "NULL", "ON", "OR", "ORDER",
    "PRIORITY", "RENAME", "SCHEMA", "SELECT", "SET", "TABLE", "TO", "UPDATE", "USER", "VALUES",
    "WHERE", "WITH",
];

/// Exasol dialect implementation.
///
/// Unquoted identifiers fold to upper case; comments use a lower-case `is`.
#[derive(Debug, Clone, Default)]
pub struct ExasolDialect;

impl ExasolDialect {
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for ExasolDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Exasol
    }

    fn ident_case(&self) -> IdentCase {
        IdentCase::Upper
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED
    }

    fn quote_ident(&self, name: &str) -> Result<String> {
        identifier::quote_double(name)
    }

    fn comment_keyword(&self) -> &'static str {
        "is"
    }

    fn empty_comment_literal(&self) -> &'static str {
        "''"
    }
}
