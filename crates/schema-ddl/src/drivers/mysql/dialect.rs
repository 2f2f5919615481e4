//! MySQL/MariaDB SQL dialect (Strategy pattern).
//!
//! Provides MySQL-specific identifier quoting and reserved words.

use crate::core::identifier::{self, IdentCase};
use crate::core::traits::{Dialect, DialectKind};
use crate::error::Result;

const RESERVED: &[&str] = &[
    "ADD", "ALL", "ALTER", "AND", "AS", "ASC", "BY", "CASCADE", "CHECK", "COLUMN", "CONSTRAINT",
    "CREATE", "DATABASE", "DEFAULT", "DELETE", "DESC", "DROP", "FOREIGN", "FROM", "FULLTEXT",
    "GROUP", "INDEX", "INSERT", "KEY", "KEYS", "NOT", "NULL", "ON", "OR", "ORDER", "PRIMARY",
    "REFERENCES", "RENAME", "SELECT", "SET", "SPATIAL", "TABLE", "TO", "UNIQUE", "UPDATE",
    "USING", "WHERE", "WITH",
];

/// MySQL/MariaDB dialect implementation.
///
/// Compatible with MySQL 5.7+, 8.0+, and MariaDB 10.2+.
#[derive(Debug, Clone, Default)]
pub struct MysqlDialect;

impl MysqlDialect {
    /// Create a new MySQL dialect instance.
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for MysqlDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Mysql
    }

    fn ident_case(&self) -> IdentCase {
        IdentCase::Preserve
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED
    }

    fn quote_ident(&self, name: &str) -> Result<String> {
        // MySQL uses backticks for identifier quoting
        identifier::quote_backtick(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident() {
        let dialect = MysqlDialect::new();
        assert_eq!(dialect.quote_ident("table").unwrap(), "`table`");
        assert_eq!(dialect.quote_ident("my`table").unwrap(), "`my``table`");
    }

    #[test]
    fn test_mixed_case_stays_bare() {
        let dialect = MysqlDialect::new();
        assert_eq!(dialect.ddl_ident("OrderItems").unwrap(), "OrderItems");
        assert_eq!(dialect.ddl_ident("key").unwrap(), "`key`");
        assert_eq!(dialect.ddl_ident("order-items").unwrap(), "`order-items`");
    }
}
