//! Database driver implementations.
//!
//! This module provides database-specific implementations of the core traits:
//!
//! - [`exasol`]: priority groups
//! - [`postgres`]: tables, partitions, indexes, columns and constraints
//! - [`greenplum`]: PostgreSQL translators plus distributed tables
//! - [`mysql`]: indexes
//!
//! # Architecture
//!
//! Each driver module implements:
//! - `Dialect`: identifier folding, quoting and comment syntax
//! - `Translator`: one per object kind the database supports
//!
//! # Adding New Databases
//!
//! To add support for a new database:
//!
//! 1. Create a new module under `drivers/`
//! 2. Implement the `Dialect` trait and add a variant to `DialectImpl`
//! 3. Implement `Translator` for each supported object kind
//! 4. Register the translators in `TranslatorCatalog::with_builtins()`

pub mod exasol;
pub mod greenplum;
pub mod mysql;
pub mod postgres;

// Re-export driver types
pub use exasol::{ExasolDialect, ExasolPriorityGroupTranslator};
pub use greenplum::{GreenplumDialect, GreenplumTableTranslator};
pub use mysql::{MysqlDialect, MysqlIndexTranslator};
pub use postgres::{
    PostgresAttributeTranslator, PostgresDialect, PostgresIndexTranslator,
    PostgresPartitionTranslator, PostgresTableTranslator,
};

use crate::core::identifier::IdentCase;
use crate::core::traits::{Dialect, DialectKind};
use crate::error::Result;

/// Enum-based static dispatch for dialects.
///
/// Translators shared between database families (PostgreSQL and Greenplum)
/// hold one of these instead of a trait object.
#[derive(Debug, Clone)]
pub enum DialectImpl {
    Exasol(ExasolDialect),
    Postgres(PostgresDialect),
    Greenplum(GreenplumDialect),
    Mysql(MysqlDialect),
}

impl Dialect for DialectImpl {
    fn kind(&self) -> DialectKind {
        match self {
            DialectImpl::Exasol(d) => d.kind(),
            DialectImpl::Postgres(d) => d.kind(),
            DialectImpl::Greenplum(d) => d.kind(),
            DialectImpl::Mysql(d) => d.kind(),
        }
    }

    fn ident_case(&self) -> IdentCase {
        match self {
            DialectImpl::Exasol(d) => d.ident_case(),
            DialectImpl::Postgres(d) => d.ident_case(),
            DialectImpl::Greenplum(d) => d.ident_case(),
            DialectImpl::Mysql(d) => d.ident_case(),
        }
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        match self {
            DialectImpl::Exasol(d) => d.reserved_words(),
            DialectImpl::Postgres(d) => d.reserved_words(),
            DialectImpl::Greenplum(d) => d.reserved_words(),
            DialectImpl::Mysql(d) => d.reserved_words(),
        }
    }

    fn quote_ident(&self, name: &str) -> Result<String> {
        match self {
            DialectImpl::Exasol(d) => d.quote_ident(name),
            DialectImpl::Postgres(d) => d.quote_ident(name),
            DialectImpl::Greenplum(d) => d.quote_ident(name),
            DialectImpl::Mysql(d) => d.quote_ident(name),
        }
    }

    fn comment_keyword(&self) -> &'static str {
        match self {
            DialectImpl::Exasol(d) => d.comment_keyword(),
            DialectImpl::Postgres(d) => d.comment_keyword(),
            DialectImpl::Greenplum(d) => d.comment_keyword(),
            DialectImpl::Mysql(d) => d.comment_keyword(),
        }
    }

    fn empty_comment_literal(&self) -> &'static str {
        match self {
            DialectImpl::Exasol(d) => d.empty_comment_literal(),
            DialectImpl::Postgres(d) => d.empty_comment_literal(),
            DialectImpl::Greenplum(d) => d.empty_comment_literal(),
            DialectImpl::Mysql(d) => d.empty_comment_literal(),
        }
    }
}

impl DialectImpl {
    pub fn from_kind(kind: DialectKind) -> Self {
        match kind {
            DialectKind::Exasol => DialectImpl::Exasol(ExasolDialect::new()),
            DialectKind::Postgres => DialectImpl::Postgres(PostgresDialect::new()),
            DialectKind::Greenplum => DialectImpl::Greenplum(GreenplumDialect::new()),
            DialectKind::Mysql => DialectImpl::Mysql(MysqlDialect::new()),
        }
    }

    /// Create a dialect implementation from a database type string.
    ///
    /// # Errors
    ///
    /// Returns an error if the database type is not recognized.
    pub fn from_name(db_type: &str) -> Result<Self> {
        DialectKind::from_name(db_type).map(Self::from_kind)
    }
}
