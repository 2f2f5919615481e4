//! PostgreSQL driver.
//!
//! This module provides PostgreSQL-specific implementations:
//!
//! - [`PostgresDialect`]: SQL syntax strategy for PostgreSQL
//! - [`PostgresTableTranslator`]: tables and foreign tables
//! - [`PostgresPartitionTranslator`]: `PARTITION OF` partitions
//! - [`PostgresIndexTranslator`]: indexes, with operator classes
//! - [`PostgresAttributeTranslator`]: columns and table constraints
//!
//! Translators take a [`DialectImpl`](crate::drivers::DialectImpl) so the
//! Greenplum driver can register the same translators under its own dialect.

mod attribute;
mod builder;
mod dialect;
mod index;
mod partition;
mod table;

pub use attribute::PostgresAttributeTranslator;
pub use builder::CreateTableStatement;
pub use dialect::PostgresDialect;
pub use index::PostgresIndexTranslator;
pub use partition::PostgresPartitionTranslator;
pub use table::PostgresTableTranslator;

pub(crate) use builder::ident_list;
pub(crate) use dialect::POSTGRES_RESERVED;
