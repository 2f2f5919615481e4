//! Greenplum driver.
//!
//! Partitions, indexes, columns and constraints use the PostgreSQL
//! translators registered under [`DialectKind::Greenplum`](crate::core::traits::DialectKind).
//! Only tables need their own translator, for the `DISTRIBUTED` clause.

mod dialect;
mod table;

pub use dialect::GreenplumDialect;
pub use table::GreenplumTableTranslator;
