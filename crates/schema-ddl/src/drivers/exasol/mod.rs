//! Exasol driver.
//!
//! - [`ExasolDialect`]: SQL syntax strategy for Exasol
//! - [`ExasolPriorityGroupTranslator`]: priority group DDL

mod dialect;
mod priority_group;

pub use dialect::ExasolDialect;
pub use priority_group::ExasolPriorityGroupTranslator;
