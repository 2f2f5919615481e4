//! MySQL/MariaDB database driver.
//!
//! This module provides MySQL-specific implementations for:
//! - [`MysqlDialect`]: SQL syntax strategy
//! - [`MysqlIndexTranslator`]: index DDL
//!
//! # Supported Versions
//!
//! - MySQL 5.7+, 8.0+
//! - MariaDB 10.2+ (`RENAME INDEX` requires MariaDB 10.5.2)

mod dialect;
mod index;

pub use dialect::MysqlDialect;
pub use index::MysqlIndexTranslator;
