//! # schema-ddl
//!
//! Schema-change DDL pipeline.
//!
//! This library turns pending edits to schema objects into an ordered list
//! of executable DDL statements for one database family:
//!
//! - **Change records** describe one create, modify, rename or delete
//! - **Ordering & exclusion policy** vetoes and orders records per object subtype
//! - **Translators** per (object kind, dialect) emit labeled statements
//! - **Comment builder** adds `COMMENT ON` statements for described objects
//! - **Statement sink** collects the statements in execution order
//!
//! Supported families: Exasol, PostgreSQL, Greenplum and MySQL.
//!
//! ## Example
//!
//! ```rust,no_run
//! use schema_ddl::{
//!     ChangeRecord, DialectKind, OperatorOptions, Pipeline, PriorityGroup, SchemaObject,
//!     TranslatorCatalog,
//! };
//!
//! fn main() -> schema_ddl::Result<()> {
//!     let catalog = TranslatorCatalog::with_builtins();
//!     let pipeline = Pipeline::new(&catalog, DialectKind::Exasol);
//!
//!     let group = SchemaObject::PriorityGroup(PriorityGroup {
//!         name: "BATCH".into(),
//!         weight: 5,
//!         description: "nightly jobs".into(),
//!         persisted: false,
//!     });
//!     let result = pipeline.run(vec![ChangeRecord::create(group, OperatorOptions::default())]);
//!     print!("{}", result.sink.to_script());
//!     Ok(())
//! }
//! ```

pub mod changeset;
pub mod config;
pub mod core;
pub mod drivers;
pub mod error;

// Re-exports for convenient access
pub use changeset::{ChangeFile, ChangeSpec};
pub use config::{Config, TranslationConfig};
pub use crate::core::{
    BatchResult, ChangeRecord, ChangeSet, DdlStatement, DialectKind, ObjectKind, OperatorOptions,
    Pipeline, PriorityGroup, PropertyChange, RecordState, SchemaObject, StatementKind,
    StatementSink, TranslatorCatalog,
};
pub use error::{DdlError, Result};
