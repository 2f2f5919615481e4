//! Core abstractions for dialect-agnostic DDL generation.
//!
//! This module provides the foundational types and traits used throughout
//! the pipeline:
//!
//! - [`object`]: schema objects read during translation
//! - [`change`]: change records, typed property changes and options
//! - [`statement`]: labeled statements and the ordered sink
//! - [`comment`]: `COMMENT ON` statement builder
//! - [`traits`]: `Dialect` and `Translator` traits
//! - [`catalog`]: translator registry for dependency injection
//! - [`policy`]: ordering and exclusion rules
//! - [`pipeline`]: batch translation
//!
//! # Architecture
//!
//! The core module defines database-agnostic abstractions that are implemented
//! by driver modules (`drivers/exasol`, `drivers/postgres`, etc.). New
//! database families are added by registering translators, without touching
//! the policy or the comment builder.
//!
//! # Design Patterns
//!
//! - **Registry**: `TranslatorCatalog` resolves one translator per
//!   (object kind, dialect) pair
//! - **Strategy**: `Dialect` provides interchangeable identifier and literal rules
//! - **Builder**: `CreateTableStatement` fills clause slots before rendering

pub mod catalog;
pub mod change;
pub mod comment;
pub mod identifier;
pub mod object;
pub mod pipeline;
pub mod policy;
pub mod statement;
pub mod traits;

// Re-export commonly used types for convenience
pub use catalog::TranslatorCatalog;
pub use change::{
    ChangeAction, ChangeRecord, ChangeSet, OperatorOptions, Operation, PriorityGroupParams,
    PropertyChange, PropertyKey,
};
pub use comment::{CommentBuilder, CommentTarget};
pub use object::{
    Column, Constraint, ConstraintKind, ContainerKind, Distribution, ForeignTableOptions, Index,
    IndexColumn, IndexType, Lookup, ObjectKind, Partition, PriorityGroup, SchemaObject, Table,
    TableColumn, TableConstraint, TableRef,
};
pub use pipeline::{BatchResult, Pipeline, RecordOutcome, RecordOutput, RecordState};
pub use policy::{ExclusionPolicy, ExclusionReason};
pub use statement::{DdlStatement, StatementKind, StatementSink, TranslationWarning};
pub use traits::{Capabilities, Dialect, DialectKind, TranslationContext, Translator};
