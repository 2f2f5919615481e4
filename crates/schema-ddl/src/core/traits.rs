//! Core traits for dialect-specific DDL generation.
//!
//! - [`Dialect`]: identifier and literal rendering for one database family
//! - [`Translator`]: maps change records of one object kind to statements
//!
//! # Design Patterns
//!
//! - **Strategy**: `Dialect` provides interchangeable SQL syntax rules
//! - **Template Method**: default `Dialect` methods build qualified names and
//!   comment statements from the few primitives each dialect overrides

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::config::TranslationConfig;
use crate::error::{DdlError, Result};

use super::change::{ChangeSet, OperatorOptions, Operation};
use super::identifier::{self, is_plain_identifier, validate_identifier, IdentCase};
use super::object::{ObjectKind, SchemaObject, TableRef};
use super::statement::{DdlStatement, TranslationWarning};

/// Database family a translator generates DDL for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialectKind {
    Exasol,
    Postgres,
    Greenplum,
    Mysql,
}

impl DialectKind {
    pub fn name(&self) -> &'static str {
        match self {
            DialectKind::Exasol => "exasol",
            DialectKind::Postgres => "postgres",
            DialectKind::Greenplum => "greenplum",
            DialectKind::Mysql => "mysql",
        }
    }

    /// Normalize a database type string, accepting common aliases.
    ///
    /// # Errors
    ///
    /// Returns `DdlError::Config` for unknown names.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "exasol" | "exa" => Ok(DialectKind::Exasol),
            "postgres" | "postgresql" | "pg" => Ok(DialectKind::Postgres),
            "greenplum" | "gp" => Ok(DialectKind::Greenplum),
            "mysql" | "mariadb" => Ok(DialectKind::Mysql),
            other => Err(DdlError::Config(format!(
                "Unknown database dialect: '{}'. Supported dialects: exasol, postgres, greenplum, mysql",
                other
            ))),
        }
    }

    pub fn all() -> [DialectKind; 4] {
        [
            DialectKind::Exasol,
            DialectKind::Postgres,
            DialectKind::Greenplum,
            DialectKind::Mysql,
        ]
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// SQL syntax strategy for different database engines.
pub trait Dialect: Send + Sync {
    fn kind(&self) -> DialectKind;

    fn name(&self) -> &str {
        self.kind().name()
    }

    /// How unquoted identifiers are folded.
    fn ident_case(&self) -> IdentCase;

    /// Words that must always be delimited.
    fn reserved_words(&self) -> &'static [&'static str];

    /// Delimit an identifier unconditionally.
    fn quote_ident(&self, name: &str) -> Result<String>;

    /// Render an identifier for DDL, delimiting it only when needed.
    fn ddl_ident(&self, name: &str) -> Result<String> {
        validate_identifier(name)?;
        if is_plain_identifier(name, self.ident_case(), self.reserved_words()) {
            Ok(name.to_string())
        } else {
            self.quote_ident(name)
        }
    }

    /// `schema.name`, or just `name` when the schema is empty.
    fn qualify(&self, schema: &str, name: &str) -> Result<String> {
        if schema.is_empty() {
            self.ddl_ident(name)
        } else {
            Ok(format!("{}.{}", self.ddl_ident(schema)?, self.ddl_ident(name)?))
        }
    }

    /// Name of a schema-level object, qualified when the options ask for it.
    fn object_name(&self, schema: &str, name: &str, options: &OperatorOptions) -> Result<String> {
        if options.fully_qualified_names {
            self.qualify(schema, name)
        } else {
            self.ddl_ident(name)
        }
    }

    fn table_name(&self, table: &TableRef, options: &OperatorOptions) -> Result<String> {
        self.object_name(&table.schema, &table.name, options)
    }

    fn quote_string(&self, text: &str) -> String {
        identifier::quote_string(text)
    }

    /// Keyword between the target and the text in `COMMENT ON`.
    fn comment_keyword(&self) -> &'static str {
        "IS"
    }

    /// Literal that removes a comment.
    fn empty_comment_literal(&self) -> &'static str {
        "NULL"
    }
}

/// Operation categories a translator supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub create: bool,
    pub modify: bool,
    pub rename: bool,
    pub delete: bool,
}

impl Capabilities {
    pub const ALL: Capabilities = Capabilities {
        create: true,
        modify: true,
        rename: true,
        delete: true,
    };

    pub const CREATE_ONLY: Capabilities = Capabilities {
        create: true,
        modify: false,
        rename: false,
        delete: false,
    };

    pub fn allows(&self, operation: Operation) -> bool {
        match operation {
            Operation::Create => self.create,
            Operation::Modify => self.modify,
            Operation::Rename => self.rename,
            Operation::Delete => self.delete,
        }
    }
}

/// Per-record state handed to a translator.
///
/// Collects statements in emission order and decides, from the
/// translation settings, whether a soft failure degrades or aborts.
pub struct TranslationContext<'a> {
    object: String,
    options: &'a OperatorOptions,
    settings: &'a TranslationConfig,
    statements: Vec<DdlStatement>,
    warnings: Vec<TranslationWarning>,
}

impl<'a> TranslationContext<'a> {
    pub fn new(
        object: &SchemaObject,
        options: &'a OperatorOptions,
        settings: &'a TranslationConfig,
    ) -> Self {
        Self {
            object: object.display_name(),
            options,
            settings,
            statements: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn options(&self) -> &OperatorOptions {
        self.options
    }

    pub fn push(&mut self, statement: DdlStatement) {
        self.statements.push(statement);
    }

    pub fn statements(&self) -> &[DdlStatement] {
        &self.statements
    }

    /// Handle a soft failure: log and record it, or return it when the
    /// settings make it fatal.
    pub fn degrade(&mut self, err: DdlError) -> Result<()> {
        let fatal = match &err {
            DdlError::AmbiguousOrMissingParent { .. } => self.settings.strict_parent_resolution,
            other => !other.is_recoverable(),
        };
        if fatal {
            return Err(err);
        }

        warn!("{}: {}", self.object, err);
        self.warnings.push(TranslationWarning {
            object: self.object.clone(),
            message: err.to_string(),
        });
        Ok(())
    }

    pub fn finish(self) -> (Vec<DdlStatement>, Vec<TranslationWarning>) {
        (self.statements, self.warnings)
    }
}

/// Error for a translator handed an object of the wrong kind.
pub fn kind_mismatch(expected: ObjectKind, object: &SchemaObject) -> DdlError {
    DdlError::ObjectKindMismatch {
        expected: expected.label().to_string(),
        found: object.kind().label().to_string(),
    }
}

/// Maps change records for one (object kind, dialect) pair to statements.
///
/// Each method appends zero or more statements to the context. Unsupported
/// categories are declared through [`Translator::capabilities`] and never
/// reach the translator.
pub trait Translator: Send + Sync {
    fn kind(&self) -> ObjectKind;

    fn dialect(&self) -> DialectKind;

    fn capabilities(&self) -> Capabilities {
        Capabilities::ALL
    }

    fn translate_create(&self, ctx: &mut TranslationContext<'_>, object: &SchemaObject)
        -> Result<()>;

    /// Each recognized key contributes independently; unknown keys are
    /// ignored.
    fn translate_modify(
        &self,
        ctx: &mut TranslationContext<'_>,
        object: &SchemaObject,
        changes: &ChangeSet,
    ) -> Result<()>;

    fn translate_rename(
        &self,
        ctx: &mut TranslationContext<'_>,
        object: &SchemaObject,
        old_name: &str,
        new_name: &str,
    ) -> Result<()>;

    fn translate_delete(&self, ctx: &mut TranslationContext<'_>, object: &SchemaObject)
        -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::object::PriorityGroup;

    struct UpperDialect;

    impl Dialect for UpperDialect {
        fn kind(&self) -> DialectKind {
            DialectKind::Exasol
        }

        fn ident_case(&self) -> IdentCase {
            IdentCase::Upper
        }

        fn reserved_words(&self) -> &'static [&'static str] {
            &["GROUP"]
        }

        fn quote_ident(&self, name: &str) -> Result<String> {
            identifier::quote_double(name)
        }
    }

    #[test]
    fn test_dialect_kind_from_name() {
        assert_eq!(DialectKind::from_name("PostgreSQL").unwrap(), DialectKind::Postgres);
        assert_eq!(DialectKind::from_name("pg").unwrap(), DialectKind::Postgres);
        assert_eq!(DialectKind::from_name("gp").unwrap(), DialectKind::Greenplum);
        assert_eq!(DialectKind::from_name("mariadb").unwrap(), DialectKind::Mysql);
        assert_eq!(DialectKind::from_name("EXASOL").unwrap(), DialectKind::Exasol);
        assert!(DialectKind::from_name("oracle").is_err());
    }

    #[test]
    fn test_default_ddl_ident_and_qualify() {
        let d = UpperDialect;
        assert_eq!(d.ddl_ident("BATCH").unwrap(), "BATCH");
        assert_eq!(d.ddl_ident("batch").unwrap(), "\"batch\"");
        assert_eq!(d.ddl_ident("GROUP").unwrap(), "\"GROUP\"");
        assert_eq!(d.qualify("SYS", "T1").unwrap(), "SYS.T1");
        assert_eq!(d.qualify("", "T1").unwrap(), "T1");
        assert!(d.ddl_ident("").is_err());
    }

    #[test]
    fn test_object_name_honors_options() {
        let d = UpperDialect;
        let qualified = OperatorOptions::default();
        let bare = OperatorOptions::default().with_fully_qualified_names(false);
        assert_eq!(d.object_name("S", "T", &qualified).unwrap(), "S.T");
        assert_eq!(d.object_name("S", "T", &bare).unwrap(), "T");
    }

    #[test]
    fn test_capabilities() {
        assert!(Capabilities::ALL.allows(Operation::Rename));
        assert!(Capabilities::CREATE_ONLY.allows(Operation::Create));
        assert!(!Capabilities::CREATE_ONLY.allows(Operation::Delete));
    }

    #[test]
    fn test_context_degrade_respects_strictness() {
        let object = SchemaObject::PriorityGroup(PriorityGroup {
            name: "BATCH".into(),
            weight: 1,
            description: String::new(),
            persisted: false,
        });
        let options = OperatorOptions::default();

        let lenient = TranslationConfig::default();
        let mut ctx = TranslationContext::new(&object, &options, &lenient);
        assert!(ctx.degrade(DdlError::parent("p", "no parent tables")).is_ok());
        assert!(ctx.degrade(DdlError::invalid("x", "y")).is_err());
        let (_, warnings) = ctx.finish();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].object, "BATCH");

        let strict = TranslationConfig {
            strict_parent_resolution: true,
            ..TranslationConfig::default()
        };
        let mut ctx = TranslationContext::new(&object, &options, &strict);
        assert!(ctx.degrade(DdlError::parent("p", "no parent tables")).is_err());
        assert!(ctx.degrade(DdlError::metadata("idx", "lookup failed")).is_ok());
    }
}
