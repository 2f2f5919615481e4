//! Columns and table constraints, altered through `ALTER TABLE`.

use crate::core::change::{ChangeSet, OperatorOptions, PropertyChange};
use crate::core::comment::{CommentBuilder, CommentTarget};
use crate::core::identifier::validate_sql_fragment;
use crate::core::object::{ContainerKind, ObjectKind, SchemaObject, TableRef};
use crate::core::statement::DdlStatement;
use crate::core::traits::{kind_mismatch, Dialect, DialectKind, TranslationContext, Translator};
use crate::drivers::DialectImpl;
use crate::error::Result;

use super::builder::{column_definition, constraint_definition};

/// Translator for column or constraint records on PostgreSQL-family
/// dialects. One instance handles one of the two kinds.
#[derive(Debug, Clone)]
pub struct PostgresAttributeTranslator {
    dialect: DialectImpl,
    kind: ObjectKind,
}

impl PostgresAttributeTranslator {
    pub fn columns(dialect: DialectImpl) -> Self {
        Self {
            dialect,
            kind: ObjectKind::Column,
        }
    }

    pub fn constraints(dialect: DialectImpl) -> Self {
        Self {
            dialect,
            kind: ObjectKind::Constraint,
        }
    }

    fn check_kind(&self, object: &SchemaObject) -> Result<()> {
        if object.kind() == self.kind {
            Ok(())
        } else {
            Err(kind_mismatch(self.kind, object))
        }
    }

    /// `ALTER [FOREIGN ]TABLE <table>`
    fn alter_table(
        &self,
        table: &TableRef,
        container: ContainerKind,
        options: &OperatorOptions,
    ) -> Result<String> {
        let keyword = match container {
            ContainerKind::ForeignTable => "ALTER FOREIGN TABLE",
            ContainerKind::Table | ContainerKind::Partition => "ALTER TABLE",
        };
        Ok(format!("{} {}", keyword, self.dialect.table_name(table, options)?))
    }

    fn comment_target(&self, object: &SchemaObject, options: &OperatorOptions) -> Result<CommentTarget> {
        match object {
            SchemaObject::Column(c) => Ok(CommentTarget::new(
                ObjectKind::Column,
                format!(
                    "{}.{}",
                    self.dialect.table_name(&c.table, options)?,
                    self.dialect.ddl_ident(&c.column.name)?
                ),
            )),
            SchemaObject::Constraint(c) => Ok(CommentTarget::constraint(
                &self.dialect.ddl_ident(&c.constraint.name)?,
                &self.dialect.table_name(&c.table, options)?,
            )),
            other => Err(kind_mismatch(self.kind, other)),
        }
    }
}

impl Translator for PostgresAttributeTranslator {
    fn kind(&self) -> ObjectKind {
        self.kind
    }

    fn dialect(&self) -> DialectKind {
        self.dialect.kind()
    }

    fn translate_create(&self, ctx: &mut TranslationContext<'_>, object: &SchemaObject) -> Result<()> {
        self.check_kind(object)?;
        let options = *ctx.options();

        let stmt = match object {
            SchemaObject::Column(c) => DdlStatement::alter(
                "Add column",
                format!(
                    "{} ADD COLUMN {}",
                    self.alter_table(&c.table, c.container, &options)?,
                    column_definition(&self.dialect, &c.column)?
                ),
            ),
            SchemaObject::Constraint(c) => DdlStatement::alter(
                "Add constraint",
                format!(
                    "{} ADD {}",
                    self.alter_table(&c.table, c.container, &options)?,
                    constraint_definition(&self.dialect, &c.constraint, &options)?
                ),
            ),
            other => return Err(kind_mismatch(self.kind, other)),
        };
        ctx.push(stmt);

        if !object.description().is_empty() {
            let target = self.comment_target(object, &options)?;
            ctx.push(CommentBuilder::new(&self.dialect).build(&target, object.description()));
        }
        Ok(())
    }

    fn translate_modify(
        &self,
        ctx: &mut TranslationContext<'_>,
        object: &SchemaObject,
        changes: &ChangeSet,
    ) -> Result<()> {
        self.check_kind(object)?;
        let options = *ctx.options();

        for change in changes.iter() {
            if let PropertyChange::Description(text) = change {
                let target = self.comment_target(object, &options)?;
                ctx.push(CommentBuilder::new(&self.dialect).update(&target, text));
                continue;
            }

            let SchemaObject::Column(c) = object else {
                continue;
            };
            let prefix = format!(
                "{} ALTER COLUMN {}",
                self.alter_table(&c.table, c.container, &options)?,
                self.dialect.ddl_ident(&c.column.name)?
            );
            let sql = match change {
                PropertyChange::DataType(data_type) => {
                    validate_sql_fragment("column", "data type", data_type)?;
                    format!("{} TYPE {}", prefix, data_type)
                }
                PropertyChange::Nullable(true) => format!("{} DROP NOT NULL", prefix),
                PropertyChange::Nullable(false) => format!("{} SET NOT NULL", prefix),
                PropertyChange::DefaultValue(Some(default)) => {
                    validate_sql_fragment("column", "default value", default)?;
                    format!("{} SET DEFAULT {}", prefix, default)
                }
                PropertyChange::DefaultValue(None) => format!("{} DROP DEFAULT", prefix),
                _ => continue,
            };
            ctx.push(DdlStatement::alter("Alter column", sql));
        }
        Ok(())
    }

    fn translate_rename(
        &self,
        ctx: &mut TranslationContext<'_>,
        object: &SchemaObject,
        old_name: &str,
        new_name: &str,
    ) -> Result<()> {
        self.check_kind(object)?;
        let options = *ctx.options();
        let (label, keyword, alter) = match object {
            SchemaObject::Column(c) => (
                "Rename column",
                "COLUMN",
                self.alter_table(&c.table, c.container, &options)?,
            ),
            SchemaObject::Constraint(c) => (
                "Rename constraint",
                "CONSTRAINT",
                self.alter_table(&c.table, c.container, &options)?,
            ),
            other => return Err(kind_mismatch(self.kind, other)),
        };
        ctx.push(DdlStatement::alter(
            label,
            format!(
                "{} RENAME {} {} TO {}",
                alter,
                keyword,
                self.dialect.ddl_ident(old_name)?,
                self.dialect.ddl_ident(new_name)?
            ),
        ));
        Ok(())
    }

    fn translate_delete(&self, ctx: &mut TranslationContext<'_>, object: &SchemaObject) -> Result<()> {
        self.check_kind(object)?;
        let options = *ctx.options();
        let (label, keyword, alter) = match object {
            SchemaObject::Column(c) => (
                "Drop column",
                "COLUMN",
                self.alter_table(&c.table, c.container, &options)?,
            ),
            SchemaObject::Constraint(c) => (
                "Drop constraint",
                "CONSTRAINT",
                self.alter_table(&c.table, c.container, &options)?,
            ),
            other => return Err(kind_mismatch(self.kind, other)),
        };
        let mut sql = format!(
            "{} DROP {} {}",
            alter,
            keyword,
            self.dialect.ddl_ident(object.name())?
        );
        if options.cascade_on_delete {
            sql.push_str(" CASCADE");
        }
        ctx.push(DdlStatement::drop(label, sql));
        Ok(())
    }
}
