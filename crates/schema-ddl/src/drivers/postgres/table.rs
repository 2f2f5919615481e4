//! PostgreSQL tables and foreign tables.

use crate::core::change::{ChangeSet, OperatorOptions, PropertyChange};
use crate::core::comment::{CommentBuilder, CommentTarget};
use crate::core::object::{ObjectKind, SchemaObject, Table};
use crate::core::statement::DdlStatement;
use crate::core::traits::{kind_mismatch, Dialect, DialectKind, TranslationContext, Translator};
use crate::drivers::DialectImpl;
use crate::error::Result;

use super::builder::{column_definition, constraint_definition, server_clause, CreateTableStatement};

/// Translator for table records on PostgreSQL-family dialects.
#[derive(Debug, Clone)]
pub struct PostgresTableTranslator {
    dialect: DialectImpl,
}

impl PostgresTableTranslator {
    pub fn new(dialect: DialectImpl) -> Self {
        Self { dialect }
    }

    pub(crate) fn table<'o>(&self, object: &'o SchemaObject) -> Result<&'o Table> {
        match object {
            SchemaObject::Table(t) => Ok(t),
            other => Err(kind_mismatch(ObjectKind::Table, other)),
        }
    }

    fn qualified(&self, table: &Table, options: &OperatorOptions) -> Result<String> {
        self.dialect.object_name(&table.schema, &table.name, options)
    }

    /// Create statement with every slot this dialect family knows about
    /// filled from the table.
    pub(crate) fn create_statement(
        &self,
        table: &Table,
        options: &OperatorOptions,
    ) -> Result<CreateTableStatement> {
        let mut stmt = CreateTableStatement::new(self.qualified(table, options)?);
        if table.unlogged {
            stmt.unlogged();
        }
        for column in &table.columns {
            stmt.element(column_definition(&self.dialect, column)?);
        }
        for constraint in &table.constraints {
            stmt.element(constraint_definition(&self.dialect, constraint, options)?);
        }
        if let Some(foreign) = &table.foreign {
            stmt.foreign().trailing(server_clause(&self.dialect, foreign)?);
        }
        Ok(stmt)
    }

    /// Push the rendered create followed by table and column comments.
    pub(crate) fn emit_create(
        &self,
        ctx: &mut TranslationContext<'_>,
        table: &Table,
        stmt: CreateTableStatement,
    ) -> Result<()> {
        let options = *ctx.options();
        let name = self.qualified(table, &options)?;

        ctx.push(DdlStatement::create("Create new table", stmt.render()));

        let comments = CommentBuilder::new(&self.dialect);
        if !table.description.is_empty() {
            ctx.push(comments.build(&CommentTarget::new(ObjectKind::Table, &name), &table.description));
        }
        for column in table.columns.iter().filter(|c| !c.description.is_empty()) {
            let target = CommentTarget::new(
                ObjectKind::Column,
                format!("{}.{}", name, self.dialect.ddl_ident(&column.name)?),
            );
            ctx.push(comments.build(&target, &column.description));
        }
        Ok(())
    }

    fn alter_keyword(table: &Table) -> &'static str {
        if table.is_foreign() {
            "ALTER FOREIGN TABLE"
        } else {
            "ALTER TABLE"
        }
    }
}

impl Translator for PostgresTableTranslator {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Table
    }

    fn dialect(&self) -> DialectKind {
        self.dialect.kind()
    }

    fn translate_create(&self, ctx: &mut TranslationContext<'_>, object: &SchemaObject) -> Result<()> {
        let table = self.table(object)?;
        let stmt = self.create_statement(table, ctx.options())?;
        self.emit_create(ctx, table, stmt)
    }

    fn translate_modify(
        &self,
        ctx: &mut TranslationContext<'_>,
        object: &SchemaObject,
        changes: &ChangeSet,
    ) -> Result<()> {
        let table = self.table(object)?;
        let name = self.qualified(table, ctx.options())?;

        for change in changes.iter() {
            match change {
                // Foreign tables have no WAL of their own
                PropertyChange::Unlogged(unlogged) if !table.is_foreign() => {
                    let mode = if *unlogged { "UNLOGGED" } else { "LOGGED" };
                    ctx.push(DdlStatement::alter(
                        "Alter table",
                        format!("ALTER TABLE {} SET {}", name, mode),
                    ));
                }
                PropertyChange::Description(text) => ctx.push(
                    CommentBuilder::new(&self.dialect)
                        .update(&CommentTarget::new(ObjectKind::Table, &name), text),
                ),
                _ => {}
            }
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
        let table = self.table(object)?;
        let old = self.dialect.object_name(&table.schema, old_name, ctx.options())?;
        ctx.push(DdlStatement::alter(
            "Rename table",
            format!(
                "{} {} RENAME TO {}",
                Self::alter_keyword(table),
                old,
                self.dialect.ddl_ident(new_name)?
            ),
        ));
        Ok(())
    }

    fn translate_delete(&self, ctx: &mut TranslationContext<'_>, object: &SchemaObject) -> Result<()> {
        let table = self.table(object)?;
        let options = *ctx.options();
        let mut sql = format!(
            "DROP {}TABLE {}",
            if table.is_foreign() { "FOREIGN " } else { "" },
            self.qualified(table, &options)?
        );
        if options.cascade_on_delete {
            sql.push_str(" CASCADE");
        }
        ctx.push(DdlStatement::drop("Drop table", sql));
        Ok(())
    }
}
