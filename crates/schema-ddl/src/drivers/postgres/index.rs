//! PostgreSQL indexes.

use crate::core::change::{ChangeSet, OperatorOptions, PropertyChange};
use crate::core::comment::{CommentBuilder, CommentTarget};
use crate::core::object::{Index, IndexType, Lookup, ObjectKind, SchemaObject};
use crate::core::statement::DdlStatement;
use crate::core::traits::{kind_mismatch, Dialect, DialectKind, TranslationContext, Translator};
use crate::drivers::DialectImpl;
use crate::error::{DdlError, Result};

/// Translator for index records on PostgreSQL-family dialects.
#[derive(Debug, Clone)]
pub struct PostgresIndexTranslator {
    dialect: DialectImpl,
}

impl PostgresIndexTranslator {
    pub fn new(dialect: DialectImpl) -> Self {
        Self { dialect }
    }

    fn index<'o>(&self, object: &'o SchemaObject) -> Result<&'o Index> {
        match object {
            SchemaObject::Index(i) => Ok(i),
            other => Err(kind_mismatch(ObjectKind::Index, other)),
        }
    }

    /// Indexes live in their table's schema.
    fn qualified(&self, index: &Index, name: &str, options: &OperatorOptions) -> Result<String> {
        self.dialect.object_name(&index.table.schema, name, options)
    }

    /// Definition text read back from the database, if usable.
    fn stored_definition(
        &self,
        ctx: &mut TranslationContext<'_>,
        index: &Index,
        display: &str,
    ) -> Result<Option<String>> {
        if !index.persisted {
            return Ok(None);
        }
        match &index.definition {
            Lookup::Found(text) if !text.trim().is_empty() => Ok(Some(text.clone())),
            Lookup::Failed(reason) => {
                ctx.degrade(DdlError::metadata(
                    display,
                    format!("cannot extract index DDL: {}", reason),
                ))?;
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn build_definition(
        &self,
        ctx: &mut TranslationContext<'_>,
        index: &Index,
        display: &str,
    ) -> Result<String> {
        let options = *ctx.options();
        let mut sql = format!(
            "CREATE {}INDEX {} ON {}",
            if index.unique { "UNIQUE " } else { "" },
            self.dialect.ddl_ident(&index.name)?,
            self.dialect.table_name(&index.table, &options)?
        );
        if let Some(method) = access_method(&index.index_type) {
            sql.push_str(" USING ");
            sql.push_str(method);
        }

        let mut parts = Vec::with_capacity(index.columns.len());
        for column in &index.columns {
            let mut part = self.dialect.ddl_ident(&column.name)?;
            match &column.operator_class {
                Lookup::Found(opclass) => {
                    part.push(' ');
                    part.push_str(opclass);
                }
                Lookup::Failed(reason) => ctx.degrade(DdlError::metadata(
                    display,
                    format!("cannot read operator class of column {}: {}", column.name, reason),
                ))?,
                Lookup::Missing => {}
            }
            if !column.ascending {
                part.push_str(" DESC");
            }
            parts.push(part);
        }
        sql.push_str(&format!(" ({})", parts.join(", ")));
        Ok(sql)
    }
}

/// `USING` method for PostgreSQL; MySQL-only kinds have none.
fn access_method(index_type: &IndexType) -> Option<&str> {
    match index_type {
        IndexType::Fulltext | IndexType::Spatial => None,
        other => other.method(),
    }
}

impl Translator for PostgresIndexTranslator {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Index
    }

    fn dialect(&self) -> DialectKind {
        self.dialect.kind()
    }

    fn translate_create(&self, ctx: &mut TranslationContext<'_>, object: &SchemaObject) -> Result<()> {
        let index = self.index(object)?;
        let display = object.display_name();

        let sql = match self.stored_definition(ctx, index, &display)? {
            Some(text) => text,
            None => self.build_definition(ctx, index, &display)?,
        };
        ctx.push(DdlStatement::create("Create new index", sql));

        if !index.description.is_empty() {
            let name = self.qualified(index, &index.name, ctx.options())?;
            ctx.push(
                CommentBuilder::new(&self.dialect)
                    .build(&CommentTarget::new(ObjectKind::Index, name), &index.description),
            );
        }
        Ok(())
    }

    fn translate_modify(
        &self,
        ctx: &mut TranslationContext<'_>,
        object: &SchemaObject,
        changes: &ChangeSet,
    ) -> Result<()> {
        let index = self.index(object)?;
        let name = self.qualified(index, &index.name, ctx.options())?;
        for change in changes.iter() {
            if let PropertyChange::Description(text) = change {
                ctx.push(
                    CommentBuilder::new(&self.dialect)
                        .update(&CommentTarget::new(ObjectKind::Index, &name), text),
                );
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
        let index = self.index(object)?;
        let old = self.qualified(index, old_name, ctx.options())?;
        ctx.push(DdlStatement::alter(
            "Rename index",
            format!(
                "ALTER INDEX {} RENAME TO {}",
                old,
                self.dialect.ddl_ident(new_name)?
            ),
        ));
        Ok(())
    }

    fn translate_delete(&self, ctx: &mut TranslationContext<'_>, object: &SchemaObject) -> Result<()> {
        let index = self.index(object)?;
        let options = *ctx.options();
        let mut sql = format!(
            "DROP INDEX {}",
            self.qualified(index, &index.name, &options)?
        );
        if options.cascade_on_delete {
            sql.push_str(" CASCADE");
        }
        ctx.push(DdlStatement::drop("Drop index", sql));
        Ok(())
    }
}
