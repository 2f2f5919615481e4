//! MySQL indexes.
//!
//! MySQL embeds the index comment in `CREATE INDEX`, has no in-place index
//! alteration, and addresses indexes through their table.

use tracing::debug;

use crate::core::change::ChangeSet;
use crate::core::object::{Index, IndexType, ObjectKind, SchemaObject};
use crate::core::statement::DdlStatement;
use crate::core::traits::{kind_mismatch, Dialect, DialectKind, TranslationContext, Translator};
use crate::error::{DdlError, Result};

use super::MysqlDialect;

/// Translator for index records on MySQL.
#[derive(Debug, Clone, Default)]
pub struct MysqlIndexTranslator {
    dialect: MysqlDialect,
}

impl MysqlIndexTranslator {
    pub fn new() -> Self {
        Self {
            dialect: MysqlDialect::new(),
        }
    }

    fn index<'o>(&self, object: &'o SchemaObject) -> Result<&'o Index> {
        match object {
            SchemaObject::Index(i) => Ok(i),
            other => Err(kind_mismatch(ObjectKind::Index, other)),
        }
    }

    fn modifier(index: &Index) -> &'static str {
        match index.index_type {
            IndexType::Fulltext => "FULLTEXT ",
            IndexType::Spatial => "SPATIAL ",
            _ if index.unique => "UNIQUE ",
            _ => "",
        }
    }

    fn column_part(&self, name: &str, sub_part: Option<&str>, ascending: bool) -> Result<String> {
        let mut part = self.dialect.ddl_ident(name)?;
        if let Some(length) = sub_part {
            if length.is_empty() || !length.chars().all(|c| c.is_ascii_digit()) {
                return Err(DdlError::invalid(
                    ObjectKind::Index.label(),
                    format!("prefix length of column {} must be a number, got '{}'", name, length),
                ));
            }
            part.push_str(&format!("({})", length));
        }
        if !ascending {
            part.push_str(" DESC");
        }
        Ok(part)
    }
}

impl Translator for MysqlIndexTranslator {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Index
    }

    fn dialect(&self) -> DialectKind {
        DialectKind::Mysql
    }

    fn translate_create(&self, ctx: &mut TranslationContext<'_>, object: &SchemaObject) -> Result<()> {
        let index = self.index(object)?;

        let columns = index
            .columns
            .iter()
            .map(|c| self.column_part(&c.name, c.sub_part.as_deref(), c.ascending))
            .collect::<Result<Vec<_>>>()?;

        let mut sql = format!(
            "CREATE {}INDEX {} ON {} ({})",
            Self::modifier(index),
            self.dialect.ddl_ident(&index.name)?,
            self.dialect.table_name(&index.table, ctx.options())?,
            columns.join(", ")
        );
        // FULLTEXT and SPATIAL carry their own access method
        if !matches!(index.index_type, IndexType::Fulltext | IndexType::Spatial) {
            if let Some(method) = index.index_type.method() {
                sql.push_str(" USING ");
                sql.push_str(method);
            }
        }
        if !index.description.is_empty() {
            sql.push_str(" COMMENT ");
            sql.push_str(&self.dialect.quote_string(&index.description));
        }

        ctx.push(DdlStatement::create("Create new index", sql));
        Ok(())
    }

    fn translate_modify(
        &self,
        _ctx: &mut TranslationContext<'_>,
        object: &SchemaObject,
        changes: &ChangeSet,
    ) -> Result<()> {
        self.index(object)?;
        debug!(
            "MySQL cannot alter index {} in place; ignoring {} change(s)",
            object.display_name(),
            changes.len()
        );
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
        ctx.push(DdlStatement::alter(
            "Rename index",
            format!(
                "ALTER TABLE {} RENAME INDEX {} TO {}",
                self.dialect.table_name(&index.table, ctx.options())?,
                self.dialect.ddl_ident(old_name)?,
                self.dialect.ddl_ident(new_name)?
            ),
        ));
        Ok(())
    }

    fn translate_delete(&self, ctx: &mut TranslationContext<'_>, object: &SchemaObject) -> Result<()> {
        let index = self.index(object)?;
        if ctx.options().cascade_on_delete {
            debug!("MySQL has no CASCADE for indexes; ignoring option");
        }
        ctx.push(DdlStatement::drop(
            "Drop index",
            format!(
                "ALTER TABLE {} DROP INDEX {}",
                self.dialect.table_name(&index.table, ctx.options())?,
                self.dialect.ddl_ident(&index.name)?
            ),
        ));
        Ok(())
    }
}
