//! Greenplum tables.
//!
//! Builds on the PostgreSQL table translator and fills the distribution
//! slot of the create statement.

use crate::core::change::ChangeSet;
use crate::core::object::{Distribution, ObjectKind, SchemaObject};
use crate::core::traits::{DialectKind, TranslationContext, Translator};
use crate::drivers::postgres::{ident_list, PostgresTableTranslator};
use crate::drivers::{DialectImpl, GreenplumDialect};
use crate::error::Result;

/// Translator for table records on Greenplum.
#[derive(Debug, Clone)]
pub struct GreenplumTableTranslator {
    base: PostgresTableTranslator,
    dialect: GreenplumDialect,
}

impl Default for GreenplumTableTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl GreenplumTableTranslator {
    pub fn new() -> Self {
        Self {
            base: PostgresTableTranslator::new(DialectImpl::Greenplum(GreenplumDialect::new())),
            dialect: GreenplumDialect::new(),
        }
    }

    fn distribution_clause(&self, distribution: &Distribution) -> Result<String> {
        Ok(match distribution {
            Distribution::Columns(columns) => {
                format!("DISTRIBUTED BY ({})", ident_list(&self.dialect, columns)?)
            }
            Distribution::Randomly => "DISTRIBUTED RANDOMLY".to_string(),
            Distribution::Replicated => "DISTRIBUTED REPLICATED".to_string(),
        })
    }
}

impl Translator for GreenplumTableTranslator {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Table
    }

    fn dialect(&self) -> DialectKind {
        DialectKind::Greenplum
    }

    fn translate_create(&self, ctx: &mut TranslationContext<'_>, object: &SchemaObject) -> Result<()> {
        let table = self.base.table(object)?;
        let mut stmt = self.base.create_statement(table, ctx.options())?;

        // Foreign tables are not distributed
        if let Some(distribution) = table.distribution.as_ref().filter(|_| !stmt.is_foreign()) {
            stmt.trailing(self.distribution_clause(distribution)?);
        }

        self.base.emit_create(ctx, table, stmt)
    }

    fn translate_modify(
        &self,
        ctx: &mut TranslationContext<'_>,
        object: &SchemaObject,
        changes: &ChangeSet,
    ) -> Result<()> {
        self.base.translate_modify(ctx, object, changes)
    }

    fn translate_rename(
        &self,
        ctx: &mut TranslationContext<'_>,
        object: &SchemaObject,
        old_name: &str,
        new_name: &str,
    ) -> Result<()> {
        self.base.translate_rename(ctx, object, old_name, new_name)
    }

    fn translate_delete(&self, ctx: &mut TranslationContext<'_>, object: &SchemaObject) -> Result<()> {
        self.base.translate_delete(ctx, object)
    }
}
