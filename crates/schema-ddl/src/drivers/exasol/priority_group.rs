//! Exasol priority groups.
//!
//! Priority groups are database-wide, so their names are never
//! schema-qualified.

use tracing::debug;

use crate::core::change::{ChangeSet, PropertyChange};
use crate::core::comment::{CommentBuilder, CommentTarget};
use crate::core::object::{ObjectKind, PriorityGroup, SchemaObject};
use crate::core::statement::DdlStatement;
use crate::core::traits::{kind_mismatch, Dialect, DialectKind, TranslationContext, Translator};
use crate::error::Result;

use super::ExasolDialect;

/// Translator for `PRIORITY GROUP` records.
#[derive(Debug, Clone, Default)]
pub struct ExasolPriorityGroupTranslator {
    dialect: ExasolDialect,
}

impl ExasolPriorityGroupTranslator {
    pub fn new() -> Self {
        Self {
            dialect: ExasolDialect::new(),
        }
    }

    fn group<'o>(&self, object: &'o SchemaObject) -> Result<&'o PriorityGroup> {
        match object {
            SchemaObject::PriorityGroup(g) => Ok(g),
            other => Err(kind_mismatch(ObjectKind::PriorityGroup, other)),
        }
    }

    fn comment_target(&self, name: &str) -> CommentTarget {
        CommentTarget::new(ObjectKind::PriorityGroup, name)
    }
}

impl Translator for ExasolPriorityGroupTranslator {
    fn kind(&self) -> ObjectKind {
        ObjectKind::PriorityGroup
    }

    fn dialect(&self) -> DialectKind {
        DialectKind::Exasol
    }

    fn translate_create(&self, ctx: &mut TranslationContext<'_>, object: &SchemaObject) -> Result<()> {
        let group = self.group(object)?;
        let name = self.dialect.ddl_ident(&group.name)?;

        ctx.push(DdlStatement::create(
            "Create priority group",
            format!("CREATE PRIORITY GROUP {} WITH WEIGHT = {}", name, group.weight),
        ));
        if !group.description.is_empty() {
            ctx.push(
                CommentBuilder::new(&self.dialect)
                    .build(&self.comment_target(&name), &group.description),
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
        let group = self.group(object)?;
        let name = self.dialect.ddl_ident(&group.name)?;

        for change in changes.iter() {
            match change {
                PropertyChange::Weight(weight) => ctx.push(DdlStatement::alter(
                    "Alter priority group",
                    format!("ALTER PRIORITY GROUP {} SET WEIGHT = {}", name, weight),
                )),
                PropertyChange::Description(text) => ctx.push(
                    CommentBuilder::new(&self.dialect).update(&self.comment_target(&name), text),
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
        self.group(object)?;
        ctx.push(DdlStatement::alter(
            "Rename priority group",
            format!(
                "RENAME PRIORITY GROUP {} to {}",
                self.dialect.ddl_ident(old_name)?,
                self.dialect.ddl_ident(new_name)?
            ),
        ));
        Ok(())
    }

    fn translate_delete(&self, ctx: &mut TranslationContext<'_>, object: &SchemaObject) -> Result<()> {
        let group = self.group(object)?;
        if ctx.options().cascade_on_delete {
            debug!("Exasol has no CASCADE for priority groups; ignoring option");
        }
        ctx.push(DdlStatement::drop(
            "Drop priority group",
            format!("DROP PRIORITY GROUP {}", self.dialect.ddl_ident(&group.name)?),
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslationConfig;
    use crate::core::change::OperatorOptions;
    use crate::core::object::Table;
    use crate::core::statement::StatementKind;
    use crate::error::DdlError;

    fn batch(description: &str) -> SchemaObject {
        SchemaObject::PriorityGroup(PriorityGroup {
            name: "BATCH".to_string(),
            weight: 5,
            description: description.to_string(),
            persisted: false,
        })
    }

    fn run<F>(object: &SchemaObject, f: F) -> Vec<DdlStatement>
    where
        F: FnOnce(&ExasolPriorityGroupTranslator, &mut TranslationContext<'_>) -> Result<()>,
    {
        let options = OperatorOptions::default();
        let settings = TranslationConfig::default();
        let mut ctx = TranslationContext::new(object, &options, &settings);
        f(&ExasolPriorityGroupTranslator::new(), &mut ctx).unwrap();
        ctx.finish().0
    }

    #[test]
    fn test_create_without_description() {
        let object = batch("");
        let stmts = run(&object, |t, ctx| t.translate_create(ctx, &object));
        assert_eq!(stmts.len(), 1);
        assert_eq!(stmts[0].sql, "CREATE PRIORITY GROUP BATCH WITH WEIGHT = 5");
        assert_eq!(stmts[0].kind, StatementKind::Create);
    }

    #[test]
    fn test_create_with_description_appends_comment() {
        let object = batch("it's nightly");
        let stmts = run(&object, |t, ctx| t.translate_create(ctx, &object));
        assert_eq!(stmts.len(), 2);
        assert_eq!(
            stmts[1].sql,
            "COMMENT ON PRIORITY GROUP BATCH is 'it''s nightly'"
        );
        assert_eq!(stmts[1].kind, StatementKind::Comment);
    }

    #[test]
    fn test_modify_emits_in_key_order() {
        let object = batch("etl");
        let changes = ChangeSet::new(vec![
            PropertyChange::Description("etl".into()),
            PropertyChange::Weight(10),
            PropertyChange::DataType("ignored".into()),
        ])
        .unwrap();
        let stmts = run(&object, |t, ctx| t.translate_modify(ctx, &object, &changes));
        let sql: Vec<_> = stmts.iter().map(|s| s.sql.as_str()).collect();
        assert_eq!(
            sql,
            vec![
                "ALTER PRIORITY GROUP BATCH SET WEIGHT = 10",
                "COMMENT ON PRIORITY GROUP BATCH is 'etl'",
            ]
        );
    }

    #[test]
    fn test_rename_and_delete() {
        let object = batch("");
        let stmts = run(&object, |t, ctx| t.translate_rename(ctx, &object, "OLD_BATCH", "BATCH"));
        assert_eq!(stmts[0].sql, "RENAME PRIORITY GROUP OLD_BATCH to BATCH");

        let stmts = run(&object, |t, ctx| t.translate_delete(ctx, &object));
        assert_eq!(stmts[0].sql, "DROP PRIORITY GROUP BATCH");
        assert_eq!(stmts[0].kind, StatementKind::Drop);
    }

    #[test]
    fn test_wrong_kind_is_rejected() {
        let object = SchemaObject::Table(Table::new("S", "T"));
        let options = OperatorOptions::default();
        let settings = TranslationConfig::default();
        let mut ctx = TranslationContext::new(&object, &options, &settings);
        let err = ExasolPriorityGroupTranslator::new()
            .translate_create(&mut ctx, &object)
            .unwrap_err();
        assert!(matches!(err, DdlError::ObjectKindMismatch { .. }));
    }
}
