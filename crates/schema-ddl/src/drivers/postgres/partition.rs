//! PostgreSQL declarative partitions.
//!
//! A partition is created as `CREATE TABLE <name> PARTITION OF <parent>`.
//! Its columns come from the parent and are never declared; explicit
//! constraints are. Partitions cannot be altered, renamed or dropped on
//! their own through this translator.

use crate::core::change::ChangeSet;
use crate::core::comment::{CommentBuilder, CommentTarget};
use crate::core::identifier::validate_sql_fragment;
use crate::core::object::{ObjectKind, Partition, SchemaObject};
use crate::core::statement::DdlStatement;
use crate::core::traits::{
    kind_mismatch, Capabilities, Dialect, DialectKind, TranslationContext, Translator,
};
use crate::drivers::DialectImpl;
use crate::error::{DdlError, Result};

use super::builder::{constraint_definition, server_clause, CreateTableStatement};

/// Translator for partition records on PostgreSQL-family dialects.
#[derive(Debug, Clone)]
pub struct PostgresPartitionTranslator {
    dialect: DialectImpl,
}

impl PostgresPartitionTranslator {
    pub fn new(dialect: DialectImpl) -> Self {
        Self { dialect }
    }

    fn partition<'o>(&self, object: &'o SchemaObject) -> Result<&'o Partition> {
        match object {
            SchemaObject::Partition(p) => Ok(p),
            other => Err(kind_mismatch(ObjectKind::Partition, other)),
        }
    }

    /// Qualified parent name, or an empty reference when the partition does
    /// not report exactly one parent and the context lets that degrade.
    fn parent_name(&self, ctx: &mut TranslationContext<'_>, partition: &Partition) -> Result<String> {
        match partition.single_parent() {
            Ok(parent) => self.dialect.table_name(parent, ctx.options()),
            Err(found) => {
                ctx.degrade(DdlError::parent(
                    partition.table.table_ref().to_string(),
                    found,
                ))?;
                Ok(String::new())
            }
        }
    }
}

impl Translator for PostgresPartitionTranslator {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Partition
    }

    fn dialect(&self) -> DialectKind {
        self.dialect.kind()
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::CREATE_ONLY
    }

    fn translate_create(&self, ctx: &mut TranslationContext<'_>, object: &SchemaObject) -> Result<()> {
        let partition = self.partition(object)?;
        let table = &partition.table;
        let options = *ctx.options();
        let name = self.dialect.object_name(&table.schema, &table.name, &options)?;

        let mut stmt = CreateTableStatement::new(&name);
        if table.unlogged {
            stmt.unlogged();
        }
        if table.foreign.is_some() {
            stmt.foreign();
        }
        stmt.partition_of(self.parent_name(ctx, partition)?);
        for constraint in &table.constraints {
            stmt.element(constraint_definition(&self.dialect, constraint, &options)?);
        }
        if let Some(bound) = partition.bound.as_deref().filter(|b| !b.trim().is_empty()) {
            validate_sql_fragment("partition", "bound", bound)?;
            stmt.trailing(bound);
        }
        // SERVER follows the bound
        if let Some(foreign) = &table.foreign {
            stmt.trailing(server_clause(&self.dialect, foreign)?);
        }

        ctx.push(DdlStatement::create("Create partition", stmt.render()));
        if !table.description.is_empty() {
            ctx.push(
                CommentBuilder::new(&self.dialect)
                    .build(&CommentTarget::new(ObjectKind::Table, &name), &table.description),
            );
        }
        Ok(())
    }

    fn translate_modify(
        &self,
        _ctx: &mut TranslationContext<'_>,
        object: &SchemaObject,
        _changes: &ChangeSet,
    ) -> Result<()> {
        Err(DdlError::invalid(
            ObjectKind::Partition.label(),
            format!("{} cannot be altered", object.display_name()),
        ))
    }

    fn translate_rename(
        &self,
        _ctx: &mut TranslationContext<'_>,
        object: &SchemaObject,
        _old_name: &str,
        _new_name: &str,
    ) -> Result<()> {
        Err(DdlError::invalid(
            ObjectKind::Partition.label(),
            format!("{} cannot be renamed", object.display_name()),
        ))
    }

    fn translate_delete(&self, _ctx: &mut TranslationContext<'_>, object: &SchemaObject) -> Result<()> {
        Err(DdlError::invalid(
            ObjectKind::Partition.label(),
            format!("{} cannot be dropped", object.display_name()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslationConfig;
    use crate::core::change::OperatorOptions;
    use crate::core::object::{
        Column, Constraint, ConstraintKind, ForeignTableOptions, Table, TableRef,
    };

    fn partition(parents: Option<Vec<TableRef>>) -> SchemaObject {
        let mut table = Table::new("public", "orders_2024");
        // Declared columns are ignored: partitions inherit them
        table.columns = vec![Column {
            name: "id".into(),
            data_type: "int8".into(),
            nullable: false,
            default_value: None,
            description: String::new(),
        }];
        table.constraints = vec![Constraint {
            name: "amount_positive".into(),
            kind: ConstraintKind::Check {
                expression: "amount > 0".into(),
            },
            description: String::new(),
        }];
        SchemaObject::Partition(Partition {
            table,
            parents,
            bound: Some("FOR VALUES FROM ('2024-01-01') TO ('2025-01-01')".into()),
        })
    }

    fn create(
        object: &SchemaObject,
        settings: &TranslationConfig,
    ) -> Result<(Vec<DdlStatement>, Vec<crate::core::statement::TranslationWarning>)> {
        let options = OperatorOptions::default();
        let mut ctx = TranslationContext::new(object, &options, settings);
        PostgresPartitionTranslator::new(DialectImpl::from_kind(DialectKind::Postgres))
            .translate_create(&mut ctx, object)?;
        Ok(ctx.finish())
    }

    #[test]
    fn test_partition_of_resolved_parent() {
        let object = partition(Some(vec![TableRef::new("public", "orders")]));
        let (stmts, warnings) = create(&object, &TranslationConfig::default()).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(
            stmts[0].sql,
            "CREATE TABLE public.orders_2024 PARTITION OF public.orders (\n\tCONSTRAINT amount_positive CHECK (amount > 0)\n) FOR VALUES FROM ('2024-01-01') TO ('2025-01-01')"
        );
        assert!(!stmts[0].sql.contains("int8"));
    }

    #[test]
    fn test_foreign_partition_gets_server_clause() {
        let mut object = partition(Some(vec![TableRef::new("public", "orders")]));
        if let SchemaObject::Partition(p) = &mut object {
            p.table.constraints.clear();
            p.table.foreign = Some(ForeignTableOptions {
                server: "remote".into(),
                options: vec![("table_name".into(), "orders_2024".into())],
            });
        }
        let (stmts, _) = create(&object, &TranslationConfig::default()).unwrap();

        assert_eq!(
            stmts[0].sql,
            "CREATE FOREIGN TABLE public.orders_2024 PARTITION OF public.orders FOR VALUES FROM ('2024-01-01') TO ('2025-01-01') SERVER remote OPTIONS (table_name 'orders_2024')"
        );
    }

    #[test]
    fn test_bound_rejects_statement_breakout() {
        let mut object = partition(Some(vec![TableRef::new("public", "orders")]));
        if let SchemaObject::Partition(p) = &mut object {
            p.bound = Some("DEFAULT; DROP TABLE public.orders".into());
        }
        let err = create(&object, &TranslationConfig::default()).unwrap_err();
        assert!(matches!(err, DdlError::InvalidObjectDefinition { .. }));
    }

    #[test]
    fn test_ambiguous_parent_degrades() {
        let object = partition(Some(vec![
            TableRef::new("public", "a"),
            TableRef::new("public", "b"),
        ]));
        let (stmts, warnings) = create(&object, &TranslationConfig::default()).unwrap();

        assert_eq!(stmts.len(), 1);
        assert!(stmts[0].sql.contains("PARTITION OF  ("));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("2 parent tables"));
    }

    #[test]
    fn test_missing_parent_fails_in_strict_mode() {
        let object = partition(Some(vec![]));
        let strict = TranslationConfig {
            strict_parent_resolution: true,
            ..TranslationConfig::default()
        };
        let err = create(&object, &strict).unwrap_err();
        assert!(matches!(err, DdlError::AmbiguousOrMissingParent { .. }));
    }

    #[test]
    fn test_partition_is_create_only() {
        let translator =
            PostgresPartitionTranslator::new(DialectImpl::from_kind(DialectKind::Greenplum));
        assert_eq!(translator.capabilities(), Capabilities::CREATE_ONLY);
        assert_eq!(translator.dialect(), DialectKind::Greenplum);
    }
}
