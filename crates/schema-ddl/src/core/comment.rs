//! `COMMENT ON` statements for described objects.
//!
//! The builder only renders. Callers decide whether a comment is needed
//! (non-empty description) and compute the target identifier, so the same
//! builder serves every object kind and dialect.

use super::object::ObjectKind;
use super::statement::DdlStatement;
use super::traits::Dialect;

/// What a comment is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentTarget {
    kind: ObjectKind,
    identifier: String,
}

impl CommentTarget {
    /// `identifier` must already be rendered for the dialect.
    pub fn new(kind: ObjectKind, identifier: impl Into<String>) -> Self {
        Self {
            kind,
            identifier: identifier.into(),
        }
    }

    /// `COMMENT ON CONSTRAINT <name> ON <table>` form.
    pub fn constraint(name: &str, table: &str) -> Self {
        Self::new(ObjectKind::Constraint, format!("{} ON {}", name, table))
    }
}

/// Renders comment statements with a dialect's quoting rules.
pub struct CommentBuilder<'a> {
    dialect: &'a dyn Dialect,
}

impl<'a> CommentBuilder<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self { dialect }
    }

    /// `COMMENT ON <kind> <identifier> IS '<text>'`.
    ///
    /// `text` must be non-empty; use [`CommentBuilder::clear`] to remove a
    /// comment.
    pub fn build(&self, target: &CommentTarget, text: &str) -> DdlStatement {
        self.render(target, &self.dialect.quote_string(text))
    }

    /// Statement that removes the comment from `target`.
    pub fn clear(&self, target: &CommentTarget) -> DdlStatement {
        self.render(target, self.dialect.empty_comment_literal())
    }

    /// Statement for a changed description: set when non-empty, cleared
    /// otherwise.
    pub fn update(&self, target: &CommentTarget, text: &str) -> DdlStatement {
        if text.is_empty() {
            self.clear(target)
        } else {
            self.build(target, text)
        }
    }

    fn render(&self, target: &CommentTarget, literal: &str) -> DdlStatement {
        DdlStatement::comment(
            format!("Comment {}", target.kind.label()),
            format!(
                "COMMENT ON {} {} {} {}",
                target.kind.sql_keyword(),
                target.identifier,
                self.dialect.comment_keyword(),
                literal
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::statement::StatementKind;
    use crate::drivers::{ExasolDialect, PostgresDialect};

    #[test]
    fn test_exasol_comment_uses_lower_case_is() {
        let dialect = ExasolDialect::new();
        let stmt = CommentBuilder::new(&dialect).build(
            &CommentTarget::new(ObjectKind::PriorityGroup, "BATCH"),
            "nightly jobs",
        );
        assert_eq!(stmt.sql, "COMMENT ON PRIORITY GROUP BATCH is 'nightly jobs'");
        assert_eq!(stmt.kind, StatementKind::Comment);
        assert_eq!(stmt.label, "Comment priority group");
    }

    #[test]
    fn test_postgres_comment_escapes_quotes() {
        let dialect = PostgresDialect::new();
        let stmt = CommentBuilder::new(&dialect).build(
            &CommentTarget::new(ObjectKind::Index, "public.orders_idx"),
            "customer's orders",
        );
        assert_eq!(
            stmt.sql,
            "COMMENT ON INDEX public.orders_idx IS 'customer''s orders'"
        );
    }

    #[test]
    fn test_constraint_target_and_clear() {
        let dialect = PostgresDialect::new();
        let stmt = CommentBuilder::new(&dialect)
            .clear(&CommentTarget::constraint("orders_pk", "public.orders"));
        assert_eq!(
            stmt.sql,
            "COMMENT ON CONSTRAINT orders_pk ON public.orders IS NULL"
        );
    }

    #[test]
    fn test_update_with_empty_text_clears() {
        let dialect = ExasolDialect::new();
        let builder = CommentBuilder::new(&dialect);
        let target = CommentTarget::new(ObjectKind::PriorityGroup, "BATCH");

        assert_eq!(
            builder.update(&target, "").sql,
            "COMMENT ON PRIORITY GROUP BATCH is ''"
        );
        assert_eq!(
            builder.update(&target, "etl").sql,
            "COMMENT ON PRIORITY GROUP BATCH is 'etl'"
        );
    }
}
