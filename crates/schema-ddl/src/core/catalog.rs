//! Translator catalog for explicit dependency injection.
//!
//! The [`TranslatorCatalog`] is a closed table of translators keyed by
//! (object kind, dialect). It is built once, explicitly, and handed to the
//! pipeline; there is no global registry and no inheritance chain to walk.
//! Supporting a new database family means registering translators for the
//! same object kinds under a new dialect.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{DdlError, Result};

use super::object::ObjectKind;
use super::traits::{DialectKind, Translator};

/// Registry of translators by (object kind, dialect).
///
/// # Example
///
/// ```rust,ignore
/// let mut catalog = TranslatorCatalog::new();
/// catalog.register(ExasolPriorityGroupTranslator::new());
///
/// let translator = catalog.require(ObjectKind::PriorityGroup, DialectKind::Exasol)?;
/// ```
#[derive(Default)]
pub struct TranslatorCatalog {
    translators: HashMap<(ObjectKind, DialectKind), Arc<dyn Translator>>,
}

impl TranslatorCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog with the built-in translators registered.
    ///
    /// - Exasol: priority groups
    /// - PostgreSQL: tables, partitions, indexes, columns, constraints
    /// - Greenplum: PostgreSQL translators with Greenplum table storage
    /// - MySQL: indexes
    pub fn with_builtins() -> Self {
        use crate::drivers::{
            DialectImpl, ExasolPriorityGroupTranslator, GreenplumTableTranslator,
            MysqlIndexTranslator, PostgresAttributeTranslator, PostgresIndexTranslator,
            PostgresPartitionTranslator, PostgresTableTranslator,
        };

        let mut catalog = Self::new();

        catalog.register(ExasolPriorityGroupTranslator::new());

        for dialect in [DialectKind::Postgres, DialectKind::Greenplum] {
            let d = DialectImpl::from_kind(dialect);
            catalog.register(PostgresPartitionTranslator::new(d.clone()));
            catalog.register(PostgresIndexTranslator::new(d.clone()));
            catalog.register(PostgresAttributeTranslator::columns(d.clone()));
            catalog.register(PostgresAttributeTranslator::constraints(d));
        }
        catalog.register(PostgresTableTranslator::new(DialectImpl::from_kind(
            DialectKind::Postgres,
        )));
        catalog.register(GreenplumTableTranslator::new());

        catalog.register(MysqlIndexTranslator::new());

        catalog
    }

    /// Register a translator under its own (kind, dialect) key, replacing
    /// any previous entry.
    pub fn register(&mut self, translator: impl Translator + 'static) {
        self.register_arc(Arc::new(translator));
    }

    /// Register a shared translator.
    pub fn register_arc(&mut self, translator: Arc<dyn Translator>) {
        self.translators
            .insert((translator.kind(), translator.dialect()), translator);
    }

    /// Get the translator for a (kind, dialect) pair.
    pub fn get(&self, kind: ObjectKind, dialect: DialectKind) -> Option<Arc<dyn Translator>> {
        self.translators.get(&(kind, dialect)).cloned()
    }

    /// Get the translator for a (kind, dialect) pair, returning an error if
    /// none is registered.
    pub fn require(&self, kind: ObjectKind, dialect: DialectKind) -> Result<Arc<dyn Translator>> {
        self.get(kind, dialect).ok_or_else(|| DdlError::NoTranslator {
            kind: kind.label().to_string(),
            dialect: dialect.name().to_string(),
        })
    }

    pub fn has(&self, kind: ObjectKind, dialect: DialectKind) -> bool {
        self.translators.contains_key(&(kind, dialect))
    }

    /// All registered pairs, sorted.
    pub fn pairs(&self) -> Vec<(ObjectKind, DialectKind)> {
        let mut pairs: Vec<_> = self.translators.keys().copied().collect();
        pairs.sort();
        pairs
    }

    /// Object kinds supported for one dialect.
    pub fn kinds_for(&self, dialect: DialectKind) -> Vec<ObjectKind> {
        ObjectKind::all()
            .into_iter()
            .filter(|kind| self.has(*kind, dialect))
            .collect()
    }
}

impl std::fmt::Debug for TranslatorCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslatorCatalog")
            .field("translators", &self.pairs())
            .finish()
    }
}
