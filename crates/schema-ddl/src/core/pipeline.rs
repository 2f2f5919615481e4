//! Batch translation of change records into a statement sink.
//!
//! One batch corresponds to one save action. Records are ordered by the
//! [`ExclusionPolicy`], checked against it, and translated one by one; the
//! statements of each emitted record are appended to the sink in the order
//! the translator produced them.

use serde::Serialize;
use tracing::{debug, info};

use crate::config::TranslationConfig;
use crate::error::Result;

use super::catalog::TranslatorCatalog;
use super::change::{ChangeAction, ChangeRecord, OperatorOptions, Operation};
use super::object::ObjectKind;
use super::policy::{ExclusionPolicy, ExclusionReason};
use super::statement::{DdlStatement, StatementSink, TranslationWarning};
use super::traits::{DialectKind, TranslationContext};

/// Terminal state of one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RecordState {
    /// No statement reached the sink.
    Excluded { reason: ExclusionReason },
    /// At least one statement reached the sink.
    Emitted { statements: usize },
    /// Construction or translation failed; siblings were still processed.
    Failed { error: String },
}

/// Result of translating a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutput {
    pub state: RecordState,
    pub statements: Vec<DdlStatement>,
    pub warnings: Vec<TranslationWarning>,
}

impl RecordOutput {
    fn excluded(reason: ExclusionReason, warnings: Vec<TranslationWarning>) -> Self {
        Self {
            state: RecordState::Excluded { reason },
            statements: Vec::new(),
            warnings,
        }
    }

    pub fn is_emitted(&self) -> bool {
        matches!(self.state, RecordState::Emitted { .. })
    }
}

/// Per-record entry of a batch result, in caller order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordOutcome {
    /// Position of the record in the caller's list.
    pub index: usize,
    /// Display name of the object; absent when the record could not be built.
    pub object: Option<String>,
    pub kind: Option<ObjectKind>,
    pub operation: Option<Operation>,
    #[serde(flatten)]
    pub state: RecordState,
}

/// Everything one batch produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    pub sink: StatementSink,
    pub outcomes: Vec<RecordOutcome>,
    pub warnings: Vec<TranslationWarning>,
}

impl BatchResult {
    /// True if no record failed.
    pub fn is_success(&self) -> bool {
        self.failed().is_empty()
    }

    pub fn failed(&self) -> Vec<&RecordOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.state, RecordState::Failed { .. }))
            .collect()
    }

    pub fn excluded(&self) -> Vec<&RecordOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.state, RecordState::Excluded { .. }))
            .collect()
    }
}

/// Translates change records for one dialect.
pub struct Pipeline<'a> {
    catalog: &'a TranslatorCatalog,
    dialect: DialectKind,
    options: Option<OperatorOptions>,
    translation: TranslationConfig,
}

impl<'a> Pipeline<'a> {
    pub fn new(catalog: &'a TranslatorCatalog, dialect: DialectKind) -> Self {
        Self {
            catalog,
            dialect,
            options: None,
            translation: TranslationConfig::default(),
        }
    }

    /// Use `options` for every record instead of the record's own options.
    pub fn with_options(mut self, options: OperatorOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_translation(mut self, translation: TranslationConfig) -> Self {
        self.translation = translation;
        self
    }

    pub fn dialect(&self) -> DialectKind {
        self.dialect
    }

    fn policy(&self) -> ExclusionPolicy {
        ExclusionPolicy::from_config(&self.translation)
    }

    /// Translate one record.
    ///
    /// # Errors
    ///
    /// Hard failures: no translator for the record's kind, an object the
    /// translator cannot render, or a soft failure made fatal by the
    /// translation settings.
    pub fn translate(&self, record: &ChangeRecord) -> Result<RecordOutput> {
        let translator = self.catalog.require(record.kind(), self.dialect)?;
        let object = record.object();

        if let Some(reason) = self.policy().check(record, translator.capabilities()) {
            debug!("Excluded {} {}: {}", record.operation(), object.display_name(), reason);
            return Ok(RecordOutput::excluded(reason, Vec::new()));
        }

        let options = self.options.unwrap_or(*record.options());
        let mut ctx = TranslationContext::new(object, &options, &self.translation);

        match record.action() {
            ChangeAction::Create { template } => {
                if let Some(template) = template {
                    debug!("Creating {} as copy of {}", object.display_name(), template);
                }
                translator.translate_create(&mut ctx, object)?;
            }
            ChangeAction::Modify { changes } => {
                translator.translate_modify(&mut ctx, object, changes)?;
            }
            ChangeAction::Rename { old_name, new_name } => {
                translator.translate_rename(&mut ctx, object, old_name, new_name)?;
            }
            ChangeAction::Delete => translator.translate_delete(&mut ctx, object)?,
        }

        let (statements, warnings) = ctx.finish();
        if statements.is_empty() {
            let reason = ExclusionReason::NoRecognizedChanges;
            debug!("Excluded {} {}: {}", record.operation(), object.display_name(), reason);
            return Ok(RecordOutput::excluded(reason, warnings));
        }

        for stmt in &statements {
            debug!("{}: {}", stmt.label, stmt.sql);
        }

        Ok(RecordOutput {
            state: RecordState::Emitted {
                statements: statements.len(),
            },
            statements,
            warnings,
        })
    }

    /// Translate a batch.
    ///
    /// Records that failed to build are reported as failed outcomes; every
    /// other record is still translated. Outcomes are returned in caller
    /// order, statements in translation order.
    pub fn run(&self, records: Vec<Result<ChangeRecord>>) -> BatchResult {
        let mut outcomes: Vec<Option<RecordOutcome>> = Vec::with_capacity(records.len());
        let mut built: Vec<(usize, ChangeRecord)> = Vec::new();

        for (index, record) in records.into_iter().enumerate() {
            match record {
                Ok(record) => {
                    outcomes.push(None);
                    built.push((index, record));
                }
                Err(e) => outcomes.push(Some(RecordOutcome {
                    index,
                    object: None,
                    kind: None,
                    operation: None,
                    state: RecordState::Failed {
                        error: e.to_string(),
                    },
                })),
            }
        }

        let refs: Vec<&ChangeRecord> = built.iter().map(|(_, r)| r).collect();
        let order = self.policy().order(&refs);

        let mut result = BatchResult::default();
        for pos in order {
            let (index, record) = &built[pos];
            let state = match self.translate(record) {
                Ok(output) => {
                    result.sink.extend(output.statements);
                    result.warnings.extend(output.warnings);
                    output.state
                }
                Err(e) => RecordState::Failed {
                    error: e.to_string(),
                },
            };

            outcomes[*index] = Some(RecordOutcome {
                index: *index,
                object: Some(record.object().display_name()),
                kind: Some(record.kind()),
                operation: Some(record.operation()),
                state,
            });
        }

        result.outcomes = outcomes.into_iter().flatten().collect();

        info!(
            "Translated {} records for {}: {} statements, {} excluded, {} failed, {} warnings",
            result.outcomes.len(),
            self.dialect,
            result.sink.len(),
            result.excluded().len(),
            result.failed().len(),
            result.warnings.len()
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::change::{ChangeSet, PropertyChange};
    use crate::core::object::{PriorityGroup, SchemaObject};
    use crate::error::DdlError;

    fn group(name: &str, weight: u32, description: &str) -> SchemaObject {
        SchemaObject::PriorityGroup(PriorityGroup {
            name: name.to_string(),
            weight,
            description: description.to_string(),
            persisted: false,
        })
    }

    #[test]
    fn test_translate_create_with_comment() {
        let catalog = TranslatorCatalog::with_builtins();
        let pipeline = Pipeline::new(&catalog, DialectKind::Exasol);
        let record =
            ChangeRecord::create(group("BATCH", 5, "nightly jobs"), OperatorOptions::default())
                .unwrap();

        let output = pipeline.translate(&record).unwrap();
        assert!(output.is_emitted());
        assert_eq!(output.state, RecordState::Emitted { statements: 2 });
        assert_eq!(output.statements[0].sql, "CREATE PRIORITY GROUP BATCH WITH WEIGHT = 5");
        assert_eq!(
            output.statements[1].sql,
            "COMMENT ON PRIORITY GROUP BATCH is 'nightly jobs'"
        );
    }

    #[test]
    fn test_translate_missing_translator_is_hard_failure() {
        let catalog = TranslatorCatalog::with_builtins();
        let pipeline = Pipeline::new(&catalog, DialectKind::Mysql);
        let record =
            ChangeRecord::create(group("BATCH", 5, ""), OperatorOptions::default()).unwrap();

        let err = pipeline.translate(&record).unwrap_err();
        assert!(matches!(err, DdlError::NoTranslator { .. }));
    }

    #[test]
    fn test_run_isolates_failures() {
        let catalog = TranslatorCatalog::with_builtins();
        let pipeline = Pipeline::new(&catalog, DialectKind::Exasol);

        let records = vec![
            ChangeRecord::create(group("", 5, ""), OperatorOptions::default()),
            ChangeRecord::create(group("BATCH", 5, ""), OperatorOptions::default()),
            ChangeRecord::modify(
                group("BATCH", 10, ""),
                ChangeSet::new(vec![PropertyChange::Weight(10)]).unwrap(),
                OperatorOptions::default(),
            ),
        ];

        let result = pipeline.run(records);
        assert!(!result.is_success());
        assert_eq!(result.failed().len(), 1);
        assert_eq!(result.failed()[0].index, 0);
        assert_eq!(
            result.sink.sql(),
            vec![
                "CREATE PRIORITY GROUP BATCH WITH WEIGHT = 5",
                "ALTER PRIORITY GROUP BATCH SET WEIGHT = 10",
            ]
        );
        let indices: Vec<_> = result.outcomes.iter().map(|o| o.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_unrecognized_changes_are_excluded() {
        let catalog = TranslatorCatalog::with_builtins();
        let pipeline = Pipeline::new(&catalog, DialectKind::Exasol);
        let record = ChangeRecord::modify(
            group("BATCH", 5, ""),
            ChangeSet::new(vec![PropertyChange::Nullable(false)]).unwrap(),
            OperatorOptions::default(),
        )
        .unwrap();

        let output = pipeline.translate(&record).unwrap();
        assert!(output.statements.is_empty());
        assert_eq!(
            output.state,
            RecordState::Excluded {
                reason: ExclusionReason::NoRecognizedChanges
            }
        );
    }

    #[test]
    fn test_outcome_serializes_flat() {
        let outcome = RecordOutcome {
            index: 0,
            object: Some("BATCH".into()),
            kind: Some(ObjectKind::PriorityGroup),
            operation: Some(Operation::Create),
            state: RecordState::Emitted { statements: 2 },
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["state"], "emitted");
        assert_eq!(json["statements"], 2);
        assert_eq!(json["kind"], "priority_group");
    }
}
