//! Change files: a YAML list of pending edits.
//!
//! A change file is the file form of the editor-layer input. Each entry
//! names an action, the object in its target state, and for modify entries
//! the properties that actually changed:
//!
//! ```yaml
//! dialect: exasol
//! options:
//!   cascade_on_delete: false
//! changes:
//!   - action: create
//!     object: { kind: priority_group, name: BATCH, weight: 5, description: nightly jobs }
//!   - action: modify
//!     object: { kind: priority_group, name: BATCH, weight: 10 }
//!     changes: { weight: 10 }
//! ```
//!
//! Unknown property keys are ignored so files written for newer versions
//! still load.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::core::change::{ChangeRecord, ChangeSet, OperatorOptions, PropertyChange};
use crate::core::object::SchemaObject;
use crate::core::traits::DialectKind;
use crate::error::{DdlError, Result};

/// Action of one change entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Create,
    Modify,
    Rename,
    Delete,
}

/// Changed properties of a modify entry. Absent keys did not change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PropertyPatch {
    pub weight: Option<u32>,
    pub data_type: Option<String>,
    pub nullable: Option<bool>,
    /// `null` drops the default; absent leaves it alone.
    #[serde(deserialize_with = "present")]
    pub default_value: Option<Option<String>>,
    pub unlogged: Option<bool>,
    pub description: Option<String>,
}

/// Distinguish an explicit `null` from an absent key.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl PropertyPatch {
    pub fn into_changes(self) -> Vec<PropertyChange> {
        let mut changes = Vec::new();
        if let Some(weight) = self.weight {
            changes.push(PropertyChange::Weight(weight));
        }
        if let Some(data_type) = self.data_type {
            changes.push(PropertyChange::DataType(data_type));
        }
        if let Some(nullable) = self.nullable {
            changes.push(PropertyChange::Nullable(nullable));
        }
        if let Some(default_value) = self.default_value {
            changes.push(PropertyChange::DefaultValue(default_value));
        }
        if let Some(unlogged) = self.unlogged {
            changes.push(PropertyChange::Unlogged(unlogged));
        }
        if let Some(description) = self.description {
            changes.push(PropertyChange::Description(description));
        }
        changes
    }
}

/// One entry of a change file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangeSpec {
    pub action: ActionKind,

    /// Object in its target state (for renames: already carrying the new name).
    pub object: SchemaObject,

    #[serde(default)]
    pub changes: PropertyPatch,

    /// Previous name, required for renames.
    #[serde(default)]
    pub old_name: Option<String>,

    /// For creates: create a copy of `object` under this name. For renames:
    /// must equal the object's name when given.
    #[serde(default)]
    pub new_name: Option<String>,

    /// Per-entry options, replacing the file and config defaults.
    #[serde(default)]
    pub options: Option<OperatorOptions>,
}

impl ChangeSpec {
    pub fn into_record(self, defaults: OperatorOptions) -> Result<ChangeRecord> {
        let options = self.options.unwrap_or(defaults);
        match self.action {
            ActionKind::Create => match self.new_name {
                Some(new_name) => ChangeRecord::copy_of(&self.object, &new_name, options),
                None => ChangeRecord::create(self.object, options),
            },
            ActionKind::Modify => {
                let changes = ChangeSet::new(self.changes.into_changes())?;
                ChangeRecord::modify(self.object, changes, options)
            }
            ActionKind::Rename => {
                if let Some(new_name) = &self.new_name {
                    if new_name != self.object.name() {
                        return Err(DdlError::invalid(
                            self.object.kind().label(),
                            format!(
                                "new_name '{}' does not match object name '{}'",
                                new_name,
                                self.object.name()
                            ),
                        ));
                    }
                }
                ChangeRecord::rename(self.object, self.old_name.unwrap_or_default(), options)
            }
            ActionKind::Delete => Ok(ChangeRecord::delete(self.object, options)),
        }
    }
}

/// A parsed change file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangeFile {
    #[serde(default)]
    pub dialect: Option<String>,

    #[serde(default)]
    pub options: Option<OperatorOptions>,

    pub changes: Vec<ChangeSpec>,
}

impl ChangeFile {
    /// Load a change file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Dialect named in the file, if any.
    pub fn dialect_kind(&self) -> Result<Option<DialectKind>> {
        self.dialect.as_deref().map(DialectKind::from_name).transpose()
    }

    /// Build one record per entry. Entries that fail to build are returned
    /// as errors in place so the pipeline can report them by position.
    pub fn into_records(self, defaults: OperatorOptions) -> Vec<Result<ChangeRecord>> {
        let defaults = self.options.unwrap_or(defaults);
        self.changes
            .into_iter()
            .map(|spec| spec.into_record(defaults))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::change::{ChangeAction, Operation, PropertyKey};
    use crate::core::object::ObjectKind;

    const SAMPLE: &str = r#"
dialect: exasol
options:
  cascade_on_delete: true
changes:
  - action: create
    object: { kind: priority_group, name: BATCH, weight: 5, description: nightly jobs }
  - action: modify
    object: { kind: priority_group, name: BATCH, weight: 10 }
    changes: { weight: 10, color: blue }
  - action: rename
    object: { kind: priority_group, name: BATCH_V2, weight: 10 }
    old_name: BATCH
  - action: delete
    object: { kind: priority_group, name: BATCH_V2, weight: 10 }
    options: { cascade_on_delete: false }
"#;

    #[test]
    fn test_parse_sample() {
        let file = ChangeFile::from_yaml(SAMPLE).unwrap();
        assert_eq!(file.dialect_kind().unwrap(), Some(DialectKind::Exasol));
        assert_eq!(file.changes.len(), 4);

        let records: Vec<_> = file
            .into_records(OperatorOptions::default())
            .into_iter()
            .map(|r| r.unwrap())
            .collect();
        let ops: Vec<_> = records.iter().map(|r| r.operation()).collect();
        assert_eq!(
            ops,
            vec![
                Operation::Create,
                Operation::Modify,
                Operation::Rename,
                Operation::Delete
            ]
        );
        assert!(records[0].options().cascade_on_delete);
        assert!(!records[3].options().cascade_on_delete);
        assert_eq!(records[0].kind(), ObjectKind::PriorityGroup);
    }

    #[test]
    fn test_unknown_property_keys_are_ignored() {
        let file = ChangeFile::from_yaml(SAMPLE).unwrap();
        let record = file.changes[1]
            .clone()
            .into_record(OperatorOptions::default())
            .unwrap();
        match record.action() {
            ChangeAction::Modify { changes } => {
                assert_eq!(changes.len(), 1);
                assert!(changes.contains(PropertyKey::Weight));
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_default_value_null_vs_absent() {
        let patch: PropertyPatch = serde_yaml::from_str("default_value: null").unwrap();
        assert_eq!(
            patch.into_changes(),
            vec![PropertyChange::DefaultValue(None)]
        );

        let patch: PropertyPatch = serde_yaml::from_str("nullable: false").unwrap();
        assert_eq!(patch.default_value, None);
        assert_eq!(patch.into_changes(), vec![PropertyChange::Nullable(false)]);
    }

    #[test]
    fn test_modify_without_changes_fails() {
        let yaml = r#"
changes:
  - action: modify
    object: { kind: priority_group, name: BATCH, weight: 10 }
"#;
        let records = ChangeFile::from_yaml(yaml)
            .unwrap()
            .into_records(OperatorOptions::default());
        assert!(records[0].is_err());
    }

    #[test]
    fn test_rename_requires_old_name_and_matching_new_name() {
        let yaml = r#"
changes:
  - action: rename
    object: { kind: priority_group, name: BATCH, weight: 10 }
  - action: rename
    object: { kind: priority_group, name: BATCH, weight: 10 }
    old_name: OLD
    new_name: OTHER
"#;
        let records = ChangeFile::from_yaml(yaml)
            .unwrap()
            .into_records(OperatorOptions::default());
        assert!(records.iter().all(|r| r.is_err()));
    }

    #[test]
    fn test_create_copy_with_new_name() {
        let yaml = r#"
changes:
  - action: create
    object: { kind: priority_group, name: BATCH, weight: 10, persisted: true }
    new_name: BATCH_COPY
"#;
        let record = ChangeFile::from_yaml(yaml)
            .unwrap()
            .into_records(OperatorOptions::default())
            .remove(0)
            .unwrap();
        assert_eq!(record.object().name(), "BATCH_COPY");
        assert_eq!(
            record.action(),
            &ChangeAction::Create {
                template: Some("BATCH".into())
            }
        );
    }

    #[test]
    fn test_load_missing_file() {
        assert!(ChangeFile::load("/nonexistent/changes.yaml").is_err());
    }
}
