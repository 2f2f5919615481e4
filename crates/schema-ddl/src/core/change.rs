//! Change records: one pending mutation to one schema object.
//!
//! A record is built by the editor layer once an edit is committed and is
//! consumed exactly once by a translator. Construction is where mandatory
//! fields are checked; a record that exists is always translatable in
//! principle (the policy may still exclude it).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{DdlError, Result};

use super::identifier::validate_check_expression;
use super::object::{ConstraintKind, Lookup, ObjectKind, PriorityGroup, SchemaObject, Table};

/// Exasol accepts priority-group weights in this range.
const PRIORITY_WEIGHT_RANGE: std::ops::RangeInclusive<u32> = 1..=1000;

/// Operation category of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Create,
    Modify,
    Rename,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Create => "create",
            Operation::Modify => "modify",
            Operation::Rename => "rename",
            Operation::Delete => "delete",
        })
    }
}

/// Recognized property keys.
///
/// Declaration order is the emission order for modify records, so the same
/// change set always yields the same script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum PropertyKey {
    Weight,
    DataType,
    Nullable,
    DefaultValue,
    Unlogged,
    Description,
}

/// A changed property with its new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum PropertyChange {
    Weight(u32),
    DataType(String),
    Nullable(bool),
    DefaultValue(Option<String>),
    Unlogged(bool),
    Description(String),
}

impl PropertyChange {
    pub fn key(&self) -> PropertyKey {
        match self {
            PropertyChange::Weight(_) => PropertyKey::Weight,
            PropertyChange::DataType(_) => PropertyKey::DataType,
            PropertyChange::Nullable(_) => PropertyKey::Nullable,
            PropertyChange::DefaultValue(_) => PropertyKey::DefaultValue,
            PropertyChange::Unlogged(_) => PropertyKey::Unlogged,
            PropertyChange::Description(_) => PropertyKey::Description,
        }
    }
}

/// Non-empty set of changed properties, at most one per key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSet {
    changes: BTreeMap<PropertyKey, PropertyChange>,
}

impl ChangeSet {
    /// Build a change set. A later change for the same key replaces an
    /// earlier one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidObjectDefinition` if no change is supplied.
    pub fn new(changes: impl IntoIterator<Item = PropertyChange>) -> Result<Self> {
        let changes: BTreeMap<_, _> = changes.into_iter().map(|c| (c.key(), c)).collect();
        if changes.is_empty() {
            return Err(DdlError::invalid(
                "change set",
                "a modify record needs at least one changed property",
            ));
        }
        Ok(Self { changes })
    }

    /// Changes in key-priority order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyChange> {
        self.changes.values()
    }

    pub fn get(&self, key: PropertyKey) -> Option<&PropertyChange> {
        self.changes.get(&key)
    }

    pub fn contains(&self, key: PropertyKey) -> bool {
        self.changes.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Options threaded from the editor call down to the translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorOptions {
    /// Append `CASCADE` to drop statements.
    pub cascade_on_delete: bool,
    /// Qualify object names with their schema.
    pub fully_qualified_names: bool,
}

impl Default for OperatorOptions {
    fn default() -> Self {
        Self {
            cascade_on_delete: false,
            fully_qualified_names: true,
        }
    }
}

impl OperatorOptions {
    pub fn with_cascade(mut self, cascade: bool) -> Self {
        self.cascade_on_delete = cascade;
        self
    }

    pub fn with_fully_qualified_names(mut self, qualified: bool) -> Self {
        self.fully_qualified_names = qualified;
        self
    }
}

/// Variant-specific payload of a change record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeAction {
    Create {
        /// Display name of the object this one was copied from.
        template: Option<String>,
    },
    Modify {
        changes: ChangeSet,
    },
    Rename {
        old_name: String,
        new_name: String,
    },
    Delete,
}

/// One pending mutation to one schema object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    object: SchemaObject,
    action: ChangeAction,
    options: OperatorOptions,
}

impl ChangeRecord {
    /// Record the creation of a fully parameterized object.
    ///
    /// # Errors
    ///
    /// Returns `InvalidObjectDefinition` if a mandatory field is missing.
    pub fn create(object: SchemaObject, options: OperatorOptions) -> Result<Self> {
        validate_definition(&object)?;
        Ok(Self {
            object,
            action: ChangeAction::Create { template: None },
            options,
        })
    }

    /// Record the creation of a copy of `template` under a new name.
    pub fn copy_of(
        template: &SchemaObject,
        new_name: &str,
        options: OperatorOptions,
    ) -> Result<Self> {
        let mut object = template.clone();
        rename_in_place(&mut object, new_name);
        mark_unpersisted(&mut object);
        validate_definition(&object)?;
        Ok(Self {
            object,
            action: ChangeAction::Create {
                template: Some(template.display_name()),
            },
            options,
        })
    }

    /// Record a modification. The object already carries the new values.
    ///
    /// # Errors
    ///
    /// Returns `InvalidObjectDefinition` if a changed value is out of range.
    pub fn modify(
        object: SchemaObject,
        changes: ChangeSet,
        options: OperatorOptions,
    ) -> Result<Self> {
        if let Some(PropertyChange::Weight(weight)) = changes.get(PropertyKey::Weight) {
            check_weight(object.kind(), *weight)?;
        }
        Ok(Self {
            object,
            action: ChangeAction::Modify { changes },
            options,
        })
    }

    /// Record a rename. The object's live name is the new name; the old
    /// name is carried separately because the object no longer has it.
    pub fn rename(
        object: SchemaObject,
        old_name: impl Into<String>,
        options: OperatorOptions,
    ) -> Result<Self> {
        let old_name = old_name.into();
        if old_name.is_empty() {
            return Err(DdlError::invalid(
                object.kind().label(),
                "rename requires the previous name",
            ));
        }
        let new_name = object.name().to_string();
        Ok(Self {
            object,
            action: ChangeAction::Rename { old_name, new_name },
            options,
        })
    }

    /// Record a drop.
    pub fn delete(object: SchemaObject, options: OperatorOptions) -> Self {
        Self {
            object,
            action: ChangeAction::Delete,
            options,
        }
    }

    pub fn object(&self) -> &SchemaObject {
        &self.object
    }

    pub fn action(&self) -> &ChangeAction {
        &self.action
    }

    pub fn options(&self) -> &OperatorOptions {
        &self.options
    }

    pub fn kind(&self) -> ObjectKind {
        self.object.kind()
    }

    pub fn operation(&self) -> Operation {
        match self.action {
            ChangeAction::Create { .. } => Operation::Create,
            ChangeAction::Modify { .. } => Operation::Modify,
            ChangeAction::Rename { .. } => Operation::Rename,
            ChangeAction::Delete => Operation::Delete,
        }
    }
}

/// Creation parameters for an Exasol priority group, as collected by an
/// editor dialog before the pipeline runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityGroupParams {
    pub name: Option<String>,
    pub weight: Option<u32>,
    #[serde(default)]
    pub comment: String,
}

impl PriorityGroupParams {
    pub fn into_record(self, options: OperatorOptions) -> Result<ChangeRecord> {
        let name = self
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| DdlError::invalid("priority group", "name is required"))?;
        let weight = self
            .weight
            .ok_or_else(|| DdlError::invalid("priority group", "weight is required"))?;

        ChangeRecord::create(
            SchemaObject::PriorityGroup(PriorityGroup {
                name,
                weight,
                description: self.comment,
                persisted: false,
            }),
            options,
        )
    }
}

fn rename_in_place(object: &mut SchemaObject, new_name: &str) {
    let name = match object {
        SchemaObject::PriorityGroup(g) => &mut g.name,
        SchemaObject::Table(t) => &mut t.name,
        SchemaObject::Partition(p) => &mut p.table.name,
        SchemaObject::Index(i) => &mut i.name,
        SchemaObject::Column(c) => &mut c.column.name,
        SchemaObject::Constraint(c) => &mut c.constraint.name,
    };
    *name = new_name.to_string();
}

fn mark_unpersisted(object: &mut SchemaObject) {
    match object {
        SchemaObject::PriorityGroup(g) => g.persisted = false,
        SchemaObject::Table(t) => t.persisted = false,
        SchemaObject::Partition(p) => p.table.persisted = false,
        SchemaObject::Index(i) => {
            i.persisted = false;
            i.definition = Lookup::Missing;
        }
        SchemaObject::Column(_) | SchemaObject::Constraint(_) => {}
    }
}

fn check_weight(kind: ObjectKind, weight: u32) -> Result<()> {
    if !PRIORITY_WEIGHT_RANGE.contains(&weight) {
        return Err(DdlError::invalid(
            kind.label(),
            format!(
                "weight must be between {} and {}, got {}",
                PRIORITY_WEIGHT_RANGE.start(),
                PRIORITY_WEIGHT_RANGE.end(),
                weight
            ),
        ));
    }
    Ok(())
}

fn validate_foreign(kind: ObjectKind, table: &Table) -> Result<()> {
    if let Some(foreign) = &table.foreign {
        require(kind, "foreign server", &foreign.server)?;
        if table.unlogged {
            return Err(DdlError::invalid(
                kind.label(),
                "a foreign table cannot be unlogged",
            ));
        }
    }
    Ok(())
}

fn require(kind: ObjectKind, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DdlError::invalid(kind.label(), format!("{} is required", field)));
    }
    Ok(())
}

/// Check the mandatory fields of an object about to be created.
pub fn validate_definition(object: &SchemaObject) -> Result<()> {
    let kind = object.kind();
    require(kind, "name", object.name())?;

    match object {
        SchemaObject::PriorityGroup(g) => check_weight(kind, g.weight)?,
        SchemaObject::Table(t) => {
            for col in &t.columns {
                require(ObjectKind::Column, "name", &col.name)?;
                require(ObjectKind::Column, "data type", &col.data_type)?;
            }
            for con in &t.constraints {
                validate_constraint(&con.kind)?;
            }
            validate_foreign(kind, t)?;
        }
        SchemaObject::Partition(p) => {
            for con in &p.table.constraints {
                validate_constraint(&con.kind)?;
            }
            validate_foreign(kind, &p.table)?;
        }
        SchemaObject::Index(i) => {
            require(kind, "table", &i.table.name)?;
            let has_definition = i.persisted && i.definition.found().is_some();
            if i.columns.is_empty() && !has_definition {
                return Err(DdlError::invalid(
                    kind.label(),
                    "at least one column is required",
                ));
            }
        }
        SchemaObject::Column(c) => {
            require(kind, "table", &c.table.name)?;
            require(kind, "data type", &c.column.data_type)?;
        }
        SchemaObject::Constraint(c) => {
            require(kind, "table", &c.table.name)?;
            validate_constraint(&c.constraint.kind)?;
        }
    }

    Ok(())
}

fn validate_constraint(kind: &ConstraintKind) -> Result<()> {
    let columns = match kind {
        ConstraintKind::PrimaryKey { columns } | ConstraintKind::Unique { columns } => columns,
        ConstraintKind::ForeignKey {
            columns,
            ref_columns,
            references,
        } => {
            require(ObjectKind::Constraint, "referenced table", &references.name)?;
            if ref_columns.len() != columns.len() {
                return Err(DdlError::invalid(
                    "constraint",
                    "foreign key column count does not match referenced columns",
                ));
            }
            columns
        }
        ConstraintKind::Check { expression } => return validate_check_expression(expression),
    };

    if columns.is_empty() {
        return Err(DdlError::invalid(
            "constraint",
            "at least one column is required",
        ));
    }
    Ok(())
}
