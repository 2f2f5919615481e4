//! Ordering and exclusion policy.
//!
//! Runs once per record before any translator sees it. A vetoed record
//! produces no statements and is reported as excluded, never as an error.

use serde::Serialize;
use std::fmt;

use crate::config::TranslationConfig;

use super::change::{ChangeAction, ChangeRecord, Operation};
use super::object::{ContainerKind, ObjectKind, SchemaObject, TableRef};
use super::traits::Capabilities;

/// Why a record produced no statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExclusionReason {
    /// The translator declares the operation category meaningless for the
    /// object kind.
    OperationNotSupported {
        kind: ObjectKind,
        operation: Operation,
    },
    /// Column of a partition; partitions take their columns from the parent.
    InheritedFromParent,
    /// The translator recognized none of the changed properties.
    NoRecognizedChanges,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::OperationNotSupported { kind, operation } => {
                write!(f, "{} is not supported for {}", operation, kind)
            }
            ExclusionReason::InheritedFromParent => {
                f.write_str("column is inherited from the parent table")
            }
            ExclusionReason::NoRecognizedChanges => f.write_str("no recognized changes"),
        }
    }
}

/// Decides whether and in which order records are translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExclusionPolicy {
    reorder_container_creates: bool,
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self {
            reorder_container_creates: true,
        }
    }
}

impl ExclusionPolicy {
    pub fn new(reorder_container_creates: bool) -> Self {
        Self {
            reorder_container_creates,
        }
    }

    pub fn from_config(config: &TranslationConfig) -> Self {
        Self::new(config.reorder_container_creates)
    }

    /// Veto check for one record against its translator's capabilities.
    pub fn check(&self, record: &ChangeRecord, capabilities: Capabilities) -> Option<ExclusionReason> {
        let operation = record.operation();
        if !capabilities.allows(operation) {
            return Some(ExclusionReason::OperationNotSupported {
                kind: record.kind(),
                operation,
            });
        }

        // Constraints on a partition are still emitted; only columns are inherited.
        if let SchemaObject::Column(column) = record.object() {
            if column.container == ContainerKind::Partition {
                return Some(ExclusionReason::InheritedFromParent);
            }
        }

        None
    }

    /// Translation order as indices into `records`.
    ///
    /// Caller order is kept, except that a table or partition create moves
    /// ahead of the first nested record (column, constraint, index) that
    /// targets the same table. The create never moves past an earlier
    /// record for the table itself (drop, rename, another create), so a
    /// drop-and-recreate batch keeps its order.
    pub fn order(&self, records: &[&ChangeRecord]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..records.len()).collect();
        if !self.reorder_container_creates {
            return order;
        }

        for (idx, record) in records.iter().enumerate() {
            let Some(created) = created_container(record) else {
                continue;
            };
            let Some(current) = order.iter().position(|&i| i == idx) else {
                continue;
            };
            let earlier = &order[..current];
            let start = earlier
                .iter()
                .rposition(|&i| targets_container(records[i], &created))
                .map_or(0, |pos| pos + 1);
            let first_nested = earlier[start..]
                .iter()
                .position(|&i| records[i].object().owning_table() == Some(&created))
                .map(|pos| pos + start);
            if let Some(pos) = first_nested {
                let moved = order.remove(current);
                order.insert(pos, moved);
            }
        }

        order
    }
}

/// Table created by a top-level create record.
fn created_container(record: &ChangeRecord) -> Option<TableRef> {
    if record.operation() != Operation::Create {
        return None;
    }
    record.object().as_table_ref()
}

/// Whether a table-level record acts on `table`, under its current or
/// previous name.
fn targets_container(record: &ChangeRecord, table: &TableRef) -> bool {
    let object = record.object();
    if object.as_table_ref().as_ref() == Some(table) {
        return true;
    }
    match (record.action(), object.as_table_ref()) {
        (ChangeAction::Rename { old_name, .. }, Some(current)) => {
            current.schema == table.schema && *old_name == table.name
        }
        _ => false,
    }
}
