//! Labeled DDL statements and the ordered sink that collects them.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Kind of persist action a statement performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    Create,
    Alter,
    Drop,
    Comment,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatementKind::Create => "create",
            StatementKind::Alter => "alter",
            StatementKind::Drop => "drop",
            StatementKind::Comment => "comment",
        })
    }
}

/// One executable statement.
///
/// The label is for progress reporting and logs; it carries no semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DdlStatement {
    pub label: String,
    pub kind: StatementKind,
    pub sql: String,
}

impl DdlStatement {
    pub fn new(label: impl Into<String>, kind: StatementKind, sql: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind,
            sql: sql.into(),
        }
    }

    pub fn create(label: impl Into<String>, sql: impl Into<String>) -> Self {
        Self::new(label, StatementKind::Create, sql)
    }

    pub fn alter(label: impl Into<String>, sql: impl Into<String>) -> Self {
        Self::new(label, StatementKind::Alter, sql)
    }

    pub fn drop(label: impl Into<String>, sql: impl Into<String>) -> Self {
        Self::new(label, StatementKind::Drop, sql)
    }

    pub fn comment(label: impl Into<String>, sql: impl Into<String>) -> Self {
        Self::new(label, StatementKind::Comment, sql)
    }
}

/// Soft failure recorded while translating a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationWarning {
    /// Display name of the object being translated.
    pub object: String,
    pub message: String,
}

/// Ordered sequence of statements handed to the executor.
///
/// Statements keep emission order; the executor is expected to run them in
/// this order and stop at the first failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementSink {
    statements: Vec<DdlStatement>,
}

impl StatementSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: DdlStatement) {
        self.statements.push(statement);
    }

    pub fn extend(&mut self, statements: impl IntoIterator<Item = DdlStatement>) {
        self.statements.extend(statements);
    }

    pub fn statements(&self) -> &[DdlStatement] {
        &self.statements
    }

    pub fn into_statements(self) -> Vec<DdlStatement> {
        self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// SQL text of every statement, in order.
    pub fn sql(&self) -> Vec<&str> {
        self.statements.iter().map(|s| s.sql.as_str()).collect()
    }

    /// SHA-256 over statement kinds and text; labels are ignored.
    pub fn checksum(&self) -> String {
        let mut hasher = Sha256::new();
        for stmt in &self.statements {
            hasher.update(stmt.kind.to_string().as_bytes());
            hasher.update([0u8]);
            hasher.update(stmt.sql.as_bytes());
            hasher.update([0u8]);
        }
        format!("{:x}", hasher.finalize())
    }

    /// Render as an executable script with one `-- label` line per statement.
    pub fn to_script(&self) -> String {
        let mut script = String::new();
        for stmt in &self.statements {
            script.push_str("-- ");
            script.push_str(&stmt.label);
            script.push('\n');
            script.push_str(&stmt.sql);
            script.push_str(";\n");
        }
        script
    }
}

impl<'a> IntoIterator for &'a StatementSink {
    type Item = &'a DdlStatement;
    type IntoIter = std::slice::Iter<'a, DdlStatement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}
