//! Configuration type definitions.

use serde::{Deserialize, Serialize};

use crate::core::change::OperatorOptions;

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Target database family (exasol, postgres, greenplum, mysql).
    #[serde(default = "default_dialect")]
    pub dialect: String,

    /// Options applied to every record that does not override them.
    #[serde(default)]
    pub options: OperatorOptions,

    /// Translation behavior.
    #[serde(default)]
    pub translation: TranslationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dialect: default_dialect(),
            options: OperatorOptions::default(),
            translation: TranslationConfig::default(),
        }
    }
}

/// Settings that change how records are translated and ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Fail a partition record whose parent cannot be resolved instead of
    /// emitting `PARTITION OF` with an empty parent reference.
    #[serde(default)]
    pub strict_parent_resolution: bool,

    /// Move a table or partition create ahead of the first nested record
    /// that targets it.
    #[serde(default = "default_true")]
    pub reorder_container_creates: bool,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            strict_parent_resolution: false,
            reorder_container_creates: true,
        }
    }
}

fn default_dialect() -> String {
    "postgres".to_string()
}

fn default_true() -> bool {
    true
}
