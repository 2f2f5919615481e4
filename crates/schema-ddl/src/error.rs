//! Error types for the DDL pipeline.

use thiserror::Error;

/// Main error type for change-record construction and translation.
///
/// Hard failures (`InvalidObjectDefinition`, `NoTranslator`, ...) stop the
/// translation of one record. Soft failures (`AmbiguousOrMissingParent`,
/// `UnresolvedMetadata`) are normally recorded as warnings and only surface
/// as errors when strict resolution is configured.
#[derive(Error, Debug)]
pub enum DdlError {
    /// A record or object lacks a mandatory field.
    #[error("Invalid {kind} definition: {message}")]
    InvalidObjectDefinition { kind: String, message: String },

    /// A partition reported zero or several parent tables.
    #[error("Cannot resolve parent of partition {partition}: {found}")]
    AmbiguousOrMissingParent { partition: String, found: String },

    /// Optional decorative metadata could not be read.
    #[error("Unresolved metadata for {object}: {message}")]
    UnresolvedMetadata { object: String, message: String },

    /// No translator registered for the (object kind, dialect) pair.
    #[error("No translator registered for {kind} on {dialect}")]
    NoTranslator { kind: String, dialect: String },

    /// A translator received an object of another kind.
    #[error("Translator expected {expected} object, got {found}")]
    ObjectKindMismatch { expected: String, found: String },

    /// Configuration error (invalid YAML, unknown dialect, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DdlError {
    /// Create an InvalidObjectDefinition error.
    pub fn invalid(kind: impl Into<String>, message: impl Into<String>) -> Self {
        DdlError::InvalidObjectDefinition {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create an AmbiguousOrMissingParent error.
    pub fn parent(partition: impl Into<String>, found: impl Into<String>) -> Self {
        DdlError::AmbiguousOrMissingParent {
            partition: partition.into(),
            found: found.into(),
        }
    }

    /// Create an UnresolvedMetadata error.
    pub fn metadata(object: impl Into<String>, message: impl Into<String>) -> Self {
        DdlError::UnresolvedMetadata {
            object: object.into(),
            message: message.into(),
        }
    }

    /// Whether the pipeline may degrade instead of failing the record.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DdlError::AmbiguousOrMissingParent { .. } | DdlError::UnresolvedMetadata { .. }
        )
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> u8 {
        match self {
            DdlError::Config(_) | DdlError::Yaml(_) | DdlError::Json(_) => 2,
            DdlError::Io(_) => 3,
            _ => 1,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, DdlError>;
