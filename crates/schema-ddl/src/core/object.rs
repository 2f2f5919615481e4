//! Schema objects the pipeline reads while translating change records.
//!
//! These types are a read-only view of objects owned by the caller's object
//! model. Translators never fetch anything: every relationship they need
//! (a partition's parent tables, an index column's operator class, a
//! persisted index's definition) must already be loaded here, and the
//! [`Lookup`] wrapper records whether it was.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of schema object a change record targets.
///
/// Together with the dialect this keys the translator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    PriorityGroup,
    Table,
    Partition,
    Index,
    Column,
    Constraint,
}

impl ObjectKind {
    /// Keyword used in `CREATE`/`DROP`/`COMMENT ON` clauses.
    pub fn sql_keyword(&self) -> &'static str {
        match self {
            ObjectKind::PriorityGroup => "PRIORITY GROUP",
            ObjectKind::Table | ObjectKind::Partition => "TABLE",
            ObjectKind::Index => "INDEX",
            ObjectKind::Column => "COLUMN",
            ObjectKind::Constraint => "CONSTRAINT",
        }
    }

    /// Lower-case name used in labels and messages.
    pub fn label(&self) -> &'static str {
        match self {
            ObjectKind::PriorityGroup => "priority group",
            ObjectKind::Table => "table",
            ObjectKind::Partition => "partition",
            ObjectKind::Index => "index",
            ObjectKind::Column => "column",
            ObjectKind::Constraint => "constraint",
        }
    }

    /// Attribute-level objects live inside a table.
    pub fn is_nested(&self) -> bool {
        matches!(
            self,
            ObjectKind::Column | ObjectKind::Constraint | ObjectKind::Index
        )
    }

    /// Every kind, in declaration order.
    pub fn all() -> [ObjectKind; 6] {
        [
            ObjectKind::PriorityGroup,
            ObjectKind::Table,
            ObjectKind::Partition,
            ObjectKind::Index,
            ObjectKind::Column,
            ObjectKind::Constraint,
        ]
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of reading optional metadata from already-loaded object state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lookup<T> {
    /// Nothing to read.
    #[default]
    Missing,
    /// Metadata was loaded.
    Found(T),
    /// Loading failed; the message says why.
    Failed(String),
}

impl<T> Lookup<T> {
    pub fn found(&self) -> Option<&T> {
        match self {
            Lookup::Found(v) => Some(v),
            _ => None,
        }
    }
}

/// Reference to a table by schema and name. An empty schema means the
/// name is used unqualified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableRef {
    #[serde(default)]
    pub schema: String,
    pub name: String,
}

impl TableRef {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.schema.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}.{}", self.schema, self.name)
        }
    }
}

/// Exasol priority group (resource group with a scheduling weight).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityGroup {
    pub name: String,
    pub weight: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub persisted: bool,
}

/// Column metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,

    /// Type as written in DDL (e.g., "int4", "varchar(100)").
    pub data_type: String,

    #[serde(default = "default_true")]
    pub nullable: bool,

    #[serde(default)]
    pub default_value: Option<String>,

    #[serde(default)]
    pub description: String,
}

fn default_true() -> bool {
    true
}

/// Table constraint metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    pub name: String,

    #[serde(flatten)]
    pub kind: ConstraintKind,

    #[serde(default)]
    pub description: String,
}

/// Constraint body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConstraintKind {
    PrimaryKey {
        columns: Vec<String>,
    },
    Unique {
        columns: Vec<String>,
    },
    Check {
        expression: String,
    },
    ForeignKey {
        columns: Vec<String>,
        references: TableRef,
        ref_columns: Vec<String>,
    },
}

/// Foreign-table options (`SERVER ... OPTIONS (...)`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignTableOptions {
    pub server: String,
    #[serde(default)]
    pub options: Vec<(String, String)>,
}

/// Greenplum distribution policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distribution {
    Columns(Vec<String>),
    Randomly,
    Replicated,
}

/// Table metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub schema: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    /// Storage flag: create without write-ahead logging.
    #[serde(default)]
    pub unlogged: bool,
    #[serde(default)]
    pub foreign: Option<ForeignTableOptions>,
    #[serde(default)]
    pub distribution: Option<Distribution>,
    #[serde(default)]
    pub persisted: bool,
}

impl Table {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            description: String::new(),
            columns: Vec::new(),
            constraints: Vec::new(),
            unlogged: false,
            foreign: None,
            distribution: None,
            persisted: false,
        }
    }

    pub fn table_ref(&self) -> TableRef {
        TableRef::new(&self.schema, &self.name)
    }

    pub fn is_foreign(&self) -> bool {
        self.foreign.is_some()
    }
}

/// Table partition attached to a parent table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub table: Table,

    /// Ancestor tables as loaded by the object model; `None` when the
    /// ancestry has not been read yet.
    #[serde(default)]
    pub parents: Option<Vec<TableRef>>,

    /// Partition bound, e.g. `FOR VALUES FROM (1) TO (100)` or `DEFAULT`.
    #[serde(default)]
    pub bound: Option<String>,
}

impl Partition {
    /// Single-ancestor lookup over already-loaded state.
    ///
    /// Returns a description of what was found when there is not exactly
    /// one parent.
    pub fn single_parent(&self) -> std::result::Result<&TableRef, String> {
        match self.parents.as_deref() {
            None => Err("parent tables are not loaded".to_string()),
            Some([parent]) => Ok(parent),
            Some([]) => Err("no parent tables".to_string()),
            Some(many) => Err(format!(
                "{} parent tables: {}",
                many.len(),
                many.iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

/// Index access method.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexType {
    #[default]
    Default,
    Btree,
    Hash,
    Gist,
    Gin,
    Brin,
    Fulltext,
    Spatial,
    Other(String),
}

impl IndexType {
    /// Method name as written after `USING`, if any.
    pub fn method(&self) -> Option<&str> {
        match self {
            IndexType::Default => None,
            IndexType::Btree => Some("BTREE"),
            IndexType::Hash => Some("HASH"),
            IndexType::Gist => Some("GIST"),
            IndexType::Gin => Some("GIN"),
            IndexType::Brin => Some("BRIN"),
            IndexType::Fulltext => Some("FULLTEXT"),
            IndexType::Spatial => Some("SPATIAL"),
            IndexType::Other(name) => Some(name.as_str()),
        }
    }
}

/// One key part of an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexColumn {
    pub name: String,
    #[serde(default = "default_true")]
    pub ascending: bool,
    #[serde(default)]
    pub operator_class: Lookup<String>,
    /// MySQL prefix length.
    #[serde(default)]
    pub sub_part: Option<String>,
}

impl IndexColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ascending: true,
            operator_class: Lookup::Missing,
            sub_part: None,
        }
    }
}

/// Index metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    pub table: TableRef,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<IndexColumn>,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub index_type: IndexType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub persisted: bool,
    /// Definition text read back from the database for persisted indexes.
    #[serde(default)]
    pub definition: Lookup<String>,
}

/// Kind of table that owns an attribute-level object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    #[default]
    Table,
    Partition,
    ForeignTable,
}

/// Column together with its owning table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumn {
    pub table: TableRef,
    #[serde(default)]
    pub container: ContainerKind,
    pub column: Column,
}

/// Constraint together with its owning table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConstraint {
    pub table: TableRef,
    #[serde(default)]
    pub container: ContainerKind,
    pub constraint: Constraint,
}

/// Any object a change record can target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaObject {
    PriorityGroup(PriorityGroup),
    Table(Table),
    Partition(Partition),
    Index(Index),
    Column(TableColumn),
    Constraint(TableConstraint),
}

impl SchemaObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            SchemaObject::PriorityGroup(_) => ObjectKind::PriorityGroup,
            SchemaObject::Table(_) => ObjectKind::Table,
            SchemaObject::Partition(_) => ObjectKind::Partition,
            SchemaObject::Index(_) => ObjectKind::Index,
            SchemaObject::Column(_) => ObjectKind::Column,
            SchemaObject::Constraint(_) => ObjectKind::Constraint,
        }
    }

    /// Current (live) name of the object.
    pub fn name(&self) -> &str {
        match self {
            SchemaObject::PriorityGroup(g) => &g.name,
            SchemaObject::Table(t) => &t.name,
            SchemaObject::Partition(p) => &p.table.name,
            SchemaObject::Index(i) => &i.name,
            SchemaObject::Column(c) => &c.column.name,
            SchemaObject::Constraint(c) => &c.constraint.name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            SchemaObject::PriorityGroup(g) => &g.description,
            SchemaObject::Table(t) => &t.description,
            SchemaObject::Partition(p) => &p.table.description,
            SchemaObject::Index(i) => &i.description,
            SchemaObject::Column(c) => &c.column.description,
            SchemaObject::Constraint(c) => &c.constraint.description,
        }
    }

    /// Table that owns an attribute-level object.
    pub fn owning_table(&self) -> Option<&TableRef> {
        match self {
            SchemaObject::Index(i) => Some(&i.table),
            SchemaObject::Column(c) => Some(&c.table),
            SchemaObject::Constraint(c) => Some(&c.table),
            _ => None,
        }
    }

    /// Reference under which other records may point at this object.
    pub fn as_table_ref(&self) -> Option<TableRef> {
        match self {
            SchemaObject::Table(t) => Some(t.table_ref()),
            SchemaObject::Partition(p) => Some(p.table.table_ref()),
            _ => None,
        }
    }

    /// Human-readable path used in logs and warnings.
    pub fn display_name(&self) -> String {
        match self {
            SchemaObject::PriorityGroup(g) => g.name.clone(),
            SchemaObject::Table(t) => t.table_ref().to_string(),
            SchemaObject::Partition(p) => p.table.table_ref().to_string(),
            SchemaObject::Index(i) => qualify_display(&i.table.schema, &i.name),
            SchemaObject::Column(c) => format!("{}.{}", c.table, c.column.name),
            SchemaObject::Constraint(c) => format!("{}.{}", c.table, c.constraint.name),
        }
    }
}

fn qualify_display(schema: &str, name: &str) -> String {
    if schema.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", schema, name)
    }
}
