//! Structured `CREATE TABLE` statement with named clause slots.
//!
//! Table, foreign table, partition and Greenplum translators all fill the
//! same slots, so storage and distribution clauses are set before
//! rendering rather than spliced into finished SQL.

use crate::core::change::OperatorOptions;
use crate::core::identifier::{quote_string, validate_check_expression, validate_sql_fragment};
use crate::core::object::{Column, Constraint, ConstraintKind, ForeignTableOptions};
use crate::core::traits::Dialect;
use crate::error::Result;

/// `CREATE [<storage> ]<object type> <name>[ PARTITION OF <parent>][ (<body>)][ <trailing>...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTableStatement {
    storage: Option<&'static str>,
    object_type: &'static str,
    name: String,
    partition_of: Option<String>,
    elements: Vec<String>,
    trailing: Vec<String>,
}

impl CreateTableStatement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            storage: None,
            object_type: "TABLE",
            name: name.into(),
            partition_of: None,
            elements: Vec::new(),
            trailing: Vec::new(),
        }
    }

    pub fn unlogged(&mut self) -> &mut Self {
        self.storage = Some("UNLOGGED");
        self
    }

    pub fn foreign(&mut self) -> &mut Self {
        self.object_type = "FOREIGN TABLE";
        self
    }

    /// Attach to a parent table. An empty parent is rendered as is.
    pub fn partition_of(&mut self, parent: impl Into<String>) -> &mut Self {
        self.partition_of = Some(parent.into());
        self
    }

    /// Column or constraint definition inside the parentheses.
    pub fn element(&mut self, definition: impl Into<String>) -> &mut Self {
        self.elements.push(definition.into());
        self
    }

    /// Clause after the body (`SERVER`, partition bound, `DISTRIBUTED BY`).
    pub fn trailing(&mut self, clause: impl Into<String>) -> &mut Self {
        self.trailing.push(clause.into());
        self
    }

    pub fn is_foreign(&self) -> bool {
        self.object_type == "FOREIGN TABLE"
    }

    /// Foreign tables have no local storage, so the storage slot is
    /// dropped for them.
    pub fn render(&self) -> String {
        let mut sql = String::from("CREATE ");
        if let Some(storage) = self.storage.filter(|_| !self.is_foreign()) {
            sql.push_str(storage);
            sql.push(' ');
        }
        sql.push_str(self.object_type);
        sql.push(' ');
        sql.push_str(&self.name);

        if let Some(parent) = &self.partition_of {
            sql.push_str(" PARTITION OF ");
            sql.push_str(parent);
        }

        if !self.elements.is_empty() {
            sql.push_str(" (\n\t");
            sql.push_str(&self.elements.join(",\n\t"));
            sql.push_str("\n)");
        } else if self.partition_of.is_none() {
            sql.push_str(" ()");
        }

        for clause in &self.trailing {
            sql.push(' ');
            sql.push_str(clause);
        }
        sql
    }
}

/// Comma-separated list of rendered identifiers.
pub(crate) fn ident_list(dialect: &dyn Dialect, names: &[String]) -> Result<String> {
    let idents = names
        .iter()
        .map(|n| dialect.ddl_ident(n))
        .collect::<Result<Vec<_>>>()?;
    Ok(idents.join(", "))
}

/// `SERVER name[ OPTIONS (key 'value', ...)]`
pub(crate) fn server_clause(dialect: &dyn Dialect, foreign: &ForeignTableOptions) -> Result<String> {
    let mut server = format!("SERVER {}", dialect.ddl_ident(&foreign.server)?);
    if !foreign.options.is_empty() {
        let opts = foreign
            .options
            .iter()
            .map(|(k, v)| Ok(format!("{} {}", dialect.ddl_ident(k)?, quote_string(v))))
            .collect::<Result<Vec<_>>>()?;
        server.push_str(&format!(" OPTIONS ({})", opts.join(", ")));
    }
    Ok(server)
}

/// `name type[ NOT NULL][ DEFAULT expr]`
pub(crate) fn column_definition(dialect: &dyn Dialect, column: &Column) -> Result<String> {
    validate_sql_fragment("column", "data type", &column.data_type)?;
    let mut def = format!("{} {}", dialect.ddl_ident(&column.name)?, column.data_type);
    if !column.nullable {
        def.push_str(" NOT NULL");
    }
    if let Some(default) = &column.default_value {
        validate_sql_fragment("column", "default value", default)?;
        def.push_str(" DEFAULT ");
        def.push_str(default);
    }
    Ok(def)
}

/// `CONSTRAINT name <body>`
pub(crate) fn constraint_definition(
    dialect: &dyn Dialect,
    constraint: &Constraint,
    options: &OperatorOptions,
) -> Result<String> {
    let body = match &constraint.kind {
        ConstraintKind::PrimaryKey { columns } => {
            format!("PRIMARY KEY ({})", ident_list(dialect, columns)?)
        }
        ConstraintKind::Unique { columns } => format!("UNIQUE ({})", ident_list(dialect, columns)?),
        ConstraintKind::Check { expression } => {
            validate_check_expression(expression)?;
            format!("CHECK ({})", expression)
        }
        ConstraintKind::ForeignKey {
            columns,
            references,
            ref_columns,
        } => format!(
            "FOREIGN KEY ({}) REFERENCES {} ({})",
            ident_list(dialect, columns)?,
            dialect.table_name(references, options)?,
            ident_list(dialect, ref_columns)?
        ),
    };
    Ok(format!(
        "CONSTRAINT {} {}",
        dialect.ddl_ident(&constraint.name)?,
        body
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::object::TableRef;
    use crate::drivers::PostgresDialect;

    #[test]
    fn test_render_plain_table() {
        let mut stmt = CreateTableStatement::new("public.orders");
        stmt.element("id int4 NOT NULL").element("CONSTRAINT orders_pk PRIMARY KEY (id)");
        assert_eq!(
            stmt.render(),
            "CREATE TABLE public.orders (\n\tid int4 NOT NULL,\n\tCONSTRAINT orders_pk PRIMARY KEY (id)\n)"
        );
    }

    #[test]
    fn test_render_slots() {
        let mut stmt = CreateTableStatement::new("t");
        stmt.unlogged().trailing("WITH (fillfactor=70)");
        assert!(!stmt.is_foreign());
        assert_eq!(stmt.render(), "CREATE UNLOGGED TABLE t () WITH (fillfactor=70)");
    }

    #[test]
    fn test_render_foreign_drops_storage() {
        let mut stmt = CreateTableStatement::new("t");
        stmt.unlogged().foreign().trailing("SERVER s");
        assert!(stmt.is_foreign());
        assert_eq!(stmt.render(), "CREATE FOREIGN TABLE t () SERVER s");
    }

    #[test]
    fn test_server_clause() {
        let dialect = PostgresDialect::new();
        let foreign = ForeignTableOptions {
            server: "remote".into(),
            options: vec![
                ("schema_name".into(), "sales".into()),
                ("table_name".into(), "o'rders".into()),
            ],
        };
        assert_eq!(
            server_clause(&dialect, &foreign).unwrap(),
            "SERVER remote OPTIONS (schema_name 'sales', table_name 'o''rders')"
        );
    }

    #[test]
    fn test_render_partition_with_empty_parent() {
        let mut stmt = CreateTableStatement::new("p1");
        stmt.partition_of("");
        assert_eq!(stmt.render(), "CREATE TABLE p1 PARTITION OF ");
    }

    #[test]
    fn test_column_definition() {
        let dialect = PostgresDialect::new();
        let column = Column {
            name: "status".into(),
            data_type: "varchar(20)".into(),
            nullable: false,
            default_value: Some("'new'".into()),
            description: String::new(),
        };
        assert_eq!(
            column_definition(&dialect, &column).unwrap(),
            "status varchar(20) NOT NULL DEFAULT 'new'"
        );
    }

    #[test]
    fn test_column_definition_rejects_statement_breakout() {
        let dialect = PostgresDialect::new();
        let mut column = Column {
            name: "status".into(),
            data_type: "text); DROP TABLE users; --".into(),
            nullable: true,
            default_value: None,
            description: String::new(),
        };
        assert!(column_definition(&dialect, &column).is_err());

        column.data_type = "text".into();
        column.default_value = Some("'x' /* hidden */".into());
        let err = column_definition(&dialect, &column).unwrap_err();
        assert!(err.to_string().contains("default value contains comment markers"));
    }

    #[test]
    fn test_constraint_definitions() {
        let dialect = PostgresDialect::new();
        let options = OperatorOptions::default();

        let fk = Constraint {
            name: "orders_customer_fk".into(),
            kind: ConstraintKind::ForeignKey {
                columns: vec!["customer_id".into()],
                references: TableRef::new("public", "customers"),
                ref_columns: vec!["id".into()],
            },
            description: String::new(),
        };
        assert_eq!(
            constraint_definition(&dialect, &fk, &options).unwrap(),
            "CONSTRAINT orders_customer_fk FOREIGN KEY (customer_id) REFERENCES public.customers (id)"
        );

        let check = Constraint {
            name: "amount_positive".into(),
            kind: ConstraintKind::Check {
                expression: "amount > 0; DROP TABLE x".into(),
            },
            description: String::new(),
        };
        assert!(constraint_definition(&dialect, &check, &options).is_err());
    }
}
