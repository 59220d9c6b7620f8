//! Table, column and result types shared by every conversion stage.
//!
//! These types provide a dialect-neutral representation of the facts pulled
//! out of a source `CREATE TABLE`, and of what the generator hands back.

use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

/// Column type exactly as it appeared in the source statement.
///
/// Arguments are kept verbatim (`"32 CHAR"`, `"*"`, `"15"`); interpreting
/// them is the job of [`crate::dialect::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawColumnType {
    /// Type name, possibly several words (`"TIMESTAMP WITH TIME ZONE"`).
    pub type_name: String,

    /// Comma separated arguments of the first parenthesized group.
    pub arguments: Vec<String>,
}

impl RawColumnType {
    pub fn new(type_name: impl Into<String>, arguments: Vec<String>) -> Self {
        Self {
            type_name: type_name.into(),
            arguments,
        }
    }
}

/// The semantic reading of a [`RawColumnType`].
///
/// `precision` and `scale` are `None` when the source omitted them or the
/// argument was not a plain number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFieldFormat {
    /// Type name as written in the source.
    pub type_name: String,

    /// Leading numeric qualifier (length, precision, fractional digits).
    pub precision: Option<u32>,

    /// Second numeric qualifier.
    pub scale: Option<u32>,
}

impl ResolvedFieldFormat {
    pub fn new(type_name: impl Into<String>, precision: Option<u32>, scale: Option<u32>) -> Self {
        Self {
            type_name: type_name.into(),
            precision,
            scale,
        }
    }

    /// Canonical spelling of the type name: upper case, single spaces.
    ///
    /// Mapping tables are keyed on this form. Applying it twice is a no-op.
    pub fn normalized(&self) -> Self {
        let type_name = self
            .type_name
            .split_whitespace()
            .map(|word| word.to_uppercase())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            type_name,
            precision: self.precision,
            scale: self.scale,
        }
    }
}

/// A column after type mapping and fragment cleanup, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Unquoted column name.
    pub name: String,

    /// Target engine type token (`DECIMAL(15, 5)`, `STRING`).
    pub engine_type: String,

    /// Surviving column specification (`NOT NULL`).
    pub column_spec: Option<String>,

    /// Column comment text, unquoted.
    pub comment: Option<String>,
}

/// A table ready for DDL generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    /// Target catalog.
    pub catalog: String,

    /// Target database.
    pub database: String,

    /// Target table name.
    pub table_name: String,

    /// Columns in source order. Never empty.
    pub columns: Vec<ColumnDescriptor>,

    /// Table comment text, unquoted.
    pub table_comment: Option<String>,
}

impl TableDescriptor {
    /// Get the dotted `catalog.database.table` name (unquoted).
    pub fn full_name(&self) -> String {
        format!("{}.{}.{}", self.catalog, self.database, self.table_name)
    }
}

/// A table supplied structurally in schema mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Catalog; falls back to the request catalog when absent.
    #[serde(default)]
    pub catalog: Option<String>,

    /// Database; falls back to the request database when absent.
    #[serde(default)]
    pub database: Option<String>,

    /// Table name.
    pub table_name: String,

    /// Table comment.
    #[serde(default)]
    pub table_comment: Option<String>,

    /// Field definitions in order.
    pub fields: Vec<TableField>,
}

/// One field of a [`TableSchema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableField {
    /// Field name.
    pub name: String,

    /// Source type name (`VARCHAR2`, `NUMBER`).
    #[serde(rename = "type")]
    pub type_name: String,

    /// Precision or length.
    #[serde(default)]
    pub precision: Option<u32>,

    /// Scale.
    #[serde(default)]
    pub scale: Option<u32>,

    /// Field comment.
    #[serde(default)]
    pub comment: Option<String>,

    /// Whether the field is declared NOT NULL.
    #[serde(default)]
    pub not_null: bool,
}

impl TableField {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            precision: None,
            scale: None,
            comment: None,
            not_null: false,
        }
    }

    pub fn with_precision(mut self, precision: u32, scale: Option<u32>) -> Self {
        self.precision = Some(precision);
        self.scale = scale;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// The field's type as a resolved format.
    pub fn format(&self) -> ResolvedFieldFormat {
        ResolvedFieldFormat::new(self.type_name.clone(), self.precision, self.scale)
    }
}

/// The DDL generated for one source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Target catalog (unquoted).
    pub catalog: String,

    /// Target database (unquoted).
    pub database: String,

    /// Target table name (unquoted).
    pub table_name: String,

    /// Generated DDL for the table.
    pub ddl_text: String,

    /// `CREATE DATABASE IF NOT EXISTS` statement for the table's database.
    pub database_ddl: String,
}

impl ConversionResult {
    /// Get the dotted `catalog.database.table` name (unquoted).
    pub fn full_name(&self) -> String {
        format!("{}.{}.{}", self.catalog, self.database, self.table_name)
    }
}

/// A statement that failed while the batch carried on.
#[derive(Debug)]
pub struct StatementError {
    /// Zero-based position of the table within the batch.
    pub index: usize,

    /// Table name as written in the source, when known.
    pub table: Option<String>,

    /// The failure.
    pub error: ConvertError,
}

/// Everything produced by one conversion call.
#[derive(Debug, Default)]
pub struct ConversionOutput {
    /// One result per converted table, in source order.
    pub results: Vec<ConversionResult>,

    /// Per-statement failures (only populated in skip mode).
    pub errors: Vec<StatementError>,
}

impl ConversionOutput {
    /// Whether every statement converted.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Render the whole batch as one script.
    ///
    /// With `create_database`, one `CREATE DATABASE IF NOT EXISTS` is emitted
    /// per distinct database, in first-seen order, before the tables.
    pub fn script(&self, create_database: bool) -> String {
        let mut parts: Vec<&str> = Vec::new();

        if create_database {
            let databases: indexmap::IndexSet<&str> = self
                .results
                .iter()
                .map(|r| r.database_ddl.as_str())
                .collect();
            parts.extend(databases);
        }

        parts.extend(self.results.iter().map(|r| r.ddl_text.as_str()));
        parts.join("\n")
    }
}
