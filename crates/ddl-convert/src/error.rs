//! Error types for the conversion library.

use thiserror::Error;

/// Exit code for configuration and argument errors.
pub const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit code for SQL the parser could not read.
pub const EXIT_SYNTAX_ERROR: u8 = 2;
/// Exit code for statements that parsed but could not be converted.
pub const EXIT_CONVERSION_ERROR: u8 = 3;
/// Exit code for file system errors.
pub const EXIT_IO_ERROR: u8 = 7;

/// Main error type for conversion operations.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The parser rejected the DDL text.
    #[error("SQL syntax error ({dialect}): {message}\n  Statement: {sql}")]
    SqlSyntax {
        dialect: String,
        message: String,
        sql: String,
    },

    /// Neither the statement nor the caller supplied a database.
    #[error("No database for table {table} ({dialect}): the statement has no schema qualifier and no default database was given")]
    MissingDatabase { dialect: String, table: String },

    /// A CREATE TABLE statement without any column definition.
    #[error("Table {table} ({dialect}) defines no columns")]
    EmptyTable { dialect: String, table: String },

    /// Two tables resolved to the same target identifier.
    #[error("Duplicate table {identifier} ({dialect}): another table in this batch already maps to it")]
    DuplicateTable { dialect: String, identifier: String },

    /// The source type has no entry in the dialect's mapping table.
    #[error("Unsupported {dialect} type '{type_name}' for column {column}")]
    UnsupportedType {
        dialect: String,
        type_name: String,
        column: String,
    },

    /// No conversion is registered for the source/target pair.
    #[error("Unsupported conversion: {source_tag} → {target_tag}")]
    UnsupportedConversion {
        source_tag: String,
        target_tag: String,
    },

    /// A required input was missing or malformed.
    #[error("Invalid argument{}: {message}", dialect_note(.dialect))]
    InvalidArgument { dialect: String, message: String },

    /// Configuration error (invalid YAML, unknown tags, etc.)
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

impl ConvertError {
    /// Create a SqlSyntax error for a statement.
    pub fn syntax(
        dialect: impl Into<String>,
        message: impl Into<String>,
        sql: impl Into<String>,
    ) -> Self {
        ConvertError::SqlSyntax {
            dialect: dialect.into(),
            message: message.into(),
            sql: sql.into(),
        }
    }

    /// Create a MissingDatabase error.
    pub fn missing_database(dialect: impl Into<String>, table: impl Into<String>) -> Self {
        ConvertError::MissingDatabase {
            dialect: dialect.into(),
            table: table.into(),
        }
    }

    /// Create an EmptyTable error.
    pub fn empty_table(dialect: impl Into<String>, table: impl Into<String>) -> Self {
        ConvertError::EmptyTable {
            dialect: dialect.into(),
            table: table.into(),
        }
    }

    /// Create a DuplicateTable error.
    pub fn duplicate_table(dialect: impl Into<String>, identifier: impl Into<String>) -> Self {
        ConvertError::DuplicateTable {
            dialect: dialect.into(),
            identifier: identifier.into(),
        }
    }

    /// Create an InvalidArgument error. Checks below the converter pass an
    /// empty dialect and leave it to [`in_dialect`](Self::in_dialect).
    pub fn invalid_argument(dialect: impl Into<String>, message: impl Into<String>) -> Self {
        ConvertError::InvalidArgument {
            dialect: dialect.into(),
            message: message.into(),
        }
    }

    /// Create an UnsupportedType error.
    pub fn unsupported_type(
        dialect: impl Into<String>,
        type_name: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        ConvertError::UnsupportedType {
            dialect: dialect.into(),
            type_name: type_name.into(),
            column: column.into(),
        }
    }

    /// Create an UnsupportedConversion error.
    pub fn unsupported_conversion(
        source_tag: impl Into<String>,
        target_tag: impl Into<String>,
    ) -> Self {
        ConvertError::UnsupportedConversion {
            source_tag: source_tag.into(),
            target_tag: target_tag.into(),
        }
    }

    /// Attach the column name to an UnsupportedType raised by a type mapper,
    /// which only knows the type.
    pub fn with_column(self, column: &str) -> Self {
        match self {
            ConvertError::UnsupportedType {
                dialect, type_name, ..
            } => ConvertError::UnsupportedType {
                dialect,
                type_name,
                column: column.to_string(),
            },
            other => other,
        }
    }

    /// Fill in the source dialect on errors raised without one.
    pub fn in_dialect(self, source: &str) -> Self {
        match self {
            ConvertError::InvalidArgument { dialect, message } if dialect.is_empty() => {
                ConvertError::InvalidArgument {
                    dialect: source.to_string(),
                    message,
                }
            }
            ConvertError::DuplicateTable {
                dialect,
                identifier,
            } if dialect.is_empty() => ConvertError::DuplicateTable {
                dialect: source.to_string(),
                identifier,
            },
            other => other,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ConvertError::Config(_)
            | ConvertError::InvalidArgument { .. }
            | ConvertError::Yaml(_)
            | ConvertError::Json(_) => EXIT_CONFIG_ERROR,
            ConvertError::SqlSyntax { .. } => EXIT_SYNTAX_ERROR,
            ConvertError::MissingDatabase { .. }
            | ConvertError::EmptyTable { .. }
            | ConvertError::DuplicateTable { .. }
            | ConvertError::UnsupportedType { .. }
            | ConvertError::UnsupportedConversion { .. } => EXIT_CONVERSION_ERROR,
            ConvertError::Io(_) => EXIT_IO_ERROR,
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

fn dialect_note(dialect: &str) -> String {
    if dialect.is_empty() {
        String::new()
    } else {
        format!(" ({})", dialect)
    }
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
