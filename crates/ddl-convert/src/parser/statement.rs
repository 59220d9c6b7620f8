//! Parsed statement types.

use std::fmt;

use serde::Serialize;

use crate::core::schema::RawColumnType;

/// An identifier with its quoting removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ident {
    /// Bare identifier text.
    pub value: String,
    /// Whether the source quoted it.
    pub quoted: bool,
}

impl Ident {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quoted: false,
        }
    }

    pub fn quoted(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quoted: true,
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// A possibly qualified object name (`schema.table`, `schema.table.column`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectName(pub Vec<Ident>);

impl ObjectName {
    /// The last part.
    pub fn last(&self) -> Option<&Ident> {
        self.0.last()
    }

    /// The part `n` places before the last one.
    pub fn from_end(&self, n: usize) -> Option<&Ident> {
        self.0.len().checked_sub(n + 1).and_then(|i| self.0.get(i))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.0.iter().map(|p| p.value.as_str()).collect();
        f.write_str(&parts.join("."))
    }
}

/// One token of a column definition after its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SpecToken {
    /// Keyword or identifier.
    Word(Ident),
    /// Numeric literal.
    Number(String),
    /// String literal, unquoted.
    Literal(String),
    /// Any other token, as written.
    Symbol(String),
}

impl SpecToken {
    /// Whether this is the unquoted keyword `keyword` (case-insensitive).
    pub fn is_keyword(&self, keyword: &str) -> bool {
        match self {
            SpecToken::Word(ident) => !ident.quoted && ident.value.eq_ignore_ascii_case(keyword),
            _ => false,
        }
    }

    /// Whether this is the symbol `symbol`.
    pub fn is_symbol(&self, symbol: &str) -> bool {
        matches!(self, SpecToken::Symbol(s) if s == symbol)
    }
}

impl fmt::Display for SpecToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecToken::Word(ident) if ident.quoted => write!(f, "\"{}\"", ident.value),
            SpecToken::Word(ident) => f.write_str(&ident.value),
            SpecToken::Number(n) => f.write_str(n),
            SpecToken::Literal(s) => write!(f, "'{}'", s.replace('\'', "''")),
            SpecToken::Symbol(s) => f.write_str(s),
        }
    }
}

/// A column definition inside `CREATE TABLE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
    /// Column name.
    pub name: Ident,
    /// Type name and arguments as written.
    pub data_type: RawColumnType,
    /// Everything after the type (nullability, defaults, inline comment).
    pub specs: Vec<SpecToken>,
}

/// A `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateTable {
    /// Table name, optionally schema-qualified.
    pub name: ObjectName,
    /// Column definitions in source order. Table constraints are omitted.
    pub columns: Vec<ColumnDef>,
    /// `COMMENT [=] '...'` table option, if present.
    pub comment: Option<String>,
    /// Statement text, for diagnostics.
    pub sql: String,
}

/// A `COMMENT ON COLUMN` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnComment {
    /// `[schema.]table.column`.
    pub target: ObjectName,
    /// Comment text, unquoted.
    pub text: String,
}

/// A `COMMENT ON TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableComment {
    /// `[schema.]table`.
    pub target: ObjectName,
    /// Comment text, unquoted.
    pub text: String,
}

/// A statement of a DDL batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Statement {
    CreateTable(CreateTable),
    ColumnComment(ColumnComment),
    TableComment(TableComment),
    /// Anything else (indexes, grants, views).
    Other,
}

impl Statement {
    pub fn as_create_table(&self) -> Option<&CreateTable> {
        match self {
            Statement::CreateTable(create) => Some(create),
            _ => None,
        }
    }
}
