//! Batch-wide comment index.
//!
//! Comments live in statements of their own (`COMMENT ON COLUMN ...`), often
//! after the table they describe, so the whole batch is scanned before any
//! table is extracted.

use std::collections::HashMap;

use crate::parser::{ObjectName, Statement};

/// `(database, table, column)` with quoting removed. A comment written
/// without a schema qualifier has no database.
type ColumnKey = (Option<String>, String, String);

/// `(database, table)`.
type TableKey = (Option<String>, String);

/// Column and table comments of one batch.
#[derive(Debug, Clone, Default)]
pub struct CommentIndex {
    columns: HashMap<ColumnKey, String>,
    tables: HashMap<TableKey, String>,
}

impl CommentIndex {
    /// Collect every `COMMENT ON COLUMN` / `COMMENT ON TABLE` of a batch.
    /// Other statements are ignored. A repeated target keeps the last text.
    pub fn build(statements: &[Statement]) -> Self {
        let mut index = Self::default();
        for statement in statements {
            match statement {
                Statement::ColumnComment(comment) => {
                    if let Some(key) = column_key(&comment.target) {
                        index.columns.insert(key, comment.text.clone());
                    }
                }
                Statement::TableComment(comment) => {
                    if let Some(key) = table_key(&comment.target) {
                        index.tables.insert(key, comment.text.clone());
                    }
                }
                _ => {}
            }
        }
        index
    }

    /// Comment for `database.table.column`, falling back to a comment
    /// written as `table.column`.
    pub fn column(&self, database: &str, table: &str, column: &str) -> Option<&str> {
        let key = (Some(database.to_string()), table.to_string(), column.to_string());
        self.columns
            .get(&key)
            .or_else(|| {
                self.columns
                    .get(&(None, table.to_string(), column.to_string()))
            })
            .map(String::as_str)
    }

    /// Comment for `database.table`, falling back to one written as `table`.
    pub fn table(&self, database: &str, table: &str) -> Option<&str> {
        self.tables
            .get(&(Some(database.to_string()), table.to_string()))
            .or_else(|| self.tables.get(&(None, table.to_string())))
            .map(String::as_str)
    }

    /// Number of column comments.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.tables.is_empty()
    }
}

fn column_key(target: &ObjectName) -> Option<ColumnKey> {
    let column = target.last()?.value.clone();
    let table = target.from_end(1)?.value.clone();
    let database = target.from_end(2).map(|d| d.value.clone());
    Some((database, table, column))
}

fn table_key(target: &ObjectName) -> Option<TableKey> {
    let table = target.last()?.value.clone();
    let database = target.from_end(1).map(|d| d.value.clone());
    Some((database, table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::OracleRules;
    use crate::parser::parse_statements;

    fn index(sql: &str) -> CommentIndex {
        CommentIndex::build(&parse_statements(sql, &OracleRules::new()).unwrap())
    }

    #[test]
    fn test_qualified_column_comments() {
        let index = index(
            "COMMENT ON COLUMN \"API_OPER\".\"T\".\"ID\" IS '主键'; \
             COMMENT ON COLUMN \"API_OPER\".\"T\".\"AID\" IS 'appList主键'",
        );
        assert_eq!(index.column_count(), 2);
        assert_eq!(index.column("API_OPER", "T", "ID"), Some("主键"));
        assert_eq!(index.column("API_OPER", "T", "AID"), Some("appList主键"));
        assert_eq!(index.column("API_OPER", "T", "INFO"), None);
    }

    #[test]
    fn test_same_table_name_in_two_databases_does_not_collide() {
        let index = index(
            "COMMENT ON COLUMN A.T.ID IS 'from a'; \
             COMMENT ON COLUMN B.T.ID IS 'from b'",
        );
        assert_eq!(index.column("A", "T", "ID"), Some("from a"));
        assert_eq!(index.column("B", "T", "ID"), Some("from b"));
        assert_eq!(index.column("C", "T", "ID"), None);
    }

    #[test]
    fn test_unqualified_comment_is_a_fallback() {
        let index = index(
            "COMMENT ON COLUMN T.ID IS 'any'; \
             COMMENT ON COLUMN S.T.ID IS 'exact'",
        );
        assert_eq!(index.column("S", "T", "ID"), Some("exact"));
        assert_eq!(index.column("OTHER", "T", "ID"), Some("any"));
    }

    #[test]
    fn test_last_comment_wins() {
        let index = index(
            "COMMENT ON COLUMN S.T.ID IS 'first'; \
             COMMENT ON COLUMN S.T.ID IS 'second'",
        );
        assert_eq!(index.column("S", "T", "ID"), Some("second"));
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let index = index("COMMENT ON COLUMN \"s\".\"t\".\"id\" IS 'lower'");
        assert_eq!(index.column("s", "t", "id"), Some("lower"));
        assert_eq!(index.column("S", "T", "ID"), None);
    }

    #[test]
    fn test_table_comments() {
        let index = index(
            "COMMENT ON TABLE S.T IS 'Test Table'; \
             COMMENT ON TABLE U IS 'Fallback'; \
             CREATE TABLE S.T (ID INT)",
        );
        assert_eq!(index.table("S", "T"), Some("Test Table"));
        assert_eq!(index.table("X", "U"), Some("Fallback"));
        assert_eq!(index.table("S", "V"), None);
        assert_eq!(index.column_count(), 0);
        assert!(!index.is_empty());
    }
}
