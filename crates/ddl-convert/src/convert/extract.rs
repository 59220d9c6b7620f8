//! Source fact extraction.
//!
//! Turns one parsed `CREATE TABLE` into a [`SourceTable`]: resolved database,
//! bare identifiers, raw column types, the column specifier tokens and the
//! comments attached anywhere in the batch.

use serde::Serialize;

use super::comments::CommentIndex;
use crate::core::schema::RawColumnType;
use crate::error::{ConvertError, Result};
use crate::parser::{CreateTable, SpecToken};

/// A source table before type mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceTable {
    /// Database from the schema qualifier, else the caller default.
    pub database: String,
    pub table_name: String,
    pub columns: Vec<SourceColumn>,
    pub table_comment: Option<String>,
}

/// A source column before type mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceColumn {
    pub name: String,
    pub raw_type: RawColumnType,
    /// Specifier tokens as written, passed through to the normalizer.
    pub specs: Vec<SpecToken>,
    pub comment: Option<String>,
}

/// Extract one table.
///
/// # Errors
///
/// - `MissingDatabase` when the name has no schema qualifier and no
///   non-blank `default_database` is given
/// - `EmptyTable` when the statement defines no columns
pub fn extract_table(
    create: &CreateTable,
    comments: &CommentIndex,
    default_database: Option<&str>,
    dialect: &str,
) -> Result<SourceTable> {
    let table_name = create
        .name
        .last()
        .map(|ident| ident.value.clone())
        .ok_or_else(|| ConvertError::syntax(dialect, "CREATE TABLE without a table name", &create.sql))?;

    let database = match create.name.from_end(1) {
        Some(schema) => schema.value.clone(),
        None => default_database
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ConvertError::missing_database(dialect, &table_name))?,
    };

    if create.columns.is_empty() {
        return Err(ConvertError::empty_table(
            dialect,
            format!("{}.{}", database, table_name),
        ));
    }

    let columns = create
        .columns
        .iter()
        .map(|column| {
            let name = column.name.value.clone();
            let comment = comments
                .column(&database, &table_name, &name)
                .map(str::to_string)
                .or_else(|| inline_comment(&column.specs));
            SourceColumn {
                name,
                raw_type: column.data_type.clone(),
                specs: column.specs.clone(),
                comment,
            }
        })
        .collect();

    let table_comment = comments
        .table(&database, &table_name)
        .map(str::to_string)
        .or_else(|| create.comment.clone());

    Ok(SourceTable {
        database,
        table_name,
        columns,
        table_comment,
    })
}

/// MySQL inline `COMMENT '...'` column specifier.
fn inline_comment(specs: &[SpecToken]) -> Option<String> {
    specs.windows(2).find_map(|pair| match pair {
        [keyword, SpecToken::Literal(text)] if keyword.is_keyword("COMMENT") => Some(text.clone()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::{MysqlRules, OracleRules};
    use crate::parser::parse_statements;

    fn extract(sql: &str, default_database: Option<&str>) -> Result<SourceTable> {
        let statements = parse_statements(sql, &OracleRules::new())?;
        let comments = CommentIndex::build(&statements);
        let create = statements
            .iter()
            .find_map(|s| s.as_create_table())
            .expect("CREATE TABLE");
        extract_table(create, &comments, default_database, "oracle")
    }

    #[test]
    fn test_schema_qualifier_wins_over_default() {
        let table = extract("CREATE TABLE \"S\".\"T\" (\"ID\" NUMBER)", Some("DB1")).unwrap();
        assert_eq!(table.database, "S");
        assert_eq!(table.table_name, "T");
        assert_eq!(table.columns[0].name, "ID");
    }

    #[test]
    fn test_default_database_used_without_qualifier() {
        let table = extract("CREATE TABLE T (ID NUMBER)", Some("DB1")).unwrap();
        assert_eq!(table.database, "DB1");
    }

    #[test]
    fn test_missing_database() {
        for default in [None, Some(""), Some("   ")] {
            let err = extract("CREATE TABLE T (ID NUMBER)", default).unwrap_err();
            match err {
                ConvertError::MissingDatabase { dialect, table } => {
                    assert_eq!(dialect, "oracle");
                    assert_eq!(table, "T");
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_empty_table() {
        let err = extract("CREATE TABLE S.T AS SELECT * FROM U", None).unwrap_err();
        assert!(matches!(err, ConvertError::EmptyTable { ref table, .. } if table == "S.T"));
    }

    #[test]
    fn test_columns_keep_order_types_and_comments() {
        let table = extract(
            "CREATE TABLE S.T (B VARCHAR2(32 CHAR), A NUMBER(15, 5) NOT NULL); \
             COMMENT ON COLUMN S.T.A IS 'amount'; \
             COMMENT ON TABLE S.T IS 'ledger'",
            None,
        )
        .unwrap();
        let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
        assert_eq!(table.columns[0].raw_type.arguments, vec!["32 CHAR"]);
        assert_eq!(table.columns[0].comment, None);
        assert_eq!(table.columns[1].comment.as_deref(), Some("amount"));
        assert_eq!(table.columns[1].specs.len(), 2);
        assert_eq!(table.table_comment.as_deref(), Some("ledger"));
    }

    #[test]
    fn test_mysql_inline_comments() {
        let statements = parse_statements(
            "CREATE TABLE shop.orders (\
             id bigint NOT NULL COMMENT 'order id', \
             note varchar(20) COMMENT 'free text') COMMENT='orders'; \
             COMMENT ON COLUMN shop.orders.note IS 'overridden'",
            &MysqlRules::new(),
        )
        .unwrap();
        let comments = CommentIndex::build(&statements);
        let create = statements[0].as_create_table().unwrap();
        let table = extract_table(create, &comments, None, "mysql").unwrap();
        assert_eq!(table.columns[0].comment.as_deref(), Some("order id"));
        assert_eq!(table.columns[1].comment.as_deref(), Some("overridden"));
        assert_eq!(table.table_comment.as_deref(), Some("orders"));
    }
}
