//! Target DDL generation.
//!
//! Output layout:
//!
//! ```text
//! CREATE TABLE IF NOT EXISTS `catalog`.`database`.`table` (
//!     `col` TYPE [NOT NULL] [COMMENT '...'],
//!     `col` TYPE
//! )[ COMMENT '...'];
//! ```

use crate::core::schema::TableDescriptor;
use crate::core::traits::TargetRules;
use crate::error::Result;

const INDENT: &str = "    ";

/// Render `CREATE TABLE IF NOT EXISTS` for a table.
///
/// # Errors
///
/// Returns `InvalidArgument` when an identifier fails validation.
pub fn render_create_table<T>(rules: &T, table: &TableDescriptor) -> Result<String>
where
    T: TargetRules + ?Sized,
{
    let name = rules.qualify(&[&table.catalog, &table.database, &table.table_name])?;

    let mut lines = Vec::with_capacity(table.columns.len());
    for column in &table.columns {
        let mut line = format!("{}{} {}", INDENT, rules.quote_ident(&column.name)?, column.engine_type);
        if let Some(spec) = &column.column_spec {
            line.push(' ');
            line.push_str(spec);
        }
        if let Some(comment) = &column.comment {
            line.push_str(" COMMENT ");
            line.push_str(&rules.quote_literal(comment));
        }
        lines.push(line);
    }

    let table_comment = match &table.table_comment {
        Some(comment) => format!(" COMMENT {}", rules.quote_literal(comment)),
        None => String::new(),
    };

    Ok(format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n){};",
        name,
        lines.join(",\n"),
        table_comment
    ))
}

/// Render `CREATE DATABASE IF NOT EXISTS` for `catalog.database`.
pub fn render_create_database<T>(rules: &T, catalog: &str, database: &str) -> Result<String>
where
    T: TargetRules + ?Sized,
{
    Ok(format!(
        "CREATE DATABASE IF NOT EXISTS {};",
        rules.qualify(&[catalog, database])?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::ColumnDescriptor;
    use crate::drivers::{FlinkRules, SparkRules};
    use crate::error::ConvertError;

    fn column(name: &str, engine_type: &str, spec: Option<&str>, comment: Option<&str>) -> ColumnDescriptor {
        ColumnDescriptor {
            name: name.to_string(),
            engine_type: engine_type.to_string(),
            column_spec: spec.map(str::to_string),
            comment: comment.map(str::to_string),
        }
    }

    fn table(columns: Vec<ColumnDescriptor>, comment: Option<&str>) -> TableDescriptor {
        TableDescriptor {
            catalog: "P1_CATALOG1".into(),
            database: "API_OPER".into(),
            table_name: "EDG25_APP_MESSAGE".into(),
            columns,
            table_comment: comment.map(str::to_string),
        }
    }

    #[test]
    fn test_render_create_table_layout() {
        let ddl = render_create_table(
            &FlinkRules::new(),
            &table(
                vec![
                    column("ID", "STRING", Some("NOT NULL"), Some("主键")),
                    column("AID", "STRING", None, None),
                ],
                None,
            ),
        )
        .unwrap();
        assert_eq!(
            ddl,
            "CREATE TABLE IF NOT EXISTS `P1_CATALOG1`.`API_OPER`.`EDG25_APP_MESSAGE` (\n\
             \x20   `ID` STRING NOT NULL COMMENT '主键',\n\
             \x20   `AID` STRING\n\
             );"
        );
    }

    #[test]
    fn test_render_table_comment_per_engine() {
        let t = table(vec![column("ID", "STRING", None, Some("it's"))], Some("a\\b"));
        let flink = render_create_table(&FlinkRules::new(), &t).unwrap();
        assert!(flink.contains("`ID` STRING COMMENT 'it''s'"));
        assert!(flink.ends_with(") COMMENT 'a\\b';"));

        let spark = render_create_table(&SparkRules::new(), &t).unwrap();
        assert!(spark.contains("`ID` STRING COMMENT 'it\\'s'"));
        assert!(spark.ends_with(") COMMENT 'a\\\\b';"));
    }

    #[test]
    fn test_render_quotes_embedded_backticks() {
        let ddl = render_create_table(
            &FlinkRules::new(),
            &table(vec![column("we`ird", "INT", None, None)], None),
        )
        .unwrap();
        assert!(ddl.contains("`we``ird` INT"));
    }

    #[test]
    fn test_render_rejects_invalid_identifier() {
        let err = render_create_table(
            &FlinkRules::new(),
            &table(vec![column("", "INT", None, None)], None),
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidArgument { .. }));
    }

    #[test]
    fn test_render_create_database() {
        assert_eq!(
            render_create_database(&SparkRules::new(), "c", "d").unwrap(),
            "CREATE DATABASE IF NOT EXISTS `c`.`d`;"
        );
    }
}
