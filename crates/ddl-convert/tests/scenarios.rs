//! End-to-end conversion scenarios.

use ddl_convert::convert::{extract_table, CommentIndex};
use ddl_convert::drivers::MysqlRules;
use ddl_convert::parser::parse_statements;
use ddl_convert::{
    compress, Affix, CaseStrategy, ConvertError, ConvertOptions, DdlConverter, DuplicateStrategy,
    ErrorMode, NamingPolicy, SchemaRequest, SourceDialect, SqlRequest, TableField, TableSchema,
    TargetEngine,
};

const MULTI_STATEMENT_ORACLE: &str = r#"-- exported from ADM
CREATE TABLE "API_OPER"."EDG25_APP_MESSAGE"
   (    "ID" VARCHAR2(32 CHAR) NOT NULL ENABLE, -- abc
    "AID" VARCHAR2(32 CHAR),
    "INFO" VARCHAR2(2048 CHAR),
     PRIMARY KEY ("ID")
  USING INDEX PCTFREE 10 INITRANS 2 MAXTRANS 255 COMPUTE STATISTICS
  TABLESPACE "SRC_DATA"  ENABLE
   ) SEGMENT CREATION DEFERRED
  PCTFREE 10 PCTUSED 40 INITRANS 1 MAXTRANS 255
 NOCOMPRESS LOGGING
  TABLESPACE "SRC_DATA" ;

CREATE TABLE "API_OPER"."EDG25_APP_LOG"
   (    "ID" NUMBER(15,0) NOT NULL ENABLE,
    "CREATED" TIMESTAMP (6) DEFAULT SYSTIMESTAMP NOT NULL ENABLE
   );

COMMENT ON COLUMN "API_OPER"."EDG25_APP_MESSAGE"."ID" IS '主键';
   COMMENT ON COLUMN "API_OPER"."EDG25_APP_MESSAGE"."AID" IS 'appList主键';
   COMMENT ON COLUMN "API_OPER"."EDG25_APP_LOG"."CREATED" IS '发送日期';"#;

fn oracle_to_flink(database: Option<&str>, sql: &str) -> ddl_convert::Result<Vec<ddl_convert::ConversionResult>> {
    DdlConverter::new().convert(SourceDialect::Oracle, TargetEngine::Flink, "P1_CATALOG1", database, sql)
}

// =============================================================================
// Scenario A: precision and scale survive
// =============================================================================

#[test]
fn test_number_with_precision_and_scale() {
    let results = oracle_to_flink(Some("DB1"), "CREATE TABLE T (\"id\" NUMBER(15,5) NOT NULL)").unwrap();
    assert_eq!(
        compress(&results[0].ddl_text),
        "CREATE TABLE IF NOT EXISTS `P1_CATALOG1`.`DB1`.`T` (`id` DECIMAL(15, 5) NOT NULL);"
    );
}

// =============================================================================
// Scenario B: DEFAULT dropped, TIMESTAMP defaults to 6 digits
// =============================================================================

#[test]
fn test_timestamp_default_is_dropped() {
    let results = oracle_to_flink(
        Some("DB1"),
        "CREATE TABLE T (\"LASTUPDATEDDT\" TIMESTAMP DEFAULT SYSTIMESTAMP NOT NULL)",
    )
    .unwrap();
    assert_eq!(
        compress(&results[0].ddl_text),
        "CREATE TABLE IF NOT EXISTS `P1_CATALOG1`.`DB1`.`T` (`LASTUPDATEDDT` TIMESTAMP(6) NOT NULL);"
    );
}

#[test]
fn test_oracle_single_statement_with_mixed_specs() {
    let sql = "CREATE TABLE \"ADM_BDPP\".\"PARAMSYS\" \n\
               (\t\"PARAM_SEQUENCE\" NUMBER(15,0) NOT NULL ENABLE, \n\
               TASKNAME VARCHAR2(50) NOT NULL DEFAULT '123', \n\
               \t\"TASKINTERVAL\" VARCHAR2(10 CHAR) NOT NULL DEFAULT 0, \n\
               SUPPLEMENTAL LOG DATA (ALL) COLUMNS   )";
    let results = oracle_to_flink(Some("DB1"), sql).unwrap();
    assert_eq!(
        compress(&results[0].ddl_text),
        "CREATE TABLE IF NOT EXISTS `P1_CATALOG1`.`ADM_BDPP`.`PARAMSYS` (\
         `PARAM_SEQUENCE` DECIMAL(15, 0) NOT NULL, \
         `TASKNAME` STRING NOT NULL, \
         `TASKINTERVAL` STRING NOT NULL);"
    );
}

// =============================================================================
// Scenario C: comments across a batch, one CREATE DATABASE
// =============================================================================

#[test]
fn test_multi_statement_batch_with_comments() {
    let request = SqlRequest::new(
        SourceDialect::Oracle,
        TargetEngine::Flink,
        "P1_CATALOG1",
        MULTI_STATEMENT_ORACLE,
    )
    .with_database("DB1");
    let output = DdlConverter::new().convert_sql(&request).unwrap();
    assert_eq!(output.results.len(), 2);
    assert_eq!(output.results[0].table_name, "EDG25_APP_MESSAGE");
    assert_eq!(output.results[1].table_name, "EDG25_APP_LOG");

    let script = compress(&output.script(true));
    assert_eq!(script.matches("CREATE DATABASE IF NOT EXISTS").count(), 1);
    assert_eq!(
        script,
        "CREATE DATABASE IF NOT EXISTS `P1_CATALOG1`.`API_OPER`;\
         CREATE TABLE IF NOT EXISTS `P1_CATALOG1`.`API_OPER`.`EDG25_APP_MESSAGE` (\
         `ID` STRING NOT NULL COMMENT '主键', \
         `AID` STRING COMMENT 'appList主键', \
         `INFO` STRING);\
         CREATE TABLE IF NOT EXISTS `P1_CATALOG1`.`API_OPER`.`EDG25_APP_LOG` (\
         `ID` DECIMAL(15, 0) NOT NULL, \
         `CREATED` TIMESTAMP(6) NOT NULL COMMENT '发送日期');"
    );
}

#[test]
fn test_comments_do_not_collide_across_databases() {
    let sql = "CREATE TABLE A.T (ID NUMBER); \
               CREATE TABLE B.T (ID NUMBER); \
               COMMENT ON COLUMN A.T.ID IS 'from a'; \
               COMMENT ON COLUMN B.T.ID IS 'from b'";
    let results = oracle_to_flink(None, sql).unwrap();
    assert!(results[0].ddl_text.contains("COMMENT 'from a'"));
    assert!(results[1].ddl_text.contains("COMMENT 'from b'"));
}

// =============================================================================
// Scenario D: schema mode naming policy
// =============================================================================

#[test]
fn test_schema_mode_affix_and_case() {
    let table = TableSchema {
        catalog: Some("P1_CATALOG1".into()),
        database: Some("API_OPER".into()),
        table_name: "EDG25_APP_MESSAGE".into(),
        table_comment: Some("Test Table".into()),
        fields: vec![
            TableField::new("ID", "VARCHAR2").with_comment("主键"),
            TableField::new("AID", "VARCHAR2"),
            TableField::new("INFO", "VARCHAR2").with_comment("发送日期"),
        ],
    };
    let request = SchemaRequest::new(SourceDialect::Oracle, TargetEngine::Flink, "unused", vec![table])
        .with_options(ConvertOptions {
            naming: NamingPolicy {
                case: CaseStrategy::Lower,
                database_affix: Affix::Suffix("_fIx".into()),
                table_affix: Affix::Prefix("pRe_".into()),
                duplicate: DuplicateStrategy::Ignore,
            },
            error_mode: ErrorMode::FailFast,
        });
    let output = DdlConverter::new().convert_schema(&request).unwrap();
    assert_eq!(
        compress(&output.results[0].ddl_text),
        "CREATE DATABASE IF NOT EXISTS `p1_catalog1`.`api_oper_fix`;\
         CREATE TABLE IF NOT EXISTS `p1_catalog1`.`api_oper_fix`.`pre_edg25_app_message` (\
         `id` STRING COMMENT '主键', \
         `aid` STRING, \
         `info` STRING COMMENT '发送日期'\
         ) COMMENT 'Test Table';"
    );
}

#[test]
fn test_schema_mode_duplicates() {
    let table = |comment: &str| TableSchema {
        catalog: None,
        database: Some("d".into()),
        table_name: "t".into(),
        table_comment: Some(comment.into()),
        fields: vec![TableField::new("id", "INT")],
    };
    let tables = vec![table("first"), table("second")];
    let converter = DdlConverter::new();
    let request = |duplicate: DuplicateStrategy| {
        SchemaRequest::new(SourceDialect::Mysql, TargetEngine::Spark, "c", tables.clone()).with_options(
            ConvertOptions {
                naming: NamingPolicy {
                    duplicate,
                    ..Default::default()
                },
                ..Default::default()
            },
        )
    };

    let output = converter.convert_schema(&request(DuplicateStrategy::Ignore)).unwrap();
    assert_eq!(output.results.len(), 1);
    assert!(output.results[0].ddl_text.contains("'first'"));

    let output = converter.convert_schema(&request(DuplicateStrategy::Overwrite)).unwrap();
    assert_eq!(output.results.len(), 1);
    assert!(output.results[0].ddl_text.contains("'second'"));

    let err = converter.convert_schema(&request(DuplicateStrategy::Error)).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::DuplicateTable { ref dialect, ref identifier }
            if dialect == "mysql" && identifier == "c.d.t"
    ));
    assert!(err.to_string().contains("(mysql)"));
}

#[test]
fn test_raw_sql_keeps_every_same_named_table() {
    let results = oracle_to_flink(
        None,
        "CREATE TABLE S.T (A NUMBER(5,0)); CREATE TABLE S.T (B VARCHAR2(10));",
    )
    .unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(
        compress(&results[0].ddl_text),
        "CREATE TABLE IF NOT EXISTS `P1_CATALOG1`.`S`.`T` (`A` DECIMAL(5, 0));"
    );
    assert_eq!(
        compress(&results[1].ddl_text),
        "CREATE TABLE IF NOT EXISTS `P1_CATALOG1`.`S`.`T` (`B` STRING);"
    );
}

#[test]
fn test_dm_column_named_cluster() {
    let results = DdlConverter::new()
        .convert(
            SourceDialect::Dm,
            TargetEngine::Flink,
            "c",
            None,
            "CREATE TABLE S.T (CLUSTER VARCHAR(10), ID BIGINT NOT NULL, CLUSTER PRIMARY KEY(ID))",
        )
        .unwrap();
    assert_eq!(
        compress(&results[0].ddl_text),
        "CREATE TABLE IF NOT EXISTS `c`.`S`.`T` (`CLUSTER` STRING, `ID` BIGINT NOT NULL);"
    );
}

#[test]
fn test_invalid_argument_names_source_dialect() {
    let err = DdlConverter::new()
        .convert(SourceDialect::Dm, TargetEngine::Spark, "", None, "CREATE TABLE S.T (A INT)")
        .unwrap_err();
    match err {
        ConvertError::InvalidArgument { dialect, message } => {
            assert_eq!(dialect, "dm");
            assert!(message.contains("catalog"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

// =============================================================================
// Scenario E: unsupported type, no partial output
// =============================================================================

#[test]
fn test_unknown_type_fails_whole_table() {
    let err = oracle_to_flink(Some("DB1"), "CREATE TABLE T (A NUMBER, B SDO_GEOMETRY, C DATE)").unwrap_err();
    match err {
        ConvertError::UnsupportedType {
            dialect,
            type_name,
            column,
        } => {
            assert_eq!(dialect, "oracle");
            assert_eq!(type_name, "SDO_GEOMETRY");
            assert_eq!(column, "B");
        }
        other => panic!("unexpected error: {other}"),
    }
}

// =============================================================================
// Scenario F: missing database aborts the batch
// =============================================================================

#[test]
fn test_missing_database_stops_batch() {
    let sql = "CREATE TABLE T (A NUMBER); CREATE TABLE S.U (B SDO_GEOMETRY)";
    let err = oracle_to_flink(None, sql).unwrap_err();
    assert!(matches!(err, ConvertError::MissingDatabase { ref table, .. } if table == "T"));
}

#[test]
fn test_missing_database_skipped_in_skip_mode() {
    let sql = "CREATE TABLE T (A NUMBER); CREATE TABLE S.U (B NUMBER)";
    let request = SqlRequest::new(SourceDialect::Oracle, TargetEngine::Spark, "c", sql).with_options(
        ConvertOptions {
            error_mode: ErrorMode::Skip,
            ..Default::default()
        },
    );
    let output = DdlConverter::new().convert_sql(&request).unwrap();
    assert_eq!(output.results.len(), 1);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].table.as_deref(), Some("T"));
}

#[test]
fn test_syntax_error_aborts_even_in_skip_mode() {
    let request = SqlRequest::new(
        SourceDialect::Oracle,
        TargetEngine::Flink,
        "c",
        "CREATE TABLE S.T (A NUMBER(15, 0); CREATE TABLE S.U (B NUMBER)",
    )
    .with_options(ConvertOptions {
        error_mode: ErrorMode::Skip,
        ..Default::default()
    });
    let err = DdlConverter::new().convert_sql(&request).unwrap_err();
    assert!(matches!(err, ConvertError::SqlSyntax { .. }));
}

// =============================================================================
// Round trip and properties
// =============================================================================

#[test]
fn test_generated_ddl_re_extracts_to_same_columns() {
    let sql = "CREATE TABLE S.T (\
               \"ID\" NUMBER(15,5) NOT NULL ENABLE, \
               \"NAME\" VARCHAR2(32 CHAR), \
               \"CREATED\" TIMESTAMP DEFAULT SYSTIMESTAMP NOT NULL); \
               COMMENT ON COLUMN S.T.NAME IS 'it''s'";
    let results = oracle_to_flink(None, sql).unwrap();

    let statements = parse_statements(&results[0].ddl_text, &MysqlRules::new()).unwrap();
    let comments = CommentIndex::build(&statements);
    let create = statements[0].as_create_table().unwrap();
    let table = extract_table(create, &comments, None, "mysql").unwrap();

    let columns: Vec<(String, bool)> = table
        .columns
        .iter()
        .map(|c| {
            let not_null = c
                .specs
                .windows(2)
                .any(|w| w[0].is_keyword("NOT") && w[1].is_keyword("NULL"));
            (c.name.clone(), not_null)
        })
        .collect();
    assert_eq!(
        columns,
        vec![
            ("ID".to_string(), true),
            ("NAME".to_string(), false),
            ("CREATED".to_string(), true),
        ]
    );
    assert_eq!(table.database, "S");
    assert_eq!(table.columns[1].comment.as_deref(), Some("it's"));
}

#[test]
fn test_conversion_is_deterministic() {
    let first = oracle_to_flink(None, MULTI_STATEMENT_ORACLE).unwrap();
    let second = oracle_to_flink(None, MULTI_STATEMENT_ORACLE).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_compress_is_idempotent() {
    let results = oracle_to_flink(None, MULTI_STATEMENT_ORACLE).unwrap();
    for result in results {
        let once = compress(&result.ddl_text);
        assert_eq!(compress(&once), once);
    }
}

#[test]
fn test_converter_is_shareable_across_threads() {
    let converter = DdlConverter::new();
    std::thread::scope(|scope| {
        let handles: Vec<_> = [TargetEngine::Flink, TargetEngine::Spark]
            .into_iter()
            .map(|target| {
                let converter = &converter;
                scope.spawn(move || {
                    converter
                        .convert(SourceDialect::Mysql, target, "c", Some("d"), "CREATE TABLE t (id INT)")
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().len(), 1);
        }
    });
}
