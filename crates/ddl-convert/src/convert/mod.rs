//! DDL conversion pipeline.
//!
//! ```text
//! DDL text → parse → CommentIndex → extract (per CREATE TABLE)
//!          → resolve + map types → normalize → generate
//! ```
//!
//! [`DdlConverter`] is the entry point. It holds only the read-only
//! [`DialectCatalog`], so one converter can serve any number of threads.

pub mod comments;
pub mod extract;
pub mod generate;
pub mod normalize;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::catalog::DialectCatalog;
use crate::core::identifier::strip_quotes;
use crate::core::schema::{
    ColumnDescriptor, ConversionOutput, ConversionResult, StatementError, TableDescriptor,
    TableSchema,
};
use crate::core::text::compress;
use crate::core::traits::{TargetRules, TypeMapper};
use crate::dialect::resolve_raw;
use crate::drivers::{SourceDialect, TargetEngine};
use crate::error::{ConvertError, Result};
use crate::parser::{parse_statements, CreateTable, Statement};

pub use comments::CommentIndex;
pub use extract::{extract_table, SourceColumn, SourceTable};
pub use generate::{render_create_database, render_create_table};
pub use normalize::{
    clean_column_spec, Affix, CaseStrategy, DuplicateStrategy, DuplicateTracker, NamingPolicy,
};

/// How a batch reacts to a table that fails to convert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMode {
    /// Abort the batch on the first failure.
    #[default]
    FailFast,
    /// Record the failure in [`ConversionOutput::errors`] and continue.
    Skip,
}

/// Options shared by both conversion modes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub naming: NamingPolicy,
    pub error_mode: ErrorMode,
}

/// A raw-SQL conversion request.
#[derive(Debug, Clone)]
pub struct SqlRequest {
    pub source: SourceDialect,
    pub target: TargetEngine,
    /// Target catalog. Required.
    pub catalog: String,
    /// Database for tables without a schema qualifier.
    pub database: Option<String>,
    /// `;`-separated DDL.
    pub sql: String,
    pub options: ConvertOptions,
}

impl SqlRequest {
    pub fn new(
        source: SourceDialect,
        target: TargetEngine,
        catalog: impl Into<String>,
        sql: impl Into<String>,
    ) -> Self {
        Self {
            source,
            target,
            catalog: catalog.into(),
            database: None,
            sql: sql.into(),
            options: ConvertOptions::default(),
        }
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }
}

/// A schema-mode conversion request.
#[derive(Debug, Clone)]
pub struct SchemaRequest {
    pub source: SourceDialect,
    pub target: TargetEngine,
    /// Catalog for tables that do not name one.
    pub catalog: String,
    /// Database for tables that do not name one.
    pub database: Option<String>,
    pub tables: Vec<TableSchema>,
    pub options: ConvertOptions,
    /// Prefix each result's DDL with its `CREATE DATABASE IF NOT EXISTS`.
    pub create_database: bool,
}

impl SchemaRequest {
    pub fn new(
        source: SourceDialect,
        target: TargetEngine,
        catalog: impl Into<String>,
        tables: Vec<TableSchema>,
    ) -> Self {
        Self {
            source,
            target,
            catalog: catalog.into(),
            database: None,
            tables,
            options: ConvertOptions::default(),
            create_database: true,
        }
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_create_database(mut self, create_database: bool) -> Self {
        self.create_database = create_database;
        self
    }
}

/// Converts source DDL to target engine DDL.
#[derive(Debug, Clone)]
pub struct DdlConverter {
    catalog: Arc<DialectCatalog>,
}

impl Default for DdlConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl DdlConverter {
    /// Create a converter with every built-in pair registered.
    pub fn new() -> Self {
        Self::with_catalog(DialectCatalog::with_builtins())
    }

    /// Create a converter over an explicit catalog.
    pub fn with_catalog(catalog: DialectCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    pub fn catalog(&self) -> &DialectCatalog {
        &self.catalog
    }

    /// Convert every `CREATE TABLE` of `sql`, failing on the first error.
    ///
    /// Returns one result per table in source order; a batch without
    /// `CREATE TABLE` yields an empty vector.
    pub fn convert(
        &self,
        source: SourceDialect,
        target: TargetEngine,
        catalog: &str,
        database: Option<&str>,
        sql: &str,
    ) -> Result<Vec<ConversionResult>> {
        let mut request = SqlRequest::new(source, target, catalog, sql);
        request.database = database.map(str::to_string);
        Ok(self.convert_sql(&request)?.results)
    }

    /// [`convert`](Self::convert) with string tags.
    ///
    /// # Errors
    ///
    /// An unknown tag, like an unregistered pair, is `UnsupportedConversion`
    /// naming both tags.
    pub fn convert_tagged(
        &self,
        source_tag: &str,
        target_tag: &str,
        catalog: &str,
        database: Option<&str>,
        sql: &str,
    ) -> Result<Vec<ConversionResult>> {
        let unsupported = || ConvertError::unsupported_conversion(source_tag, target_tag);
        let source = source_tag.parse::<SourceDialect>().map_err(|_| unsupported())?;
        let target = target_tag.parse::<TargetEngine>().map_err(|_| unsupported())?;
        self.convert(source, target, catalog, database, sql)
    }

    /// Convert a raw-SQL batch.
    ///
    /// Every `CREATE TABLE` yields its own result in source order, even when
    /// two resolve to the same identifier. The naming policy's case and affix
    /// rules apply; its duplicate strategy is for schema mode only.
    pub fn convert_sql(&self, request: &SqlRequest) -> Result<ConversionOutput> {
        let dialect = request.source.as_str();
        require_non_blank(&request.catalog, "catalog", dialect)?;
        require_non_blank(&request.sql, "DDL text", dialect)?;
        request.options.naming.validate(dialect)?;

        let mapper = self.catalog.require_mapper(request.source, request.target)?;
        let source_rules = request.source.rules().ok_or_else(|| {
            ConvertError::unsupported_conversion(request.source.as_str(), request.target.as_str())
        })?;
        let target_rules = request.target.rules();

        info!(
            "Converting {} DDL to {} (catalog {})",
            request.source, request.target, request.catalog
        );

        let statements = parse_statements(&request.sql, &source_rules)?;
        let comments = CommentIndex::build(&statements);
        let tables: Vec<&CreateTable> = statements.iter().filter_map(Statement::as_create_table).collect();
        info!(
            "Found {} CREATE TABLE statements ({} column comments)",
            tables.len(),
            comments.column_count()
        );

        let mut results = Vec::with_capacity(tables.len());
        let mut errors = Vec::new();
        for (index, create) in tables.iter().enumerate() {
            match self.convert_statement(request, create, &comments, mapper.as_ref(), &target_rules) {
                Ok(result) => results.push(result),
                Err(error) => record_failure(
                    request.options.error_mode,
                    &mut errors,
                    index,
                    Some(create.name.to_string()),
                    error.in_dialect(dialect),
                )?,
            }
        }

        Ok(finish(results, errors))
    }

    /// Convert pre-structured tables.
    pub fn convert_schema(&self, request: &SchemaRequest) -> Result<ConversionOutput> {
        let dialect = request.source.as_str();
        require_non_blank(&request.catalog, "catalog", dialect)?;
        request.options.naming.validate(dialect)?;

        let mapper = self.catalog.require_mapper(request.source, request.target)?;
        let target_rules = request.target.rules();

        info!(
            "Converting {} {} table schemas to {}",
            request.tables.len(),
            request.source,
            request.target
        );

        let mut tracker = DuplicateTracker::new(request.options.naming.duplicate, dialect);
        let mut errors = Vec::new();
        for (index, schema) in request.tables.iter().enumerate() {
            let outcome = self
                .convert_table_schema(request, schema, mapper.as_ref(), &target_rules)
                .and_then(|result| tracker.insert(result));
            if let Err(error) = outcome {
                record_failure(
                    request.options.error_mode,
                    &mut errors,
                    index,
                    Some(schema.table_name.clone()),
                    error.in_dialect(dialect),
                )?;
            }
        }

        Ok(finish(tracker.into_results(), errors))
    }

    fn convert_statement(
        &self,
        request: &SqlRequest,
        create: &CreateTable,
        comments: &CommentIndex,
        mapper: &dyn TypeMapper,
        rules: &dyn TargetRules,
    ) -> Result<ConversionResult> {
        let source = extract_table(
            create,
            comments,
            request.database.as_deref(),
            request.source.as_str(),
        )?;
        let naming = &request.options.naming;

        let columns = source
            .columns
            .iter()
            .map(|column| {
                let mapping = mapper
                    .map_format(&resolve_raw(&column.raw_type))
                    .map_err(|e| e.with_column(&column.name))?;
                Ok(ColumnDescriptor {
                    name: naming.apply_column(&column.name),
                    engine_type: mapping.target_type,
                    column_spec: clean_column_spec(&column.name, &column.specs),
                    comment: column.comment.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let table = TableDescriptor {
            catalog: naming.apply_catalog(&request.catalog),
            database: naming.apply_database(&source.database),
            table_name: naming.apply_table(&source.table_name),
            columns,
            table_comment: source.table_comment,
        };
        render(rules, &table, false)
    }

    fn convert_table_schema(
        &self,
        request: &SchemaRequest,
        schema: &TableSchema,
        mapper: &dyn TypeMapper,
        rules: &dyn TargetRules,
    ) -> Result<ConversionResult> {
        let dialect = request.source.as_str();
        let table_name = strip_quotes(&schema.table_name);
        require_non_blank(&table_name, "table name", dialect)?;

        let catalog = schema
            .catalog
            .as_deref()
            .map(strip_quotes)
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| request.catalog.clone());
        let database = schema
            .database
            .as_deref()
            .or(request.database.as_deref())
            .map(strip_quotes)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| ConvertError::missing_database(dialect, &table_name))?;

        if schema.fields.is_empty() {
            return Err(ConvertError::empty_table(
                dialect,
                format!("{}.{}", database, table_name),
            ));
        }

        let naming = &request.options.naming;
        let columns = schema
            .fields
            .iter()
            .map(|field| {
                let name = strip_quotes(&field.name);
                let mapping = mapper
                    .map_format(&field.format())
                    .map_err(|e| e.with_column(&name))?;
                Ok(ColumnDescriptor {
                    name: naming.apply_column(&name),
                    engine_type: mapping.target_type,
                    column_spec: field.not_null.then(|| "NOT NULL".to_string()),
                    comment: field.comment.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let table = TableDescriptor {
            catalog: naming.apply_catalog(&catalog),
            database: naming.apply_database(&database),
            table_name: naming.apply_table(&table_name),
            columns,
            table_comment: schema.table_comment.clone(),
        };
        render(rules, &table, request.create_database)
    }
}

fn require_non_blank(value: &str, what: &str, dialect: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConvertError::invalid_argument(
            dialect,
            format!("{} is required", what),
        ));
    }
    Ok(())
}

fn render(
    rules: &dyn TargetRules,
    table: &TableDescriptor,
    prefix_database: bool,
) -> Result<ConversionResult> {
    let ddl = render_create_table(rules, table)?;
    let database_ddl = render_create_database(rules, &table.catalog, &table.database)?;
    debug!("Generated {} DDL: {}", rules.name(), compress(&ddl));

    let ddl_text = if prefix_database {
        format!("{}\n{}", database_ddl, ddl)
    } else {
        ddl
    };

    Ok(ConversionResult {
        catalog: table.catalog.clone(),
        database: table.database.clone(),
        table_name: table.table_name.clone(),
        ddl_text,
        database_ddl,
    })
}

/// Apply the error mode to a failed table: propagate, or record and go on.
fn record_failure(
    mode: ErrorMode,
    errors: &mut Vec<StatementError>,
    index: usize,
    table: Option<String>,
    error: ConvertError,
) -> Result<()> {
    match mode {
        ErrorMode::FailFast => Err(error),
        ErrorMode::Skip => {
            warn!(
                "Skipping table #{} ({}): {}",
                index,
                table.as_deref().unwrap_or("?"),
                error
            );
            errors.push(StatementError {
                index,
                table,
                error,
            });
            Ok(())
        }
    }
}

fn finish(results: Vec<ConversionResult>, errors: Vec<StatementError>) -> ConversionOutput {
    info!(
        "Generated {} tables ({} skipped)",
        results.len(),
        errors.len()
    );
    ConversionOutput { results, errors }
}
