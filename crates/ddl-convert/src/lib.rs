//! # ddl-convert
//!
//! Translate `CREATE TABLE` definitions from source database dialects into
//! DDL for stream and batch processing engines.
//!
//! This library provides:
//!
//! - **Source dialects**: Oracle, DM (Dameng) and MySQL
//! - **Target engines**: Flink SQL and Spark SQL
//! - **Type mapping** through a canonical type hub
//! - **Comment carry-over** from `COMMENT ON COLUMN` / `COMMENT ON TABLE`
//! - **Naming policies**: case, prefix/suffix and duplicate handling
//! - **Schema mode** for tables described as YAML/JSON instead of DDL
//!
//! ## Example
//!
//! ```rust
//! use ddl_convert::{DdlConverter, SourceDialect, TargetEngine};
//!
//! let converter = DdlConverter::new();
//! let results = converter
//!     .convert(
//!         SourceDialect::Oracle,
//!         TargetEngine::Flink,
//!         "P1_CATALOG1",
//!         None,
//!         "CREATE TABLE \"S\".\"T\" (\"ID\" NUMBER(15,5) NOT NULL)",
//!     )
//!     .unwrap();
//! assert!(results[0].ddl_text.contains("`ID` DECIMAL(15, 5) NOT NULL"));
//! ```

pub mod config;
pub mod convert;
pub mod core;
pub mod dialect;
pub mod drivers;
pub mod error;
pub mod parser;

// Re-exports for convenient access
pub use crate::config::Config;
pub use crate::convert::{
    Affix, CaseStrategy, ConvertOptions, DdlConverter, DuplicateStrategy, ErrorMode, NamingPolicy,
    SchemaRequest, SqlRequest,
};
pub use crate::core::{
    compress, ConversionOutput, ConversionResult, DialectCatalog, ResolvedFieldFormat,
    StatementError, TableField, TableSchema,
};
pub use crate::dialect::resolve;
pub use crate::drivers::{SourceDialect, TargetEngine};
pub use crate::error::{ConvertError, Result};
