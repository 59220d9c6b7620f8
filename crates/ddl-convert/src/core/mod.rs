//! Core abstractions for dialect-neutral DDL conversion.
//!
//! - [`schema`]: table, column and result types
//! - [`identifier`]: identifier validation and quoting
//! - [`text`]: whitespace normalization of generated DDL
//! - [`traits`]: source rules, target rules and type mappers
//! - [`catalog`]: type mapper registry for dependency injection
//!
//! # Design Patterns
//!
//! - **Strategy**: `SourceRules`, `TargetRules` and `TypeMapper` provide
//!   interchangeable algorithms per dialect
//! - **Template Method**: default trait methods define algorithm skeletons

pub mod catalog;
pub mod identifier;
pub mod schema;
pub mod text;
pub mod traits;

// Re-export commonly used types for convenience
pub use catalog::DialectCatalog;
pub use schema::{
    ColumnDescriptor, ConversionOutput, ConversionResult, RawColumnType, ResolvedFieldFormat,
    StatementError, TableDescriptor, TableField, TableSchema,
};
pub use text::compress;
pub use traits::{SourceRules, TargetRules, TypeMapper, TypeMapping};
