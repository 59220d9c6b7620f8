//! Type resolution and dialect type mapping.
//!
//! - [`resolve`]: raw type arguments → precision and scale
//! - [`canonical`]: the hub type system and [`ComposedMapper`]
//! - source converters: [`OracleToCanonical`], [`DmToCanonical`], [`MysqlToCanonical`]
//! - engine converters: [`FlinkFromCanonical`], [`SparkFromCanonical`]
//!
//! # Usage
//!
//! Mappers are registered in a [`DialectCatalog`](crate::core::DialectCatalog)
//! and retrieved by source/target pair:
//!
//! ```rust,ignore
//! let catalog = DialectCatalog::with_builtins();
//! let mapper = catalog.require_mapper(SourceDialect::Oracle, TargetEngine::Flink)?;
//! let mapping = mapper.map_format(&resolve("NUMBER", &["15".into(), "5".into()]))?;
//! ```

pub mod canonical;
mod format;
mod typemap;

pub use canonical::{CanonicalType, CanonicalTypeInfo, ComposedMapper, FromCanonical, ToCanonical};
pub use format::{resolve, resolve_raw};
pub use typemap::{
    DmToCanonical, FlinkFromCanonical, MysqlToCanonical, OracleToCanonical, SparkFromCanonical,
    MAX_DECIMAL_PRECISION,
};
