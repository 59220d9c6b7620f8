//! Dialect catalog for explicit dependency injection.
//!
//! The [`DialectCatalog`] is the registry of type mappers keyed by
//! `(source dialect, target engine)`. It is explicitly constructed and handed
//! to the converter rather than living in a global, so tests can build
//! catalogs with exactly the pairs they need.

use std::collections::HashMap;
use std::sync::Arc;

use crate::drivers::{SourceDialect, TargetEngine};
use crate::error::{ConvertError, Result};

use super::traits::TypeMapper;

/// Registry of type mappers.
///
/// Built once, read-only afterwards, and shareable across threads.
///
/// # Example
///
/// ```rust,ignore
/// let mut catalog = DialectCatalog::new();
/// catalog.register_mapper(
///     SourceDialect::Oracle,
///     TargetEngine::Flink,
///     Arc::new(ComposedMapper::new(Arc::new(OracleToCanonical), Arc::new(FlinkFromCanonical))),
/// );
///
/// let converter = DdlConverter::with_catalog(catalog);
/// ```
#[derive(Default)]
pub struct DialectCatalog {
    /// Type mappers keyed by (source, target) pair.
    type_mappers: HashMap<(SourceDialect, TargetEngine), Arc<dyn TypeMapper>>,
}

impl DialectCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog with every built-in source × engine pair registered.
    ///
    /// # Canonical Type System
    ///
    /// Each pair is a [`ComposedMapper`](crate::dialect::ComposedMapper)
    /// joining the source's `ToCanonical` converter with the engine's
    /// `FromCanonical` converter, so 3 sources and 2 engines need 5
    /// converters rather than 6 direct tables.
    pub fn with_builtins() -> Self {
        use crate::dialect::{
            ComposedMapper, DmToCanonical, FlinkFromCanonical, FromCanonical, MysqlToCanonical,
            OracleToCanonical, SparkFromCanonical, ToCanonical,
        };

        let mut catalog = Self::new();

        // Create shared canonical converters
        let sources: [(SourceDialect, Arc<dyn ToCanonical>); 3] = [
            (SourceDialect::Oracle, Arc::new(OracleToCanonical::new())),
            (SourceDialect::Dm, Arc::new(DmToCanonical::new())),
            (SourceDialect::Mysql, Arc::new(MysqlToCanonical::new())),
        ];
        let targets: [(TargetEngine, Arc<dyn FromCanonical>); 2] = [
            (TargetEngine::Flink, Arc::new(FlinkFromCanonical::new())),
            (TargetEngine::Spark, Arc::new(SparkFromCanonical::new())),
        ];

        for (source, to_canonical) in &sources {
            for (target, from_canonical) in &targets {
                catalog.register_mapper(
                    *source,
                    *target,
                    Arc::new(ComposedMapper::new(
                        to_canonical.clone(),
                        from_canonical.clone(),
                    )),
                );
            }
        }

        catalog
    }

    /// Register a type mapper for a source→target pair.
    pub fn register_mapper(
        &mut self,
        source: SourceDialect,
        target: TargetEngine,
        mapper: Arc<dyn TypeMapper>,
    ) {
        self.type_mappers.insert((source, target), mapper);
    }

    /// Get a type mapper for a source→target pair.
    pub fn get_mapper(
        &self,
        source: SourceDialect,
        target: TargetEngine,
    ) -> Option<Arc<dyn TypeMapper>> {
        self.type_mappers.get(&(source, target)).cloned()
    }

    /// Get a type mapper, returning `UnsupportedConversion` if none is registered.
    pub fn require_mapper(
        &self,
        source: SourceDialect,
        target: TargetEngine,
    ) -> Result<Arc<dyn TypeMapper>> {
        self.get_mapper(source, target)
            .ok_or_else(|| ConvertError::unsupported_conversion(source.as_str(), target.as_str()))
    }

    /// Check if a type mapper is registered for a source→target pair.
    pub fn has_mapper(&self, source: SourceDialect, target: TargetEngine) -> bool {
        self.type_mappers.contains_key(&(source, target))
    }

    /// Get all registered pairs, sorted.
    pub fn mapper_pairs(&self) -> Vec<(SourceDialect, TargetEngine)> {
        let mut pairs: Vec<_> = self.type_mappers.keys().copied().collect();
        pairs.sort();
        pairs
    }
}

impl std::fmt::Debug for DialectCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialectCatalog")
            .field("type_mappers", &self.mapper_pairs())
            .finish()
    }
}
