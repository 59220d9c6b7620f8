//! Configuration type definitions.

use serde::{Deserialize, Serialize};

use crate::convert::{ConvertOptions, ErrorMode, NamingPolicy};
use crate::drivers::{SourceDialect, TargetEngine};

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Source dialect tag (oracle, dm, mysql).
    pub source: SourceDialect,

    /// Target engine tag (flink, spark).
    pub target: TargetEngine,

    /// Target catalog.
    pub catalog: String,

    /// Database for tables without a schema qualifier.
    #[serde(default)]
    pub database: Option<String>,

    /// Case, affix and duplicate rules.
    #[serde(default)]
    pub naming: NamingPolicy,

    /// Batch behavior when a table fails (default: fail_fast).
    #[serde(default)]
    pub error_mode: ErrorMode,

    /// Emit `CREATE DATABASE IF NOT EXISTS` statements (default: true).
    #[serde(default = "default_true")]
    pub create_database: bool,
}

impl Config {
    /// Configuration with defaults for everything but the required fields.
    pub fn new(source: SourceDialect, target: TargetEngine, catalog: impl Into<String>) -> Self {
        Self {
            source,
            target,
            catalog: catalog.into(),
            database: None,
            naming: NamingPolicy::default(),
            error_mode: ErrorMode::default(),
            create_database: true,
        }
    }

    /// Conversion options carried by this configuration.
    pub fn options(&self) -> ConvertOptions {
        ConvertOptions {
            naming: self.naming.clone(),
            error_mode: self.error_mode,
        }
    }
}

fn default_true() -> bool {
    true
}
