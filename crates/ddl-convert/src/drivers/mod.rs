//! Source dialect and target engine implementations.
//!
//! - [`oracle`], [`dm`], [`mysql`]: source dialects ([`SourceRules`])
//! - [`flink`], [`spark`]: target engines ([`TargetRules`])
//!
//! # Architecture
//!
//! The dialect tags are closed enums ([`SourceDialect`], [`TargetEngine`]).
//! Each tag resolves to a rules enum ([`SourceRulesImpl`],
//! [`TargetRulesImpl`]) that dispatches by `match` instead of vtables.
//!
//! # Adding New Dialects
//!
//! 1. Create a module under `drivers/` implementing the rules trait
//! 2. Add a variant to the tag enum and the rules enum
//! 3. Add a `ToCanonical`/`FromCanonical` converter in `dialect/typemap.rs`
//! 4. Register the pairs in `DialectCatalog::with_builtins()`

pub mod dm;
pub mod flink;
pub mod mysql;
pub mod oracle;
pub mod spark;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlparser::dialect::Dialect as SqlDialect;
use sqlparser::tokenizer::Token;

pub use dm::DmRules;
pub use flink::FlinkRules;
pub use mysql::MysqlRules;
pub use oracle::OracleRules;
pub use spark::SparkRules;

use crate::core::traits::{SourceRules, TargetRules};
use crate::error::{ConvertError, Result};

/// Source SQL dialect tag.
///
/// `Postgres` and `SqlServer` are recognized so that requests naming them
/// fail with `UnsupportedConversion` rather than a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SourceDialect {
    Oracle,
    Dm,
    Mysql,
    Postgres,
    SqlServer,
}

impl SourceDialect {
    /// All known tags.
    pub const ALL: [SourceDialect; 5] = [
        SourceDialect::Oracle,
        SourceDialect::Dm,
        SourceDialect::Mysql,
        SourceDialect::Postgres,
        SourceDialect::SqlServer,
    ];

    /// Canonical tag string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceDialect::Oracle => "oracle",
            SourceDialect::Dm => "dm",
            SourceDialect::Mysql => "mysql",
            SourceDialect::Postgres => "postgres",
            SourceDialect::SqlServer => "sqlserver",
        }
    }

    /// Source rules for this dialect, if conversion from it is implemented.
    pub fn rules(&self) -> Option<SourceRulesImpl> {
        match self {
            SourceDialect::Oracle => Some(SourceRulesImpl::Oracle(OracleRules::new())),
            SourceDialect::Dm => Some(SourceRulesImpl::Dm(DmRules::new())),
            SourceDialect::Mysql => Some(SourceRulesImpl::Mysql(MysqlRules::new())),
            SourceDialect::Postgres | SourceDialect::SqlServer => None,
        }
    }
}

impl fmt::Display for SourceDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceDialect {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "oracle" => Ok(SourceDialect::Oracle),
            "dm" | "dmdb" | "dameng" => Ok(SourceDialect::Dm),
            "mysql" | "mariadb" => Ok(SourceDialect::Mysql),
            "postgres" | "postgresql" | "pg" => Ok(SourceDialect::Postgres),
            "sqlserver" | "mssql" | "sql_server" => Ok(SourceDialect::SqlServer),
            other => Err(ConvertError::Config(format!(
                "Unknown source dialect: '{}'. Supported: oracle, dm, mysql",
                other
            ))),
        }
    }
}

impl TryFrom<String> for SourceDialect {
    type Error = ConvertError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Target engine tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum TargetEngine {
    Flink,
    Spark,
}

impl TargetEngine {
    /// All known tags.
    pub const ALL: [TargetEngine; 2] = [TargetEngine::Flink, TargetEngine::Spark];

    /// Canonical tag string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetEngine::Flink => "flink",
            TargetEngine::Spark => "spark",
        }
    }

    /// Target rules for this engine.
    pub fn rules(&self) -> TargetRulesImpl {
        match self {
            TargetEngine::Flink => TargetRulesImpl::Flink(FlinkRules::new()),
            TargetEngine::Spark => TargetRulesImpl::Spark(SparkRules::new()),
        }
    }
}

impl fmt::Display for TargetEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetEngine {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "flink" => Ok(TargetEngine::Flink),
            "spark" => Ok(TargetEngine::Spark),
            other => Err(ConvertError::Config(format!(
                "Unknown target engine: '{}'. Supported: flink, spark",
                other
            ))),
        }
    }
}

impl TryFrom<String> for TargetEngine {
    type Error = ConvertError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Enum-based static dispatch for source rules.
#[derive(Debug, Clone)]
pub enum SourceRulesImpl {
    Oracle(OracleRules),
    Dm(DmRules),
    Mysql(MysqlRules),
}

impl SourceRules for SourceRulesImpl {
    fn name(&self) -> &str {
        match self {
            SourceRulesImpl::Oracle(r) => r.name(),
            SourceRulesImpl::Dm(r) => r.name(),
            SourceRulesImpl::Mysql(r) => r.name(),
        }
    }

    fn tokenizer_dialect(&self) -> Box<dyn SqlDialect> {
        match self {
            SourceRulesImpl::Oracle(r) => r.tokenizer_dialect(),
            SourceRulesImpl::Dm(r) => r.tokenizer_dialect(),
            SourceRulesImpl::Mysql(r) => r.tokenizer_dialect(),
        }
    }

    fn strip_sequences(&self) -> &'static [&'static [&'static str]] {
        match self {
            SourceRulesImpl::Oracle(r) => r.strip_sequences(),
            SourceRulesImpl::Dm(r) => r.strip_sequences(),
            SourceRulesImpl::Mysql(r) => r.strip_sequences(),
        }
    }

    fn pre_clean(&self, tokens: Vec<Token>) -> Vec<Token> {
        match self {
            SourceRulesImpl::Oracle(r) => r.pre_clean(tokens),
            SourceRulesImpl::Dm(r) => r.pre_clean(tokens),
            SourceRulesImpl::Mysql(r) => r.pre_clean(tokens),
        }
    }
}

/// Enum-based static dispatch for target rules.
#[derive(Debug, Clone)]
pub enum TargetRulesImpl {
    Flink(FlinkRules),
    Spark(SparkRules),
}

impl TargetRules for TargetRulesImpl {
    fn name(&self) -> &str {
        match self {
            TargetRulesImpl::Flink(r) => r.name(),
            TargetRulesImpl::Spark(r) => r.name(),
        }
    }

    fn quote_ident(&self, name: &str) -> Result<String> {
        match self {
            TargetRulesImpl::Flink(r) => r.quote_ident(name),
            TargetRulesImpl::Spark(r) => r.quote_ident(name),
        }
    }

    fn quote_literal(&self, text: &str) -> String {
        match self {
            TargetRulesImpl::Flink(r) => r.quote_literal(text),
            TargetRulesImpl::Spark(r) => r.quote_literal(text),
        }
    }
}
