//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::Result;
use std::path::Path;

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{Affix, CaseStrategy, DuplicateStrategy, ErrorMode};
    use crate::drivers::{SourceDialect, TargetEngine};
    use crate::error::ConvertError;
    use std::io::Write;

    #[test]
    fn test_from_yaml_minimal() {
        let config = Config::from_yaml("source: oracle\ntarget: flink\ncatalog: P1_CATALOG1\n").unwrap();
        assert_eq!(config.source, SourceDialect::Oracle);
        assert_eq!(config.target, TargetEngine::Flink);
        assert_eq!(config.database, None);
        assert_eq!(config.error_mode, ErrorMode::FailFast);
        assert!(config.create_database);
        assert_eq!(config.naming.case, CaseStrategy::Preserve);
    }

    #[test]
    fn test_from_yaml_full() {
        let yaml = r#"
source: dameng
target: spark
catalog: p1_catalog1
database: api_oper
naming:
  case: lower
  database_affix:
    suffix: _fix
  table_affix:
    prefix: pre_
  duplicate: overwrite
error_mode: skip
create_database: false
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.source, SourceDialect::Dm);
        assert_eq!(config.target, TargetEngine::Spark);
        assert_eq!(config.database.as_deref(), Some("api_oper"));
        assert_eq!(config.naming.database_affix, Affix::Suffix("_fix".into()));
        assert_eq!(config.naming.table_affix, Affix::Prefix("pre_".into()));
        assert_eq!(config.naming.duplicate, DuplicateStrategy::Overwrite);
        assert_eq!(config.error_mode, ErrorMode::Skip);
        assert!(!config.create_database);

        let options = config.options();
        assert_eq!(options.error_mode, ErrorMode::Skip);
        assert_eq!(options.naming.case, CaseStrategy::Lower);
    }

    #[test]
    fn test_from_yaml_unknown_dialect() {
        let err = Config::from_yaml("source: db2\ntarget: flink\ncatalog: c\n").unwrap_err();
        assert!(matches!(err, ConvertError::Yaml(_)));
    }

    #[test]
    fn test_from_yaml_runs_validation() {
        let err = Config::from_yaml("source: mysql\ntarget: flink\ncatalog: ''\n").unwrap_err();
        assert!(matches!(err, ConvertError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "source: mysql\ntarget: spark\ncatalog: c").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.source, SourceDialect::Mysql);

        let err = Config::load("/nonexistent/ddl-convert.yaml").unwrap_err();
        assert!(matches!(err, ConvertError::Io(_)));
    }
}
