//! Configuration validation.

use super::Config;
use crate::error::{ConvertError, Result};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    if config.catalog.trim().is_empty() {
        return Err(ConvertError::Config("catalog is required".into()));
    }

    if let Some(database) = &config.database {
        if database.trim().is_empty() {
            return Err(ConvertError::Config(
                "database must not be blank when set".into(),
            ));
        }
    }

    config
        .naming
        .database_affix
        .validate()
        .map_err(|e| ConvertError::Config(format!("naming.database_affix: {}", e)))?;
    config
        .naming
        .table_affix
        .validate()
        .map_err(|e| ConvertError::Config(format!("naming.table_affix: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::Affix;
    use crate::drivers::{SourceDialect, TargetEngine};

    fn valid_config() -> Config {
        Config::new(SourceDialect::Oracle, TargetEngine::Flink, "P1_CATALOG1")
    }

    #[test]
    fn test_valid_config() {
        let config = valid_config();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_missing_catalog() {
        let mut config = valid_config();
        config.catalog = "  ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_blank_database() {
        let mut config = valid_config();
        config.database = Some(String::new());
        assert!(validate(&config).is_err());

        config.database = Some("DB1".to_string());
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_affix() {
        let mut config = valid_config();
        config.naming.table_affix = Affix::Prefix(String::new());
        let err = validate(&config).unwrap_err();
        assert!(matches!(err, ConvertError::Config(ref m) if m.contains("table_affix")));
    }
}
