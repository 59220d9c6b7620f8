//! Spark SQL target rules.

use crate::core::identifier::{quote_backtick, quote_literal_backslash};
use crate::core::traits::TargetRules;
use crate::error::Result;

/// Spark SQL syntax: backtick identifiers, backslash-escaped literals.
#[derive(Debug, Clone, Default)]
pub struct SparkRules;

impl SparkRules {
    /// Create a new Spark rules instance.
    pub fn new() -> Self {
        Self
    }
}

impl TargetRules for SparkRules {
    fn name(&self) -> &str {
        "spark"
    }

    fn quote_ident(&self, name: &str) -> Result<String> {
        quote_backtick(name)
    }

    fn quote_literal(&self, text: &str) -> String {
        quote_literal_backslash(text)
    }
}
