//! Flink SQL target rules.

use crate::core::identifier::{quote_backtick, quote_literal_doubled};
use crate::core::traits::TargetRules;
use crate::error::Result;

/// Flink SQL syntax: backtick identifiers, `''`-escaped literals.
#[derive(Debug, Clone, Default)]
pub struct FlinkRules;

impl FlinkRules {
    /// Create a new Flink rules instance.
    pub fn new() -> Self {
        Self
    }
}

impl TargetRules for FlinkRules {
    fn name(&self) -> &str {
        "flink"
    }

    fn quote_ident(&self, name: &str) -> Result<String> {
        quote_backtick(name)
    }

    fn quote_literal(&self, text: &str) -> String {
        quote_literal_doubled(text)
    }
}
