//! DM source rules.

use sqlparser::dialect::{Dialect as SqlDialect, GenericDialect};
use sqlparser::tokenizer::Token;

use crate::core::traits::{matches_keywords, strip_keyword_sequences, SourceRules};
use crate::drivers::oracle::strip_constraint_state;

/// DM dialect rules. Oracle's pre-clean plus DM's `CLUSTER` key options.
#[derive(Debug, Clone, Default)]
pub struct DmRules;

impl DmRules {
    /// Create a new DM rules instance.
    pub fn new() -> Self {
        Self
    }
}

impl SourceRules for DmRules {
    fn name(&self) -> &str {
        "dm"
    }

    fn tokenizer_dialect(&self) -> Box<dyn SqlDialect> {
        Box::new(GenericDialect {})
    }

    fn strip_sequences(&self) -> &'static [&'static [&'static str]] {
        &[&["USING", "INDEX"], &["NOT", "CLUSTER"]]
    }

    fn pre_clean(&self, tokens: Vec<Token>) -> Vec<Token> {
        let tokens = strip_keyword_sequences(tokens, self.strip_sequences());
        strip_constraint_state(strip_cluster_option(tokens))
    }
}

/// Drop `CLUSTER` where it qualifies a key (`CLUSTER PRIMARY KEY`,
/// `CLUSTER UNIQUE KEY`). Anywhere else it is an ordinary identifier.
fn strip_cluster_option(tokens: Vec<Token>) -> Vec<Token> {
    let keep: Vec<bool> = (0..tokens.len())
        .map(|i| {
            !matches_keywords(&tokens[i..], &["CLUSTER", "PRIMARY"])
                && !matches_keywords(&tokens[i..], &["CLUSTER", "UNIQUE"])
        })
        .collect();
    tokens
        .into_iter()
        .zip(keep)
        .filter_map(|(token, keep)| keep.then_some(token))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlparser::tokenizer::Tokenizer;

    fn clean(sql: &str) -> Vec<String> {
        let tokens: Vec<Token> = Tokenizer::new(&GenericDialect {}, sql)
            .tokenize()
            .unwrap()
            .into_iter()
            .filter(|t| !matches!(t, Token::Whitespace(_) | Token::EOF))
            .collect();
        DmRules::new()
            .pre_clean(tokens)
            .iter()
            .map(|t| t.to_string())
            .collect()
    }

    #[test]
    fn test_dm_strips_cluster_keywords() {
        assert_eq!(
            clean("NOT CLUSTER PRIMARY KEY(\"ID\") ENABLE"),
            vec!["PRIMARY", "KEY", "(", "\"ID\"", ")"]
        );
        assert_eq!(
            clean("CLUSTER PRIMARY KEY(ID)"),
            vec!["PRIMARY", "KEY", "(", "ID", ")"]
        );
        assert_eq!(clean("CLUSTER UNIQUE KEY(ID)"), vec!["UNIQUE", "KEY", "(", "ID", ")"]);
    }

    #[test]
    fn test_dm_keeps_column_named_cluster() {
        assert_eq!(
            clean("(CLUSTER VARCHAR(10), ID INT)"),
            vec!["(", "CLUSTER", "VARCHAR", "(", "10", ")", ",", "ID", "INT", ")"]
        );
    }
}
