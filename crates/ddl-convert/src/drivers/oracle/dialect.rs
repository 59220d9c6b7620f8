//! Oracle source rules (Strategy pattern).

use sqlparser::dialect::{Dialect as SqlDialect, GenericDialect};
use sqlparser::tokenizer::Token;

use crate::core::traits::{strip_keyword_sequences, SourceRules};

/// Keyword sequences Oracle DDL carries that have no target meaning.
const ORACLE_STRIP: &[&[&str]] = &[&["USING", "INDEX"]];

/// Oracle dialect rules.
#[derive(Debug, Clone, Default)]
pub struct OracleRules;

impl OracleRules {
    /// Create a new Oracle rules instance.
    pub fn new() -> Self {
        Self
    }
}

impl SourceRules for OracleRules {
    fn name(&self) -> &str {
        "oracle"
    }

    fn tokenizer_dialect(&self) -> Box<dyn SqlDialect> {
        Box::new(GenericDialect {})
    }

    fn strip_sequences(&self) -> &'static [&'static [&'static str]] {
        ORACLE_STRIP
    }

    fn pre_clean(&self, tokens: Vec<Token>) -> Vec<Token> {
        strip_constraint_state(strip_keyword_sequences(tokens, self.strip_sequences()))
    }
}

/// Drop the `ENABLE` constraint-state keyword.
///
/// A word `ENABLE` directly after `(` or `,` starts a table element (a column
/// literally named `ENABLE`) and is kept.
pub(crate) fn strip_constraint_state(tokens: Vec<Token>) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let is_enable = matches!(
            &token,
            Token::Word(w) if w.quote_style.is_none() && w.value.eq_ignore_ascii_case("ENABLE")
        );
        let starts_element = matches!(out.last(), None | Some(Token::Comma) | Some(Token::LParen));
        if is_enable && !starts_element {
            continue;
        }
        out.push(token);
    }
    out
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
        OracleRules::new()
            .pre_clean(tokens)
            .iter()
            .map(|t| t.to_string())
            .collect()
    }

    #[test]
    fn test_oracle_rules_name() {
        assert_eq!(OracleRules::new().name(), "oracle");
    }

    #[test]
    fn test_strips_enable_after_not_null() {
        assert_eq!(
            clean("(ID NUMBER(15,0) NOT NULL ENABLE, N VARCHAR2(10))"),
            vec!["(", "ID", "NUMBER", "(", "15", ",", "0", ")", "NOT", "NULL", ",", "N", "VARCHAR2", "(", "10", ")", ")"]
        );
    }

    #[test]
    fn test_strips_using_index() {
        let cleaned = clean("PRIMARY KEY (ID) USING INDEX ENABLE");
        assert_eq!(cleaned, vec!["PRIMARY", "KEY", "(", "ID", ")"]);
    }

    #[test]
    fn test_keeps_column_named_enable() {
        let cleaned = clean("(ENABLE NUMBER(1), X INT)");
        assert_eq!(cleaned[1], "ENABLE");
    }
}
