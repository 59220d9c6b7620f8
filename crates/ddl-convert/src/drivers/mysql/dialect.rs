//! MySQL/MariaDB source rules (Strategy pattern).

use sqlparser::dialect::{Dialect as SqlDialect, MySqlDialect};

use crate::core::traits::SourceRules;

/// MySQL/MariaDB dialect rules.
///
/// Compatible with MySQL 5.7+, 8.0+, and MariaDB 10.2+ `SHOW CREATE TABLE`
/// output.
#[derive(Debug, Clone, Default)]
pub struct MysqlRules;

impl MysqlRules {
    /// Create a new MySQL rules instance.
    pub fn new() -> Self {
        Self
    }
}

impl SourceRules for MysqlRules {
    fn name(&self) -> &str {
        "mysql"
    }

    fn tokenizer_dialect(&self) -> Box<dyn SqlDialect> {
        Box::new(MySqlDialect {})
    }

    fn strip_sequences(&self) -> &'static [&'static [&'static str]] {
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlparser::tokenizer::{Token, Tokenizer};

    #[test]
    fn test_mysql_rules_name() {
        assert_eq!(MysqlRules::new().name(), "mysql");
    }

    #[test]
    fn test_mysql_tokenizer_reads_backticks() {
        let rules = MysqlRules::new();
        let dialect = rules.tokenizer_dialect();
        let tokens = Tokenizer::new(dialect.as_ref(), "`user id`").tokenize().unwrap();
        match &tokens[0] {
            Token::Word(w) => {
                assert_eq!(w.value, "user id");
                assert_eq!(w.quote_style, Some('`'));
            }
            other => panic!("unexpected token: {other:?}"),
        }
    }

    #[test]
    fn test_mysql_pre_clean_keeps_tokens() {
        let tokens = vec![Token::Comma, Token::LParen];
        assert_eq!(MysqlRules::new().pre_clean(tokens.clone()), tokens);
    }
}
