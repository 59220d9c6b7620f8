//! DDL statement reader.
//!
//! Raw DDL text is tokenized with `sqlparser`'s tokenizer using the source
//! dialect's tokenizer settings, split into statements at top-level `;`,
//! pre-cleaned by the dialect rules, and then read into [`Statement`]s.
//! Only the statement kinds conversion needs are read structurally:
//!
//! - `CREATE [GLOBAL|TEMPORARY|OR REPLACE] TABLE [IF NOT EXISTS] name (...)`
//! - `COMMENT ON COLUMN [schema.]table.column IS '...'`
//! - `COMMENT ON TABLE [schema.]table IS '...'`
//!
//! Everything else becomes [`Statement::Other`].

mod reader;
mod statement;

use sqlparser::tokenizer::{Token, Tokenizer};
use tracing::debug;

use crate::core::traits::SourceRules;
use crate::error::{ConvertError, Result};

pub use statement::{
    ColumnComment, ColumnDef, CreateTable, Ident, ObjectName, SpecToken, Statement, TableComment,
};

/// Parse a batch of DDL statements.
///
/// # Errors
///
/// Returns `ConvertError::SqlSyntax` when the text cannot be tokenized or a
/// recognized statement is malformed. The error carries the statement text.
pub fn parse_statements<R>(sql: &str, rules: &R) -> Result<Vec<Statement>>
where
    R: SourceRules + ?Sized,
{
    let dialect = rules.tokenizer_dialect();
    let tokens = Tokenizer::new(dialect.as_ref(), sql)
        .tokenize()
        .map_err(|e| ConvertError::syntax(rules.name(), e.to_string(), sql.trim()))?;

    let mut statements = Vec::new();
    for raw in split_statements(tokens) {
        let text = raw.iter().map(|t| t.to_string()).collect::<String>();
        let text = text.trim();

        let significant: Vec<Token> = raw
            .into_iter()
            .filter(|t| !matches!(t, Token::Whitespace(_) | Token::EOF))
            .collect();
        if significant.is_empty() {
            continue;
        }

        let cleaned = rules.pre_clean(significant);
        let statement = reader::read_statement(&cleaned, text)
            .map_err(|message| ConvertError::syntax(rules.name(), message, text))?;
        statements.push(statement);
    }

    debug!(
        dialect = rules.name(),
        statements = statements.len(),
        "Parsed DDL batch"
    );
    Ok(statements)
}

/// Split a token stream at `;` tokens outside parentheses.
fn split_statements(tokens: Vec<Token>) -> Vec<Vec<Token>> {
    let mut statements = Vec::new();
    let mut current = Vec::new();
    let mut depth: i64 = 0;

    for token in tokens {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => depth -= 1,
            Token::SemiColon if depth <= 0 => {
                statements.push(std::mem::take(&mut current));
                depth = 0;
                continue;
            }
            Token::EOF => continue,
            _ => {}
        }
        current.push(token);
    }
    statements.push(current);
    statements
}
