//! Core traits for dialect-aware DDL conversion.
//!
//! This module defines the seams the converter is assembled from:
//!
//! - [`SourceRules`]: per-source-dialect tokenizer choice and pre-clean
//! - [`TargetRules`]: per-engine identifier and literal quoting
//! - [`TypeMapper`]: maps resolved source types to engine types
//!
//! # Design Patterns
//!
//! - **Strategy**: rules and mappers provide interchangeable algorithms
//! - **Template Method**: default methods on [`SourceRules`] define the
//!   pre-clean skeleton; dialects only list what to drop

use sqlparser::dialect::Dialect as SqlDialect;
use sqlparser::tokenizer::Token;

use crate::error::Result;

use super::schema::ResolvedFieldFormat;

/// Source-dialect behavior consumed by the parser.
pub trait SourceRules: Send + Sync {
    /// Get the dialect identifier (e.g., "oracle", "mysql").
    fn name(&self) -> &str;

    /// The `sqlparser` dialect used to tokenize this source.
    fn tokenizer_dialect(&self) -> Box<dyn SqlDialect>;

    /// Keyword sequences removed from the token stream before statements
    /// are read. Matched case-insensitively on unquoted words.
    fn strip_sequences(&self) -> &'static [&'static [&'static str]];

    /// Remove storage/engine-only keywords from a token stream.
    ///
    /// Whitespace and comment tokens must already be filtered out.
    fn pre_clean(&self, tokens: Vec<Token>) -> Vec<Token> {
        strip_keyword_sequences(tokens, self.strip_sequences())
    }
}

/// Drop every occurrence of the given unquoted keyword sequences.
pub fn strip_keyword_sequences(tokens: Vec<Token>, sequences: &[&[&str]]) -> Vec<Token> {
    if sequences.is_empty() {
        return tokens;
    }

    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    'outer: while i < tokens.len() {
        for seq in sequences {
            if matches_keywords(&tokens[i..], seq) {
                i += seq.len();
                continue 'outer;
            }
        }
        out.push(tokens[i].clone());
        i += 1;
    }
    out
}

/// Whether `tokens` starts with the unquoted keyword sequence `seq`.
pub(crate) fn matches_keywords(tokens: &[Token], seq: &[&str]) -> bool {
    if tokens.len() < seq.len() {
        return false;
    }
    tokens.iter().zip(seq).all(|(token, keyword)| match token {
        Token::Word(w) => w.quote_style.is_none() && w.value.eq_ignore_ascii_case(keyword),
        _ => false,
    })
}

/// Target-engine syntax used by the generator.
pub trait TargetRules: Send + Sync {
    /// Get the engine identifier (e.g., "flink", "spark").
    fn name(&self) -> &str;

    /// Quote an identifier (table name, column name, etc.).
    fn quote_ident(&self, name: &str) -> Result<String>;

    /// Quote a string literal for COMMENT clauses.
    fn quote_literal(&self, text: &str) -> String;

    /// Quote a dotted name part by part.
    fn qualify(&self, parts: &[&str]) -> Result<String> {
        let quoted = parts
            .iter()
            .map(|part| self.quote_ident(part))
            .collect::<Result<Vec<_>>>()?;
        Ok(quoted.join("."))
    }
}

/// Maps column types between a source dialect and a target engine.
///
/// # Design Pattern
///
/// TypeMapper uses **(source, target) pair keying**: mappers are registered
/// for specific source→engine combinations in a
/// [`DialectCatalog`](super::catalog::DialectCatalog).
pub trait TypeMapper: Send + Sync {
    /// Get the source dialect name.
    fn source_dialect(&self) -> &str;

    /// Get the target engine name.
    fn target_dialect(&self) -> &str;

    /// Map a resolved source type to an engine type.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::UnsupportedType` when the source type is not
    /// in the dialect's table. The column name is left empty for the caller
    /// to fill in.
    fn map_format(&self, format: &ResolvedFieldFormat) -> Result<TypeMapping>;
}

/// Result of mapping a type from source to target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapping {
    /// Target type string (e.g., "DECIMAL(15, 5)", "STRING").
    pub target_type: String,
    /// Whether this mapping loses data or precision.
    pub is_lossy: bool,
    /// Warning message for lossy mappings.
    pub warning: Option<String>,
}

impl TypeMapping {
    /// Create a lossless type mapping.
    pub fn lossless(target_type: impl Into<String>) -> Self {
        Self {
            target_type: target_type.into(),
            is_lossy: false,
            warning: None,
        }
    }

    /// Create a lossy type mapping with a warning.
    pub fn lossy(target_type: impl Into<String>, warning: impl Into<String>) -> Self {
        Self {
            target_type: target_type.into(),
            is_lossy: true,
            warning: Some(warning.into()),
        }
    }
}
