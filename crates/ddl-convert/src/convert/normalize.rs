//! Identifier and fragment normalization.
//!
//! - [`clean_column_spec`]: keeps nullability, drops everything else
//! - [`NamingPolicy`]: case and affix rules for emitted identifiers
//! - [`DuplicateTracker`]: collision handling on `(catalog, database, table)`

use std::fmt;
use std::str::FromStr;

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::identifier::validate_identifier;
use crate::core::schema::ConversionResult;
use crate::error::{ConvertError, Result};
use crate::parser::SpecToken;

// =============================================================================
// Column specifiers
// =============================================================================

/// Reduce a column's specifier tokens to the clause the target can express.
///
/// Only nullability survives (`NOT NULL` or `NULL`, the last one written
/// wins). `DEFAULT <expr>` is removed together with its expression; inline
/// constraints, constraint states, `AUTO_INCREMENT`, charset/collation,
/// `ON UPDATE`, `GENERATED` and inline comments are dropped. Tokens inside
/// parentheses (`CHECK (x IS NOT NULL)`) never count as nullability.
///
/// This is an allow-list: stricter than stripping only `DEFAULT <token>`
/// and `ENABLE`, which passes every other clause through.
pub fn clean_column_spec(column: &str, specs: &[SpecToken]) -> Option<String> {
    let mut nullability: Option<&'static str> = None;
    let mut dropped: Vec<String> = Vec::new();
    let mut depth = 0usize;
    let mut i = 0;

    while i < specs.len() {
        let token = &specs[i];
        if depth == 0 {
            if token.is_keyword("NOT") && specs.get(i + 1).is_some_and(|t| t.is_keyword("NULL")) {
                nullability = Some("NOT NULL");
                i += 2;
                continue;
            }
            if token.is_keyword("NULL") {
                nullability = Some("NULL");
                i += 1;
                continue;
            }
            if token.is_keyword("DEFAULT") {
                let end = default_expression_end(specs, i + 1);
                dropped.extend(specs[i..end].iter().map(|t| t.to_string()));
                i = end;
                continue;
            }
        }

        if token.is_symbol("(") {
            depth += 1;
        } else if token.is_symbol(")") {
            depth = depth.saturating_sub(1);
        }
        dropped.push(token.to_string());
        i += 1;
    }

    if !dropped.is_empty() {
        debug!("{}: dropped column specifiers: {}", column, dropped.join(" "));
    }
    nullability.map(str::to_string)
}

/// Index just past the expression following `DEFAULT`.
///
/// An expression is an optional sign, one token and, when that token is a
/// function name, its parenthesized arguments. A leading `(` group counts as
/// the whole expression.
fn default_expression_end(specs: &[SpecToken], start: usize) -> usize {
    let mut i = start;
    while specs.get(i).is_some_and(|t| t.is_symbol("-") || t.is_symbol("+")) {
        i += 1;
    }

    match specs.get(i) {
        Some(token) if token.is_symbol("(") => skip_group(specs, i),
        Some(_) => {
            i += 1;
            if specs.get(i).is_some_and(|t| t.is_symbol("(")) {
                skip_group(specs, i)
            } else {
                i
            }
        }
        None => i,
    }
}

/// Index just past the `)` matching the `(` at `open`.
fn skip_group(specs: &[SpecToken], open: usize) -> usize {
    let mut depth = 0usize;
    for (offset, token) in specs[open..].iter().enumerate() {
        if token.is_symbol("(") {
            depth += 1;
        } else if token.is_symbol(")") {
            depth -= 1;
            if depth == 0 {
                return open + offset + 1;
            }
        }
    }
    specs.len()
}

// =============================================================================
// Naming policy
// =============================================================================

/// Letter case applied to emitted identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStrategy {
    /// Keep identifiers as written.
    #[default]
    Preserve,
    #[serde(alias = "uppercase")]
    Upper,
    #[serde(alias = "lowercase")]
    Lower,
}

impl CaseStrategy {
    pub fn apply(&self, name: &str) -> String {
        match self {
            CaseStrategy::Preserve => name.to_string(),
            CaseStrategy::Upper => name.to_uppercase(),
            CaseStrategy::Lower => name.to_lowercase(),
        }
    }
}

impl FromStr for CaseStrategy {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "preserve" | "none" => Ok(CaseStrategy::Preserve),
            "upper" | "uppercase" => Ok(CaseStrategy::Upper),
            "lower" | "lowercase" => Ok(CaseStrategy::Lower),
            other => Err(ConvertError::Config(format!(
                "Unknown case strategy: '{}'. Supported: preserve, upper, lower",
                other
            ))),
        }
    }
}

/// Literal added to the front or back of a database or table name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Affix {
    #[default]
    None,
    Prefix(String),
    Suffix(String),
}

impl Affix {
    pub fn apply(&self, name: &str) -> String {
        match self {
            Affix::None => name.to_string(),
            Affix::Prefix(value) => format!("{}{}", value, name),
            Affix::Suffix(value) => format!("{}{}", name, value),
        }
    }

    /// The literal, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Affix::None => None,
            Affix::Prefix(value) | Affix::Suffix(value) => Some(value),
        }
    }

    /// Reject affix literals that could not appear in an identifier.
    pub fn validate(&self) -> Result<()> {
        match self.value() {
            Some(value) => validate_identifier(value),
            None => Ok(()),
        }
    }
}

/// Parses `none`, `prefix:VALUE` or `suffix:VALUE`.
impl FromStr for Affix {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("none") {
            return Ok(Affix::None);
        }
        let (kind, value) = s.split_once(':').ok_or_else(|| {
            ConvertError::Config(format!(
                "Invalid affix '{}': expected prefix:VALUE or suffix:VALUE",
                s
            ))
        })?;
        match kind.trim().to_lowercase().as_str() {
            "prefix" => Ok(Affix::Prefix(value.to_string())),
            "suffix" => Ok(Affix::Suffix(value.to_string())),
            other => Err(ConvertError::Config(format!(
                "Unknown affix strategy: '{}'. Supported: prefix, suffix",
                other
            ))),
        }
    }
}

/// What to do when two tables map to the same target identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateStrategy {
    /// Keep the first table, drop later ones.
    #[default]
    Ignore,
    /// Replace the earlier table with the later one, keeping its position.
    Overwrite,
    /// Fail with `DuplicateTable`.
    #[serde(alias = "fail")]
    Error,
}

impl FromStr for DuplicateStrategy {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ignore" => Ok(DuplicateStrategy::Ignore),
            "overwrite" => Ok(DuplicateStrategy::Overwrite),
            "error" | "fail" => Ok(DuplicateStrategy::Error),
            other => Err(ConvertError::Config(format!(
                "Unknown duplicate strategy: '{}'. Supported: ignore, overwrite, error",
                other
            ))),
        }
    }
}

impl fmt::Display for DuplicateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DuplicateStrategy::Ignore => "ignore",
            DuplicateStrategy::Overwrite => "overwrite",
            DuplicateStrategy::Error => "error",
        })
    }
}

/// Case, affix and duplicate rules for one conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingPolicy {
    pub case: CaseStrategy,
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub database_affix: Affix,
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub table_affix: Affix,
    pub duplicate: DuplicateStrategy,
}

impl NamingPolicy {
    pub fn apply_catalog(&self, name: &str) -> String {
        self.case.apply(name)
    }

    /// Affix first, then case, so the affix literal is cased too.
    pub fn apply_database(&self, name: &str) -> String {
        self.case.apply(&self.database_affix.apply(name))
    }

    /// Affix first, then case, so the affix literal is cased too.
    pub fn apply_table(&self, name: &str) -> String {
        self.case.apply(&self.table_affix.apply(name))
    }

    pub fn apply_column(&self, name: &str) -> String {
        self.case.apply(name)
    }

    /// Check both affix literals, reporting failures against `dialect`.
    pub fn validate(&self, dialect: &str) -> Result<()> {
        self.database_affix
            .validate()
            .and_then(|()| self.table_affix.validate())
            .map_err(|e| e.in_dialect(dialect))
    }
}

// =============================================================================
// Duplicate tracking
// =============================================================================

/// Collects results in source order, resolving `(catalog, database, table)`
/// collisions by a [`DuplicateStrategy`].
#[derive(Debug)]
pub struct DuplicateTracker {
    strategy: DuplicateStrategy,
    dialect: String,
    results: IndexMap<(String, String, String), ConversionResult>,
}

impl DuplicateTracker {
    /// `dialect` is the source dialect named in `DuplicateTable` errors.
    pub fn new(strategy: DuplicateStrategy, dialect: impl Into<String>) -> Self {
        Self {
            strategy,
            dialect: dialect.into(),
            results: IndexMap::new(),
        }
    }

    /// Add a result. Returns whether it was kept.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateTable` for a collision under
    /// [`DuplicateStrategy::Error`]. The tracker is left unchanged.
    pub fn insert(&mut self, result: ConversionResult) -> Result<bool> {
        let key = (
            result.catalog.clone(),
            result.database.clone(),
            result.table_name.clone(),
        );
        match self.results.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(result);
                Ok(true)
            }
            Entry::Occupied(mut entry) => match self.strategy {
                DuplicateStrategy::Ignore => {
                    warn!("Duplicate table {}: keeping the first definition", result.full_name());
                    Ok(false)
                }
                DuplicateStrategy::Overwrite => {
                    warn!("Duplicate table {}: overwriting the earlier definition", result.full_name());
                    entry.insert(result);
                    Ok(true)
                }
                DuplicateStrategy::Error => Err(ConvertError::duplicate_table(
                    self.dialect.as_str(),
                    result.full_name(),
                )),
            },
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Results in first-seen order.
    pub fn into_results(self) -> Vec<ConversionResult> {
        self.results.into_values().collect()
    }
}
