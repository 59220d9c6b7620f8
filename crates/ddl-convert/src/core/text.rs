//! Whitespace normalization for comparing generated DDL.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static AFTER_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\s+").expect("valid regex"));
static BEFORE_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+\)").expect("valid regex"));
static AFTER_SEMICOLON: Lazy<Regex> = Lazy::new(|| Regex::new(r";\s+").expect("valid regex"));

/// Collapse DDL text to a single-line form.
///
/// Runs of whitespace become one space, whitespace directly inside
/// parentheses and after `;` is removed, and the result is trimmed.
/// Two DDL texts that differ only in layout compress to the same string.
pub fn compress(sql: &str) -> String {
    let collapsed = WHITESPACE.replace_all(sql, " ");
    let collapsed = AFTER_OPEN.replace_all(&collapsed, "(");
    let collapsed = BEFORE_CLOSE.replace_all(&collapsed, ")");
    let collapsed = AFTER_SEMICOLON.replace_all(&collapsed, ";");
    collapsed.trim().to_string()
}
