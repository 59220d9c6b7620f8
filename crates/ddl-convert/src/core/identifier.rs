//! Identifier validation, quote stripping and target quoting.
//!
//! Source identifiers arrive quoted in whatever style the source dialect uses
//! (`"ID"`, `` `id` ``, `[Id]`). They are stripped to their bare value during
//! extraction and re-quoted for the target engine during generation. Both
//! supported engines quote with backticks.
//!
//! # Security
//!
//! Generated DDL is meant to be executed, so every identifier is validated
//! and quoted unconditionally. Embedded quote characters are escaped by
//! doubling, and string literals are escaped per engine.

use crate::error::{ConvertError, Result};

/// Maximum identifier length in bytes.
pub const MAX_IDENTIFIER_LENGTH: usize = 128;

/// Validate an identifier before it is emitted.
///
/// Rejects:
/// - Empty identifiers
/// - Identifiers containing null bytes
/// - Identifiers exceeding [`MAX_IDENTIFIER_LENGTH`]
///
/// # Errors
///
/// Returns `ConvertError::InvalidArgument` with a descriptive message.
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ConvertError::invalid_argument("", "Identifier cannot be empty"));
    }

    if name.contains('\0') {
        return Err(ConvertError::invalid_argument(
            "",
            format!("Identifier contains null byte: {:?}", name),
        ));
    }

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(ConvertError::invalid_argument(
            "",
            format!(
                "Identifier exceeds maximum length of {} bytes (got {} bytes): {:?}",
                MAX_IDENTIFIER_LENGTH,
                name.len(),
                name
            ),
        ));
    }

    Ok(())
}

/// Strip one level of source quoting from an identifier.
///
/// Handles `"name"`, `` `name` `` and `[name]`, un-doubling escaped quote
/// characters inside. Unquoted input is returned unchanged.
pub fn strip_quotes(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
        return trimmed.to_string();
    };

    let inner = &trimmed[first.len_utf8()..trimmed.len() - last.len_utf8()];
    match (first, last) {
        ('"', '"') => inner.replace("\"\"", "\""),
        ('`', '`') => inner.replace("``", "`"),
        ('[', ']') => inner.replace("]]", "]"),
        _ => trimmed.to_string(),
    }
}

/// Quote an identifier with backticks.
///
/// Escapes backticks by doubling them and wraps in backticks.
/// Validates the identifier before quoting.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(quote_backtick("users")?, "`users`");
/// assert_eq!(quote_backtick("table`name")?, "`table``name`");
/// ```
pub fn quote_backtick(name: &str) -> Result<String> {
    validate_identifier(name)?;
    Ok(format!("`{}`", name.replace('`', "``")))
}

/// Qualify a dotted name, quoting every part with backticks.
pub fn qualify_backtick(parts: &[&str]) -> Result<String> {
    let quoted = parts
        .iter()
        .map(|part| quote_backtick(part))
        .collect::<Result<Vec<_>>>()?;
    Ok(quoted.join("."))
}

/// Quote a string literal, escaping embedded single quotes by doubling.
pub fn quote_literal_doubled(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Quote a string literal, escaping backslashes and single quotes with a
/// backslash.
pub fn quote_literal_backslash(text: &str) -> String {
    format!("'{}'", text.replace('\\', "\\\\").replace('\'', "\\'"))
}
