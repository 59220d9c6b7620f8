//! Type argument interpretation.
//!
//! Every code path that turns raw type arguments into precision and scale
//! goes through [`resolve`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::schema::{RawColumnType, ResolvedFieldFormat};

/// `<digits><whitespace><qualifier>`, as in `VARCHAR2(32 CHAR)`.
static QUALIFIED_LENGTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s+\S.*$").expect("valid regex"));

/// Interpret raw type arguments as precision and scale.
///
/// - no arguments: neither is known
/// - one argument: a plain number is the precision; a number followed by a
///   qualifier word contributes its digits; anything else is unknown
/// - two arguments: each is read on its own as a plain number
/// - more than two: neither is known
///
/// The type name is carried through unchanged.
pub fn resolve(type_name: &str, arguments: &[String]) -> ResolvedFieldFormat {
    let (precision, scale) = match arguments {
        [] => (None, None),
        [only] => (leading_length(only), None),
        [first, second] => (numeric(first), numeric(second)),
        _ => (None, None),
    };

    ResolvedFieldFormat::new(type_name, precision, scale)
}

/// [`resolve`] applied to a parsed column type.
pub fn resolve_raw(raw: &RawColumnType) -> ResolvedFieldFormat {
    resolve(&raw.type_name, &raw.arguments)
}

fn numeric(arg: &str) -> Option<u32> {
    let arg = arg.trim();
    if arg.is_empty() || !arg.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    arg.parse().ok()
}

fn leading_length(arg: &str) -> Option<u32> {
    let arg = arg.trim();
    numeric(arg).or_else(|| {
        QUALIFIED_LENGTH
            .captures(arg)
            .and_then(|caps| caps.get(1))
            .and_then(|digits| digits.as_str().parse().ok())
    })
}
