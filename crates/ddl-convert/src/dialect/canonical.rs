//! Hub-and-spoke canonical type system for dialect type mapping.
//!
//! Instead of one direct table per (source dialect, target engine) pair,
//! every source converts into [`CanonicalType`] and every engine converts out
//! of it:
//! - `ToCanonical`: resolved source type → canonical type
//! - `FromCanonical`: canonical type → engine type token
//!
//! ```text
//! Source dialect  →  CanonicalType         →  Target engine
//!   Oracle NUMBER(15,5) →  Decimal(15,5)   →  Flink DECIMAL(15, 5)
//!   MySQL DATETIME(3)   →  DateTime(3)     →  Spark TIMESTAMP_NTZ
//! ```

use std::sync::Arc;

use tracing::warn;

use crate::core::schema::ResolvedFieldFormat;
use crate::core::traits::{TypeMapper, TypeMapping};
use crate::error::{ConvertError, Result};

/// Canonical type representation for cross-dialect type mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonicalType {
    // ===== Boolean =====
    /// Boolean/bit type.
    Boolean,

    // ===== Integer Types =====
    /// 8-bit signed integer.
    Int8,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,

    // ===== Floating Point =====
    /// 32-bit floating point.
    Float32,
    /// 64-bit floating point.
    Float64,

    // ===== Decimal =====
    /// Exact decimal with precision and scale.
    Decimal {
        /// Total number of digits (1-38).
        precision: u32,
        /// Number of digits after decimal point.
        scale: u32,
    },

    // ===== String Types =====
    /// Fixed-length character string.
    Char(u32),
    /// Variable-length character string with max length.
    Varchar(u32),
    /// Unbounded text.
    Text,

    // ===== Binary Types =====
    /// Unbounded binary data.
    Blob,

    // ===== Date/Time Types =====
    /// Date only.
    Date,
    /// Time of day with fractional second digits.
    Time(u32),
    /// Date and time without time zone, with fractional second digits.
    DateTime(u32),
    /// Instant in time (local time zone semantics), with fractional digits.
    DateTimeLtz(u32),
    /// Year-month or day-second interval.
    Interval,

    // ===== Fallback =====
    /// Type not present in the source dialect's table.
    Unknown(String),
}

impl std::fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CanonicalType::Boolean => write!(f, "Boolean"),
            CanonicalType::Int8 => write!(f, "Int8"),
            CanonicalType::Int16 => write!(f, "Int16"),
            CanonicalType::Int32 => write!(f, "Int32"),
            CanonicalType::Int64 => write!(f, "Int64"),
            CanonicalType::Float32 => write!(f, "Float32"),
            CanonicalType::Float64 => write!(f, "Float64"),
            CanonicalType::Decimal { precision, scale } => {
                write!(f, "Decimal({},{})", precision, scale)
            }
            CanonicalType::Char(n) => write!(f, "Char({})", n),
            CanonicalType::Varchar(n) => write!(f, "Varchar({})", n),
            CanonicalType::Text => write!(f, "Text"),
            CanonicalType::Blob => write!(f, "Blob"),
            CanonicalType::Date => write!(f, "Date"),
            CanonicalType::Time(p) => write!(f, "Time({})", p),
            CanonicalType::DateTime(p) => write!(f, "DateTime({})", p),
            CanonicalType::DateTimeLtz(p) => write!(f, "DateTimeLtz({})", p),
            CanonicalType::Interval => write!(f, "Interval"),
            CanonicalType::Unknown(name) => write!(f, "Unknown({})", name),
        }
    }
}

/// Result of converting a source type to canonical form.
#[derive(Debug, Clone)]
pub struct CanonicalTypeInfo {
    /// The canonical type representation.
    pub canonical_type: CanonicalType,
    /// Whether information was lost in the conversion to canonical.
    pub is_lossy: bool,
    /// Warning message if the conversion is lossy.
    pub warning: Option<String>,
}

impl CanonicalTypeInfo {
    /// Create a lossless canonical type conversion.
    pub fn lossless(canonical_type: CanonicalType) -> Self {
        Self {
            canonical_type,
            is_lossy: false,
            warning: None,
        }
    }

    /// Create a lossy canonical type conversion with a warning.
    pub fn lossy(canonical_type: CanonicalType, warning: impl Into<String>) -> Self {
        Self {
            canonical_type,
            is_lossy: true,
            warning: Some(warning.into()),
        }
    }

    /// Unknown type marker; the composed mapper turns it into an error.
    pub fn unknown(type_name: impl Into<String>) -> Self {
        Self::lossless(CanonicalType::Unknown(type_name.into()))
    }
}

/// Convert source dialect types to canonical types.
///
/// Implementations receive the format already normalized (upper case type
/// name, single spaces).
pub trait ToCanonical: Send + Sync {
    /// Get the dialect name (e.g., "oracle", "mysql").
    fn dialect_name(&self) -> &str;

    /// Convert a resolved source type to canonical form.
    fn to_canonical(&self, format: &ResolvedFieldFormat) -> CanonicalTypeInfo;
}

/// Convert canonical types to target engine types.
#[allow(clippy::wrong_self_convention)]
pub trait FromCanonical: Send + Sync {
    /// Get the engine name (e.g., "flink", "spark").
    fn dialect_name(&self) -> &str;

    /// Convert a canonical type to an engine type token.
    ///
    /// Never called with [`CanonicalType::Unknown`].
    fn from_canonical(&self, canonical: &CanonicalType) -> TypeMapping;
}

/// Composed type mapper that chains ToCanonical and FromCanonical conversions.
///
/// # Example
///
/// ```rust,ignore
/// let mapper = ComposedMapper::new(
///     Arc::new(OracleToCanonical),
///     Arc::new(FlinkFromCanonical),
/// );
/// let mapping = mapper.map_format(&ResolvedFieldFormat::new("NUMBER", Some(15), Some(5)))?;
/// assert_eq!(mapping.target_type, "DECIMAL(15, 5)");
/// ```
pub struct ComposedMapper {
    /// Converts source types to canonical.
    source_converter: Arc<dyn ToCanonical>,
    /// Converts canonical types to target.
    target_converter: Arc<dyn FromCanonical>,
}

impl ComposedMapper {
    /// Create a new composed mapper.
    pub fn new(
        source_converter: Arc<dyn ToCanonical>,
        target_converter: Arc<dyn FromCanonical>,
    ) -> Self {
        Self {
            source_converter,
            target_converter,
        }
    }
}

impl std::fmt::Debug for ComposedMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposedMapper")
            .field("source", &self.source_converter.dialect_name())
            .field("target", &self.target_converter.dialect_name())
            .finish()
    }
}

impl TypeMapper for ComposedMapper {
    fn source_dialect(&self) -> &str {
        self.source_converter.dialect_name()
    }

    fn target_dialect(&self) -> &str {
        self.target_converter.dialect_name()
    }

    fn map_format(&self, format: &ResolvedFieldFormat) -> Result<TypeMapping> {
        let normalized = format.normalized();

        // Step 1: Source type → Canonical
        let canonical_info = self.source_converter.to_canonical(&normalized);
        if let CanonicalType::Unknown(type_name) = &canonical_info.canonical_type {
            return Err(ConvertError::unsupported_type(
                self.source_converter.dialect_name(),
                type_name.clone(),
                "",
            ));
        }

        // Step 2: Canonical → Target type
        let mut target_mapping = self
            .target_converter
            .from_canonical(&canonical_info.canonical_type);

        // Combine lossy flags and warnings from both steps
        if canonical_info.is_lossy {
            target_mapping.is_lossy = true;
            match (&canonical_info.warning, &target_mapping.warning) {
                (Some(src_warn), Some(tgt_warn)) => {
                    target_mapping.warning = Some(format!("{} {}", src_warn, tgt_warn));
                }
                (Some(src_warn), None) => {
                    target_mapping.warning = Some(src_warn.clone());
                }
                (None, _) => {}
            }
        }

        if let Some(warning) = &target_mapping.warning {
            warn!(
                source = self.source_dialect(),
                target = self.target_dialect(),
                type_name = %normalized.type_name,
                "Lossy type mapping: {}",
                warning
            );
        }

        Ok(target_mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_type_display() {
        assert_eq!(format!("{}", CanonicalType::Int32), "Int32");
        assert_eq!(
            format!(
                "{}",
                CanonicalType::Decimal {
                    precision: 10,
                    scale: 2
                }
            ),
            "Decimal(10,2)"
        );
        assert_eq!(format!("{}", CanonicalType::DateTime(6)), "DateTime(6)");
    }

    #[test]
    fn test_canonical_type_info_lossy() {
        let info = CanonicalTypeInfo::lossy(CanonicalType::Text, "Precision 40 exceeds 38.");
        assert_eq!(info.canonical_type, CanonicalType::Text);
        assert!(info.is_lossy);
        assert_eq!(info.warning.as_deref(), Some("Precision 40 exceeds 38."));
    }

    // Mock converters for testing ComposedMapper
    struct MockToCanonical;
    impl ToCanonical for MockToCanonical {
        fn dialect_name(&self) -> &str {
            "mock_source"
        }

        fn to_canonical(&self, format: &ResolvedFieldFormat) -> CanonicalTypeInfo {
            match format.type_name.as_str() {
                "INT" => CanonicalTypeInfo::lossless(CanonicalType::Int32),
                "WIDE" => CanonicalTypeInfo::lossy(CanonicalType::Text, "Too wide."),
                other => CanonicalTypeInfo::unknown(other),
            }
        }
    }

    struct MockFromCanonical;
    impl FromCanonical for MockFromCanonical {
        fn dialect_name(&self) -> &str {
            "mock_target"
        }

        fn from_canonical(&self, canonical: &CanonicalType) -> TypeMapping {
            match canonical {
                CanonicalType::Int32 => TypeMapping::lossless("INT"),
                _ => TypeMapping::lossless("STRING"),
            }
        }
    }

    fn mapper() -> ComposedMapper {
        ComposedMapper::new(Arc::new(MockToCanonical), Arc::new(MockFromCanonical))
    }

    #[test]
    fn test_composed_mapper_lossless() {
        let mapper = mapper();
        assert_eq!(mapper.source_dialect(), "mock_source");
        assert_eq!(mapper.target_dialect(), "mock_target");

        let mapping = mapper
            .map_format(&ResolvedFieldFormat::new("int", None, None))
            .unwrap();
        assert_eq!(mapping.target_type, "INT");
        assert!(!mapping.is_lossy);
    }

    #[test]
    fn test_composed_mapper_lossy_from_source() {
        let mapping = mapper()
            .map_format(&ResolvedFieldFormat::new("WIDE", None, None))
            .unwrap();
        assert_eq!(mapping.target_type, "STRING");
        assert!(mapping.is_lossy);
        assert_eq!(mapping.warning.as_deref(), Some("Too wide."));
    }

    #[test]
    fn test_composed_mapper_unknown_is_error() {
        let err = mapper()
            .map_format(&ResolvedFieldFormat::new("geo point", None, None))
            .unwrap_err();
        match err {
            ConvertError::UnsupportedType {
                dialect, type_name, ..
            } => {
                assert_eq!(dialect, "mock_source");
                assert_eq!(type_name, "GEO POINT");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
