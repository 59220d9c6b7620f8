//! Per-dialect canonical type converters.
//!
//! Source converters receive a normalized [`ResolvedFieldFormat`] (upper-case
//! type name, single spaces). Engine converters render canonical types as
//! the engine's SQL type tokens.

use crate::core::schema::ResolvedFieldFormat;
use crate::core::traits::TypeMapping;

use super::canonical::{CanonicalType, CanonicalTypeInfo, FromCanonical, ToCanonical};

/// Largest decimal precision every supported engine accepts.
pub const MAX_DECIMAL_PRECISION: u32 = 38;

/// Largest fractional-second precision Flink accepts.
pub const FLINK_MAX_FRACTION: u32 = 9;

/// Fractional-second precision Spark timestamps store.
pub const SPARK_FRACTION: u32 = 6;

/// Exact decimal shared by all sources: scale defaults to 0, scale larger
/// than precision widens the precision, and precision above
/// [`MAX_DECIMAL_PRECISION`] degrades to text.
fn decimal(dialect: &str, precision: u32, scale: Option<u32>) -> CanonicalTypeInfo {
    let scale = scale.unwrap_or(0);
    let precision = precision.max(scale);

    if precision > MAX_DECIMAL_PRECISION {
        return CanonicalTypeInfo::lossy(
            CanonicalType::Text,
            format!(
                "{} decimal precision {} exceeds {}; stored as text.",
                dialect, precision, MAX_DECIMAL_PRECISION
            ),
        );
    }

    CanonicalTypeInfo::lossless(CanonicalType::Decimal { precision, scale })
}

// =============================================================================
// Source converters
// =============================================================================

/// Oracle to canonical type converter.
#[derive(Debug, Clone, Default)]
pub struct OracleToCanonical;

impl OracleToCanonical {
    /// Create a new Oracle to canonical converter.
    pub fn new() -> Self {
        Self
    }
}

impl ToCanonical for OracleToCanonical {
    fn dialect_name(&self) -> &str {
        "oracle"
    }

    fn to_canonical(&self, format: &ResolvedFieldFormat) -> CanonicalTypeInfo {
        oracle_to_canonical("oracle", format)
    }
}

fn oracle_to_canonical(dialect: &str, format: &ResolvedFieldFormat) -> CanonicalTypeInfo {
    let ResolvedFieldFormat {
        type_name,
        precision,
        scale,
    } = format;

    match type_name.as_str() {
        // Numbers. NUMBER without precision is Oracle's floating decimal.
        "NUMBER" | "NUMERIC" | "DECIMAL" | "DEC" => match (precision, scale) {
            (None, None) => CanonicalTypeInfo::lossless(CanonicalType::Decimal {
                precision: MAX_DECIMAL_PRECISION,
                scale: 18,
            }),
            (None, Some(s)) => decimal(dialect, MAX_DECIMAL_PRECISION, Some(*s)),
            (Some(p), s) => decimal(dialect, *p, *s),
        },
        "INTEGER" | "INT" | "SMALLINT" => CanonicalTypeInfo::lossless(CanonicalType::Decimal {
            precision: MAX_DECIMAL_PRECISION,
            scale: 0,
        }),

        // Floating point
        "FLOAT" | "BINARY_DOUBLE" | "DOUBLE PRECISION" | "REAL" => {
            CanonicalTypeInfo::lossless(CanonicalType::Float64)
        }
        "BINARY_FLOAT" => CanonicalTypeInfo::lossless(CanonicalType::Float32),

        // Character types
        "CHAR" | "NCHAR" | "VARCHAR" | "VARCHAR2" | "NVARCHAR2" | "CLOB" | "NCLOB" | "LONG"
        | "ROWID" | "UROWID" | "XMLTYPE" => CanonicalTypeInfo::lossless(CanonicalType::Text),

        // Date/time types. Oracle DATE carries a time of day.
        "DATE" => CanonicalTypeInfo::lossless(CanonicalType::DateTime(0)),
        "TIMESTAMP" => CanonicalTypeInfo::lossless(CanonicalType::DateTime(precision.unwrap_or(6))),
        "TIMESTAMP WITH TIME ZONE" | "TIMESTAMP WITH LOCAL TIME ZONE" => {
            CanonicalTypeInfo::lossless(CanonicalType::DateTimeLtz(precision.unwrap_or(6)))
        }
        "INTERVAL YEAR TO MONTH" | "INTERVAL DAY TO SECOND" => {
            CanonicalTypeInfo::lossless(CanonicalType::Interval)
        }

        // Binary types
        "RAW" | "LONG RAW" | "BLOB" | "BFILE" => CanonicalTypeInfo::lossless(CanonicalType::Blob),

        _ => CanonicalTypeInfo::unknown(type_name.clone()),
    }
}

/// DM (Dameng) to canonical type converter.
///
/// DM accepts the Oracle type names and adds its own; its own names take
/// precedence where the two disagree (`DATE`, `SMALLINT`).
#[derive(Debug, Clone, Default)]
pub struct DmToCanonical;

impl DmToCanonical {
    /// Create a new DM to canonical converter.
    pub fn new() -> Self {
        Self
    }
}

impl ToCanonical for DmToCanonical {
    fn dialect_name(&self) -> &str {
        "dm"
    }

    fn to_canonical(&self, format: &ResolvedFieldFormat) -> CanonicalTypeInfo {
        let precision = format.precision;

        match format.type_name.as_str() {
            "BIT" => CanonicalTypeInfo::lossless(CanonicalType::Boolean),
            "TINYINT" | "BYTE" => CanonicalTypeInfo::lossless(CanonicalType::Int8),
            "SMALLINT" => CanonicalTypeInfo::lossless(CanonicalType::Int16),
            "INT" | "INTEGER" | "PLS_INTEGER" => CanonicalTypeInfo::lossless(CanonicalType::Int32),
            "BIGINT" => CanonicalTypeInfo::lossless(CanonicalType::Int64),
            "DOUBLE" => CanonicalTypeInfo::lossless(CanonicalType::Float64),
            "REAL" => CanonicalTypeInfo::lossless(CanonicalType::Float32),
            "DATE" => CanonicalTypeInfo::lossless(CanonicalType::Date),
            "TIME" => CanonicalTypeInfo::lossless(CanonicalType::Time(precision.unwrap_or(0))),
            "DATETIME" => {
                CanonicalTypeInfo::lossless(CanonicalType::DateTime(precision.unwrap_or(6)))
            }
            "TEXT" | "LONGVARCHAR" => CanonicalTypeInfo::lossless(CanonicalType::Text),
            "IMAGE" | "LONGVARBINARY" | "BINARY" | "VARBINARY" => {
                CanonicalTypeInfo::lossless(CanonicalType::Blob)
            }
            _ => oracle_to_canonical("dm", format),
        }
    }
}

/// MySQL to canonical type converter.
#[derive(Debug, Clone, Default)]
pub struct MysqlToCanonical;

impl MysqlToCanonical {
    /// Create a new MySQL to canonical converter.
    pub fn new() -> Self {
        Self
    }
}

impl ToCanonical for MysqlToCanonical {
    fn dialect_name(&self) -> &str {
        "mysql"
    }

    fn to_canonical(&self, format: &ResolvedFieldFormat) -> CanonicalTypeInfo {
        let precision = format.precision;
        let scale = format.scale;

        // ZEROFILL only affects display; SIGNED is the default.
        let mut unsigned = false;
        let base: Vec<&str> = format
            .type_name
            .split(' ')
            .filter(|word| match *word {
                "UNSIGNED" => {
                    unsigned = true;
                    false
                }
                "SIGNED" | "ZEROFILL" => false,
                _ => true,
            })
            .collect();
        let base = base.join(" ");

        match base.as_str() {
            // Boolean (MySQL uses TINYINT(1) for bool)
            "BOOL" | "BOOLEAN" => CanonicalTypeInfo::lossless(CanonicalType::Boolean),
            "TINYINT" if precision == Some(1) => {
                CanonicalTypeInfo::lossless(CanonicalType::Boolean)
            }

            // Integer types; display widths are ignored
            "TINYINT" if unsigned => CanonicalTypeInfo::lossless(CanonicalType::Int16),
            "TINYINT" => CanonicalTypeInfo::lossless(CanonicalType::Int8),
            "SMALLINT" if unsigned => CanonicalTypeInfo::lossless(CanonicalType::Int32),
            "SMALLINT" => CanonicalTypeInfo::lossless(CanonicalType::Int16),
            "MEDIUMINT" => CanonicalTypeInfo::lossless(CanonicalType::Int32),
            "INT" | "INTEGER" if unsigned => CanonicalTypeInfo::lossless(CanonicalType::Int64),
            "INT" | "INTEGER" => CanonicalTypeInfo::lossless(CanonicalType::Int32),
            "BIGINT" if unsigned => CanonicalTypeInfo::lossless(CanonicalType::Decimal {
                precision: 20,
                scale: 0,
            }),
            "BIGINT" => CanonicalTypeInfo::lossless(CanonicalType::Int64),
            "SERIAL" => CanonicalTypeInfo::lossless(CanonicalType::Decimal {
                precision: 20,
                scale: 0,
            }),
            "YEAR" => CanonicalTypeInfo::lossless(CanonicalType::Int32),

            // Floating point
            "FLOAT" if precision.is_some_and(|p| p > 24) && scale.is_none() => {
                CanonicalTypeInfo::lossless(CanonicalType::Float64)
            }
            "FLOAT" => CanonicalTypeInfo::lossless(CanonicalType::Float32),
            "DOUBLE" | "DOUBLE PRECISION" | "REAL" => {
                CanonicalTypeInfo::lossless(CanonicalType::Float64)
            }

            // Decimal/numeric
            "DECIMAL" | "NUMERIC" | "DEC" | "FIXED" => {
                decimal("mysql", precision.unwrap_or(10), scale)
            }

            // String types
            "CHAR" => CanonicalTypeInfo::lossless(CanonicalType::Char(precision.unwrap_or(1))),
            "VARCHAR" => match precision {
                Some(len) => CanonicalTypeInfo::lossless(CanonicalType::Varchar(len)),
                None => CanonicalTypeInfo::lossless(CanonicalType::Text),
            },
            "TINYTEXT" | "TEXT" | "MEDIUMTEXT" | "LONGTEXT" | "ENUM" | "SET" | "JSON" => {
                CanonicalTypeInfo::lossless(CanonicalType::Text)
            }

            // Bit
            "BIT" => match precision {
                None | Some(1) => CanonicalTypeInfo::lossless(CanonicalType::Boolean),
                Some(_) => CanonicalTypeInfo::lossless(CanonicalType::Blob),
            },

            // Binary types
            "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
                CanonicalTypeInfo::lossless(CanonicalType::Blob)
            }

            // Date/time types
            "DATE" => CanonicalTypeInfo::lossless(CanonicalType::Date),
            "TIME" => CanonicalTypeInfo::lossless(CanonicalType::Time(precision.unwrap_or(0))),
            "DATETIME" => {
                CanonicalTypeInfo::lossless(CanonicalType::DateTime(precision.unwrap_or(0)))
            }
            "TIMESTAMP" => {
                CanonicalTypeInfo::lossless(CanonicalType::DateTimeLtz(precision.unwrap_or(0)))
            }

            // Spatial types (lossy)
            "GEOMETRY" | "POINT" | "LINESTRING" | "POLYGON" | "MULTIPOINT" | "MULTILINESTRING"
            | "MULTIPOLYGON" | "GEOMETRYCOLLECTION" => CanonicalTypeInfo::lossy(
                CanonicalType::Text,
                format!("MySQL spatial type '{}' stored as text.", base),
            ),

            _ => CanonicalTypeInfo::unknown(format.type_name.clone()),
        }
    }
}

// =============================================================================
// Engine converters
// =============================================================================

/// Canonical type to Flink SQL converter.
#[derive(Debug, Clone, Default)]
pub struct FlinkFromCanonical;

impl FlinkFromCanonical {
    /// Create a new canonical to Flink converter.
    pub fn new() -> Self {
        Self
    }

    fn fraction(kind: &str, precision: u32) -> TypeMapping {
        if precision > FLINK_MAX_FRACTION {
            TypeMapping::lossy(
                format!("{}({})", kind, FLINK_MAX_FRACTION),
                format!(
                    "Fractional precision {} exceeds Flink max of {}.",
                    precision, FLINK_MAX_FRACTION
                ),
            )
        } else {
            TypeMapping::lossless(format!("{}({})", kind, precision))
        }
    }
}

impl FromCanonical for FlinkFromCanonical {
    fn dialect_name(&self) -> &str {
        "flink"
    }

    fn from_canonical(&self, canonical: &CanonicalType) -> TypeMapping {
        match canonical {
            CanonicalType::Boolean => TypeMapping::lossless("BOOLEAN"),

            CanonicalType::Int8 => TypeMapping::lossless("TINYINT"),
            CanonicalType::Int16 => TypeMapping::lossless("SMALLINT"),
            CanonicalType::Int32 => TypeMapping::lossless("INT"),
            CanonicalType::Int64 => TypeMapping::lossless("BIGINT"),

            CanonicalType::Float32 => TypeMapping::lossless("FLOAT"),
            CanonicalType::Float64 => TypeMapping::lossless("DOUBLE"),

            CanonicalType::Decimal { precision, scale } => {
                if *precision > MAX_DECIMAL_PRECISION {
                    TypeMapping::lossy(
                        "STRING",
                        format!(
                            "Precision {} exceeds Flink max of {}.",
                            precision, MAX_DECIMAL_PRECISION
                        ),
                    )
                } else {
                    let p = (*precision).max(1);
                    TypeMapping::lossless(format!("DECIMAL({}, {})", p, (*scale).min(p)))
                }
            }

            CanonicalType::Char(len) if *len > 0 => {
                TypeMapping::lossless(format!("CHAR({})", len))
            }
            CanonicalType::Varchar(len) if *len > 0 => {
                TypeMapping::lossless(format!("VARCHAR({})", len))
            }
            CanonicalType::Char(_) | CanonicalType::Varchar(_) | CanonicalType::Text => {
                TypeMapping::lossless("STRING")
            }

            CanonicalType::Blob => TypeMapping::lossless("BYTES"),

            CanonicalType::Date => TypeMapping::lossless("DATE"),
            CanonicalType::Time(p) => Self::fraction("TIME", *p),
            CanonicalType::DateTime(p) => Self::fraction("TIMESTAMP", *p),
            CanonicalType::DateTimeLtz(p) => Self::fraction("TIMESTAMP_LTZ", *p),
            CanonicalType::Interval => {
                TypeMapping::lossy("BIGINT", "Interval stored as a BIGINT count.")
            }

            CanonicalType::Unknown(name) => {
                TypeMapping::lossy("STRING", format!("Unknown type '{}'.", name))
            }
        }
    }
}

/// Canonical type to Spark SQL converter.
#[derive(Debug, Clone, Default)]
pub struct SparkFromCanonical;

impl SparkFromCanonical {
    /// Create a new canonical to Spark converter.
    pub fn new() -> Self {
        Self
    }

    fn timestamp(kind: &str, precision: u32) -> TypeMapping {
        if precision > SPARK_FRACTION {
            TypeMapping::lossy(
                kind,
                format!(
                    "Fractional precision {} truncated to microseconds.",
                    precision
                ),
            )
        } else {
            TypeMapping::lossless(kind)
        }
    }
}

impl FromCanonical for SparkFromCanonical {
    fn dialect_name(&self) -> &str {
        "spark"
    }

    fn from_canonical(&self, canonical: &CanonicalType) -> TypeMapping {
        match canonical {
            CanonicalType::Boolean => TypeMapping::lossless("BOOLEAN"),

            CanonicalType::Int8 => TypeMapping::lossless("TINYINT"),
            CanonicalType::Int16 => TypeMapping::lossless("SMALLINT"),
            CanonicalType::Int32 => TypeMapping::lossless("INT"),
            CanonicalType::Int64 => TypeMapping::lossless("BIGINT"),

            CanonicalType::Float32 => TypeMapping::lossless("FLOAT"),
            CanonicalType::Float64 => TypeMapping::lossless("DOUBLE"),

            CanonicalType::Decimal { precision, scale } => {
                if *precision > MAX_DECIMAL_PRECISION {
                    TypeMapping::lossy(
                        "STRING",
                        format!(
                            "Precision {} exceeds Spark max of {}.",
                            precision, MAX_DECIMAL_PRECISION
                        ),
                    )
                } else {
                    let p = (*precision).max(1);
                    TypeMapping::lossless(format!("DECIMAL({},{})", p, (*scale).min(p)))
                }
            }

            CanonicalType::Char(len) if *len > 0 => {
                TypeMapping::lossless(format!("CHAR({})", len))
            }
            CanonicalType::Varchar(len) if *len > 0 => {
                TypeMapping::lossless(format!("VARCHAR({})", len))
            }
            CanonicalType::Char(_) | CanonicalType::Varchar(_) | CanonicalType::Text => {
                TypeMapping::lossless("STRING")
            }

            CanonicalType::Blob => TypeMapping::lossless("BINARY"),

            CanonicalType::Date => TypeMapping::lossless("DATE"),
            CanonicalType::Time(_) => {
                TypeMapping::lossy("STRING", "Spark has no TIME type; stored as text.")
            }
            CanonicalType::DateTime(p) => Self::timestamp("TIMESTAMP_NTZ", *p),
            CanonicalType::DateTimeLtz(p) => Self::timestamp("TIMESTAMP", *p),
            CanonicalType::Interval => {
                TypeMapping::lossy("BIGINT", "Interval stored as a BIGINT count.")
            }

            CanonicalType::Unknown(name) => {
                TypeMapping::lossy("STRING", format!("Unknown type '{}'.", name))
            }
        }
    }
}
