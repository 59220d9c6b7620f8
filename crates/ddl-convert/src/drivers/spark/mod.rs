//! Apache Spark SQL target engine.

mod dialect;

pub use dialect::SparkRules;
