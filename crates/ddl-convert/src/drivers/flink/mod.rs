//! Apache Flink SQL target engine.

mod dialect;

pub use dialect::FlinkRules;
