//! Oracle source dialect.
//!
//! Oracle DDL as produced by `DBMS_METADATA.GET_DDL` carries constraint
//! states (`ENABLE`), index clauses and storage attributes that no target
//! engine understands. [`OracleRules`] removes the keyword-level noise before
//! statements are read; storage clauses after the column list are skipped by
//! the parser.

mod dialect;

pub use dialect::OracleRules;
pub(crate) use dialect::strip_constraint_state;
