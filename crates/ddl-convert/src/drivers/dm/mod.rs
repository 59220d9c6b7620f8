//! DM (Dameng) source dialect.
//!
//! DM is Oracle-compatible at the DDL level, so it shares Oracle's pre-clean
//! and tokenizer; only its type table differs.

mod dialect;

pub use dialect::DmRules;
