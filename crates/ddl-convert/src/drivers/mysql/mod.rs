//! MySQL/MariaDB source dialect.
//!
//! - [`MysqlRules`]: backtick-aware tokenizer, no keyword pre-clean
//!
//! Table options (`ENGINE=`, `DEFAULT CHARSET=`) follow the column list and
//! are skipped by the parser; the `COMMENT=` option is kept as the table
//! comment.

mod dialect;

pub use dialect::MysqlRules;
