//! SQL text utilities.

mod sanitize;

pub use sanitize::clean_sql;
