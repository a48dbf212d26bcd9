//! Search box query parsing and filter emission.
//!
//! This crate provides:
//! - A forgiving query language (phrases, `+`/`-`/`OR`, groups, escapes)
//! - Canonical boolean conditions with redundant terms pruned
//! - Emission of conditions into an AND/OR filter-building sink
//! - A SQL `LIKE` sink with escaped, named parameters

pub mod config;
pub mod emit;
pub mod error;
pub mod query;

// Re-export main types
pub use config::EmitOptions;
pub use emit::{emit, FilterSink, SqlFilter, SqlFilterBuilder, SqlParameter, SubstringPredicate};
pub use error::{FilterError, Result};
pub use query::{QueryParser, SearchCondition, SearchFilter};
