//! Query tokenizing, parsing, and condition algebra.
//!
//! This module provides the search query language:
//! - Tokenizer (words, quoted phrases, `+`/`-`/`OR`, parentheses, `\` escapes)
//! - Recursive-descent parser that never rejects input
//! - Condition algebra (negation, entailment, canonical joins)
//! - In-memory evaluation and highlight-term extraction

mod condition;
mod evaluate;
mod highlight;
mod join;
mod matcher;
mod parser;
mod tokenizer;

// Re-export public types
pub use condition::SearchCondition;
pub use evaluate::evaluate_condition;
pub use highlight::derive_highlight_terms;
pub use join::{join_conditions, merge_lists, JoinMode, MergeOp};
pub use matcher::SearchFilter;
pub use parser::QueryParser;
pub use tokenizer::{QueryToken, QueryTokenizer};
