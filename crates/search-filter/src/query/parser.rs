//! Recursive-descent query parser.
//!
//! The parser never fails: unbalanced parentheses, unclosed quotes, and dangling
//! operators are all folded into a best-effort condition.

use super::condition::SearchCondition;
use super::join::{join_conditions, JoinMode};
use super::tokenizer::{QueryToken, QueryTokenizer};

pub struct QueryParser;

impl QueryParser {
    /// Parses a raw search string into a canonical condition.
    pub fn parse(input: &str) -> SearchCondition {
        let mut tokenizer = QueryTokenizer::new(input);
        let condition = parse_level(&mut tokenizer, true);
        log::debug!(
            "parsed search query ({} bytes) into {} predicate(s)",
            input.len(),
            condition.leaf_count()
        );
        condition
    }
}

/// Parses tokens until the input ends or, below the root, a closing `)`.
///
/// A `)` at the root has no group to close and only resets the pending mode.
/// The end of input closes any group still open.
fn parse_level(tokenizer: &mut QueryTokenizer<'_>, is_root: bool) -> SearchCondition {
    let mut condition = SearchCondition::Empty;
    let mut mode = JoinMode::And;

    loop {
        let token = tokenizer.next_token();
        log::trace!("query token: {token:?}");
        match token {
            QueryToken::End => return condition,
            QueryToken::LParen => {
                let nested = parse_level(tokenizer, false);
                condition = join_conditions(condition, nested, mode);
                mode = JoinMode::And;
            }
            QueryToken::RParen => {
                if !is_root {
                    return condition;
                }
                mode = JoinMode::And;
            }
            QueryToken::Or => mode = JoinMode::Or,
            QueryToken::Plus => mode = JoinMode::And,
            QueryToken::Minus => mode = JoinMode::Not,
            QueryToken::Text { value, .. } => {
                // an empty phrase adds nothing but still consumes the operator
                if !value.is_empty() {
                    condition =
                        join_conditions(condition, SearchCondition::Contains(value), mode);
                }
                mode = JoinMode::And;
            }
        }
    }
}
