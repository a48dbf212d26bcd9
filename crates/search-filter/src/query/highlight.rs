//! Highlight term extraction for search results.
//!
//! Only positive `Contains` leaves are collected: a text that matched a
//! negated predicate by definition does not contain its value.

use std::collections::BTreeSet;

use super::condition::SearchCondition;

/// Derives highlight terms from a condition.
///
/// Returns a sorted, deduplicated list of the values a matching text may
/// contain.
///
/// # Example
/// ```ignore
/// // "report -draft" -> ["report"]
/// // "foo OR bar" -> ["bar", "foo"]
/// ```
pub fn derive_highlight_terms(condition: &SearchCondition) -> Vec<String> {
    let mut collector = HighlightCollector::default();
    collector.collect(condition);
    collector.into_terms()
}

#[derive(Default)]
struct HighlightCollector {
    terms: BTreeSet<String>,
}

impl HighlightCollector {
    fn collect(&mut self, condition: &SearchCondition) {
        match condition {
            SearchCondition::Contains(value) => {
                if !value.is_empty() {
                    self.terms.insert(value.clone());
                }
            }
            SearchCondition::And(parts) | SearchCondition::Or(parts) => {
                for part in parts {
                    self.collect(part);
                }
            }
            SearchCondition::NotContains(_) | SearchCondition::Empty => {}
        }
    }

    fn into_terms(self) -> Vec<String> {
        self.terms.into_iter().collect()
    }
}
