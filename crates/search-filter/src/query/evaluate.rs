//! In-memory evaluation of conditions against a text.

use super::condition::SearchCondition;

impl SearchCondition {
    /// Evaluates the condition against `text`, ignoring case.
    ///
    /// `Empty` matches everything.
    pub fn matches(&self, text: &str) -> bool {
        evaluate_condition(self, text.to_lowercase().as_str())
    }
}

/// Evaluates a condition against an already lowercased haystack.
pub fn evaluate_condition(condition: &SearchCondition, haystack: &str) -> bool {
    match condition {
        SearchCondition::Contains(value) => haystack.contains(value.as_str()),
        SearchCondition::NotContains(value) => !haystack.contains(value.as_str()),
        SearchCondition::And(parts) => parts.iter().all(|part| evaluate_condition(part, haystack)),
        SearchCondition::Or(parts) => parts.iter().any(|part| evaluate_condition(part, haystack)),
        SearchCondition::Empty => true,
    }
}
