//! Search condition tree and the negation/entailment relations over it.

use serde::{Deserialize, Serialize};

/// A parsed search condition (AST node).
///
/// Trees produced by the parser are canonical: an `And` never directly holds
/// another `And`, an `Or` never directly holds another `Or`, both hold at least
/// two children, and `Empty` only ever appears standalone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SearchCondition {
    /// The target text contains the (lowercased) value as a substring.
    Contains(String),
    /// The target text does not contain the value.
    NotContains(String),
    And(Vec<SearchCondition>),
    Or(Vec<SearchCondition>),
    /// No filter at all.
    Empty,
}

impl SearchCondition {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the number of atomic predicates in the tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Contains(_) | Self::NotContains(_) => 1,
            Self::And(parts) | Self::Or(parts) => parts.iter().map(Self::leaf_count).sum(),
            Self::Empty => 0,
        }
    }

    /// Returns the logical negation of the condition (De Morgan for compounds).
    pub fn negate(&self) -> SearchCondition {
        match self {
            Self::Contains(value) => Self::NotContains(value.clone()),
            Self::NotContains(value) => Self::Contains(value.clone()),
            Self::And(parts) => Self::Or(parts.iter().map(Self::negate).collect()),
            Self::Or(parts) => Self::And(parts.iter().map(Self::negate).collect()),
            Self::Empty => Self::Empty,
        }
    }

    /// Returns true when `self` holds whenever `other` holds.
    ///
    /// A covered condition is redundant next to the condition covering it. The
    /// relation treats `And` and `Or` alike, so it is only an approximation of
    /// entailment for compound operands.
    pub fn covers(&self, other: &SearchCondition) -> bool {
        match (self, other) {
            (Self::Contains(main), Self::Contains(candidate)) => {
                candidate.contains(main.as_str())
            }
            (Self::NotContains(main), Self::NotContains(candidate)) => {
                main.contains(candidate.as_str())
            }
            (Self::Contains(_) | Self::NotContains(_), Self::And(parts) | Self::Or(parts)) => {
                parts.iter().all(|part| self.covers(part))
            }
            (Self::And(parts) | Self::Or(parts), Self::And(_) | Self::Or(_)) => {
                parts.iter().all(|part| part.covers(other))
            }
            _ => false,
        }
    }
}
