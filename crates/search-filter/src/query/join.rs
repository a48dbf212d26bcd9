//! Joining conditions into canonical form.
//!
//! Every combination goes through [`join_conditions`], which keeps the tree
//! canonical as it is built:
//! - Flattens same-operator operands into a single AND/OR list
//! - Prunes siblings made redundant by another sibling (see [`SearchCondition::covers`])
//! - Unwraps single-term lists
//! - Pushes negation down to the leaves

use super::condition::SearchCondition;

/// The pending operator applied to the next parsed term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinMode {
    And,
    Or,
    Not,
}

/// The operator of a merged term list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOp {
    And,
    Or,
}

/// Combines `right` into `left` under `mode`.
///
/// `Not` negates `right` and then behaves as `And`.
pub fn join_conditions(
    left: SearchCondition,
    right: SearchCondition,
    mode: JoinMode,
) -> SearchCondition {
    if right.is_empty() {
        return left;
    }

    let (right, op) = match mode {
        JoinMode::Not => (right.negate(), MergeOp::And),
        JoinMode::And => (right, MergeOp::And),
        JoinMode::Or => (right, MergeOp::Or),
    };

    if left.is_empty() {
        return right;
    }

    merge_lists(op, into_terms(left, op), into_terms(right, op))
}

/// Splits an operand into the term list it contributes under `op`.
fn into_terms(condition: SearchCondition, op: MergeOp) -> Vec<SearchCondition> {
    match (condition, op) {
        (SearchCondition::And(parts), MergeOp::And) => parts,
        (SearchCondition::Or(parts), MergeOp::Or) => parts,
        (other, _) => vec![other],
    }
}

/// Concatenates two term lists under `op`, dropping redundant terms.
///
/// Under `And` a term is redundant when a sibling on the other side already
/// implies it. Under `Or` a term is redundant when it implies a sibling on the
/// other side. Left terms are pruned first, then right terms against the
/// surviving left terms.
pub fn merge_lists(
    op: MergeOp,
    left: Vec<SearchCondition>,
    right: Vec<SearchCondition>,
) -> SearchCondition {
    let redundant = |term: &SearchCondition, sibling: &SearchCondition| match op {
        MergeOp::And => term.covers(sibling),
        MergeOp::Or => sibling.covers(term),
    };

    let left = left
        .into_iter()
        .filter(|term| !right.iter().any(|sibling| redundant(term, sibling)))
        .collect::<Vec<_>>();
    let right = right
        .into_iter()
        .filter(|term| !left.iter().any(|sibling| redundant(term, sibling)))
        .collect::<Vec<_>>();

    let mut terms = left;
    terms.extend(right);

    match terms.len() {
        0 => SearchCondition::Empty,
        1 => terms.pop().unwrap_or(SearchCondition::Empty),
        _ => match op {
            MergeOp::And => SearchCondition::And(terms),
            MergeOp::Or => SearchCondition::Or(terms),
        },
    }
}
