//! Emitting conditions into a filter sink.
//!
//! A [`FilterSink`] is the query-building capability of a storage backend. The
//! emitter walks a canonical [`SearchCondition`] and drives the sink. It starts
//! in AND-context at the root, switches to OR-context inside the group opened for
//! an `Or`, and back to AND-context inside the group opened for an `And` member.

mod escape;
mod sql;

pub use escape::escape_for_wildcard_match;
pub use sql::{SqlFilter, SqlFilterBuilder, SqlParameter};

use crate::config::EmitOptions;
use crate::error::Result;
use crate::query::SearchCondition;

/// An atomic substring predicate handed to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstringPredicate {
    /// Field expression the predicate tests.
    pub field: String,
    /// Require the field *not* to contain the value.
    pub negated: bool,
    /// The value, escaped for a wildcard match.
    pub escaped_literal: String,
    /// Name of the parameter the literal is bound to; unique per emission.
    pub parameter: String,
}

/// Builds the nested contents of a group opened on a sink.
pub type GroupBuilder<'a> = dyn FnMut(&mut dyn FilterSink) -> Result<()> + 'a;

/// Query-building capability driven by [`emit`].
pub trait FilterSink {
    /// Adds a predicate joined to the preceding ones with AND.
    fn and_require(&mut self, predicate: SubstringPredicate) -> Result<()>;

    /// Adds a predicate joined to the preceding ones with OR.
    fn or_require(&mut self, predicate: SubstringPredicate) -> Result<()>;

    /// Opens a parenthesized group joined with AND; `build` fills it.
    fn and_group(&mut self, build: &mut GroupBuilder<'_>) -> Result<()>;

    /// Opens a parenthesized group joined with OR; `build` fills it.
    fn or_group(&mut self, build: &mut GroupBuilder<'_>) -> Result<()>;
}

/// Emits `condition` into `sink`, returning the number of bound parameters.
///
/// `Empty` emits nothing.
pub fn emit(
    condition: &SearchCondition,
    sink: &mut dyn FilterSink,
    options: &EmitOptions,
) -> Result<usize> {
    options.validate()?;

    let mut emitter = Emitter {
        options,
        next_parameter: 0,
    };
    emitter.emit_and(condition, sink)?;

    log::debug!(
        "emitted search condition on {} with {} parameter(s)",
        options.field,
        emitter.next_parameter
    );
    Ok(emitter.next_parameter)
}

struct Emitter<'a> {
    options: &'a EmitOptions,
    next_parameter: usize,
}

impl Emitter<'_> {
    fn predicate(&mut self, value: &str, negated: bool) -> SubstringPredicate {
        let parameter = format!("{}{}", self.options.parameter_prefix, self.next_parameter);
        self.next_parameter += 1;
        SubstringPredicate {
            field: self.options.field.clone(),
            negated,
            escaped_literal: escape_for_wildcard_match(value, self.options.escape_char),
            parameter,
        }
    }

    fn emit_and(&mut self, condition: &SearchCondition, sink: &mut dyn FilterSink) -> Result<()> {
        match condition {
            SearchCondition::Contains(value) => {
                let predicate = self.predicate(value, false);
                sink.and_require(predicate)
            }
            SearchCondition::NotContains(value) => {
                let predicate = self.predicate(value, true);
                sink.and_require(predicate)
            }
            SearchCondition::And(parts) => {
                for part in parts {
                    self.emit_and(part, sink)?;
                }
                Ok(())
            }
            SearchCondition::Or(parts) => sink.and_group(&mut |group| {
                for part in parts {
                    self.emit_or(part, group)?;
                }
                Ok(())
            }),
            SearchCondition::Empty => Ok(()),
        }
    }

    fn emit_or(&mut self, condition: &SearchCondition, sink: &mut dyn FilterSink) -> Result<()> {
        match condition {
            SearchCondition::Contains(value) => {
                let predicate = self.predicate(value, false);
                sink.or_require(predicate)
            }
            SearchCondition::NotContains(value) => {
                let predicate = self.predicate(value, true);
                sink.or_require(predicate)
            }
            SearchCondition::And(parts) => sink.or_group(&mut |group| {
                for part in parts {
                    self.emit_and(part, group)?;
                }
                Ok(())
            }),
            // canonical trees never nest Or in Or
            SearchCondition::Or(parts) => {
                for part in parts {
                    self.emit_or(part, sink)?;
                }
                Ok(())
            }
            SearchCondition::Empty => Ok(()),
        }
    }
}
