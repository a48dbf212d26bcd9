//! Compiled search filter.

use crate::config::EmitOptions;
use crate::emit::{emit, FilterSink, SqlFilter, SqlFilterBuilder};
use crate::error::Result;

use super::condition::SearchCondition;
use super::highlight::derive_highlight_terms;
use super::parser::QueryParser;

/// A raw search string compiled into its canonical condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    condition: SearchCondition,
}

impl SearchFilter {
    /// Compiles a raw query string. Never fails; malformed input is normalized.
    pub fn compile(raw_query: &str) -> Self {
        Self {
            condition: QueryParser::parse(raw_query),
        }
    }

    /// Returns the parsed condition.
    pub fn condition(&self) -> &SearchCondition {
        &self.condition
    }

    pub fn into_condition(self) -> SearchCondition {
        self.condition
    }

    /// Returns true when the query constrains nothing.
    pub fn is_empty(&self) -> bool {
        self.condition.is_empty()
    }

    pub fn matches(&self, text: &str) -> bool {
        self.condition.matches(text)
    }

    /// Returns terms that should be highlighted in matching texts.
    pub fn highlight_terms(&self) -> Vec<String> {
        derive_highlight_terms(&self.condition)
    }

    /// Emits the condition into `sink`, returning the number of bound parameters.
    pub fn apply(&self, sink: &mut dyn FilterSink, options: &EmitOptions) -> Result<usize> {
        emit(&self.condition, sink, options)
    }

    /// Renders the condition as a SQL `LIKE` expression.
    pub fn to_sql(&self, options: &EmitOptions) -> Result<SqlFilter> {
        let mut builder = SqlFilterBuilder::new(options);
        self.apply(&mut builder, options)?;
        Ok(builder.finish())
    }
}

impl From<SearchCondition> for SearchFilter {
    fn from(condition: SearchCondition) -> Self {
        Self { condition }
    }
}
