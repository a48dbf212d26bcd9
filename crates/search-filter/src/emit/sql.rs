//! SQL `LIKE` filter sink.

use serde::Serialize;

use crate::config::EmitOptions;
use crate::error::Result;

use super::{FilterSink, GroupBuilder, SubstringPredicate};

/// A named parameter bound to a rendered `LIKE` pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SqlParameter {
    pub name: String,
    pub value: String,
}

/// A rendered SQL boolean expression and its parameters, in binding order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SqlFilter {
    /// `None` when no predicate was emitted.
    pub clause: Option<String>,
    pub parameters: Vec<SqlParameter>,
}

/// Renders emitted predicates as SQL text with named (`:name`) parameters.
///
/// Literals are always bound. The field expression is written into the clause as
/// is; `emit` only passes fields that [`EmitOptions::validate`] accepts.
///
/// ```ignore
/// // "a OR (-b)" with default options:
/// // (lower(text) LIKE :p0 ESCAPE '\' OR lower(text) NOT LIKE :p1 ESCAPE '\')
/// // p0 = "%a%", p1 = "%b%"
/// ```
#[derive(Debug, Clone)]
pub struct SqlFilterBuilder {
    escape_char: char,
    case_insensitive: bool,
    clause: String,
    parameters: Vec<SqlParameter>,
}

impl SqlFilterBuilder {
    pub fn new(options: &EmitOptions) -> Self {
        Self {
            escape_char: options.escape_char,
            case_insensitive: options.case_insensitive,
            clause: String::new(),
            parameters: Vec::new(),
        }
    }

    pub fn finish(self) -> SqlFilter {
        SqlFilter {
            clause: (!self.clause.is_empty()).then_some(self.clause),
            parameters: self.parameters,
        }
    }

    fn nested(&self) -> Self {
        Self {
            escape_char: self.escape_char,
            case_insensitive: self.case_insensitive,
            clause: String::new(),
            parameters: Vec::new(),
        }
    }

    fn push_fragment(&mut self, joiner: &str, fragment: &str) {
        if !self.clause.is_empty() {
            self.clause.push_str(joiner);
        }
        self.clause.push_str(fragment);
    }

    fn push_predicate(&mut self, joiner: &str, predicate: SubstringPredicate) {
        let field = if self.case_insensitive {
            format!("lower({})", predicate.field)
        } else {
            predicate.field
        };
        let operator = if predicate.negated { "NOT LIKE" } else { "LIKE" };
        let fragment = format!(
            "{field} {operator} :{} ESCAPE '{}'",
            predicate.parameter, self.escape_char
        );
        self.push_fragment(joiner, &fragment);
        self.parameters.push(SqlParameter {
            name: predicate.parameter,
            value: format!("%{}%", predicate.escaped_literal),
        });
    }

    fn push_group(&mut self, joiner: &str, build: &mut GroupBuilder<'_>) -> Result<()> {
        let mut group = self.nested();
        build(&mut group)?;
        self.parameters.extend(group.parameters);
        if !group.clause.is_empty() {
            self.push_fragment(joiner, &format!("({})", group.clause));
        }
        Ok(())
    }
}

const AND: &str = " AND ";
const OR: &str = " OR ";

impl FilterSink for SqlFilterBuilder {
    fn and_require(&mut self, predicate: SubstringPredicate) -> Result<()> {
        self.push_predicate(AND, predicate);
        Ok(())
    }

    fn or_require(&mut self, predicate: SubstringPredicate) -> Result<()> {
        self.push_predicate(OR, predicate);
        Ok(())
    }

    fn and_group(&mut self, build: &mut GroupBuilder<'_>) -> Result<()> {
        self.push_group(AND, build)
    }

    fn or_group(&mut self, build: &mut GroupBuilder<'_>) -> Result<()> {
        self.push_group(OR, build)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::emit;
    use crate::query::QueryParser;

    fn to_sql(query: &str, options: &EmitOptions) -> SqlFilter {
        let mut builder = SqlFilterBuilder::new(options);
        emit(&QueryParser::parse(query), &mut builder, options).expect("emit");
        builder.finish()
    }

    fn parameter(name: &str, value: &str) -> SqlParameter {
        SqlParameter {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn empty_query_has_no_clause() {
        let filter = to_sql("  ", &EmitOptions::default());
        assert_eq!(filter.clause, None);
        assert!(filter.parameters.is_empty());
    }

    #[test]
    fn single_term() {
        let filter = to_sql("Report", &EmitOptions::default());
        assert_eq!(
            filter.clause.as_deref(),
            Some("lower(text) LIKE :p0 ESCAPE '\\'")
        );
        assert_eq!(filter.parameters, vec![parameter("p0", "%report%")]);
    }

    #[test]
    fn conjunction_with_or_group() {
        let filter = to_sql("a (b OR (-c))", &EmitOptions::default());
        assert_eq!(
            filter.clause.as_deref(),
            Some(
                "lower(text) LIKE :p0 ESCAPE '\\' AND (lower(text) LIKE :p1 ESCAPE '\\' \
                 OR lower(text) NOT LIKE :p2 ESCAPE '\\')"
            )
        );
        assert_eq!(
            filter.parameters,
            vec![
                parameter("p0", "%a%"),
                parameter("p1", "%b%"),
                parameter("p2", "%c%"),
            ]
        );
    }

    #[test]
    fn disjunction_of_conjunctions() {
        let options = EmitOptions {
            case_insensitive: false,
            ..EmitOptions::for_field("title")
        };
        let filter = to_sql("(a b) OR (c d)", &options);
        assert_eq!(
            filter.clause.as_deref(),
            Some(
                "((title LIKE :p0 ESCAPE '\\' AND title LIKE :p1 ESCAPE '\\') \
                 OR (title LIKE :p2 ESCAPE '\\' AND title LIKE :p3 ESCAPE '\\'))"
            )
        );
        assert_eq!(filter.parameters.len(), 4);
    }

    #[test]
    fn escaped_literal_is_wrapped_in_wildcards() {
        let options = EmitOptions {
            escape_char: '!',
            ..EmitOptions::default()
        };
        let filter = to_sql("50%", &options);
        assert_eq!(
            filter.clause.as_deref(),
            Some("lower(text) LIKE :p0 ESCAPE '!'")
        );
        assert_eq!(filter.parameters, vec![parameter("p0", "%50!%%")]);
    }

    #[test]
    fn filter_serializes_to_json() {
        let filter = to_sql("a", &EmitOptions::default());
        let json = serde_json::to_value(&filter).expect("serialize");
        assert_eq!(json["parameters"][0]["name"], "p0");
        assert_eq!(json["parameters"][0]["value"], "%a%");
    }
}
