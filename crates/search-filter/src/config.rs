use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};

pub const DEFAULT_FIELD: &str = "text";
pub const DEFAULT_PARAMETER_PREFIX: &str = "p";
pub const DEFAULT_ESCAPE_CHAR: char = '\\';

/// Settings for turning a condition into sink predicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitOptions {
    /// Field expression every predicate matches against.
    pub field: String,
    /// Prefix of the generated parameter names (`p0`, `p1`, ...).
    pub parameter_prefix: String,
    /// Escape character for wildcard patterns.
    pub escape_char: char,
    /// Compare against the lowercased field.
    pub case_insensitive: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            field: DEFAULT_FIELD.to_string(),
            parameter_prefix: DEFAULT_PARAMETER_PREFIX.to_string(),
            escape_char: DEFAULT_ESCAPE_CHAR,
            case_insensitive: true,
        }
    }
}

impl EmitOptions {
    pub fn for_field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Self::default()
        }
    }

    /// Loads options from a JSON document; missing keys take their defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(raw)?;
        options.validate()?;
        Ok(options)
    }

    /// Checks the options before they reach a sink.
    ///
    /// The field is spliced into rendered SQL, so it must be a plain identifier or a
    /// dotted path of identifiers (`body`, `notes.body`).
    pub fn validate(&self) -> Result<()> {
        if self.field.trim().is_empty() {
            return Err(FilterError::InvalidOptions(
                "field expression must not be empty".to_string(),
            ));
        }
        if !self.field.split('.').all(is_identifier) {
            return Err(FilterError::InvalidOptions(format!(
                "field {:?} must be an identifier or a dotted path of identifiers",
                self.field
            )));
        }
        if self.parameter_prefix.is_empty() {
            return Err(FilterError::InvalidOptions(
                "parameter prefix must not be empty".to_string(),
            ));
        }
        if !self
            .parameter_prefix
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        {
            return Err(FilterError::InvalidOptions(format!(
                "parameter prefix {:?} may only contain ASCII letters, digits and '_'",
                self.parameter_prefix
            )));
        }
        let escape = self.escape_char;
        if !escape.is_ascii_punctuation() || matches!(escape, '%' | '_' | '\'') {
            return Err(FilterError::InvalidOptions(format!(
                "escape character {escape:?} must be ASCII punctuation other than a wildcard or quote"
            )));
        }
        Ok(())
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        }
        _ => false,
    }
}
