//! Validation error types
//!
//! A violation names the offending field, the rule it broke and a message
//! fit for an API client. Violations are reported together, in the order the
//! fields are checked.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Rule a field value failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Value is missing or the empty string
    NotEmpty,
    /// Value is longer than allowed
    MaxLength,
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::NotEmpty => "not_empty",
            Rule::MaxLength => "max_length",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-level violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub rule: Rule,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, rule: Rule, message: impl Into<String>) -> Self {
        Self {
            field,
            rule,
            message: message.into(),
        }
    }
}

/// Ordered, non-empty list of violations for one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Note validation has failed: {}", join_messages(.0))]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub(crate) fn new(violations: Vec<ValidationError>) -> Self {
        Self(violations)
    }

    pub fn violations(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn into_violations(self) -> Vec<ValidationError> {
        self.0
    }
}

fn join_messages(violations: &[ValidationError]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_messages() {
        let errors = ValidationErrors::new(vec![
            ValidationError::new("title", Rule::NotEmpty, "Note title cannot be empty."),
            ValidationError::new("body", Rule::NotEmpty, "Note body cannot be empty."),
        ]);
        assert_eq!(
            errors.to_string(),
            "Note validation has failed: Note title cannot be empty. Note body cannot be empty."
        );
    }

    #[test]
    fn test_violation_serializes_rule_as_snake_case() {
        let v = ValidationError::new("title", Rule::MaxLength, "too long");
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["field"], "title");
        assert_eq!(json["rule"], "max_length");
        assert_eq!(json["message"], "too long");
    }
}
