//! Note validation rules
//!
//! Validation semantics:
//! - title and body are required and must not be the empty string
//! - title is at most `TITLE_MAX_CHARS` characters
//! - every violation is reported, title before body
//!
//! Validation never mutates its input and performs no I/O.

use crate::model::{NoteDraft, NoteInput, TITLE_MAX_CHARS};

use super::errors::{Rule, ValidationError, ValidationErrors};

pub const TITLE_EMPTY_MESSAGE: &str = "Note title cannot be empty.";
pub const BODY_EMPTY_MESSAGE: &str = "Note body cannot be empty.";

/// Validates a candidate note, producing a draft ready to persist.
///
/// # Errors
///
/// Returns every violation found, in field order.
pub fn validate_note(input: &NoteInput) -> Result<NoteDraft, ValidationErrors> {
    let mut violations = Vec::new();

    let title = check_title(input.title.as_deref(), &mut violations);
    let body = check_required("body", input.body.as_deref(), BODY_EMPTY_MESSAGE, &mut violations);

    match (title, body) {
        (Some(title), Some(body)) if violations.is_empty() => {
            Ok(NoteDraft::new_unchecked(title.to_string(), body.to_string()))
        }
        _ => Err(ValidationErrors::new(violations)),
    }
}

fn check_title<'a>(value: Option<&'a str>, violations: &mut Vec<ValidationError>) -> Option<&'a str> {
    let title = check_required("title", value, TITLE_EMPTY_MESSAGE, violations)?;

    if title.chars().count() > TITLE_MAX_CHARS {
        violations.push(ValidationError::new(
            "title",
            Rule::MaxLength,
            format!("Note title must be at most {} characters.", TITLE_MAX_CHARS),
        ));
        return None;
    }

    Some(title)
}

fn check_required<'a>(
    field: &'static str,
    value: Option<&'a str>,
    message: &str,
    violations: &mut Vec<ValidationError>,
) -> Option<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            violations.push(ValidationError::new(field, Rule::NotEmpty, message));
            None
        }
    }
}
