//! Validation layer
//!
//! Pure field-constraint checks run before anything touches storage.

mod errors;
mod rules;

pub use errors::{Rule, ValidationError, ValidationErrors};
pub use rules::{validate_note, BODY_EMPTY_MESSAGE, TITLE_EMPTY_MESSAGE};
