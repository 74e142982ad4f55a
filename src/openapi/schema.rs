//! Explicit schema mappings
//!
//! Types that appear on the wire implement `ApiSchema` by hand, next to
//! their serde definitions, so the documented shape and the serialized
//! shape are maintained together.

use serde_json::{json, Value};

/// A named OpenAPI component schema
pub trait ApiSchema {
    /// Component name under `#/components/schemas`
    const NAME: &'static str;

    /// JSON Schema (OpenAPI 3.0 dialect) of the serialized form
    fn schema() -> Value;

    /// `$ref` pointing at this component
    fn reference() -> Value {
        json!({ "$ref": format!("#/components/schemas/{}", Self::NAME) })
    }
}

/// Schema for a 64-bit integer
pub fn int64() -> Value {
    json!({"type": "integer", "format": "int64"})
}

/// Schema for a 32-bit integer with an inclusive range
pub fn int32_range(minimum: u32, maximum: u32) -> Value {
    json!({"type": "integer", "format": "int32", "minimum": minimum, "maximum": maximum})
}

/// Schema for an RFC 3339 timestamp
pub fn date_time() -> Value {
    json!({"type": "string", "format": "date-time"})
}
