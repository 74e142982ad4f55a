//! # Response Formatting
//!
//! Wire shapes of the notes API and their documented schemas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::model::{Note, NoteId, NoteInput, MAX_PAGE_LIMIT, TITLE_MAX_CHARS};
use crate::openapi::{date_time, int64, ApiSchema};

/// A note as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub id: NoteId,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "lastUpdated")]
    pub last_modified: DateTime<Utc>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            body: note.body,
            created_at: note.created_at,
            last_modified: note.last_modified,
        }
    }
}

impl ApiSchema for NoteResponse {
    const NAME: &'static str = "Note";

    fn schema() -> Value {
        json!({
            "type": "object",
            "required": ["id", "title", "body", "createdAt", "lastUpdated"],
            "properties": {
                "id": int64(),
                "title": {"type": "string", "maxLength": TITLE_MAX_CHARS},
                "body": {"type": "string"},
                "createdAt": date_time(),
                "lastUpdated": date_time(),
            },
        })
    }
}

impl ApiSchema for NoteInput {
    const NAME: &'static str = "NoteRequest";

    fn schema() -> Value {
        json!({
            "type": "object",
            "required": ["title", "body"],
            "properties": {
                "title": {"type": "string", "minLength": 1, "maxLength": TITLE_MAX_CHARS},
                "body": {"type": "string", "minLength": 1},
            },
        })
    }
}

/// List response with pagination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub count: usize,
    pub limit: u32,
    pub offset: u64,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>, limit: u32, offset: u64) -> Self {
        let count = data.len();
        Self {
            data,
            count,
            limit,
            offset,
        }
    }
}

impl ApiSchema for ListResponse<NoteResponse> {
    const NAME: &'static str = "NoteList";

    fn schema() -> Value {
        json!({
            "type": "object",
            "required": ["data", "count", "limit", "offset"],
            "properties": {
                "data": {"type": "array", "items": NoteResponse::reference()},
                "count": {"type": "integer", "format": "int32"},
                "limit": {"type": "integer", "format": "int32", "maximum": MAX_PAGE_LIMIT},
                "offset": int64(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn note() -> Note {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        Note {
            id: 7,
            title: "Groceries".to_string(),
            body: "Milk".to_string(),
            created_at: at,
            last_modified: at,
        }
    }

    #[test]
    fn test_note_wire_field_names() {
        let json = serde_json::to_value(NoteResponse::from(note())).unwrap();
        let mut keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        keys.sort();
        assert_eq!(keys, vec!["body", "createdAt", "id", "lastUpdated", "title"]);
        assert_eq!(json["createdAt"], "2024-03-01T12:00:00Z");
    }

    #[test]
    fn test_schema_matches_serialized_fields() {
        let json = serde_json::to_value(NoteResponse::from(note())).unwrap();
        let schema = NoteResponse::schema();
        for key in json.as_object().unwrap().keys() {
            assert!(schema["properties"].get(key).is_some(), "{key} undocumented");
        }
    }

    #[test]
    fn test_list_envelope_counts_items() {
        let list = ListResponse::new(vec![NoteResponse::from(note())], 10, 5);
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["limit"], 10);
        assert_eq!(json["offset"], 5);
    }
}
