//! Conversion between course records and Firestore's typed field maps
//! (`{"code": {"stringValue": "PHTX831"}}`).

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::models::{NewCourse, StoredCourse};

pub const CREATED_AT_FIELD: &str = "createdAt";

/// A document as returned by the list endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirestoreDocument {
    pub name: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
    #[serde(default)]
    pub create_time: Option<String>,
}

impl FirestoreDocument {
    /// Last path segment of the resource name
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

pub fn string_value(value: &str) -> Value {
    json!({ "stringValue": value })
}

pub fn encode_course(course: &NewCourse) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("code".to_string(), string_value(&course.code));
    fields.insert("name".to_string(), string_value(&course.name));
    fields.insert("description".to_string(), string_value(&course.description));
    fields.insert("category".to_string(), string_value(&course.category));
    fields
}

/// Read a field as text. Integer values are accepted too since Firestore
/// sends them as strings.
pub fn read_string(fields: &Map<String, Value>, key: &str) -> Option<String> {
    let value = fields.get(key)?;
    value
        .get("stringValue")
        .or_else(|| value.get("integerValue"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

pub fn read_timestamp(fields: &Map<String, Value>, key: &str) -> Option<DateTime<Utc>> {
    fields
        .get(key)?
        .get("timestampValue")
        .and_then(Value::as_str)
        .and_then(parse_timestamp)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn decode_course(document: &FirestoreDocument) -> StoredCourse {
    let fields = &document.fields;
    StoredCourse {
        id: document.id().to_string(),
        code: read_string(fields, "code"),
        name: read_string(fields, "name"),
        description: read_string(fields, "description"),
        category: read_string(fields, "category"),
        created_at: read_timestamp(fields, CREATED_AT_FIELD)
            .or_else(|| document.create_time.as_deref().and_then(parse_timestamp)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_course_fields() {
        let fields = encode_course(&NewCourse::from_code_and_name("PHTX051", "Pharmacoepidemiology & Economy"));
        assert_eq!(fields["code"], json!({"stringValue": "PHTX051"}));
        assert_eq!(fields["category"], json!({"stringValue": "PHTX"}));
        assert!(!fields.contains_key(CREATED_AT_FIELD));
    }

    #[test]
    fn test_decode_document() {
        let document: FirestoreDocument = serde_json::from_value(json!({
            "name": "projects/p/databases/(default)/documents/courses/doc123",
            "fields": {
                "code": {"stringValue": "PHTX831"},
                "name": {"stringValue": "Toxicology I"},
                "createdAt": {"timestampValue": "2024-03-01T10:00:00.123456Z"}
            },
            "createTime": "2024-03-01T10:00:00.123456Z",
            "updateTime": "2024-03-01T10:00:00.123456Z"
        }))
        .unwrap();

        let course = decode_course(&document);
        assert_eq!(course.id, "doc123");
        assert_eq!(course.code.as_deref(), Some("PHTX831"));
        assert_eq!(course.name.as_deref(), Some("Toxicology I"));
        assert!(course.description.is_none());
        assert_eq!(course.created_at.unwrap().timestamp(), 1709287200);
    }

    #[test]
    fn test_created_at_falls_back_to_create_time() {
        let document: FirestoreDocument = serde_json::from_value(json!({
            "name": "projects/p/databases/(default)/documents/courses/x",
            "createTime": "2023-01-01T00:00:00Z"
        }))
        .unwrap();

        let course = decode_course(&document);
        assert!(course.code.is_none());
        assert_eq!(course.created_at.unwrap().timestamp(), 1672531200);
    }

    #[test]
    fn test_non_string_fields_are_ignored() {
        let mut fields = Map::new();
        fields.insert("code".to_string(), json!({"booleanValue": true}));
        fields.insert("name".to_string(), json!({"integerValue": "42"}));
        assert_eq!(read_string(&fields, "code"), None);
        assert_eq!(read_string(&fields, "name").as_deref(), Some("42"));
    }
}
