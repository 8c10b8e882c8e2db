use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{FieldError, ValidationErrors};

/// A finished project plan stored in the record store.
///
/// `features`, `tech_stack` and `timeline` are kept as opaque JSON so that
/// records written by older clients round-trip unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub project_type: String,
    pub features: Value,
    pub tech_stack: Value,
    pub timeline: Value,
    pub created_at: String,
}

/// Payload for creating or replacing a [`ProjectRecord`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertProject {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub project_type: String,
    pub features: Value,
    pub tech_stack: Value,
    pub timeline: Value,
    pub created_at: String,
}

const TEXT_FIELDS: [&str; 4] = ["name", "description", "type", "createdAt"];
const JSON_FIELDS: [&str; 3] = ["features", "techStack", "timeline"];

impl InsertProject {
    /// Validates an untyped request body against the record schema.
    ///
    /// Text columns must be strings; JSON columns accept any value except
    /// `null`. All violations are collected before returning.
    pub fn from_json(body: Value) -> Result<Self, ValidationErrors> {
        let Value::Object(map) = &body else {
            return Err(ValidationErrors(vec![FieldError::new(
                "body",
                "Expected a JSON object",
            )]));
        };

        let mut errors = Vec::new();
        for field in TEXT_FIELDS {
            match map.get(field) {
                Some(Value::String(_)) => {}
                Some(_) => errors.push(FieldError::new(field, "Expected string")),
                None => errors.push(FieldError::new(field, "Required")),
            }
        }
        for field in JSON_FIELDS {
            match map.get(field) {
                Some(Value::Null) | None => errors.push(FieldError::new(field, "Required")),
                Some(_) => {}
            }
        }
        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        serde_json::from_value(body)
            .map_err(|e| ValidationErrors(vec![FieldError::new("body", e.to_string())]))
    }

    pub fn into_record(self, id: i64) -> ProjectRecord {
        ProjectRecord {
            id,
            name: self.name,
            description: self.description,
            project_type: self.project_type,
            features: self.features,
            tech_stack: self.tech_stack,
            timeline: self.timeline,
            created_at: self.created_at,
        }
    }
}
