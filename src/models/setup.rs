use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Minimum length of a project name, in characters.
pub const MIN_NAME_LEN: usize = 3;

/// Minimum length of a project description, in characters.
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// The kind of software being planned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Web,
    Mobile,
    Desktop,
    Backend,
    Fullstack,
}

impl ProjectType {
    pub const ALL: [ProjectType; 5] = [
        Self::Web,
        Self::Mobile,
        Self::Desktop,
        Self::Backend,
        Self::Fullstack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
            Self::Backend => "backend",
            Self::Fullstack => "fullstack",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// Project metadata collected on the setup step.
///
/// Only constructed through [`ProjectSetup::validate`], so every instance
/// satisfies the length, enum and team-size constraints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSetup {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    pub team_size: u32,
}

/// Raw, unvalidated setup form as submitted by the user.
///
/// Missing keys deserialize to defaults so [`ProjectSetup::validate`] can
/// report them together. Untrusted JSON should go through
/// [`ProjectSetupInput::from_json`], which also tolerates `null` and
/// reports wrongly typed values per field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSetupInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub project_type: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    /// Defaults to 1 when omitted.
    #[serde(default)]
    pub team_size: Option<i64>,
}

impl ProjectSetupInput {
    /// Reads a setup form from untyped JSON.
    ///
    /// `null` counts as missing. A value of the wrong type is reported on
    /// its field, and the remaining fields are still validated, so the
    /// error lists every problem in the form.
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let Value::Object(map) = body else {
            return Err(ValidationErrors(vec![FieldError::new(
                "body",
                "Expected a JSON object",
            )]));
        };

        let mut type_errors = Vec::new();
        let mut text = |field: &str| match map.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                type_errors.push(FieldError::new(field, "Expected string"));
                None
            }
        };

        let name = text("name").unwrap_or_default();
        let description = text("description").unwrap_or_default();
        let project_type = text("type");
        let industry = text("industry");

        let team_size = match map.get("teamSize") {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Some(i),
                (None, Some(f)) if f.fract() == 0.0 && f.is_finite() => Some(f as i64),
                _ => {
                    type_errors.push(FieldError::new(
                        "teamSize",
                        "Team size must be a whole number",
                    ));
                    None
                }
            },
            Some(_) => {
                type_errors.push(FieldError::new("teamSize", "Expected number"));
                None
            }
        };

        let input = Self {
            name,
            description,
            project_type,
            industry,
            team_size,
        };
        if type_errors.is_empty() {
            return Ok(input);
        }

        // Fields already flagged keep their type error only
        if let Err(ValidationErrors(rest)) = ProjectSetup::validate(input) {
            for error in rest {
                if !type_errors.iter().any(|e| e.field == error.field) {
                    type_errors.push(error);
                }
            }
        }
        Err(ValidationErrors(type_errors))
    }
}

/// A validation failure tied to a single input field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// One or more field-level validation failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("validation failed: {}", summarize(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    /// Returns the error reported for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }
}

impl ProjectSetup {
    pub fn validate(input: ProjectSetupInput) -> Result<Self, ValidationErrors> {
        let mut errors = Vec::new();

        if input.name.chars().count() < MIN_NAME_LEN {
            errors.push(FieldError::new(
                "name",
                "Project name must be at least 3 characters",
            ));
        }

        if input.description.chars().count() < MIN_DESCRIPTION_LEN {
            errors.push(FieldError::new(
                "description",
                "Project description must be at least 10 characters",
            ));
        }

        let project_type = match input.project_type.as_deref() {
            Some(raw) => {
                let parsed = ProjectType::from_str(raw);
                if parsed.is_none() {
                    errors.push(FieldError::new(
                        "type",
                        "Project type must be one of web, mobile, desktop, backend, fullstack",
                    ));
                }
                parsed
            }
            None => {
                errors.push(FieldError::new("type", "Project type is required"));
                None
            }
        };

        let team_size = input.team_size.unwrap_or(1);
        let team_size = match u32::try_from(team_size) {
            Ok(n) if n >= 1 => Some(n),
            _ => {
                errors.push(FieldError::new(
                    "teamSize",
                    "Team size must be at least 1",
                ));
                None
            }
        };

        match (project_type, team_size) {
            (Some(project_type), Some(team_size)) if errors.is_empty() => Ok(Self {
                name: input.name,
                description: input.description,
                project_type,
                industry: input.industry.filter(|s| !s.trim().is_empty()),
                team_size,
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }
}
