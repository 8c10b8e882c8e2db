use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::AppState;
use crate::generation::GenerationError;
use crate::models::*;

// ============================================================
// Error Handling
// ============================================================

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    /// Field-level detail for schema violations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    /// Underlying cause for generation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            message: message.into(),
            errors: None,
            error: None,
        }),
    )
}

/// Log a storage error and return a sanitized response to the client.
fn internal_error(e: impl std::fmt::Display) -> ApiError {
    tracing::error!("Internal error: {}", e);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

fn not_found() -> ApiError {
    error_response(StatusCode::NOT_FOUND, "Project not found")
}

fn invalid_project(errors: ValidationErrors) -> ApiError {
    tracing::warn!("Rejected project payload: {}", errors);
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            message: "Invalid project data".to_string(),
            errors: Some(errors.0),
            error: None,
        }),
    )
}

fn generation_failed(message: &str, e: GenerationError) -> ApiError {
    tracing::error!("Generation error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            message: message.to_string(),
            errors: None,
            error: Some(e.to_string()),
        }),
    )
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, "Invalid project ID"))
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Projects
// ============================================================

pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProjectRecord>>, ApiError> {
    state.store.get_all_projects().map(Json).map_err(internal_error)
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectRecord>, ApiError> {
    let id = parse_id(&id)?;
    state
        .store
        .get_project(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(not_found)
}

pub async fn create_project(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<ProjectRecord>), ApiError> {
    let input = InsertProject::from_json(body).map_err(invalid_project)?;
    state
        .store
        .create_project(input)
        .map(|p| (StatusCode::CREATED, Json(p)))
        .map_err(internal_error)
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<ProjectRecord>, ApiError> {
    let id = parse_id(&id)?;
    let input = InsertProject::from_json(body).map_err(invalid_project)?;
    state
        .store
        .update_project(id, input)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(not_found)
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if state.store.delete_project(id).map_err(internal_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}

// ============================================================
// Generation
// ============================================================

/// Body shared by the generation endpoints. Both fields are passed to the
/// completion service verbatim.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub project_info: Option<Value>,
    #[serde(default)]
    pub features: Option<Value>,
}

impl GenerateRequest {
    fn project_info(&self) -> Result<&Value, ApiError> {
        present(&self.project_info).ok_or_else(|| {
            error_response(StatusCode::BAD_REQUEST, "Project information is required")
        })
    }

    fn project_info_and_features(&self) -> Result<(&Value, &Value), ApiError> {
        match (present(&self.project_info), present(&self.features)) {
            (Some(project), Some(features)) => Ok((project, features)),
            _ => Err(error_response(
                StatusCode::BAD_REQUEST,
                "Project information and features are required",
            )),
        }
    }
}

fn present(value: &Option<Value>) -> Option<&Value> {
    value.as_ref().filter(|v| !v.is_null())
}

pub async fn generate_plan(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<Value>, ApiError> {
    let project = body.project_info()?;
    state
        .generator
        .generate_plan(project)
        .await
        .map(Json)
        .map_err(|e| generation_failed("Failed to generate project plan", e))
}

pub async fn generate_timeline(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<Value>, ApiError> {
    let (project, features) = body.project_info_and_features()?;
    state
        .generator
        .request_timeline(project, features)
        .await
        .map(Json)
        .map_err(|e| generation_failed("Failed to generate timeline", e))
}

pub async fn suggest_features(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<Value>, ApiError> {
    let project = body.project_info()?;
    state
        .generator
        .suggest_features(project)
        .await
        .map(Json)
        .map_err(|e| generation_failed("Failed to suggest features", e))
}

pub async fn suggest_tech_stack(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<Value>, ApiError> {
    let (project, features) = body.project_info_and_features()?;
    state
        .generator
        .suggest_tech_stack(project, features)
        .await
        .map(Json)
        .map_err(|e| generation_failed("Failed to suggest tech stack", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_rejects_non_integers() {
        assert_eq!(parse_id("12").unwrap(), 12);
        let (status, body) = parse_id("abc").unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "Invalid project ID");
    }

    #[test]
    fn null_project_info_counts_as_missing() {
        let body: GenerateRequest =
            serde_json::from_value(serde_json::json!({ "projectInfo": null })).unwrap();
        assert!(body.project_info().is_err());
    }
}
