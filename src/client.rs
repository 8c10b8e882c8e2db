//! HTTP client for a running planner API.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::AppConfig;
use crate::models::*;

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    Server(String),
}

#[derive(Debug, Clone)]
pub struct PlannerClient {
    base_url: String,
    client: Client,
}

impl PlannerClient {
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.server_url.clone())
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, &url)
    }

    async fn error_for(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(body),
            StatusCode::BAD_REQUEST => ClientError::BadRequest(body),
            _ => ClientError::Server(format!("{}: {}", status, body)),
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::error_for(response).await)
        }
    }

    /// Handle response that returns an empty body (204 No Content).
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), ClientError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_for(response).await)
        }
    }

    pub async fn health(&self) -> Result<serde_json::Value, ClientError> {
        let response = self.request(reqwest::Method::GET, "/health").send().await?;
        self.handle_response(response).await
    }

    pub async fn list_projects(&self) -> Result<Vec<ProjectRecord>, ClientError> {
        let response = self.request(reqwest::Method::GET, "/projects").send().await?;
        self.handle_response(response).await
    }

    pub async fn get_project(&self, id: i64) -> Result<ProjectRecord, ClientError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/projects/{}", id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub async fn create_project(&self, input: &InsertProject) -> Result<ProjectRecord, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/projects")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub async fn update_project(
        &self,
        id: i64,
        input: &InsertProject,
    ) -> Result<ProjectRecord, ClientError> {
        let response = self
            .request(reqwest::Method::PUT, &format!("/projects/{}", id))
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub async fn delete_project(&self, id: i64) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/projects/{}", id))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped() {
        let client = PlannerClient::new("http://localhost:5000/api/");
        assert_eq!(client.base_url, "http://localhost:5000/api");
    }
}
