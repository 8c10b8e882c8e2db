mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::ProjectStore;
use crate::generation::GenerationClient;

pub use handlers::ErrorBody;

/// Shared collaborators handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProjectStore>,
    pub generator: GenerationClient,
}

impl AppState {
    pub fn new(store: Arc<dyn ProjectStore>, generator: GenerationClient) -> Self {
        Self { store, generator }
    }
}

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Project records
        .route(
            "/projects",
            get(handlers::list_projects).post(handlers::create_project),
        )
        .route(
            "/projects/{id}",
            get(handlers::get_project)
                .put(handlers::update_project)
                .delete(handlers::delete_project),
        )
        // Generation
        .route("/generate/plan", post(handlers::generate_plan))
        .route("/generate/timeline", post(handlers::generate_timeline))
        .route("/generate/features", post(handlers::suggest_features))
        .route("/generate/tech-stack", post(handlers::suggest_tech_stack))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
