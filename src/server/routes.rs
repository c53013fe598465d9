use std::path::Path as FsPath;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::server::api::{self, ApiResponse, ProfessionsQuery, SearchQuery, SkillsQuery};
use crate::server::static_files::attach_client_dir;
use crate::server::SharedService;

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body)).into_response()
    }
}

/// API and health routes. Unmatched paths go to the client bundle when
/// `client_dir` exists, otherwise to [route_not_found].
pub fn create_routes(state: SharedService, client_dir: Option<&FsPath>) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/api/professions", get(list_professions))
        .route("/api/professions/:id", get(get_profession))
        .route("/api/skills", get(list_skills))
        .route("/api/skills/:id", get(get_skill))
        .route("/api/species", get(list_species))
        .route("/api/config", get(current_config))
        .route("/api/config/available", get(available_configs))
        .route("/api/config/:name", post(switch_config))
        .route("/api/stats", get(stats))
        .route("/api/search", get(search));

    attach_client_dir(router, client_dir)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn route_not_found() -> ApiResponse {
    api::error_response(404, "Route not found")
}

async fn health(State(state): State<SharedService>) -> ApiResponse {
    let service = state.read().await;
    api::health_payload(service.is_loaded())
}

async fn list_professions(
    State(state): State<SharedService>,
    Query(query): Query<ProfessionsQuery>,
) -> ApiResponse {
    api::professions_payload(&*state.read().await, &query)
}

async fn get_profession(State(state): State<SharedService>, Path(id): Path<String>) -> ApiResponse {
    api::profession_payload(&*state.read().await, &id)
}

async fn list_skills(
    State(state): State<SharedService>,
    Query(query): Query<SkillsQuery>,
) -> ApiResponse {
    api::skills_payload(&*state.read().await, &query)
}

async fn get_skill(State(state): State<SharedService>, Path(id): Path<String>) -> ApiResponse {
    api::skill_payload(&*state.read().await, &id)
}

async fn list_species(State(state): State<SharedService>) -> ApiResponse {
    api::species_payload(&*state.read().await)
}

async fn current_config(State(state): State<SharedService>) -> ApiResponse {
    api::config_payload(&*state.read().await)
}

async fn available_configs(State(state): State<SharedService>) -> ApiResponse {
    api::available_configs_payload(&*state.read().await)
}

async fn switch_config(State(state): State<SharedService>, Path(name): Path<String>) -> ApiResponse {
    let mut service = state.write().await;
    match api::switch_config_payload(&mut service, &name) {
        Ok(response) => response,
        Err(err) => {
            error!(config = %name, error = %err, "config switch failed");
            api::error_response(500, &err.to_string())
        }
    }
}

async fn stats(State(state): State<SharedService>) -> ApiResponse {
    api::stats_payload(&*state.read().await)
}

async fn search(State(state): State<SharedService>, Query(query): Query<SearchQuery>) -> ApiResponse {
    api::search_payload(&*state.read().await, &query)
}
