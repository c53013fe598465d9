//! JSON payloads for each endpoint, built from the data service.
//! Envelopes: `{success, count?, data}` on success, `{success:false, error}` for
//! lookups and validation, `{error:true, message, statusCode}` for failures.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::is_truthy;
use crate::data::error::DataError;
use crate::data::query::{compute_stats, filter_by_category, filter_skills, search};
use crate::data::DataService;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status_code: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        ApiResponse {
            status_code: 200,
            body,
        }
    }

    pub fn not_found(error: String) -> Self {
        ApiResponse {
            status_code: 404,
            body: json!({ "success": false, "error": error }),
        }
    }
}

/// Envelope for unexpected failures and unknown routes.
pub fn error_response(status_code: u16, message: &str) -> ApiResponse {
    ApiResponse {
        status_code,
        body: json!({
            "error": true,
            "message": message,
            "statusCode": status_code,
        }),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionsQuery {
    pub include_disabled: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillsQuery {
    pub profession: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

pub fn health_payload(data_loaded: bool) -> ApiResponse {
    ApiResponse::ok(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "dataLoaded": data_loaded,
    }))
}

pub fn professions_payload(service: &DataService, query: &ProfessionsQuery) -> ApiResponse {
    let include_disabled = query.include_disabled.as_deref().is_some_and(is_truthy);
    let mut professions = service.professions(include_disabled);
    if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
        professions = filter_by_category(professions, category);
    }
    ApiResponse::ok(json!({
        "success": true,
        "count": professions.len(),
        "data": professions,
    }))
}

pub fn profession_payload(service: &DataService, id: &str) -> ApiResponse {
    match service.profession(id) {
        Some(profession) => ApiResponse::ok(json!({ "success": true, "data": profession })),
        None => ApiResponse::not_found(format!("Profession '{id}' not found")),
    }
}

pub fn skills_payload(service: &DataService, query: &SkillsQuery) -> ApiResponse {
    let skills = filter_skills(
        service.skills(),
        query.profession.as_deref(),
        query.search.as_deref(),
    );
    ApiResponse::ok(json!({
        "success": true,
        "count": skills.len(),
        "data": skills,
    }))
}

pub fn skill_payload(service: &DataService, id: &str) -> ApiResponse {
    match service.skill(id) {
        Some(skill) => ApiResponse::ok(json!({ "success": true, "data": skill })),
        None => ApiResponse::not_found(format!("Skill '{id}' not found")),
    }
}

pub fn species_payload(service: &DataService) -> ApiResponse {
    let species = service.species();
    ApiResponse::ok(json!({
        "success": true,
        "count": species.len(),
        "data": species,
    }))
}

pub fn config_payload(service: &DataService) -> ApiResponse {
    ApiResponse::ok(json!({ "success": true, "data": service.server_config() }))
}

pub fn available_configs_payload(service: &DataService) -> ApiResponse {
    let configs = service.available_configs();
    ApiResponse::ok(json!({
        "success": true,
        "count": configs.len(),
        "data": configs,
    }))
}

/// Activate `name` (falling back to `default`). Only a broken default is an error.
pub fn switch_config_payload(service: &mut DataService, name: &str) -> Result<ApiResponse, DataError> {
    service.load_server_config(name)?;
    Ok(ApiResponse::ok(json!({
        "success": true,
        "message": format!("Switched to {name} configuration"),
        "activeConfig": service.active_config_name(),
        "data": service.server_config(),
    })))
}

pub fn stats_payload(service: &DataService) -> ApiResponse {
    ApiResponse::ok(json!({ "success": true, "data": compute_stats(service) }))
}

/// Short queries answer 200 with `success:false`, not an HTTP error.
pub fn search_payload(service: &DataService, query: &SearchQuery) -> ApiResponse {
    let q = query.q.as_deref().unwrap_or_default();
    match search(service, q) {
        Ok(results) => {
            let total = results.total();
            ApiResponse::ok(json!({
                "success": true,
                "query": q,
                "results": results,
                "totalResults": total,
            }))
        }
        Err(err) => ApiResponse::ok(json!({ "success": false, "error": err.message() })),
    }
}
