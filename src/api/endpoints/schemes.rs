use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::endpoints::{filter, query_params};
use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::core::db::SchemeRepository;

#[derive(Debug, Default, Deserialize)]
pub struct SchemeQuery {
    #[serde(rename = "type")]
    pub scheme_type: Option<String>,
    pub level: Option<String>,
}

/// `GET /api/schemes`
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<SchemeQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let params = query_params(query)?;
    let scheme_type = filter(params.scheme_type);
    let level = filter(params.level);
    let filters = json!({ "type": scheme_type, "level": level });

    if let Some(db) = &state.db {
        match db.get_government_schemes(scheme_type.as_deref(), level.as_deref()).await {
            Ok(schemes) => {
                return Ok(Json(json!({
                    "total": schemes.len(),
                    "schemes": schemes,
                    "filters": filters,
                    "status": "success",
                })));
            }
            Err(e) => tracing::warn!(error = %e, "Failed to fetch government schemes"),
        }
    } else {
        tracing::warn!("Government schemes requested without storage");
    }

    Ok(Json(json!({
        "schemes": [],
        "filters": filters,
        "message": "Database connection not available",
        "status": "fallback",
    })))
}

/// `GET /api/schemes/:id`
pub async fn detail(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Ok(Path(id)) = id else {
        return Err(ApiError::NotFound("Endpoint not found".into()));
    };

    if let Some(db) = &state.db {
        match db.get_government_scheme(id).await {
            Ok(Some(scheme)) => return Ok(Json(json!({ "success": true, "scheme": scheme }))),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, id, "Failed to fetch government scheme"),
        }
    }
    Err(ApiError::SchemeNotFound(id))
}
