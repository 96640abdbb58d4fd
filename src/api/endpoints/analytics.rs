use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::endpoints::query_params;
use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::core::db::AnalyticsRepository;

pub const DEFAULT_DISEASE_LIMIT: u32 = 5;

#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<u32>,
}

/// `GET /api/analytics/yield/:crop`
pub async fn yield_statistics(
    State(state): State<AppState>,
    Path(crop): Path<String>,
) -> Json<Value> {
    if let Some(db) = &state.db {
        match db.get_yield_statistics(&crop).await {
            Ok(statistics) => {
                return Json(json!({
                    "success": true,
                    "crop": crop,
                    "statistics": statistics,
                }));
            }
            Err(e) => tracing::warn!(error = %e, crop = %crop, "Failed to fetch yield statistics"),
        }
    }

    Json(json!({
        "success": false,
        "message": "Could not fetch analytics",
    }))
}

/// `GET /api/analytics/diseases/:crop`
pub async fn common_diseases(
    State(state): State<AppState>,
    Path(crop): Path<String>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let limit = query_params(query)?.limit.unwrap_or(DEFAULT_DISEASE_LIMIT);

    if let Some(db) = &state.db {
        match db.get_common_diseases(&crop, limit).await {
            Ok(diseases) => {
                return Ok(Json(json!({
                    "success": true,
                    "crop": crop,
                    "total": diseases.len(),
                    "diseases": diseases,
                })));
            }
            Err(e) => tracing::warn!(error = %e, crop = %crop, "Failed to fetch disease analytics"),
        }
    }

    Ok(Json(json!({
        "success": false,
        "diseases": [],
        "message": "Could not fetch disease analytics",
    })))
}
