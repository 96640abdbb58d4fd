use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::endpoints::{filter, query_params};
use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::core::db::ActivityRepository;

pub const DEFAULT_ACTIVITY_LIMIT: u32 = 20;

#[derive(Debug, Default, Deserialize)]
pub struct ActivityQuery {
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
    pub limit: Option<u32>,
}

/// `GET /api/activity`
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ActivityQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let params = query_params(query)?;
    let activity_type = filter(params.activity_type);
    let limit = params.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);

    if let Some(db) = &state.db {
        match db.get_activity_log(activity_type.as_deref(), limit).await {
            Ok(activity) => {
                return Ok(Json(json!({
                    "success": true,
                    "total": activity.len(),
                    "activity": activity,
                    "type": activity_type,
                })));
            }
            Err(e) => tracing::warn!(error = %e, "Failed to fetch activity log"),
        }
    }

    Ok(Json(json!({
        "success": false,
        "activity": [],
        "message": "Could not fetch activity log",
    })))
}
