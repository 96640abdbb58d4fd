use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::endpoints::{filter, query_params};
use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::core::db::{DetectionRepository, PredictionRepository};

pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

#[derive(Debug, Default, Deserialize)]
pub struct PredictionHistoryQuery {
    pub crop: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DetectionHistoryQuery {
    pub disease: Option<String>,
    pub limit: Option<u32>,
}

/// `GET /api/history/predictions`
pub async fn predictions(
    State(state): State<AppState>,
    query: Result<Query<PredictionHistoryQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let params = query_params(query)?;
    let crop = filter(params.crop);
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);

    if let Some(db) = &state.db {
        match db.get_yield_predictions(crop.as_deref(), limit).await {
            Ok(predictions) => {
                return Ok(Json(json!({
                    "success": true,
                    "total": predictions.len(),
                    "predictions": predictions,
                    "crop": crop,
                })));
            }
            Err(e) => tracing::warn!(error = %e, "Failed to fetch prediction history"),
        }
    }

    Ok(Json(json!({
        "success": false,
        "predictions": [],
        "message": "Could not fetch prediction history",
    })))
}

/// `GET /api/history/detections`
pub async fn detections(
    State(state): State<AppState>,
    query: Result<Query<DetectionHistoryQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let params = query_params(query)?;
    let disease = filter(params.disease);
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);

    if let Some(db) = &state.db {
        match db.get_disease_detections(disease.as_deref(), limit).await {
            Ok(detections) => {
                return Ok(Json(json!({
                    "success": true,
                    "total": detections.len(),
                    "detections": detections,
                    "disease": disease,
                })));
            }
            Err(e) => tracing::warn!(error = %e, "Failed to fetch detection history"),
        }
    }

    Ok(Json(json!({
        "success": false,
        "detections": [],
        "message": "Could not fetch detection history",
    })))
}
