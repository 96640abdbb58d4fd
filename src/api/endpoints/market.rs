use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::endpoints::{filter, query_params};
use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::core::db::MarketRepository;

#[derive(Debug, Default, Deserialize)]
pub struct PriceQuery {
    pub crop: Option<String>,
    pub state: Option<String>,
}

/// `GET /api/prices`: crop filtered in storage, state filtered here.
pub async fn prices(
    State(app): State<AppState>,
    query: Result<Query<PriceQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let params = query_params(query)?;
    let crop = filter(params.crop);
    let state = filter(params.state);
    let filters = json!({ "crop": crop, "state": state });

    if let Some(db) = &app.db {
        match db.get_market_prices(crop.as_deref()).await {
            Ok(mut prices) => {
                if let Some(state) = &state {
                    prices.retain(|p| p.state.eq_ignore_ascii_case(state));
                }
                return Ok(Json(json!({
                    "total": prices.len(),
                    "data": prices,
                    "filters": filters,
                    "status": "success",
                })));
            }
            Err(e) => tracing::warn!(error = %e, "Failed to fetch market prices"),
        }
    } else {
        tracing::warn!("Market prices requested without storage");
    }

    Ok(Json(json!({
        "data": [],
        "filters": filters,
        "message": "Database connection not available",
        "status": "fallback",
    })))
}
