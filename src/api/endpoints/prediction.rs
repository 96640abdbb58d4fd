use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::core::db::{ActivityRepository, AgriDb, NewPrediction, PredictionRepository};
use crate::detection::format::timestamp_now;
use crate::models::Crop;
use crate::yield_estimator::{self, YieldPrediction};

pub const REQUIRED_FIELDS: [&str; 5] = ["cropType", "area", "soilQuality", "waterAvailability", "sunlight"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionBody {
    pub predicted_yield: f64,
    pub yield_per_hectare: f64,
    pub unit: &'static str,
    pub confidence: u8,
    #[serde(rename = "soil_modifier")]
    pub soil_modifier: f64,
    #[serde(rename = "water_modifier")]
    pub water_modifier: f64,
    #[serde(rename = "sunlight_modifier")]
    pub sunlight_modifier: f64,
    pub description: String,
}

impl From<&YieldPrediction> for PredictionBody {
    fn from(prediction: &YieldPrediction) -> Self {
        Self {
            predicted_yield: prediction.predicted_yield,
            yield_per_hectare: prediction.yield_per_hectare,
            unit: "tons",
            confidence: prediction.confidence,
            soil_modifier: prediction.soil_modifier,
            water_modifier: prediction.water_modifier,
            sunlight_modifier: prediction.sunlight_modifier,
            description: prediction.description(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub success: bool,
    pub prediction: PredictionBody,
    pub input: Value,
    pub timestamp: String,
    /// Storage is available and the save was queued. The save itself runs
    /// after the response and may still fail.
    pub saved: bool,
}

/// `POST /api/predict-yield`
pub async fn predict(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let Json(input) = body.map_err(|_| ApiError::Validation("No data provided".into()))?;
    let Some(fields) = input.as_object() else {
        return Err(ApiError::Validation("No data provided".into()));
    };

    if !REQUIRED_FIELDS.iter().all(|field| fields.contains_key(*field)) {
        return Err(ApiError::MissingFields { required: &REQUIRED_FIELDS });
    }

    let crop = fields
        .get("cropType")
        .and_then(Value::as_str)
        .and_then(Crop::parse)
        .ok_or_else(|| {
            tracing::warn!(crop = ?fields.get("cropType"), "Yield prediction for unsupported crop");
            ApiError::UnsupportedCrop
        })?;

    let area = number_field(fields, "area")?;
    if area <= 0.0 {
        return Err(ApiError::Validation("area must be a positive number".into()));
    }
    let sunlight = number_field(fields, "sunlight")?;
    let soil_quality = text_field(fields, "soilQuality");
    let water_availability = text_field(fields, "waterAvailability");

    let prediction = yield_estimator::predict(crop, area, soil_quality, water_availability, sunlight);
    tracing::info!(
        crop = %crop,
        area,
        predicted_yield = prediction.predicted_yield,
        confidence = prediction.confidence,
        "Yield predicted"
    );

    let body = PredictionBody::from(&prediction);
    let saved = match state.db.clone() {
        Some(db) => {
            tokio::spawn(persist(db, prediction, input.clone()));
            true
        }
        None => false,
    };

    Ok(Json(PredictionResponse {
        success: true,
        prediction: body,
        input,
        timestamp: timestamp_now(),
        saved,
    }))
}

/// Numbers may arrive as JSON numbers or numeric strings.
fn number_field(fields: &Map<String, Value>, name: &str) -> Result<f64, ApiError> {
    let value = match fields.get(name) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value
        .filter(|v| v.is_finite())
        .ok_or_else(|| ApiError::Validation(format!("{name} must be a number")))
}

fn text_field<'a>(fields: &'a Map<String, Value>, name: &str) -> &'a str {
    fields.get(name).and_then(Value::as_str).unwrap_or("moderate")
}

async fn persist(db: AgriDb, prediction: YieldPrediction, input: Value) {
    let record = NewPrediction {
        crop_type: prediction.crop.display_name().to_string(),
        area: prediction.area,
        soil_quality: prediction.soil_quality,
        water_availability: prediction.water_availability,
        sunlight_hours: prediction.sunlight_hours,
        predicted_yield: prediction.predicted_yield,
        yield_per_hectare: prediction.yield_per_hectare,
        confidence: prediction.confidence,
    };
    if let Err(e) = db.save_yield_prediction(&record).await {
        tracing::warn!(error = %e, "Failed to save yield prediction");
        return;
    }
    if let Err(e) = db
        .log_activity("predict_yield", Some(prediction.crop.as_str()), Some(&input))
        .await
    {
        tracing::warn!(error = %e, "Failed to log prediction activity");
    }
}
