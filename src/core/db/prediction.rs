use std::future::Future;

use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PredictionRecord {
    pub id: i64,
    pub crop_type: String,
    pub area: f64,
    pub soil_quality: String,
    pub water_availability: String,
    pub sunlight_hours: f64,
    pub predicted_yield: f64,
    pub yield_per_hectare: f64,
    pub confidence: i64,
    pub created_at: String,
    #[serde(skip)]
    #[sqlx(skip)]
    pub(super) _guard: (),
}

#[derive(Debug, Clone)]
pub struct NewPrediction {
    pub crop_type: String,
    pub area: f64,
    pub soil_quality: String,
    pub water_availability: String,
    pub sunlight_hours: f64,
    pub predicted_yield: f64,
    pub yield_per_hectare: f64,
    pub confidence: u8,
}

pub trait PredictionRepository {
    fn save_yield_prediction(&self, prediction: &NewPrediction) -> impl Future<Output = anyhow::Result<PredictionRecord>>;
    /// Newest first, optionally restricted to one crop.
    fn get_yield_predictions(&self, crop_type: Option<&str>, limit: u32) -> impl Future<Output = anyhow::Result<Vec<PredictionRecord>>>;
}
