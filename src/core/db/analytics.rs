use std::future::Future;

use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct YieldStatistics {
    pub total_predictions: i64,
    pub avg_yield: Option<f64>,
    pub max_yield: Option<f64>,
    pub min_yield: Option<f64>,
    pub avg_confidence: Option<f64>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DiseaseFrequency {
    pub disease_name: String,
    pub count: i64,
    pub avg_confidence: f64,
}

pub trait AnalyticsRepository {
    fn get_yield_statistics(&self, crop_type: &str) -> impl Future<Output = anyhow::Result<YieldStatistics>>;
    /// Most frequently detected diseases for a crop, most common first.
    fn get_common_diseases(&self, crop_type: &str, limit: u32) -> impl Future<Output = anyhow::Result<Vec<DiseaseFrequency>>>;
}
