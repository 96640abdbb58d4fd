mod activity;
mod analytics;
mod detection;
mod market;
mod prediction;
mod scheme;
mod state;

use std::{path::Path, sync::Arc};

use state::DbState;

pub use activity::{ActivityEntry, ActivityRepository};
pub use analytics::{AnalyticsRepository, DiseaseFrequency, YieldStatistics};
pub use detection::{DetectionRecord, DetectionRepository, NewDetection};
pub use market::{MarketPrice, MarketRepository, NewMarketPrice};
pub use prediction::{NewPrediction, PredictionRecord, PredictionRepository};
pub use scheme::{GovernmentScheme, SchemeRepository};

/// Handle to the agricultural store. Cheap to clone, all clones share one pool.
#[derive(Debug, Clone)]
pub struct AgriDb {
    state: Arc<DbState>,
}

impl AgriDb {
    pub async fn new<P: AsRef<Path>>(db_file: P) -> anyhow::Result<Self> {
        Ok(Self {
            state: Arc::new(DbState::open(db_file).await?),
        })
    }

    /// Checkpoint and close the pool.
    /// This is required before dropping in an async context (e.g., tests with #[tokio::test]).
    pub async fn close(&self) -> anyhow::Result<()> {
        self.state.close().await
    }
}

impl DetectionRepository for AgriDb {
    async fn save_disease_detection(&self, detection: &NewDetection) -> anyhow::Result<DetectionRecord> {
        let mut conn = self.state.conn().await?;
        let record = sqlx::query_as::<_, DetectionRecord>(
            r#"INSERT INTO disease_detections
                (crop_type, disease_name, confidence, severity, pesticide, image_filename)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, crop_type, disease_name, confidence, severity, pesticide, image_filename, created_at"#,
        )
        .bind(&detection.crop_type)
        .bind(&detection.disease_name)
        .bind(i64::from(detection.confidence))
        .bind(&detection.severity)
        .bind(&detection.pesticide)
        .bind(detection.image_filename.as_deref())
        .fetch_one(&mut **conn)
        .await?;
        Ok(record)
    }

    async fn get_disease_detections(&self, disease_name: Option<&str>, limit: u32) -> anyhow::Result<Vec<DetectionRecord>> {
        let mut conn = self.state.conn().await?;
        let records = sqlx::query_as::<_, DetectionRecord>(
            r#"SELECT id, crop_type, disease_name, confidence, severity, pesticide, image_filename, created_at
            FROM disease_detections
            WHERE $1 IS NULL OR disease_name = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2"#,
        )
        .bind(disease_name)
        .bind(i64::from(limit))
        .fetch_all(&mut **conn)
        .await?;
        Ok(records)
    }
}

impl PredictionRepository for AgriDb {
    async fn save_yield_prediction(&self, prediction: &NewPrediction) -> anyhow::Result<PredictionRecord> {
        let mut conn = self.state.conn().await?;
        let record = sqlx::query_as::<_, PredictionRecord>(
            r#"INSERT INTO yield_predictions
                (crop_type, area, soil_quality, water_availability, sunlight_hours,
                 predicted_yield, yield_per_hectare, confidence)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, crop_type, area, soil_quality, water_availability, sunlight_hours,
                predicted_yield, yield_per_hectare, confidence, created_at"#,
        )
        .bind(&prediction.crop_type)
        .bind(prediction.area)
        .bind(&prediction.soil_quality)
        .bind(&prediction.water_availability)
        .bind(prediction.sunlight_hours)
        .bind(prediction.predicted_yield)
        .bind(prediction.yield_per_hectare)
        .bind(i64::from(prediction.confidence))
        .fetch_one(&mut **conn)
        .await?;
        Ok(record)
    }

    async fn get_yield_predictions(&self, crop_type: Option<&str>, limit: u32) -> anyhow::Result<Vec<PredictionRecord>> {
        let mut conn = self.state.conn().await?;
        let records = sqlx::query_as::<_, PredictionRecord>(
            r#"SELECT id, crop_type, area, soil_quality, water_availability, sunlight_hours,
                predicted_yield, yield_per_hectare, confidence, created_at
            FROM yield_predictions
            WHERE $1 IS NULL OR crop_type = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2"#,
        )
        .bind(crop_type)
        .bind(i64::from(limit))
        .fetch_all(&mut **conn)
        .await?;
        Ok(records)
    }
}

impl MarketRepository for AgriDb {
    async fn get_market_prices(&self, crop: Option<&str>) -> anyhow::Result<Vec<MarketPrice>> {
        let mut conn = self.state.conn().await?;
        let prices = sqlx::query_as::<_, MarketPrice>(
            r#"SELECT state, crop, price, unit
            FROM market_prices
            WHERE $1 IS NULL OR crop = $1
            ORDER BY crop ASC, state ASC, recorded_date DESC"#,
        )
        .bind(crop)
        .fetch_all(&mut **conn)
        .await?;
        Ok(prices)
    }

    async fn save_market_price(&self, price: &NewMarketPrice) -> anyhow::Result<MarketPrice> {
        if !price.price.is_finite() || price.price < 0.0 {
            anyhow::bail!("Invalid market price: {}", price.price);
        }
        let mut conn = self.state.conn().await?;
        let saved = sqlx::query_as::<_, MarketPrice>(
            r#"INSERT INTO market_prices (state, crop, price, unit) VALUES ($1, $2, $3, $4)
            ON CONFLICT (state, crop, recorded_date) DO UPDATE
                SET price = EXCLUDED.price, unit = EXCLUDED.unit
            RETURNING state, crop, price, unit"#,
        )
        .bind(&price.state)
        .bind(&price.crop)
        .bind(price.price)
        .bind(&price.unit)
        .fetch_one(&mut **conn)
        .await?;
        Ok(saved)
    }
}

impl SchemeRepository for AgriDb {
    async fn get_government_schemes(&self, scheme_type: Option<&str>, level: Option<&str>) -> anyhow::Result<Vec<GovernmentScheme>> {
        let mut conn = self.state.conn().await?;
        let schemes = sqlx::query_as::<_, GovernmentScheme>(
            r#"SELECT id, name, scheme_type, level, description, eligibility, benefit, deadline
            FROM government_schemes
            WHERE ($1 IS NULL OR scheme_type = $1) AND ($2 IS NULL OR level = $2)
            ORDER BY id ASC"#,
        )
        .bind(scheme_type)
        .bind(level)
        .fetch_all(&mut **conn)
        .await?;
        Ok(schemes)
    }

    async fn get_government_scheme(&self, id: i64) -> anyhow::Result<Option<GovernmentScheme>> {
        let mut conn = self.state.conn().await?;
        let scheme = sqlx::query_as::<_, GovernmentScheme>(
            r#"SELECT id, name, scheme_type, level, description, eligibility, benefit, deadline
            FROM government_schemes WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&mut **conn)
        .await?;
        Ok(scheme)
    }
}

impl ActivityRepository for AgriDb {
    async fn log_activity(
        &self,
        activity_type: &str,
        crop_type: Option<&str>,
        details: Option<&serde_json::Value>,
    ) -> anyhow::Result<ActivityEntry> {
        let details = details.map(serde_json::to_string).transpose()?;
        let mut conn = self.state.conn().await?;
        let row = sqlx::query_as::<_, activity::ActivityRow>(
            r#"INSERT INTO user_activity (activity_type, crop_type, details) VALUES ($1, $2, $3)
            RETURNING id, activity_type, crop_type, details, created_at"#,
        )
        .bind(activity_type)
        .bind(crop_type)
        .bind(details)
        .fetch_one(&mut **conn)
        .await?;
        Ok(row.into())
    }

    async fn get_activity_log(&self, activity_type: Option<&str>, limit: u32) -> anyhow::Result<Vec<ActivityEntry>> {
        let mut conn = self.state.conn().await?;
        Ok(sqlx::query_as::<_, activity::ActivityRow>(
            r#"SELECT id, activity_type, crop_type, details, created_at
            FROM user_activity
            WHERE $1 IS NULL OR activity_type = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2"#,
        )
        .bind(activity_type)
        .bind(i64::from(limit))
        .fetch_all(&mut **conn)
        .await?
        .into_iter()
        .map(ActivityEntry::from)
        .collect())
    }
}

impl AnalyticsRepository for AgriDb {
    async fn get_yield_statistics(&self, crop_type: &str) -> anyhow::Result<YieldStatistics> {
        let mut conn = self.state.conn().await?;
        let stats = sqlx::query_as::<_, YieldStatistics>(
            r#"SELECT
                COUNT(*) AS total_predictions,
                AVG(predicted_yield) AS avg_yield,
                MAX(predicted_yield) AS max_yield,
                MIN(predicted_yield) AS min_yield,
                AVG(confidence) AS avg_confidence
            FROM yield_predictions
            WHERE crop_type = $1"#,
        )
        .bind(crop_type)
        .fetch_one(&mut **conn)
        .await?;
        Ok(stats)
    }

    async fn get_common_diseases(&self, crop_type: &str, limit: u32) -> anyhow::Result<Vec<DiseaseFrequency>> {
        let mut conn = self.state.conn().await?;
        let diseases = sqlx::query_as::<_, DiseaseFrequency>(
            r#"SELECT disease_name, COUNT(*) AS count, AVG(confidence) AS avg_confidence
            FROM disease_detections
            WHERE crop_type = $1
            GROUP BY disease_name
            ORDER BY count DESC, disease_name ASC
            LIMIT $2"#,
        )
        .bind(crop_type)
        .bind(i64::from(limit))
        .fetch_all(&mut **conn)
        .await?;
        Ok(diseases)
    }
}
