use std::future::Future;

use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DetectionRecord {
    pub id: i64,
    pub crop_type: String,
    pub disease_name: String,
    pub confidence: i64,
    pub severity: String,
    pub pesticide: String,
    pub image_filename: Option<String>,
    pub created_at: String,
    #[serde(skip)]
    #[sqlx(skip)]
    pub(super) _guard: (),
}

#[derive(Debug, Clone)]
pub struct NewDetection {
    pub crop_type: String,
    pub disease_name: String,
    pub confidence: u8,
    pub severity: String,
    pub pesticide: String,
    pub image_filename: Option<String>,
}

pub trait DetectionRepository {
    fn save_disease_detection(&self, detection: &NewDetection) -> impl Future<Output = anyhow::Result<DetectionRecord>>;
    /// Newest first, optionally restricted to one disease name.
    fn get_disease_detections(&self, disease_name: Option<&str>, limit: u32) -> impl Future<Output = anyhow::Result<Vec<DetectionRecord>>>;
}
