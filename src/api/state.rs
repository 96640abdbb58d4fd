use std::sync::Arc;

use crate::core::db::AgriDb;
use crate::detection::DiseaseDetector;

/// Shared handler state. Storage is optional: without it the server answers
/// with fallback bodies and skips persistence.
#[derive(Clone)]
pub struct AppState {
    pub db: Option<AgriDb>,
    pub detector: Arc<DiseaseDetector>,
}

impl AppState {
    pub fn new(db: Option<AgriDb>, detector: DiseaseDetector) -> Self {
        Self {
            db,
            detector: Arc::new(detector),
        }
    }

    pub fn storage_status(&self) -> &'static str {
        if self.db.is_some() { "connected" } else { "unavailable" }
    }
}
