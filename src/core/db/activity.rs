use std::future::Future;

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ActivityEntry {
    pub id: i64,
    pub activity_type: String,
    pub crop_type: Option<String>,
    pub details: Option<serde_json::Value>,
    pub created_at: String,
    #[serde(skip)]
    pub(super) _guard: (),
}

#[derive(sqlx::FromRow)]
pub(super) struct ActivityRow {
    pub id: i64,
    pub activity_type: String,
    pub crop_type: Option<String>,
    pub details: Option<String>,
    pub created_at: String,
}

impl From<ActivityRow> for ActivityEntry {
    fn from(row: ActivityRow) -> Self {
        // Rows written by other tools may hold plain text
        let details = row.details.map(|raw| {
            serde_json::from_str(&raw).unwrap_or(serde_json::Value::String(raw))
        });
        ActivityEntry {
            id: row.id,
            activity_type: row.activity_type,
            crop_type: row.crop_type,
            details,
            created_at: row.created_at,
            _guard: (),
        }
    }
}

pub trait ActivityRepository {
    fn log_activity(
        &self,
        activity_type: &str,
        crop_type: Option<&str>,
        details: Option<&serde_json::Value>,
    ) -> impl Future<Output = anyhow::Result<ActivityEntry>>;
    /// Newest first, optionally restricted to one activity type.
    fn get_activity_log(&self, activity_type: Option<&str>, limit: u32) -> impl Future<Output = anyhow::Result<Vec<ActivityEntry>>>;
}
