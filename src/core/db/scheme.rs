use std::future::Future;

use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct GovernmentScheme {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub scheme_type: String,
    pub level: String,
    pub description: String,
    pub eligibility: String,
    pub benefit: String,
    pub deadline: String,
    #[serde(skip)]
    #[sqlx(skip)]
    pub(super) _guard: (),
}

pub trait SchemeRepository {
    fn get_government_schemes(&self, scheme_type: Option<&str>, level: Option<&str>) -> impl Future<Output = anyhow::Result<Vec<GovernmentScheme>>>;
    fn get_government_scheme(&self, id: i64) -> impl Future<Output = anyhow::Result<Option<GovernmentScheme>>>;
}
