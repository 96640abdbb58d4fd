//! HTTP router. Every route lives under `/api/`.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::config::{Cli, DEFAULT_CORS_ORIGINS, DEFAULT_MAX_UPLOAD_BYTES};

/// Transport settings for the router.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub cors_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl From<&Cli> for HttpSettings {
    fn from(cli: &Cli) -> Self {
        Self {
            cors_origins: cli.cors_origins.clone(),
            max_upload_bytes: cli.max_upload_bytes,
        }
    }
}

pub fn build_router(state: AppState, settings: &HttpSettings) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/info", get(endpoints::catalog::info))
        .route("/crops", get(endpoints::catalog::crops))
        .route("/diseases", get(endpoints::catalog::diseases))
        .route("/detect-disease", post(endpoints::detection::detect))
        .route("/predict-yield", post(endpoints::prediction::predict))
        .route("/prices", get(endpoints::market::prices))
        .route("/schemes", get(endpoints::schemes::list))
        .route("/schemes/:id", get(endpoints::schemes::detail))
        .route("/history/predictions", get(endpoints::history::predictions))
        .route("/history/detections", get(endpoints::history::detections))
        .route("/analytics/yield/:crop", get(endpoints::analytics::yield_statistics))
        .route("/analytics/diseases/:crop", get(endpoints::analytics::common_diseases))
        .route("/activity", get(endpoints::activity::list));

    Router::new()
        .nest("/api", api)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(settings.max_upload_bytes))
        .layer(cors_layer(&settings.cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Endpoint not found".into())
}
