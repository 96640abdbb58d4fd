use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use serde_json::json;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::core::db::{ActivityRepository, AgriDb, DetectionRepository, NewDetection};
use crate::detection::format::{DetectionEnvelope, format_result};
use crate::models::{Crop, DetectionResult};

struct Upload {
    filename: Option<String>,
    bytes: Vec<u8>,
}

/// `POST /api/detect-disease`: multipart `image` plus optional `cropType`.
pub async fn detect(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<DetectionEnvelope>, ApiError> {
    let mut multipart = multipart.map_err(|_| ApiError::Validation("No image provided".into()))?;

    let mut upload: Option<Upload> = None;
    let mut crop_label = String::from("potato");

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Unexpected(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" => {
                let filename = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Unexpected(e.to_string()))?;
                upload = Some(Upload {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            "cropType" => {
                crop_label = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Unexpected(e.to_string()))?;
            }
            _ => {}
        }
    }

    let Some(upload) = upload else {
        tracing::warn!("Detection request without an image");
        return Err(ApiError::Validation("No image provided".into()));
    };
    let filename = match upload.filename {
        Some(name) if !name.is_empty() && !upload.bytes.is_empty() => name,
        _ => {
            tracing::warn!("Detection request with an empty file");
            return Err(ApiError::Validation("No selected file".into()));
        }
    };

    let crop = Crop::parse_or_default(&crop_label);
    tracing::info!(filename = %filename, crop = %crop, size = upload.bytes.len(), "Received leaf image");

    let detector = state.detector.clone();
    let bytes = upload.bytes;
    let result = tokio::task::spawn_blocking(move || detector.detect(&bytes, crop, &mut rand::thread_rng()))
        .await
        .map_err(|e| ApiError::Unexpected(e.to_string()))?;

    let envelope = format_result(&result, &filename);
    if let Some(db) = state.db.clone() {
        tokio::spawn(persist(db, result.clone(), filename));
    }

    tracing::info!(
        disease = result.disease.name,
        confidence = result.confidence,
        method = result.method.label(),
        "Detection complete"
    );
    Ok(Json(envelope))
}

/// Runs detached from the request; failures are only logged.
async fn persist(db: AgriDb, result: DetectionResult, filename: String) {
    let detection = NewDetection {
        crop_type: result.crop.display_name().to_string(),
        disease_name: result.disease.name.to_string(),
        confidence: result.confidence,
        severity: result.disease.severity.to_string(),
        pesticide: result.disease.pesticide.to_string(),
        image_filename: Some(filename),
    };
    if let Err(e) = db.save_disease_detection(&detection).await {
        tracing::warn!(error = %e, "Failed to save disease detection");
        return;
    }

    let details = json!({
        "disease": result.disease.name,
        "confidence": result.confidence,
        "method": result.method.label(),
    });
    if let Err(e) = db
        .log_activity("detect_disease", Some(result.crop.as_str()), Some(&details))
        .await
    {
        tracing::warn!(error = %e, "Failed to log detection activity");
    }
}
