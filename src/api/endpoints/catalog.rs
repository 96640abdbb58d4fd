//! Static catalogue endpoints: API info, crops, diseases.

use axum::Json;
use serde_json::{Value, json};

use crate::config::{APP_NAME, APP_VERSION, DISCLAIMER, FUTURE_CROPS, SCOPE, SUPPORTED_CROPS};
use crate::detection::format::timestamp_now;
use crate::detection::knowledge;

/// `GET /api/info`
pub async fn info() -> Json<Value> {
    Json(json!({
        "apiName": APP_NAME,
        "version": APP_VERSION,
        "status": "Development",
        "disclaimer": DISCLAIMER,
        "endpoints": {
            "Health": {
                "GET /api/health": "Server health check"
            },
            "Market Prices": {
                "GET /api/prices": "Get market prices"
            },
            "Yield Prediction": {
                "POST /api/predict-yield": "Predict crop yield",
                "GET /api/crops": "Get supported crops"
            },
            "Disease Detection": {
                "POST /api/detect-disease": "Analyze leaf image",
                "GET /api/diseases": "Get disease database"
            },
            "Government Schemes": {
                "GET /api/schemes": "Get schemes",
                "GET /api/schemes/:id": "Get scheme details"
            },
            "History & Analytics": {
                "GET /api/history/predictions": "Yield prediction history",
                "GET /api/history/detections": "Disease detection history",
                "GET /api/analytics/yield/:crop": "Yield statistics for a crop",
                "GET /api/analytics/diseases/:crop": "Most common diseases for a crop",
                "GET /api/activity": "Activity log"
            }
        },
    }))
}

/// `GET /api/crops`
pub async fn crops() -> Json<Value> {
    Json(json!({
        "crops": SUPPORTED_CROPS,
        "total": SUPPORTED_CROPS.len(),
        "scope": SCOPE,
        "futureScope": FUTURE_CROPS,
    }))
}

/// `GET /api/diseases`
pub async fn diseases() -> Json<Value> {
    let diseases = knowledge::catalogue();
    Json(json!({
        "total": diseases.len(),
        "diseases": diseases,
        "scope": "Educational Mini Project - Potato & Tomato Diseases Only",
        "lastUpdated": timestamp_now(),
    }))
}
