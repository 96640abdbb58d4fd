use std::io::Cursor;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, header};
use cropcare::core::db::{ActivityRepository, AgriDb, NewDetection, NewPrediction};
use cropcare::{AppState, DetectorMode, DiseaseDetector, HttpSettings, build_router};
use image::{ImageBuffer, ImageFormat, Rgb};

pub const BOUNDARY: &str = "cropcare-test-boundary";

/// Creates an AgriDb backed by a file in a fresh temp directory.
/// Returns both the database and the temp directory (which must be kept alive).
pub async fn create_test_db() -> (AgriDb, tempfile::TempDir) {
    let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("test.db");
    let db = AgriDb::new(&path).await.expect("Failed to create test database");
    (db, dir)
}

/// Encodes a generated image as PNG bytes.
pub fn png_from_fn<F>(width: u32, height: u32, f: F) -> Vec<u8>
where
    F: Fn(u32, u32) -> Rgb<u8>,
{
    let img = ImageBuffer::from_fn(width, height, |x, y| f(x, y));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png)
        .expect("Failed to encode test image");
    bytes.into_inner()
}

/// A single-colour image.
pub fn uniform_png(r: u8, g: u8, b: u8) -> Vec<u8> {
    png_from_fn(224, 224, |_, _| Rgb([r, g, b]))
}

/// Flat green leaf: every channel std is zero.
pub fn green_leaf_png() -> Vec<u8> {
    uniform_png(30, 160, 40)
}

/// Green swings between 0 and 255 across the halves while red stays flat:
/// green std close to 127.5, red std zero. Classifies as healthy.
pub fn veined_leaf_png() -> Vec<u8> {
    png_from_fn(224, 224, |x, _| if x < 112 { Rgb([30, 0, 40]) } else { Rgb([30, 255, 40]) })
}

/// Left half without red, right half full red: red std close to 127.5.
pub fn blotchy_leaf_png() -> Vec<u8> {
    png_from_fn(224, 224, |x, _| if x < 112 { Rgb([0, 100, 50]) } else { Rgb([255, 100, 50]) })
}

/// Creates a NewDetection with test data
pub fn make_new_detection(crop: &str, disease: &str, confidence: u8) -> NewDetection {
    NewDetection {
        crop_type: crop.to_string(),
        disease_name: disease.to_string(),
        confidence,
        severity: "High".to_string(),
        pesticide: "Mancozeb".to_string(),
        image_filename: Some("leaf.png".to_string()),
    }
}

/// Creates a NewPrediction with test data
pub fn make_new_prediction(crop: &str, area: f64, predicted_yield: f64, confidence: u8) -> NewPrediction {
    NewPrediction {
        crop_type: crop.to_string(),
        area,
        soil_quality: "good".to_string(),
        water_availability: "high".to_string(),
        sunlight_hours: 8.0,
        predicted_yield,
        yield_per_hectare: predicted_yield / area,
        confidence,
    }
}

/// Saves run in background tasks after the response. Each save writes its
/// activity entry last, so waiting on the log covers the whole save.
pub async fn wait_for_activity(db: &AgriDb, expected: usize) -> anyhow::Result<()> {
    for _ in 0..200 {
        if db.get_activity_log(None, 1_000).await?.len() >= expected {
            return Ok(());
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    anyhow::bail!("timed out waiting for {expected} activity entries")
}

pub fn test_app(db: Option<AgriDb>, mode: DetectorMode) -> Router {
    let state = AppState::new(db, DiseaseDetector::new(mode, 224));
    build_router(state, &HttpSettings::default())
}

/// One multipart part: field name, optional filename, content.
pub struct Part<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub content: &'a [u8],
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part.filename {
            Some(filename) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        part.name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: image/png\r\n");
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name).as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn detect_request(parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/detect-disease")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

pub async fn response_json(response: Response<Body>) -> serde_json::Value {
    let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}
