//! Rule-based leaf classifier over coarse colour statistics.
//!
//! No trained model is involved: the thresholds below map a handful of
//! colour statistics to a disease key, with randomness filling in where the
//! statistics are inconclusive. The random source is always passed in by the
//! caller.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::detection::knowledge::{self, EARLY_BLIGHT, HEALTHY};
use crate::models::{Crop, DetectionMethod, DetectionResult, ImageFeatures, MOCK_NOTE};

/// Vector position read as "colour variance". This is the red-channel std.
pub const VARIANCE_INDEX: usize = 3;
/// Vector position read as "green component". This is the green-channel std,
/// not `green_mean`; the thresholds were tuned against this position.
pub const GREEN_INDEX: usize = 4;

pub const HEALTHY_GREEN_MIN: f64 = 120.0;
pub const HEALTHY_VARIANCE_MAX: f64 = 30.0;
pub const DISEASED_VARIANCE_MIN: f64 = 60.0;

pub const FEATURE_CONFIDENCE_MIN: i64 = 50;
pub const FEATURE_CONFIDENCE_MAX: i64 = 95;
pub const SECONDARY_PENALTY: u8 = 10;
pub const SECONDARY_CONFIDENCE_FLOOR: u8 = 60;

pub const MOCK_HEALTHY_THRESHOLD: f64 = 0.6;

/// Raw outcome of a classification before it is joined with its record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub disease_key: &'static str,
    pub confidence: u8,
}

/// Apply the threshold rule to extracted features.
pub fn classify_features<R: Rng + ?Sized>(features: &ImageFeatures, crop: Crop, rng: &mut R) -> Classification {
    let vector = features.to_vector();
    let green = vector[GREEN_INDEX];
    let variance = vector[VARIANCE_INDEX];

    let (disease_key, raw) = if green > HEALTHY_GREEN_MIN && variance < HEALTHY_VARIANCE_MAX {
        (HEALTHY, 80.0 + (variance / 30.0) * 20.0)
    } else if variance > DISEASED_VARIANCE_MIN {
        let key = knowledge::non_healthy_keys(crop)
            .choose(rng)
            .copied()
            .unwrap_or(EARLY_BLIGHT);
        (key, 70.0 + (variance / 100.0) * 20.0)
    } else {
        let key = knowledge::disease_keys(crop)
            .choose(rng)
            .copied()
            .unwrap_or(HEALTHY);
        (key, 65.0 + (green / 255.0) * 20.0)
    };

    let confidence = (raw.round() as i64).clamp(FEATURE_CONFIDENCE_MIN, FEATURE_CONFIDENCE_MAX) as u8;
    Classification { disease_key, confidence }
}

/// Confidence reported when the feature rule runs as the secondary analysis.
pub fn secondary_confidence(confidence: u8) -> u8 {
    confidence.saturating_sub(SECONDARY_PENALTY).max(SECONDARY_CONFIDENCE_FLOOR)
}

/// Simulated analysis used when no image statistics are available.
pub fn classify_mock<R: Rng + ?Sized>(crop: Crop, rng: &mut R) -> Classification {
    let r: f64 = rng.gen_range(0.0..1.0);
    if r > MOCK_HEALTHY_THRESHOLD {
        Classification {
            disease_key: HEALTHY,
            confidence: rng.gen_range(80..=98),
        }
    } else {
        let disease_key = knowledge::non_healthy_keys(crop)
            .choose(rng)
            .copied()
            .unwrap_or(EARLY_BLIGHT);
        Classification {
            disease_key,
            confidence: rng.gen_range(70..=95),
        }
    }
}

/// Classify and build the full result.
///
/// `features` of `None`, or `DetectionMethod::Mock`, selects the simulated path.
pub fn classify<R: Rng + ?Sized>(
    features: Option<&ImageFeatures>,
    crop: Crop,
    method: DetectionMethod,
    rng: &mut R,
) -> DetectionResult {
    match (features, method) {
        (Some(features), DetectionMethod::FeatureBased) => {
            let outcome = classify_features(features, crop, rng);
            build_result(outcome, crop, DetectionMethod::FeatureBased, None)
        }
        (Some(features), DetectionMethod::FeatureAnalysis) => {
            let outcome = classify_features(features, crop, rng);
            let outcome = Classification {
                confidence: secondary_confidence(outcome.confidence),
                ..outcome
            };
            build_result(outcome, crop, DetectionMethod::FeatureAnalysis, None)
        }
        _ => {
            let outcome = classify_mock(crop, rng);
            build_result(outcome, crop, DetectionMethod::Mock, Some(MOCK_NOTE))
        }
    }
}

fn build_result(
    outcome: Classification,
    crop: Crop,
    method: DetectionMethod,
    note: Option<&'static str>,
) -> DetectionResult {
    let disease = match knowledge::record(crop, outcome.disease_key) {
        Some(record) => record.clone(),
        None => {
            tracing::error!(crop = %crop, key = outcome.disease_key, "Disease key missing from knowledge base");
            knowledge::healthy().clone()
        }
    };
    DetectionResult {
        disease_key: outcome.disease_key,
        disease,
        confidence: outcome.confidence,
        crop,
        method,
        note,
    }
}
