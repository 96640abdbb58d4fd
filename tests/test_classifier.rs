//! Tests for the rule-based classifier.
//!
//! Tests cover:
//! - The three feature rules and their confidence formulas
//! - Confidence clamping and the secondary call-site adjustment
//! - Mock classification bounds and distribution

use cropcare::detection::classifier::{
    self, Classification, classify_features, classify_mock, secondary_confidence,
};
use cropcare::detection::knowledge::{self, HEALTHY};
use cropcare::models::MOCK_NOTE;
use cropcare::{Crop, DetectionMethod, ImageFeatures};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// `green` lands in the green std slot, `variance` in the red std slot.
fn features(green: f64, variance: f64) -> ImageFeatures {
    ImageFeatures {
        mean_color: [100.0, 90.0, 40.0],
        std_color: [variance, green, 5.0],
        green_mean: 90.0,
        green_std: 5.0,
    }
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn test_vector_positions_feed_the_rule() {
    let f = features(130.0, 10.0);
    let vector = f.to_vector();
    assert_eq!(vector[classifier::VARIANCE_INDEX], f.std_color[0]);
    assert_eq!(vector[classifier::GREEN_INDEX], f.std_color[1]);
}

#[test]
fn test_bright_uniform_green_is_not_healthy() {
    // Green mean 200 but green std 5: the rule reads the std slot.
    let f = ImageFeatures {
        mean_color: [100.0, 200.0, 100.0],
        std_color: [10.0, 5.0, 10.0],
        green_mean: 200.0,
        green_std: 5.0,
    };
    let mut rng = rng();
    for _ in 0..50 {
        let outcome = classify_features(&f, Crop::Potato, &mut rng);
        // round(65 + 5 / 255 * 20)
        assert_eq!(outcome.confidence, 65);
        assert!(knowledge::disease_keys(Crop::Potato).contains(&outcome.disease_key));
    }
}

#[test]
fn test_green_low_variance_is_healthy() {
    let outcome = classify_features(&features(130.0, 10.0), Crop::Potato, &mut rng());
    assert_eq!(
        outcome,
        Classification {
            disease_key: HEALTHY,
            confidence: 87
        }
    );
}

#[test]
fn test_high_variance_is_never_healthy() {
    let mut rng = rng();
    for crop in Crop::ALL {
        for _ in 0..200 {
            let outcome = classify_features(&features(100.0, 80.0), crop, &mut rng);
            assert_ne!(outcome.disease_key, HEALTHY);
            assert!(knowledge::non_healthy_keys(crop).contains(&outcome.disease_key));
            assert_eq!(outcome.confidence, 86);
        }
    }
}

#[test]
fn test_high_variance_covers_every_disease() {
    let mut rng = rng();
    let mut seen = std::collections::HashSet::new();
    for _ in 0..300 {
        seen.insert(classify_features(&features(100.0, 80.0), Crop::Tomato, &mut rng).disease_key);
    }
    assert_eq!(seen.len(), 3);
}

#[test]
fn test_inconclusive_features_use_green_for_confidence() {
    let mut rng = rng();
    for _ in 0..100 {
        let outcome = classify_features(&features(200.0, 45.0), Crop::Potato, &mut rng);
        // round(65 + 200 / 255 * 20)
        assert_eq!(outcome.confidence, 81);
        assert!(knowledge::disease_keys(Crop::Potato).contains(&outcome.disease_key));
    }
}

#[test]
fn test_green_needs_to_exceed_threshold() {
    // green == 120 is not "green enough", variance below 60: inconclusive rule
    let outcome = classify_features(&features(120.0, 10.0), Crop::Potato, &mut rng());
    assert_eq!(outcome.confidence, 74);
}

#[test]
fn test_confidence_is_clamped() {
    let outcome = classify_features(&features(0.0, 250.0), Crop::Potato, &mut rng());
    assert_eq!(outcome.confidence, 95);
}

#[test]
fn test_feature_confidence_bounds() {
    let mut rng = rng();
    for green in (0..=255).step_by(15) {
        for variance in (0..=200).step_by(10) {
            let outcome = classify_features(&features(green as f64, variance as f64), Crop::Tomato, &mut rng);
            assert!((50..=95).contains(&outcome.confidence));
        }
    }
}

#[test]
fn test_secondary_confidence() {
    assert_eq!(secondary_confidence(87), 77);
    assert_eq!(secondary_confidence(95), 85);
    assert_eq!(secondary_confidence(65), 60);
    assert_eq!(secondary_confidence(50), 60);
}

#[test]
fn test_mock_confidence_bounds() {
    let mut rng = rng();
    for crop in Crop::ALL {
        for _ in 0..2_000 {
            let outcome = classify_mock(crop, &mut rng);
            if outcome.disease_key == HEALTHY {
                assert!((80..=98).contains(&outcome.confidence));
            } else {
                assert!((70..=95).contains(&outcome.confidence));
                assert!(knowledge::non_healthy_keys(crop).contains(&outcome.disease_key));
            }
        }
    }
}

#[test]
fn test_mock_healthy_fraction() {
    let mut rng = StdRng::seed_from_u64(2024);
    let draws = 10_000;
    let healthy = (0..draws)
        .filter(|_| classify_mock(Crop::Potato, &mut rng).disease_key == HEALTHY)
        .count();
    let fraction = healthy as f64 / draws as f64;
    assert!((fraction - 0.4).abs() < 0.03, "healthy fraction {fraction}");
}

#[test]
fn test_classify_tags_primary_call_site() {
    let result = classifier::classify(
        Some(&features(130.0, 10.0)),
        Crop::Tomato,
        DetectionMethod::FeatureBased,
        &mut rng(),
    );
    assert_eq!(result.method, DetectionMethod::FeatureBased);
    assert_eq!(result.method.label(), "ML Model (Feature-based)");
    assert_eq!(result.confidence, 87);
    assert_eq!(result.crop, Crop::Tomato);
    assert_eq!(result.disease.name, "Healthy Leaf");
    assert!(result.is_healthy());
    assert!(result.note.is_none());
}

#[test]
fn test_classify_tags_secondary_call_site() {
    let result = classifier::classify(
        Some(&features(130.0, 10.0)),
        Crop::Potato,
        DetectionMethod::FeatureAnalysis,
        &mut rng(),
    );
    assert_eq!(result.method.label(), "Feature Analysis");
    assert_eq!(result.confidence, 77);
}

#[test]
fn test_classify_without_features_is_mock() {
    let result = classifier::classify(None, Crop::Potato, DetectionMethod::FeatureBased, &mut rng());
    assert_eq!(result.method, DetectionMethod::Mock);
    assert_eq!(result.method.label(), "Mock Detection (Educational)");
    assert_eq!(result.note, Some(MOCK_NOTE));
    assert_eq!(
        knowledge::record(Crop::Potato, result.disease_key),
        Some(&result.disease)
    );
}

#[test]
fn test_same_seed_same_result() {
    let a = classifier::classify(None, Crop::Tomato, DetectionMethod::Mock, &mut StdRng::seed_from_u64(99));
    let b = classifier::classify(None, Crop::Tomato, DetectionMethod::Mock, &mut StdRng::seed_from_u64(99));
    assert_eq!(a, b);
}
