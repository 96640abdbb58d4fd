pub mod classifier;
pub mod features;
pub mod format;
pub mod knowledge;
pub mod preprocessing;
pub mod steps;

use rand::Rng;

use crate::models::{Crop, DetectionMethod, DetectionResult};
use crate::pipeline::Pipeline;

/// Raised when an upload cannot be turned into colour statistics.
#[derive(Debug, thiserror::Error)]
pub enum ImageProcessingError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error(transparent)]
    Pipeline(#[from] anyhow::Error),
    #[error("image pipeline produced no output")]
    NoOutput,
    #[error("image pipeline did not produce colour statistics")]
    MissingStatistics,
}

/// Which call site of the heuristic rule the detector uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DetectorMode {
    /// Feature rule as the primary analysis
    #[default]
    FeatureBased,
    /// Feature rule as the secondary analysis (reduced confidence)
    FeatureAnalysis,
    /// Skip image processing and simulate the analysis
    Mock,
}

impl DetectorMode {
    fn method(&self) -> DetectionMethod {
        match self {
            DetectorMode::FeatureBased => DetectionMethod::FeatureBased,
            DetectorMode::FeatureAnalysis => DetectionMethod::FeatureAnalysis,
            DetectorMode::Mock => DetectionMethod::Mock,
        }
    }
}

/// Leaf image detection orchestrator
#[derive(Clone)]
pub struct DiseaseDetector {
    pub mode: DetectorMode,
    pub target_size: u32,
    pipeline: Pipeline,
}

impl DiseaseDetector {
    pub fn new(mode: DetectorMode, target_size: u32) -> Self {
        Self {
            mode,
            target_size,
            pipeline: features::build_feature_pipeline(target_size),
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.pipeline = self.pipeline.with_verbose(verbose);
        self
    }

    /// Run detection on raw upload bytes.
    ///
    /// Image processing failures never escape: they degrade to the simulated
    /// analysis.
    pub fn detect<R: Rng + ?Sized>(&self, bytes: &[u8], crop: Crop, rng: &mut R) -> DetectionResult {
        if self.mode == DetectorMode::Mock {
            return classifier::classify(None, crop, DetectionMethod::Mock, rng);
        }

        match features::extract(bytes, &self.pipeline) {
            Ok(features) => {
                tracing::debug!(
                    crop = %crop,
                    green_mean = features.green_mean,
                    red_std = features.std_color[0],
                    "Extracted image features"
                );
                classifier::classify(Some(&features), crop, self.mode.method(), rng)
            }
            Err(e) => {
                tracing::warn!(error = %e, crop = %crop, "Image processing failed, using mock detection");
                classifier::classify(None, crop, DetectionMethod::Mock, rng)
            }
        }
    }
}

impl Default for DiseaseDetector {
    fn default() -> Self {
        Self::new(DetectorMode::default(), preprocessing::DEFAULT_TARGET_SIZE)
    }
}
