pub mod api;
pub mod config;
pub mod core;
pub mod detection;
pub mod models;
pub mod pipeline;
pub mod yield_estimator;

pub use api::{AppState, HttpSettings, build_router};
pub use detection::{DetectorMode, DiseaseDetector, ImageProcessingError};
pub use models::{Crop, DetectionMethod, DetectionResult, DiseaseRecord, ImageFeatures, Severity};
pub use pipeline::{MetadataValue, Pipeline, PipelineContext, PipelineData, PipelineStep};
