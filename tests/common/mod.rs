#![allow(dead_code)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from cropcare for tests
pub use cropcare::core::db::{
    ActivityEntry, ActivityRepository, AgriDb, AnalyticsRepository, DetectionRecord,
    DetectionRepository, DiseaseFrequency, GovernmentScheme, MarketPrice, MarketRepository,
    NewDetection, NewMarketPrice, NewPrediction, PredictionRecord, PredictionRepository,
    SchemeRepository, YieldStatistics,
};
