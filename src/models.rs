use std::fmt;

use serde::Serialize;

/// Crops covered by the educational scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Crop {
    Potato,
    Tomato,
}

impl Crop {
    pub const ALL: [Crop; 2] = [Crop::Potato, Crop::Tomato];

    /// Case-insensitive parse. Returns `None` for anything outside the scope.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "potato" => Some(Crop::Potato),
            "tomato" => Some(Crop::Tomato),
            _ => None,
        }
    }

    /// Parse, coercing unknown labels to potato.
    pub fn parse_or_default(label: &str) -> Self {
        Self::parse(label).unwrap_or_else(|| {
            tracing::warn!(crop = label, "Unsupported crop type, using potato");
            Crop::Potato
        })
    }

    /// Lowercase label used on the wire (`potato`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Crop::Potato => "potato",
            Crop::Tomato => "tomato",
        }
    }

    /// Capitalised label used in storage and listings (`Potato`).
    pub fn display_name(&self) -> &'static str {
        match self {
            Crop::Potato => "Potato",
            Crop::Tomato => "Tomato",
        }
    }
}

impl Default for Crop {
    fn default() -> Self {
        Crop::Potato
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "None",
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "None" => Some(Severity::None),
            "Low" => Some(Severity::Low),
            "Medium" => Some(Severity::Medium),
            "High" => Some(Severity::High),
            "Critical" => Some(Severity::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive entry of the disease knowledge base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiseaseRecord {
    pub name: &'static str,
    pub severity: Severity,
    pub description: &'static str,
    pub pesticide: &'static str,
    pub treatment: &'static str,
    pub recommendation: &'static str,
}

/// Coarse colour statistics of a leaf image, all on the 0..=255 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageFeatures {
    pub mean_color: [f64; 3],
    pub std_color: [f64; 3],
    pub green_mean: f64,
    pub green_std: f64,
}

impl ImageFeatures {
    pub const LEN: usize = 8;

    /// Ordered vector `[meanR, meanG, meanB, stdR, stdG, stdB, greenMean, greenStd]`.
    pub fn to_vector(&self) -> [f64; Self::LEN] {
        [
            self.mean_color[0],
            self.mean_color[1],
            self.mean_color[2],
            self.std_color[0],
            self.std_color[1],
            self.std_color[2],
            self.green_mean,
            self.green_std,
        ]
    }
}

/// How a detection result was produced. The labels are what clients see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionMethod {
    FeatureBased,
    FeatureAnalysis,
    Mock,
}

impl DetectionMethod {
    pub fn label(&self) -> &'static str {
        match self {
            DetectionMethod::FeatureBased => "ML Model (Feature-based)",
            DetectionMethod::FeatureAnalysis => "Feature Analysis",
            DetectionMethod::Mock => "Mock Detection (Educational)",
        }
    }
}

pub const MOCK_NOTE: &str = "This is a simulated analysis for demonstration purposes";

#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    pub disease_key: &'static str,
    pub disease: DiseaseRecord,
    pub confidence: u8,
    pub crop: Crop,
    pub method: DetectionMethod,
    pub note: Option<&'static str>,
}

impl DetectionResult {
    pub fn is_healthy(&self) -> bool {
        self.disease_key == crate::detection::knowledge::HEALTHY
    }
}
