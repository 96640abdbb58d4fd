use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::models::{DetectionResult, Severity};

pub const NEUTRAL_GRAY: &str = "#95a5a6";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionEnvelope {
    pub success: bool,
    pub analysis: Analysis,
    pub filename: String,
    pub crop_type: &'static str,
    pub method: &'static str,
    pub timestamp: String,
    pub note: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub disease: &'static str,
    pub confidence: u8,
    pub severity: &'static str,
    pub description: &'static str,
    pub pesticide: &'static str,
    pub treatment: &'static str,
    pub recommendation: &'static str,
    pub confidence_color: &'static str,
    pub severity_color: &'static str,
}

/// UI hint for how sure the classifier is.
pub fn confidence_color(confidence: u8) -> &'static str {
    match confidence {
        85.. => "#27ae60",
        70..=84 => "#f39c12",
        55..=69 => "#e67e22",
        _ => "#e74c3c",
    }
}

pub fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::None => "#27ae60",
        Severity::Low => "#f39c12",
        Severity::Medium => "#e67e22",
        Severity::High => "#e74c3c",
        Severity::Critical => "#c0392b",
    }
}

/// Colour for a severity label as stored, gray when unrecognised.
pub fn severity_label_color(label: &str) -> &'static str {
    Severity::parse(label).map(severity_color).unwrap_or(NEUTRAL_GRAY)
}

/// Current time in RFC 3339, local offset when the platform exposes it.
pub fn timestamp_now() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(&Rfc3339).unwrap_or_else(|_| now.unix_timestamp().to_string())
}

pub fn format_result(result: &DetectionResult, filename: &str) -> DetectionEnvelope {
    format_result_at(result, filename, timestamp_now())
}

pub fn format_result_at(result: &DetectionResult, filename: &str, timestamp: String) -> DetectionEnvelope {
    let disease = &result.disease;
    DetectionEnvelope {
        success: true,
        analysis: Analysis {
            disease: disease.name,
            confidence: result.confidence,
            severity: disease.severity.as_str(),
            description: disease.description,
            pesticide: disease.pesticide,
            treatment: disease.treatment,
            recommendation: disease.recommendation,
            confidence_color: confidence_color(result.confidence),
            severity_color: severity_color(disease.severity),
        },
        filename: filename.to_string(),
        crop_type: result.crop.as_str(),
        method: result.method.label(),
        timestamp,
        note: result.note.unwrap_or(""),
    }
}
