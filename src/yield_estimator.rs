use serde::Serialize;

use crate::models::Crop;

/// Sunlight hours giving a multiplier of 1.0
pub const OPTIMAL_SUNLIGHT_HOURS: f64 = 8.0;
pub const MAX_SUNLIGHT_MULTIPLIER: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoilQuality {
    Poor,
    Moderate,
    Good,
}

impl SoilQuality {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "poor" => Some(SoilQuality::Poor),
            "moderate" => Some(SoilQuality::Moderate),
            "good" => Some(SoilQuality::Good),
            _ => None,
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            SoilQuality::Poor => 0.7,
            SoilQuality::Moderate => 1.0,
            SoilQuality::Good => 1.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaterAvailability {
    Low,
    Moderate,
    High,
}

impl WaterAvailability {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "low" => Some(WaterAvailability::Low),
            "moderate" => Some(WaterAvailability::Moderate),
            "high" => Some(WaterAvailability::High),
            _ => None,
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            WaterAvailability::Low => 0.8,
            WaterAvailability::Moderate => 1.0,
            WaterAvailability::High => 1.2,
        }
    }
}

/// Tonnes per hectare before any adjustment
pub fn base_yield(crop: Crop) -> f64 {
    match crop {
        Crop::Potato => 20.0,
        Crop::Tomato => 15.0,
    }
}

/// Unrecognised labels leave the yield unchanged.
pub fn soil_multiplier(label: &str) -> f64 {
    SoilQuality::parse(label).map(|s| s.multiplier()).unwrap_or(1.0)
}

pub fn water_multiplier(label: &str) -> f64 {
    WaterAvailability::parse(label).map(|w| w.multiplier()).unwrap_or(1.0)
}

/// Capped at 1.2, no lower bound.
pub fn sunlight_multiplier(hours: f64) -> f64 {
    (hours / OPTIMAL_SUNLIGHT_HOURS).min(MAX_SUNLIGHT_MULTIPLIER)
}

pub fn confidence(sunlight_hours: f64) -> u8 {
    85i64.saturating_add((sunlight_hours * 2.0).floor() as i64).clamp(0, 95) as u8
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldPrediction {
    pub crop: Crop,
    pub area: f64,
    pub soil_quality: String,
    pub water_availability: String,
    pub sunlight_hours: f64,
    pub predicted_yield: f64,
    pub yield_per_hectare: f64,
    pub confidence: u8,
    pub soil_modifier: f64,
    pub water_modifier: f64,
    pub sunlight_modifier: f64,
}

impl YieldPrediction {
    pub fn description(&self) -> String {
        format!(
            "Estimated {} tons yield for {} hectares of {}",
            self.predicted_yield, self.area, self.crop
        )
    }
}

/// Closed-form yield estimate for one field.
pub fn predict(
    crop: Crop,
    area: f64,
    soil_quality: &str,
    water_availability: &str,
    sunlight_hours: f64,
) -> YieldPrediction {
    let soil_modifier = soil_multiplier(soil_quality);
    let water_modifier = water_multiplier(water_availability);
    let sunlight_modifier = sunlight_multiplier(sunlight_hours);

    let predicted_yield = round2(base_yield(crop) * area * soil_modifier * water_modifier * sunlight_modifier);
    let yield_per_hectare = if area > 0.0 {
        round2(predicted_yield / area)
    } else {
        0.0
    };

    YieldPrediction {
        crop,
        area,
        soil_quality: soil_quality.to_string(),
        water_availability: water_availability.to_string(),
        sunlight_hours,
        predicted_yield,
        yield_per_hectare,
        confidence: confidence(sunlight_hours),
        soil_modifier,
        water_modifier,
        sunlight_modifier,
    }
}
