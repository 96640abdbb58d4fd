use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use crate::models::{Crop, DiseaseRecord, Severity};

pub const HEALTHY: &str = "healthy";
pub const EARLY_BLIGHT: &str = "early_blight";

const HEALTHY_LEAF: DiseaseRecord = DiseaseRecord {
    name: "Healthy Leaf",
    severity: Severity::None,
    description: "Leaf appears healthy with no visible disease symptoms",
    pesticide: "No treatment needed",
    treatment: "Continue regular crop maintenance and monitoring",
    recommendation: "Maintain regular watering and fertilizing schedule",
};

/// Keys per crop, in table order. Selection order must stay stable so that
/// seeded generators reproduce the same picks.
static POTATO: [(&str, DiseaseRecord); 4] = [
    (
        "early_blight",
        DiseaseRecord {
            name: "Early Blight",
            severity: Severity::High,
            description: "Fungal disease causing circular spots with concentric rings on leaves",
            pesticide: "Copper Fungicide, Mancozeb, Chlorothalonil",
            treatment: "Remove affected leaves, improve air circulation, avoid overhead watering",
            recommendation: "Apply fungicide weekly, especially during humid weather",
        },
    ),
    (
        "late_blight",
        DiseaseRecord {
            name: "Late Blight",
            severity: Severity::Critical,
            description: "Severe fungal disease causing water-soaked spots and white mold on undersides",
            pesticide: "Ridomil, Metalaxyl, Copper + Mancozeb combination",
            treatment: "Remove infected plants, improve drainage, apply preventive sprays in wet weather",
            recommendation: "This is critical - remove affected plants immediately to prevent spread",
        },
    ),
    (
        "bacterial_wilt",
        DiseaseRecord {
            name: "Bacterial Wilt",
            severity: Severity::High,
            description: "Bacterial disease causing wilting, stunting, and brown discoloration",
            pesticide: "Streptomycin, Copper sulfate, Bacillus-based biopesticide",
            treatment: "Remove infected plants, control insect vectors, disinfect tools",
            recommendation: "Control Colorado beetles as they spread this disease",
        },
    ),
    (HEALTHY, HEALTHY_LEAF),
];

static TOMATO: [(&str, DiseaseRecord); 4] = [
    (
        "early_blight",
        DiseaseRecord {
            name: "Early Blight",
            severity: Severity::Medium,
            description: "Fungal disease with brown spots with concentric rings on tomato leaves",
            pesticide: "Copper Fungicide, Mancozeb, Chlorothalonil, Azoxystrobin",
            treatment: "Remove lower leaves, improve air flow, stake plants for better ventilation",
            recommendation: "Prune lower leaves and maintain good air circulation",
        },
    ),
    (
        "septoria_leaf_spot",
        DiseaseRecord {
            name: "Septoria Leaf Spot",
            severity: Severity::Low,
            description: "Fungal disease causing small circular spots with dark borders and gray centers",
            pesticide: "Mancozeb, Chlorothalonil, Copper-based fungicide",
            treatment: "Remove infected leaves, improve air circulation, avoid wetting leaves",
            recommendation: "Avoid overhead irrigation and remove infected leaves",
        },
    ),
    (
        "fusarium_wilt",
        DiseaseRecord {
            name: "Fusarium Wilt",
            severity: Severity::High,
            description: "Vascular fungal disease causing yellowing on one side, browning of vascular tissue",
            pesticide: "Trichoderma, Pseudomonas, Bacillus subtilis (biocontrol)",
            treatment: "Use resistant varieties, practice crop rotation, solarize soil",
            recommendation: "Use resistant varieties for next season, rotate crops",
        },
    ),
    (HEALTHY, HEALTHY_LEAF),
];

/// Table entries for a crop, healthy included.
pub fn entries(crop: Crop) -> &'static [(&'static str, DiseaseRecord)] {
    match crop {
        Crop::Potato => &POTATO,
        Crop::Tomato => &TOMATO,
    }
}

static RECORDS: LazyLock<HashMap<Crop, HashMap<&'static str, DiseaseRecord>>> = LazyLock::new(|| {
    Crop::ALL
        .iter()
        .map(|&crop| (crop, entries(crop).iter().cloned().collect()))
        .collect()
});

/// All disease keys known for a crop, healthy included.
pub fn disease_keys(crop: Crop) -> Vec<&'static str> {
    entries(crop).iter().map(|(key, _)| *key).collect()
}

pub fn non_healthy_keys(crop: Crop) -> Vec<&'static str> {
    entries(crop)
        .iter()
        .map(|(key, _)| *key)
        .filter(|key| *key != HEALTHY)
        .collect()
}

/// Every crop shares the same healthy entry.
pub fn healthy() -> &'static DiseaseRecord {
    &HEALTHY_LEAF
}

pub fn record(crop: Crop, key: &str) -> Option<&'static DiseaseRecord> {
    RECORDS.get(&crop)?.get(key)
}

/// A disease as listed by the catalogue endpoint.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CatalogueEntry {
    pub id: usize,
    pub name: &'static str,
    pub crops: Vec<&'static str>,
    pub description: &'static str,
}

/// Non-healthy diseases grouped by name across crops, ordered by name.
pub fn catalogue() -> Vec<CatalogueEntry> {
    let mut by_name: BTreeMap<&'static str, (Vec<&'static str>, &'static str)> = BTreeMap::new();
    for crop in Crop::ALL {
        for (key, disease) in entries(crop) {
            if *key == HEALTHY {
                continue;
            }
            let entry = by_name
                .entry(disease.name)
                .or_insert_with(|| (Vec::new(), disease.description));
            entry.0.push(crop.display_name());
        }
    }
    by_name
        .into_iter()
        .enumerate()
        .map(|(idx, (name, (crops, description)))| CatalogueEntry {
            id: idx + 1,
            name,
            crops,
            description,
        })
        .collect()
}
