use serde_json::{json, Value};

use crate::eligibility::{ApplicantRecord, EligibilityConfig, EligibilityEngine};

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(EligibilityConfig::standard())
}

pub(super) fn record(value: Value) -> ApplicantRecord {
    ApplicantRecord::from_value(&value).expect("fixture is a valid record")
}

pub(super) fn strong_payload() -> Value {
    json!({
        "id": "FRA-0001",
        "name": "Sita Munda",
        "community_type": "Scheduled Tribes",
        "residence_since": "12/03/1925",
        "primary_occupation": "Forest produce collection",
        "secondary_occupation": "Honey collection and farming",
        "forest_activities": ["mahua", "sal seeds", "firewood", "grazing"],
        "documents": [
            "residence_proof",
            "community_certificate",
            "land_records",
            "forest_dependence_proof",
            "community_resolution"
        ],
        "land_use": "Agriculture and settlement",
        "land_type": "Forest Land",
        "gram_sabha_resolution": true,
        "community_support_letters": 3
    })
}

pub(super) fn weak_payload() -> Value {
    json!({
        "id": "FRA-0002",
        "name": "Arjun Rao",
        "community_type": "Farmer",
        "residence_since": 2010,
        "primary_occupation": "Farmer",
        "documents": [],
        "land_use": "commercial",
        "land_type": "private"
    })
}

/// Scores 100/80/40/40/60/70, composite 68.
pub(super) fn middling_payload() -> Value {
    json!({
        "id": "FRA-0003",
        "name": "Lakshmi Gond",
        "community_type": "ST",
        "residence_since": "1975-06-01",
        "primary_occupation": "cattle grazing",
        "documents": ["residence_proof", "land_records"],
        "land_use": "agriculture",
        "land_type": "Government land",
        "gram_sabha_resolution": true
    })
}

/// Scores 100/100/100/20/100/20, composite exactly 80.
pub(super) fn boundary_payload() -> Value {
    json!({
        "id": "FRA-0004",
        "name": "Birsa Oraon",
        "community_type": "PTG",
        "residence_since": 1920,
        "primary_occupation": "Bamboo collection",
        "secondary_occupation": "tendu leaf collection",
        "forest_activities": ["a", "b", "c", "d", "e"],
        "documents": ["identity_proof"],
        "land_use": "agriculture, grazing",
        "land_type": "reserved forest",
        "community_support_letters": 2
    })
}
