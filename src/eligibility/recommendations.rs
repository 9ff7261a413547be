use super::config::TierThresholds;
use super::domain::{ApplicantRecord, Field};
use super::CriterionScores;

/// Required supporting documents, keyed by the tag applicants are expected to use.
pub const REQUIRED_DOCUMENTS: &[(&str, &str)] = &[
    (
        "residence_proof",
        "Residence proof (ration card, voter ID, etc.)",
    ),
    ("community_certificate", "Scheduled Tribe/OTFD certificate"),
    ("land_records", "Land records and survey settlement"),
    ("forest_dependence_proof", "Forest dependence evidence"),
    ("community_resolution", "Gram Sabha resolution"),
    ("identity_proof", "Identity proof documents"),
    ("photographs", "Recent photographs"),
    ("land_sketch", "Land sketch/map"),
];

pub(crate) fn recommendations(
    scores: &CriterionScores,
    overall_score: f64,
    tiers: &TierThresholds,
) -> Vec<String> {
    let checks: [(bool, &str); 5] = [
        (
            scores.community_type < 80.0,
            "Verify community type with proper tribal/OTFD certificate",
        ),
        (
            scores.residence_period < 60.0,
            "Collect additional evidence of residence before 2005",
        ),
        (
            scores.forest_dependence < 60.0,
            "Document forest-based livelihood activities with evidence",
        ),
        (
            scores.documentation < 70.0,
            "Complete documentation with all required certificates",
        ),
        (
            scores.community_support < 70.0,
            "Obtain Gram Sabha resolution and community support letters",
        ),
    ];

    let mut recommendations: Vec<String> = checks
        .iter()
        .filter(|(applies, _)| *applies)
        .map(|(_, text)| text.to_string())
        .collect();

    if overall_score >= tiers.eligible {
        recommendations.push("Application has good potential for approval".to_string());
        recommendations.push("Submit to Forest Rights Committee for review".to_string());
    } else {
        recommendations.push("Strengthen application before submission".to_string());
        recommendations.push("Seek assistance from NGOs or community leaders".to_string());
    }

    recommendations
}

/// Descriptions of required documents with no matching tag.
///
/// A tag satisfies a requirement when either contains the other, so loosely named uploads
/// (`"land_records_2019"`, `"photo"`) still count.
pub(crate) fn missing_documents(record: &ApplicantRecord) -> Vec<String> {
    let available: Vec<String> = match &record.documents {
        Field::Present(tags) => tags.iter().map(|tag| tag.to_lowercase()).collect(),
        Field::Absent | Field::Malformed(_) => Vec::new(),
    };

    REQUIRED_DOCUMENTS
        .iter()
        .filter(|(key, _)| {
            !available
                .iter()
                .any(|tag| tag.contains(key) || key.contains(tag.as_str()))
        })
        .map(|(_, description)| description.to_string())
        .collect()
}
