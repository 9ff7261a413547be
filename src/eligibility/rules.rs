use super::config::{CriterionKind, EligibilityConfig};
use super::domain::{ApplicantRecord, Field, ResidenceSince};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

const FOREST_OCCUPATIONS: &[&str] = &[
    "forest produce collection",
    "agriculture in forest",
    "cattle grazing",
    "honey collection",
    "medicinal plants",
    "bamboo collection",
    "tendu leaf collection",
    "sal leaf collection",
];

const SCHEDULED_TRIBES: &[&str] = &["Scheduled Tribes", "ST"];
const PRIMITIVE_TRIBAL_GROUPS: &[&str] = &["Primitive Tribal Groups", "PTG"];
const FOREST_DWELLERS: &[&str] = &["Other Traditional Forest Dwellers", "OTFD"];

/// Why a criterion could not be scored from the supplied data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FallbackReason {
    MissingField { field: &'static str },
    MalformedField { field: &'static str },
    UnparseableYear { raw: String },
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackReason::MissingField { field } => write!(f, "{field} not supplied"),
            FallbackReason::MalformedField { field } => write!(f, "{field} has an unusable shape"),
            FallbackReason::UnparseableYear { raw } => {
                write!(f, "no residence year could be read from '{raw}'")
            }
        }
    }
}

/// Either a score in `[0, 100]` or the reason the criterion's fallback applies.
pub(crate) type RuleOutcome = Result<f64, FallbackReason>;

type CriterionRule = fn(&ApplicantRecord, &EligibilityConfig) -> RuleOutcome;

/// Score of one criterion after fallbacks have been applied.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CriterionScore {
    pub kind: CriterionKind,
    pub score: f64,
    pub fallback: Option<FallbackReason>,
}

const fn rule_for(kind: CriterionKind) -> CriterionRule {
    match kind {
        CriterionKind::CommunityType => community_type,
        CriterionKind::ResidencePeriod => residence_period,
        CriterionKind::ForestDependence => forest_dependence,
        CriterionKind::Documentation => documentation,
        CriterionKind::LandUse => land_use,
        CriterionKind::CommunitySupport => community_support,
    }
}

pub(crate) fn score_criterion(
    kind: CriterionKind,
    record: &ApplicantRecord,
    config: &EligibilityConfig,
) -> CriterionScore {
    match rule_for(kind)(record, config) {
        Ok(score) => CriterionScore {
            kind,
            score: score.clamp(0.0, 100.0),
            fallback: None,
        },
        Err(reason) => {
            let fallback = config.policy(kind).fallback;
            debug!(
                application_id = %record.application_id,
                criterion = kind.key(),
                fallback,
                %reason,
                "criterion fell back"
            );
            CriterionScore {
                kind,
                score: fallback,
                fallback: Some(reason),
            }
        }
    }
}

pub(crate) fn score_record(
    record: &ApplicantRecord,
    config: &EligibilityConfig,
) -> Vec<CriterionScore> {
    CriterionKind::ordered()
        .into_iter()
        .map(|kind| score_criterion(kind, record, config))
        .collect()
}

fn text_or_empty<'a>(
    field: &'a Field<String>,
    name: &'static str,
) -> Result<&'a str, FallbackReason> {
    match field {
        Field::Absent => Ok(""),
        Field::Present(value) => Ok(value),
        Field::Malformed(_) => Err(FallbackReason::MalformedField { field: name }),
    }
}

fn community_type(record: &ApplicantRecord, _: &EligibilityConfig) -> RuleOutcome {
    let community = text_or_empty(&record.community_type, "community_type")?.trim();

    let score = if SCHEDULED_TRIBES.contains(&community) {
        100.0
    } else if FOREST_DWELLERS.contains(&community) {
        90.0
    } else if PRIMITIVE_TRIBAL_GROUPS.contains(&community) {
        100.0
    } else if community.to_lowercase().contains("tribal") {
        85.0
    } else {
        20.0
    };

    Ok(score)
}

fn residence_period(record: &ApplicantRecord, _: &EligibilityConfig) -> RuleOutcome {
    let year = match &record.residence_since {
        Field::Absent => {
            return Err(FallbackReason::MissingField {
                field: "residence_since",
            });
        }
        Field::Malformed(_) => {
            return Err(FallbackReason::MalformedField {
                field: "residence_since",
            });
        }
        Field::Present(ResidenceSince::Year(year)) => *year,
        Field::Present(ResidenceSince::Text(raw)) => match parse_residence_year(raw) {
            Some(year) => year,
            None => return Err(FallbackReason::UnparseableYear { raw: raw.clone() }),
        },
    };

    // Claims require residence before the December 2005 cut-off; three generations earn full marks.
    let score = if year <= 1930 {
        100.0
    } else if year <= 1980 {
        80.0
    } else if year <= 2005 {
        60.0
    } else {
        10.0
    };

    Ok(score)
}

/// Year from the last `/`-separated segment, else from the leading four characters.
pub(crate) fn parse_residence_year(raw: &str) -> Option<i64> {
    let last_segment = raw.rsplit('/').next().unwrap_or(raw);
    if let Ok(year) = last_segment.trim().parse::<i64>() {
        return Some(year);
    }

    let leading: String = raw.chars().take(4).collect();
    leading.trim().parse::<i64>().ok()
}

fn matches_forest_occupation(occupation: &str) -> bool {
    FOREST_OCCUPATIONS
        .iter()
        .any(|candidate| occupation.contains(candidate))
}

fn forest_dependence(record: &ApplicantRecord, _: &EligibilityConfig) -> RuleOutcome {
    let primary = text_or_empty(&record.primary_occupation, "primary_occupation")?.to_lowercase();
    let secondary =
        text_or_empty(&record.secondary_occupation, "secondary_occupation")?.to_lowercase();

    let mut score: f64 = 0.0;
    if matches_forest_occupation(&primary) {
        score += 40.0;
    }
    if matches_forest_occupation(&secondary) {
        score += 20.0;
    }

    let activities = match &record.forest_activities {
        Field::Present(items) => items.len(),
        Field::Malformed(Value::Array(items)) => items.len(),
        Field::Absent | Field::Malformed(_) => 0,
    };
    score += (activities as f64 * 10.0).min(40.0);

    Ok(score.min(100.0))
}

fn documentation(record: &ApplicantRecord, config: &EligibilityConfig) -> RuleOutcome {
    let supplied = match &record.documents {
        Field::Absent => 0,
        Field::Present(items) => items.len(),
        Field::Malformed(Value::Array(items)) => items.len(),
        Field::Malformed(_) => return Ok(50.0),
    };

    let required = config.required_document_count.max(1) as f64;
    Ok((supplied as f64 / required * 100.0).min(100.0))
}

fn land_use(record: &ApplicantRecord, _: &EligibilityConfig) -> RuleOutcome {
    let land_use = text_or_empty(&record.land_use, "land_use")?.to_lowercase();
    let land_type = text_or_empty(&record.land_type, "land_type")?.to_lowercase();

    let mut score: f64 = 0.0;
    if land_use.contains("agriculture") {
        score += 40.0;
    }
    if land_use.contains("grazing") {
        score += 30.0;
    }
    if land_use.contains("settlement") {
        score += 30.0;
    }

    if land_type.contains("forest") {
        score += 30.0;
    } else if land_type.contains("government") {
        score += 20.0;
    }

    Ok(score.min(100.0))
}

fn community_support(record: &ApplicantRecord, _: &EligibilityConfig) -> RuleOutcome {
    let mut score: f64 = 0.0;

    if record.gram_sabha_resolution {
        score += 70.0;
    }

    // Non-integer letter counts are ignored rather than treated as a failed criterion.
    if let Field::Present(letters) = record.community_support_letters {
        score += (letters.max(0) as f64 * 10.0).min(30.0);
    }

    Ok(score.min(100.0))
}
