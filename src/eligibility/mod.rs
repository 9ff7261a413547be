//! Multi-criteria eligibility assessment for forest rights claims.

mod config;
pub mod domain;
mod policy;
mod recommendations;
mod rules;

#[cfg(test)]
mod tests;

pub use config::{
    CriterionKind, CriterionPolicy, EligibilityConfig, EligibilityConfigError, TierThresholds,
};
pub use domain::{ApplicantRecord, ApplicationId, Field, RecordError, ResidenceSince};
pub use policy::EligibilityStatus;
pub use recommendations::REQUIRED_DOCUMENTS;
pub use rules::FallbackReason;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-criterion scores, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CriterionScores {
    pub community_type: f64,
    pub residence_period: f64,
    pub forest_dependence: f64,
    pub documentation: f64,
    pub land_use: f64,
    pub community_support: f64,
}

impl CriterionScores {
    pub fn get(&self, kind: CriterionKind) -> f64 {
        match kind {
            CriterionKind::CommunityType => self.community_type,
            CriterionKind::ResidencePeriod => self.residence_period,
            CriterionKind::ForestDependence => self.forest_dependence,
            CriterionKind::Documentation => self.documentation,
            CriterionKind::LandUse => self.land_use,
            CriterionKind::CommunitySupport => self.community_support,
        }
    }

    fn set(&mut self, kind: CriterionKind, score: f64) {
        let slot = match kind {
            CriterionKind::CommunityType => &mut self.community_type,
            CriterionKind::ResidencePeriod => &mut self.residence_period,
            CriterionKind::ForestDependence => &mut self.forest_dependence,
            CriterionKind::Documentation => &mut self.documentation,
            CriterionKind::LandUse => &mut self.land_use,
            CriterionKind::CommunitySupport => &mut self.community_support,
        };
        *slot = score;
    }

    /// Weighted composite, rounded to two decimals.
    pub fn weighted_total(&self, config: &EligibilityConfig) -> f64 {
        let total: f64 = CriterionKind::ordered()
            .into_iter()
            .map(|kind| self.get(kind) * config.policy(kind).weight)
            .sum();
        round2(total.clamp(0.0, 100.0))
    }

    pub(crate) fn from_fn(mut score: impl FnMut(CriterionKind) -> f64) -> Self {
        let mut scores = Self::default();
        for kind in CriterionKind::ordered() {
            scores.set(kind, score(kind));
        }
        scores
    }
}

/// A criterion that was scored with its fallback value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedFallback {
    pub criterion: CriterionKind,
    pub score: f64,
    #[serde(flatten)]
    pub reason: FallbackReason,
}

/// Outcome of assessing one applicant. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityAssessment {
    pub application_id: ApplicationId,
    pub applicant_name: String,
    pub assessment_date: DateTime<Utc>,
    pub scores: CriterionScores,
    pub overall_score: f64,
    pub eligibility_status: EligibilityStatus,
    pub recommendations: Vec<String>,
    pub missing_documents: Vec<String>,
    pub next_steps: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fallbacks: Vec<AppliedFallback>,
}

/// Stateless evaluator that applies the rubric configuration to an applicant.
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    config: EligibilityConfig,
}

impl Default for EligibilityEngine {
    fn default() -> Self {
        Self::new(EligibilityConfig::standard())
    }
}

impl EligibilityEngine {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    /// Build an engine after checking the rubric is internally consistent.
    pub fn try_new(config: EligibilityConfig) -> Result<Self, EligibilityConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    pub fn assess(&self, record: &ApplicantRecord) -> EligibilityAssessment {
        let components = rules::score_record(record, &self.config);

        let scores = CriterionScores::from_fn(|kind| {
            components
                .iter()
                .find(|component| component.kind == kind)
                .map(|component| component.score)
                .unwrap_or(0.0)
        });

        let fallbacks = components
            .into_iter()
            .filter_map(|component| {
                component.fallback.map(|reason| AppliedFallback {
                    criterion: component.kind,
                    score: component.score,
                    reason,
                })
            })
            .collect();

        let overall_score = scores.weighted_total(&self.config);
        let eligibility_status = EligibilityStatus::classify(overall_score, &self.config.tiers);

        tracing::debug!(
            application_id = %record.application_id,
            overall_score,
            status = eligibility_status.label(),
            "assessed application"
        );

        EligibilityAssessment {
            application_id: record.application_id.clone(),
            applicant_name: record.applicant_name.clone(),
            assessment_date: Utc::now(),
            scores,
            overall_score,
            eligibility_status,
            recommendations: recommendations::recommendations(
                &scores,
                overall_score,
                &self.config.tiers,
            ),
            missing_documents: recommendations::missing_documents(record),
            next_steps: eligibility_status.next_steps(),
            fallbacks,
        }
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
