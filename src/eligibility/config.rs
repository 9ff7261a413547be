use serde::{Deserialize, Serialize};

/// The six independently scored eligibility criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKind {
    CommunityType,
    ResidencePeriod,
    ForestDependence,
    Documentation,
    LandUse,
    CommunitySupport,
}

impl CriterionKind {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::CommunityType,
            Self::ResidencePeriod,
            Self::ForestDependence,
            Self::Documentation,
            Self::LandUse,
            Self::CommunitySupport,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::CommunityType => "community_type",
            Self::ResidencePeriod => "residence_period",
            Self::ForestDependence => "forest_dependence",
            Self::Documentation => "documentation",
            Self::LandUse => "land_use",
            Self::CommunitySupport => "community_support",
        }
    }
}

/// Weight of a criterion in the composite and the score used when its input is unusable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionPolicy {
    pub weight: f64,
    pub fallback: f64,
}

/// Inclusive lower bounds of the eligibility tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub highly_eligible: f64,
    pub eligible: f64,
    pub conditionally_eligible: f64,
}

/// Scoring rubric shared by every assessment. Built once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub community_type: CriterionPolicy,
    pub residence_period: CriterionPolicy,
    pub forest_dependence: CriterionPolicy,
    pub documentation: CriterionPolicy,
    pub land_use: CriterionPolicy,
    pub community_support: CriterionPolicy,
    pub required_document_count: usize,
    pub tiers: TierThresholds,
}

impl EligibilityConfig {
    pub fn standard() -> Self {
        Self {
            community_type: CriterionPolicy {
                weight: 0.25,
                fallback: 0.0,
            },
            residence_period: CriterionPolicy {
                weight: 0.20,
                fallback: 30.0,
            },
            forest_dependence: CriterionPolicy {
                weight: 0.20,
                fallback: 30.0,
            },
            documentation: CriterionPolicy {
                weight: 0.15,
                fallback: 30.0,
            },
            land_use: CriterionPolicy {
                weight: 0.10,
                fallback: 40.0,
            },
            community_support: CriterionPolicy {
                weight: 0.10,
                fallback: 20.0,
            },
            required_document_count: 5,
            tiers: TierThresholds {
                highly_eligible: 80.0,
                eligible: 60.0,
                conditionally_eligible: 40.0,
            },
        }
    }

    pub fn policy(&self, kind: CriterionKind) -> CriterionPolicy {
        match kind {
            CriterionKind::CommunityType => self.community_type,
            CriterionKind::ResidencePeriod => self.residence_period,
            CriterionKind::ForestDependence => self.forest_dependence,
            CriterionKind::Documentation => self.documentation,
            CriterionKind::LandUse => self.land_use,
            CriterionKind::CommunitySupport => self.community_support,
        }
    }

    pub fn weight_total(&self) -> f64 {
        CriterionKind::ordered()
            .into_iter()
            .map(|kind| self.policy(kind).weight)
            .sum()
    }

    pub fn validate(&self) -> Result<(), EligibilityConfigError> {
        for kind in CriterionKind::ordered() {
            let policy = self.policy(kind);
            if !(0.0..=1.0).contains(&policy.weight) {
                return Err(EligibilityConfigError::WeightOutOfRange {
                    criterion: kind.key(),
                    weight: policy.weight,
                });
            }
            if !(0.0..=100.0).contains(&policy.fallback) {
                return Err(EligibilityConfigError::FallbackOutOfRange {
                    criterion: kind.key(),
                    fallback: policy.fallback,
                });
            }
        }

        let total = self.weight_total();
        if (total - 1.0).abs() > 1e-9 {
            return Err(EligibilityConfigError::WeightsDoNotSumToOne { total });
        }

        if self.required_document_count == 0 {
            return Err(EligibilityConfigError::NoRequiredDocuments);
        }

        let tiers = self.tiers;
        if !(tiers.highly_eligible > tiers.eligible
            && tiers.eligible > tiers.conditionally_eligible
            && tiers.conditionally_eligible > 0.0
            && tiers.highly_eligible <= 100.0)
        {
            return Err(EligibilityConfigError::UnorderedTiers);
        }

        Ok(())
    }
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EligibilityConfigError {
    #[error("weight {weight} for {criterion} must lie in [0, 1]")]
    WeightOutOfRange {
        criterion: &'static str,
        weight: f64,
    },
    #[error("fallback {fallback} for {criterion} must lie in [0, 100]")]
    FallbackOutOfRange {
        criterion: &'static str,
        fallback: f64,
    },
    #[error("criterion weights sum to {total}, expected 1.0")]
    WeightsDoNotSumToOne { total: f64 },
    #[error("at least one document must be required")]
    NoRequiredDocuments,
    #[error("tier thresholds must be strictly descending within (0, 100]")]
    UnorderedTiers,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_weights_sum_to_one() {
        let config = EligibilityConfig::standard();
        assert!((config.weight_total() - 1.0).abs() < 1e-9);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_unbalanced_weights() {
        let mut config = EligibilityConfig::standard();
        config.land_use.weight = 0.2;
        assert!(matches!(
            config.validate(),
            Err(EligibilityConfigError::WeightsDoNotSumToOne { .. })
        ));
    }

    #[test]
    fn rejects_inverted_tiers() {
        let mut config = EligibilityConfig::standard();
        config.tiers.eligible = 85.0;
        assert_eq!(
            config.validate(),
            Err(EligibilityConfigError::UnorderedTiers)
        );
    }
}
