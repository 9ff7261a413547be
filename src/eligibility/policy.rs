use super::config::TierThresholds;
use serde::{Deserialize, Serialize};

/// Graded eligibility decision derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EligibilityStatus {
    #[serde(rename = "Highly Eligible")]
    HighlyEligible,
    #[serde(rename = "Eligible")]
    Eligible,
    #[serde(rename = "Conditionally Eligible")]
    ConditionallyEligible,
    #[serde(rename = "Not Eligible")]
    NotEligible,
}

impl EligibilityStatus {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::HighlyEligible,
            Self::Eligible,
            Self::ConditionallyEligible,
            Self::NotEligible,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::HighlyEligible => "Highly Eligible",
            Self::Eligible => "Eligible",
            Self::ConditionallyEligible => "Conditionally Eligible",
            Self::NotEligible => "Not Eligible",
        }
    }

    /// Map a composite score to its tier; each threshold is an inclusive lower bound.
    pub fn classify(score: f64, tiers: &TierThresholds) -> Self {
        if score >= tiers.highly_eligible {
            Self::HighlyEligible
        } else if score >= tiers.eligible {
            Self::Eligible
        } else if score >= tiers.conditionally_eligible {
            Self::ConditionallyEligible
        } else {
            Self::NotEligible
        }
    }

    /// Procedural checklist for an applicant in this tier.
    pub fn next_steps(self) -> Vec<String> {
        let steps: [&str; 4] = match self {
            Self::HighlyEligible => [
                "1. Submit application to Sub-Divisional Level Committee (SDLC)",
                "2. Attend field verification if requested",
                "3. Present case to District Level Committee (DLC)",
                "4. Await final approval and title deed issuance",
            ],
            Self::Eligible => [
                "1. Review and strengthen weak areas in application",
                "2. Collect additional supporting documents",
                "3. Submit to SDLC with complete documentation",
                "4. Be prepared for field verification",
            ],
            Self::ConditionallyEligible => [
                "1. Address major gaps identified in assessment",
                "2. Seek assistance from local NGOs or community workers",
                "3. Collect missing critical documents",
                "4. Re-submit when application is strengthened",
            ],
            Self::NotEligible => [
                "1. Review FRA eligibility criteria carefully",
                "2. Seek legal aid or NGO assistance",
                "3. Consider alternative land rights schemes if eligible",
                "4. Build stronger case with community support",
            ],
        };

        steps.iter().map(|step| step.to_string()).collect()
    }
}
