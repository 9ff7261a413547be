use super::batch::BatchEntry;
use crate::eligibility::{round2, CriterionKind, CriterionScores, EligibilityStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

const BUCKETS: [(&str, f64); 5] = [
    ("0-20", 20.0),
    ("21-40", 40.0),
    ("41-60", 60.0),
    ("61-80", 80.0),
    ("81-100", f64::INFINITY),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: EligibilityStatus,
    pub count: usize,
}

/// Histogram bucket; upper bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBucket {
    pub range: &'static str,
    pub count: usize,
}

/// Aggregate view over a batch. Recomputed on every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub total_applications: usize,
    pub valid_assessments: usize,
    pub failed_assessments: usize,
    pub status_distribution: Vec<StatusCount>,
    pub score_distribution: Vec<ScoreBucket>,
    pub average_overall_score: f64,
    /// `None` when no application was assessed successfully.
    pub average_criterion_scores: Option<CriterionScores>,
    pub generated_at: DateTime<Utc>,
}

impl SummaryReport {
    pub fn status_count(&self, status: EligibilityStatus) -> usize {
        self.status_distribution
            .iter()
            .find(|entry| entry.status == status)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }

    pub fn bucket_count(&self, range: &str) -> usize {
        self.score_distribution
            .iter()
            .find(|bucket| bucket.range == range)
            .map(|bucket| bucket.count)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    #[error("No assessments provided")]
    NoAssessments,
}

pub fn generate_summary_report(entries: &[BatchEntry]) -> Result<SummaryReport, ReportError> {
    if entries.is_empty() {
        return Err(ReportError::NoAssessments);
    }

    let assessments: Vec<_> = entries.iter().filter_map(BatchEntry::assessment).collect();
    let valid = assessments.len();

    let status_distribution = EligibilityStatus::ordered()
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: assessments
                .iter()
                .filter(|assessment| assessment.eligibility_status == status)
                .count(),
        })
        .collect();

    let mut score_distribution: Vec<ScoreBucket> = BUCKETS
        .iter()
        .map(|&(range, _)| ScoreBucket { range, count: 0 })
        .collect();
    for assessment in &assessments {
        let index = BUCKETS
            .iter()
            .position(|(_, upper)| assessment.overall_score <= *upper)
            .unwrap_or(BUCKETS.len() - 1);
        score_distribution[index].count += 1;
    }

    let (average_overall_score, average_criterion_scores) = if valid == 0 {
        (0.0, None)
    } else {
        let count = valid as f64;
        let overall = assessments
            .iter()
            .map(|assessment| assessment.overall_score)
            .sum::<f64>()
            / count;
        let criteria = CriterionScores::from_fn(|kind: CriterionKind| {
            let total: f64 = assessments
                .iter()
                .map(|assessment| assessment.scores.get(kind))
                .sum();
            round2(total / count)
        });
        (round2(overall), Some(criteria))
    };

    Ok(SummaryReport {
        total_applications: entries.len(),
        valid_assessments: valid,
        failed_assessments: entries.len() - valid,
        status_distribution,
        score_distribution,
        average_overall_score,
        average_criterion_scores,
        generated_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::ApplicationId;
    use crate::report::AssessmentFailure;

    #[test]
    fn empty_input_is_an_explicit_error() {
        assert_eq!(
            generate_summary_report(&[]),
            Err(ReportError::NoAssessments)
        );
        assert_eq!(
            ReportError::NoAssessments.to_string(),
            "No assessments provided"
        );
    }

    #[test]
    fn only_failures_produce_zero_averages() {
        let entries = vec![BatchEntry::Failed(AssessmentFailure {
            application_id: ApplicationId::unknown(),
            error: "bad".to_string(),
        })];

        let report = generate_summary_report(&entries).expect("non-empty input");
        assert_eq!(report.total_applications, 1);
        assert_eq!(report.valid_assessments, 0);
        assert_eq!(report.failed_assessments, 1);
        assert_eq!(report.average_overall_score, 0.0);
        assert!(report.average_criterion_scores.is_none());
        assert!(report.score_distribution.iter().all(|bucket| bucket.count == 0));
    }
}
