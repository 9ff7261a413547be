use crate::eligibility::domain::application_id_hint;
use crate::eligibility::{ApplicantRecord, ApplicationId, EligibilityAssessment, EligibilityEngine};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

/// Stub recorded in place of an application that could not be assessed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentFailure {
    pub application_id: ApplicationId,
    pub error: String,
}

/// One slot of a batch run, in the same position as its input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Assessed(Box<EligibilityAssessment>),
    Failed(AssessmentFailure),
}

impl BatchEntry {
    pub fn application_id(&self) -> &ApplicationId {
        match self {
            BatchEntry::Assessed(assessment) => &assessment.application_id,
            BatchEntry::Failed(failure) => &failure.application_id,
        }
    }

    pub fn assessment(&self) -> Option<&EligibilityAssessment> {
        match self {
            BatchEntry::Assessed(assessment) => Some(assessment.as_ref()),
            BatchEntry::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, BatchEntry::Failed(_))
    }
}

impl From<EligibilityAssessment> for BatchEntry {
    fn from(assessment: EligibilityAssessment) -> Self {
        Self::Assessed(Box::new(assessment))
    }
}

/// Assess every payload in order. A payload that fails validation becomes a
/// [`BatchEntry::Failed`] carrying its id and never aborts the rest of the batch.
pub fn batch_assessment(engine: &EligibilityEngine, applications: &[Value]) -> Vec<BatchEntry> {
    let entries: Vec<BatchEntry> = applications
        .iter()
        .map(|payload| match ApplicantRecord::from_value(payload) {
            Ok(record) => engine.assess(&record).into(),
            Err(err) => {
                let application_id = application_id_hint(payload);
                warn!(%application_id, error = %err, "application could not be assessed");
                BatchEntry::Failed(AssessmentFailure {
                    application_id,
                    error: err.to_string(),
                })
            }
        })
        .collect();

    let failed = entries.iter().filter(|entry| entry.is_failed()).count();
    info!(total = entries.len(), failed, "batch assessment complete");

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failures_keep_their_slot_and_id() {
        let engine = EligibilityEngine::default();
        let payloads = vec![
            json!({ "id": "A", "community_type": "ST" }),
            json!({ "id": "B", "name": ["not", "text"] }),
            json!("not an object"),
        ];

        let entries = batch_assessment(&engine, &payloads);

        assert_eq!(entries.len(), 3);
        assert!(!entries[0].is_failed());
        assert_eq!(entries[1].application_id().0, "B");
        assert!(entries[1].is_failed());
        assert_eq!(entries[2].application_id().0, "N/A");
        assert!(entries[2].is_failed());
    }

    #[test]
    fn empty_batch_yields_no_entries() {
        assert!(batch_assessment(&EligibilityEngine::default(), &[]).is_empty());
    }

    #[test]
    fn failure_serializes_as_error_stub() {
        let entries = batch_assessment(&EligibilityEngine::default(), &[json!(7)]);
        let value = serde_json::to_value(&entries[0]).expect("serializes");
        assert_eq!(value["application_id"], "N/A");
        assert_eq!(value["error"], "application record must be a JSON object");
    }
}
