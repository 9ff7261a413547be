//! Decision support for forest rights claims: structured extraction from recognised claim
//! documents, multi-criteria eligibility scoring, and batch summaries for dashboards.

pub mod config;
pub mod eligibility;
pub mod error;
pub mod extraction;
pub mod report;
pub mod telemetry;

pub use eligibility::{ApplicantRecord, EligibilityAssessment, EligibilityEngine};
pub use extraction::{DocumentExtractor, StructuredDocumentRecord};
pub use report::{batch_assessment, generate_summary_report, BatchEntry, SummaryReport};
