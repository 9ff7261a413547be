//! Batch assessment and dashboard summaries over many applications.

mod batch;
mod summary;

pub use batch::{batch_assessment, AssessmentFailure, BatchEntry};
pub use summary::{generate_summary_report, ReportError, ScoreBucket, StatusCount, SummaryReport};
