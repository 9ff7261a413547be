//! Turns recognised claim-form text into structured records.
//!
//! Text comes from an external recognition service. Each field is located with a labelled
//! pattern, cleaned by a field-specific normaliser, and the surviving set is scored for
//! extraction confidence.

mod confidence;
mod normalizer;
mod patterns;

pub use confidence::extraction_confidence;
pub use normalizer::{standardize_date, title_case};
pub use patterns::{DocumentField, PatternSpec, PatternTable, STANDARD_PATTERNS};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// Normalised value of an extracted field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Area(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            FieldValue::Area(_) => None,
        }
    }

    pub fn as_area(&self) -> Option<f64> {
        match self {
            FieldValue::Area(value) => Some(*value),
            FieldValue::Text(_) => None,
        }
    }
}

/// Validated fields of one document. Fields that were not found or failed validation are
/// absent rather than empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredDocumentRecord {
    pub fields: BTreeMap<DocumentField, FieldValue>,
    pub extraction_confidence: f64,
    pub processed_at: DateTime<Utc>,
}

impl StructuredDocumentRecord {
    pub fn get(&self, field: DocumentField) -> Option<&FieldValue> {
        self.fields.get(&field)
    }

    pub fn text(&self, field: DocumentField) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    pub fn area(&self) -> Option<f64> {
        self.get(DocumentField::Area).and_then(FieldValue::as_area)
    }
}

/// Where the recognised text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentOrigin {
    Image,
    Pdf,
}

impl DocumentOrigin {
    /// Resolve the origin from a file name, ignoring a trailing `.txt` sidecar suffix.
    pub fn from_file_name(file_name: &str) -> Result<Self, ExtractionError> {
        let trimmed = file_name
            .strip_suffix(".txt")
            .or_else(|| file_name.strip_suffix(".TXT"))
            .unwrap_or(file_name);

        let extension = Path::new(trimmed)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(Self::Pdf),
            "png" | "jpg" | "jpeg" | "tiff" | "tif" => Ok(Self::Image),
            _ => Err(ExtractionError::UnsupportedFormat {
                file_name: file_name.to_string(),
                extension,
            }),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Pdf => "pdf",
        }
    }
}

/// Recognised text for one submitted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSource {
    pub file_name: String,
    pub text: String,
    #[serde(default)]
    pub origin: Option<DocumentOrigin>,
}

impl DocumentSource {
    pub fn new(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            text: text.into(),
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: DocumentOrigin) -> Self {
        self.origin = Some(origin);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedDocument {
    pub file_name: String,
    pub origin: DocumentOrigin,
    pub raw_text: String,
    pub structured_data: StructuredDocumentRecord,
}

/// One slot of a batch run; failures keep the file name so callers can report them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentBatchEntry {
    Processed(ProcessedDocument),
    Failed {
        file_name: String,
        error: String,
        processed_at: DateTime<Utc>,
    },
}

impl DocumentBatchEntry {
    pub fn is_failed(&self) -> bool {
        matches!(self, DocumentBatchEntry::Failed { .. })
    }

    pub fn file_name(&self) -> &str {
        match self {
            DocumentBatchEntry::Processed(document) => &document.file_name,
            DocumentBatchEntry::Failed { file_name, .. } => file_name,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("unsupported file format '{extension}' for {file_name}")]
    UnsupportedFormat {
        file_name: String,
        extension: String,
    },
}

/// Stateless extractor bound to an immutable pattern table.
#[derive(Debug, Clone, Copy)]
pub struct DocumentExtractor<'a> {
    patterns: &'a PatternTable,
}

impl Default for DocumentExtractor<'static> {
    fn default() -> Self {
        Self::new(PatternTable::standard())
    }
}

impl<'a> DocumentExtractor<'a> {
    pub fn new(patterns: &'a PatternTable) -> Self {
        Self { patterns }
    }

    pub fn extract_structured_data(&self, text: &str) -> StructuredDocumentRecord {
        let raw = self.patterns.extract(text);
        let fields = normalizer::normalize_fields(&raw);
        let extraction_confidence = extraction_confidence(&fields, self.patterns.field_count());

        StructuredDocumentRecord {
            fields,
            extraction_confidence,
            processed_at: Utc::now(),
        }
    }

    pub fn process_document(
        &self,
        source: DocumentSource,
    ) -> Result<ProcessedDocument, ExtractionError> {
        let origin = match source.origin {
            Some(origin) => origin,
            None => DocumentOrigin::from_file_name(&source.file_name)?,
        };

        let structured_data = self.extract_structured_data(&source.text);
        info!(
            file_name = %source.file_name,
            origin = origin.label(),
            fields = structured_data.fields.len(),
            confidence = structured_data.extraction_confidence,
            "processed document"
        );

        Ok(ProcessedDocument {
            file_name: source.file_name,
            origin,
            raw_text: source.text,
            structured_data,
        })
    }

    /// Process every source in order; a failing document yields a `Failed` entry in its slot.
    pub fn batch_process(&self, sources: Vec<DocumentSource>) -> Vec<DocumentBatchEntry> {
        sources
            .into_iter()
            .map(|source| {
                let file_name = source.file_name.clone();
                match self.process_document(source) {
                    Ok(document) => DocumentBatchEntry::Processed(document),
                    Err(err) => {
                        warn!(%file_name, error = %err, "document processing failed");
                        DocumentBatchEntry::Failed {
                            file_name,
                            error: err.to_string(),
                            processed_at: Utc::now(),
                        }
                    }
                }
            })
            .collect()
    }
}
