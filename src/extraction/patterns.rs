use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Fields recognised on a claim form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentField {
    Name,
    FatherName,
    Village,
    District,
    SurveyNumber,
    Area,
    ClaimType,
    Date,
}

impl DocumentField {
    pub const COUNT: usize = 8;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::Name,
            Self::FatherName,
            Self::Village,
            Self::District,
            Self::SurveyNumber,
            Self::Area,
            Self::ClaimType,
            Self::Date,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::FatherName => "father_name",
            Self::Village => "village",
            Self::District => "district",
            Self::SurveyNumber => "survey_number",
            Self::Area => "area",
            Self::ClaimType => "claim_type",
            Self::Date => "date",
        }
    }

    /// Fields that identify the claimant and the claimed land.
    pub const fn is_critical(self) -> bool {
        matches!(self, Self::Name | Self::Village | Self::District)
    }
}

/// Declarative description of how one field is located in free text.
#[derive(Debug, Clone, Copy)]
pub struct PatternSpec {
    pub field: DocumentField,
    /// Label synonyms in priority order; English and Hindi forms are mixed on real forms.
    pub labels: &'static [&'static str],
    /// Regex fragment with exactly one capture group, matched right after the label.
    pub capture: &'static str,
}

const LETTERS: &str = r"([A-Za-z\s]+)";

pub const STANDARD_PATTERNS: &[PatternSpec] = &[
    PatternSpec {
        field: DocumentField::Name,
        labels: &["Name", "Naam", "नाम"],
        capture: LETTERS,
    },
    PatternSpec {
        field: DocumentField::FatherName,
        labels: &["Father", "पिता", "Father's Name"],
        capture: LETTERS,
    },
    PatternSpec {
        field: DocumentField::Village,
        labels: &["Village", "गांव", "ग्राम"],
        capture: LETTERS,
    },
    PatternSpec {
        field: DocumentField::District,
        labels: &["District", "जिला"],
        capture: LETTERS,
    },
    PatternSpec {
        field: DocumentField::SurveyNumber,
        labels: &["Survey No", "सर्वे नं", "Plot No"],
        capture: r"([0-9/-]+)",
    },
    PatternSpec {
        field: DocumentField::Area,
        labels: &["Area", "क्षेत्रफल"],
        capture: r"([0-9.]+)\s*(?:Acre|एकड़|Hectare|हेक्टेयर)",
    },
    PatternSpec {
        field: DocumentField::ClaimType,
        labels: &["Claim Type", "दावा प्रकार"],
        capture: LETTERS,
    },
    PatternSpec {
        field: DocumentField::Date,
        labels: &["Date", "दिनांक"],
        capture: r"([0-9/-]+)",
    },
];

#[derive(Debug)]
struct CompiledPattern {
    field: DocumentField,
    regex: Regex,
}

/// Immutable, compiled set of field patterns.
#[derive(Debug)]
pub struct PatternTable {
    patterns: Vec<CompiledPattern>,
}

static STANDARD_TABLE: LazyLock<PatternTable> = LazyLock::new(|| {
    PatternTable::compile(STANDARD_PATTERNS).expect("standard claim patterns compile")
});

impl PatternTable {
    /// Shared table for the standard claim form, compiled on first use.
    pub fn standard() -> &'static PatternTable {
        &STANDARD_TABLE
    }

    pub fn compile(specs: &[PatternSpec]) -> Result<Self, regex::Error> {
        let patterns = specs
            .iter()
            .map(|spec| {
                let labels = spec
                    .labels
                    .iter()
                    .map(|label| regex::escape(label))
                    .collect::<Vec<_>>()
                    .join("|");
                let source = format!(r"(?im)(?:{labels})[:.]?\s*{}", spec.capture);
                Regex::new(&source).map(|regex| CompiledPattern {
                    field: spec.field,
                    regex,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Number of fields the table knows how to extract.
    pub fn field_count(&self) -> usize {
        self.patterns.len()
    }

    /// Raw capture for every field that matched; the first non-blank match wins.
    pub fn extract(&self, text: &str) -> BTreeMap<DocumentField, String> {
        let mut extracted = BTreeMap::new();

        for pattern in &self.patterns {
            if extracted.contains_key(&pattern.field) {
                continue;
            }

            let first = pattern
                .regex
                .captures_iter(text)
                .filter_map(|captures| captures.get(1))
                .map(|capture| capture.as_str().trim())
                .find(|value| !value.is_empty());

            if let Some(value) = first {
                extracted.insert(pattern.field, value.to_string());
            }
        }

        extracted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_covers_every_field() {
        let table = PatternTable::standard();
        assert_eq!(table.field_count(), DocumentField::COUNT);
    }

    #[test]
    fn labels_match_case_insensitively() {
        let fields = PatternTable::standard().extract("VILLAGE: Kanke\n2");
        assert_eq!(
            fields.get(&DocumentField::Village).map(String::as_str),
            Some("Kanke")
        );
    }

    #[test]
    fn father_label_falls_through_to_possessive_form() {
        let fields = PatternTable::standard().extract("Father's Name: Budhu Oraon\n3.");
        assert_eq!(
            fields.get(&DocumentField::FatherName).map(String::as_str),
            Some("Budhu Oraon")
        );
    }

    #[test]
    fn first_non_blank_match_wins() {
        let text = "Survey No: 12/4\nPlot No: 99-1\n";
        let fields = PatternTable::standard().extract(text);
        assert_eq!(
            fields.get(&DocumentField::SurveyNumber).map(String::as_str),
            Some("12/4")
        );
    }

    #[test]
    fn hindi_labels_are_recognised() {
        let fields = PatternTable::standard().extract("जिला: Ranchi\n5");
        assert_eq!(
            fields.get(&DocumentField::District).map(String::as_str),
            Some("Ranchi")
        );
    }

    #[test]
    fn area_requires_a_unit() {
        let fields = PatternTable::standard().extract("Area: 2.5\n");
        assert!(!fields.contains_key(&DocumentField::Area));

        let fields = PatternTable::standard().extract("Area: 2.5 Hectare\n");
        assert_eq!(
            fields.get(&DocumentField::Area).map(String::as_str),
            Some("2.5")
        );
    }

    #[test]
    fn unmatched_fields_are_absent() {
        let fields = PatternTable::standard().extract("nothing useful here");
        assert!(fields.is_empty());
    }

    #[test]
    fn letter_captures_continue_across_line_breaks() {
        let fields = PatternTable::standard().extract("Village: Kanke\nDistrict: Ranchi");
        assert_eq!(
            fields.get(&DocumentField::Village).map(String::as_str),
            Some("Kanke\nDistrict")
        );
    }
}
