use fra_dss::extraction::{
    extraction_confidence, DocumentBatchEntry, DocumentExtractor, DocumentField, DocumentOrigin,
    DocumentSource, FieldValue, PatternSpec, PatternTable,
};
use std::collections::BTreeMap;

const CLAIM_FORM: &str = "FOREST RIGHTS CLAIM FORM A\n\
1. Name: sunita hembrom\n\
2. Father's Name: Mangal Hembrom\n\
3. Village: Bero\n\
4. District: gumla\n\
5. Survey No: 45/12-3\n\
6. Area: 1.75 Hectare\n\
7. Claim Type: Community Forest Resource\n\
8. Date: 2022-11-03\n";

#[test]
fn batch_keeps_input_order_and_isolates_failures() {
    let sources = vec![
        DocumentSource::new("claim.pdf.txt", CLAIM_FORM),
        DocumentSource::new("notes.docx", CLAIM_FORM),
        DocumentSource::new("scan.png", "1. Name: Raju Kisku\n2. Village: Sisai\n"),
    ];

    let entries = DocumentExtractor::default().batch_process(sources);

    assert_eq!(entries.len(), 3);
    let names: Vec<&str> = entries.iter().map(DocumentBatchEntry::file_name).collect();
    assert_eq!(names, vec!["claim.pdf.txt", "notes.docx", "scan.png"]);

    match &entries[0] {
        DocumentBatchEntry::Processed(document) => {
            assert_eq!(document.origin, DocumentOrigin::Pdf);
            let data = &document.structured_data;
            assert_eq!(data.text(DocumentField::Name), Some("Sunita Hembrom"));
            assert_eq!(data.text(DocumentField::District), Some("Gumla"));
            assert_eq!(data.text(DocumentField::SurveyNumber), Some("45/12-3"));
            assert_eq!(data.area(), Some(1.75));
            assert_eq!(data.text(DocumentField::Date), Some("03/11/2022"));
            assert_eq!(data.extraction_confidence, 100.0);
        }
        other => panic!("expected processed document, got {other:?}"),
    }

    match &entries[1] {
        DocumentBatchEntry::Failed { error, .. } => assert!(error.contains("docx")),
        other => panic!("expected failure stub, got {other:?}"),
    }

    match &entries[2] {
        DocumentBatchEntry::Processed(document) => {
            assert_eq!(document.origin, DocumentOrigin::Image);
            assert_eq!(document.structured_data.fields.len(), 2);
        }
        other => panic!("expected processed document, got {other:?}"),
    }
}

#[test]
fn partial_form_scores_partial_confidence() {
    let record = DocumentExtractor::default()
        .extract_structured_data("1. Name: Sita Munda\n2. Village: Bero\n");

    assert_eq!(record.text(DocumentField::Name), Some("Sita Munda"));
    assert_eq!(record.text(DocumentField::Village), Some("Bero"));
    let expected = 25.0 + 20.0 * 2.0 / 3.0;
    assert!((record.extraction_confidence - expected).abs() < 1e-9);
}

#[test]
fn out_of_range_area_is_dropped() {
    let record = DocumentExtractor::default()
        .extract_structured_data("Area: 4500 Acre\nDistrict: Khunti\n");

    assert!(record.get(DocumentField::Area).is_none());
    assert_eq!(
        record.get(DocumentField::District),
        Some(&FieldValue::Text("Khunti".to_string()))
    );
}

#[test]
fn custom_pattern_tables_drive_extraction() {
    const TABLE: &[PatternSpec] = &[PatternSpec {
        field: DocumentField::ClaimType,
        labels: &["Right Claimed"],
        capture: r"([A-Za-z ]+)",
    }];
    let table = PatternTable::compile(TABLE).expect("pattern compiles");
    let record = DocumentExtractor::new(&table).extract_structured_data("Right Claimed: Grazing");

    assert_eq!(record.text(DocumentField::ClaimType), Some("Grazing"));
    assert_eq!(record.extraction_confidence, 100.0);
}

#[test]
fn structured_record_serializes_with_snake_case_keys() {
    let record = DocumentExtractor::default().extract_structured_data(CLAIM_FORM);
    let json = serde_json::to_value(&record).expect("serializes");

    assert_eq!(json["fields"]["father_name"], "Mangal Hembrom");
    assert_eq!(json["fields"]["area"], 1.75);
    assert_eq!(json["extraction_confidence"], 100.0);
}

#[test]
fn confidence_ignores_values_and_counts_keys() {
    let mut fields = BTreeMap::new();
    fields.insert(DocumentField::District, ());
    fields.insert(DocumentField::Date, ());
    let expected = 25.0 + 20.0 / 3.0;
    assert!((extraction_confidence(&fields, DocumentField::COUNT) - expected).abs() < 1e-9);
}
