use super::patterns::DocumentField;
use std::collections::BTreeMap;

const CRITICAL_BONUS: f64 = 20.0;

/// Extraction quality in `[0, 100]`: coverage of the defined fields plus a bonus for
/// the identifying fields, capped at 100.
pub fn extraction_confidence<V>(fields: &BTreeMap<DocumentField, V>, total_fields: usize) -> f64 {
    if total_fields == 0 {
        return 0.0;
    }

    let coverage = fields.len() as f64 / total_fields as f64 * 100.0;

    let critical: Vec<DocumentField> = DocumentField::ordered()
        .into_iter()
        .filter(|field| field.is_critical())
        .collect();
    let critical_found = critical
        .iter()
        .filter(|field| fields.contains_key(*field))
        .count();
    let bonus = critical_found as f64 / critical.len() as f64 * CRITICAL_BONUS;

    let confidence = (coverage + bonus).min(100.0);
    if confidence.is_finite() {
        confidence
    } else {
        0.0
    }
}
