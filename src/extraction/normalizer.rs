use super::patterns::DocumentField;
use super::FieldValue;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;

static NON_LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z\s]").expect("letter filter compiles"));
static NON_SURVEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9/-]").expect("survey filter compiles"));
static NON_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.]").expect("decimal filter compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateOrder {
    DayFirst,
    YearFirst,
}

// Tried in order. Word boundaries keep `2023-06-15` from being read as day `23`, year `2015`.
static DATE_PATTERNS: LazyLock<Vec<(Regex, DateOrder)>> = LazyLock::new(|| {
    [
        (r"\b(\d{1,2})[/-](\d{1,2})[/-](\d{4})\b", DateOrder::DayFirst),
        (r"\b(\d{1,2})[/-](\d{1,2})[/-](\d{2})\b", DateOrder::DayFirst),
        (r"\b(\d{4})[/-](\d{1,2})[/-](\d{1,2})\b", DateOrder::YearFirst),
    ]
    .into_iter()
    .map(|(source, order)| {
        let regex = Regex::new(source).expect("date pattern compiles");
        (regex, order)
    })
    .collect()
});

/// Clean every raw capture, silently dropping values that fail their field's check.
pub(crate) fn normalize_fields(
    raw: &BTreeMap<DocumentField, String>,
) -> BTreeMap<DocumentField, FieldValue> {
    raw.iter()
        .filter_map(|(field, value)| match normalize_field(*field, value) {
            Some(normalized) => Some((*field, normalized)),
            None => {
                debug!(field = field.key(), raw = %value, "dropped field that failed validation");
                None
            }
        })
        .collect()
}

pub(crate) fn normalize_field(field: DocumentField, value: &str) -> Option<FieldValue> {
    match field {
        DocumentField::Name | DocumentField::FatherName | DocumentField::Village => {
            let cleaned = NON_LETTERS.replace_all(value, "");
            let cleaned = cleaned.trim();
            (cleaned.chars().count() > 2).then(|| FieldValue::Text(title_case(cleaned)))
        }
        DocumentField::District => {
            let cleaned = title_case(value.trim());
            (!cleaned.is_empty()).then_some(FieldValue::Text(cleaned))
        }
        DocumentField::SurveyNumber => {
            let cleaned = NON_SURVEY.replace_all(value, "");
            let cleaned = cleaned.trim();
            (!cleaned.is_empty()).then(|| FieldValue::Text(cleaned.to_string()))
        }
        DocumentField::Area => {
            let digits = NON_DECIMAL.replace_all(value, "");
            let area = digits.parse::<f64>().ok()?;
            (area > 0.0 && area < 1000.0).then_some(FieldValue::Area(area))
        }
        DocumentField::Date => {
            let date = standardize_date(value);
            (!date.is_empty()).then_some(FieldValue::Text(date))
        }
        DocumentField::ClaimType => {
            let cleaned = value.trim();
            (!cleaned.is_empty()).then(|| FieldValue::Text(cleaned.to_string()))
        }
    }
}

/// Rewrite the first recognised date as zero-padded `DD/MM/YYYY`.
///
/// Two-digit years are read as `20YY`. Text with no recognisable date is returned trimmed
/// but otherwise untouched.
pub fn standardize_date(value: &str) -> String {
    for (pattern, order) in DATE_PATTERNS.iter() {
        let Some(captures) = pattern.captures(value) else {
            continue;
        };

        let (day, month, year) = match order {
            DateOrder::DayFirst => (&captures[1], &captures[2], &captures[3]),
            DateOrder::YearFirst => (&captures[3], &captures[2], &captures[1]),
        };

        let year = if year.len() == 2 {
            format!("20{year}")
        } else {
            year.to_string()
        };

        return format!("{day:0>2}/{month:0>2}/{year}");
    }

    value.trim().to_string()
}

/// Uppercase the first letter of every word and lowercase the rest.
pub fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut previous_is_letter = false;

    for ch in value.chars() {
        if previous_is_letter {
            result.extend(ch.to_lowercase());
        } else {
            result.extend(ch.to_uppercase());
        }
        previous_is_letter = ch.is_alphabetic();
    }

    result
}
