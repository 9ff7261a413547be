use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

const UNKNOWN: &str = "N/A";

/// Identifier wrapper for submitted claims.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn unknown() -> Self {
        Self(UNKNOWN.to_string())
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Presence of one applicant field after boundary validation.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Absent,
    Present(T),
    /// Supplied with a shape the scorer cannot use; the raw value is kept for audits.
    Malformed(Value),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<T> Field<T> {
    pub fn present(&self) -> Option<&T> {
        match self {
            Field::Present(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Field::Malformed(_))
    }
}

/// The year an applicant started residing on the land, as supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResidenceSince {
    Year(i64),
    Text(String),
}

/// Applicant data supplied by the intake form, validated into explicit per-field presence.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct ApplicantRecord {
    pub application_id: ApplicationId,
    pub applicant_name: String,
    pub community_type: Field<String>,
    pub residence_since: Field<ResidenceSince>,
    pub primary_occupation: Field<String>,
    pub secondary_occupation: Field<String>,
    pub forest_activities: Field<Vec<String>>,
    pub documents: Field<Vec<String>>,
    pub land_use: Field<String>,
    pub land_type: Field<String>,
    pub gram_sabha_resolution: bool,
    pub community_support_letters: Field<i64>,
}

impl ApplicantRecord {
    pub fn new(application_id: impl Into<String>, applicant_name: impl Into<String>) -> Self {
        Self {
            application_id: ApplicationId(application_id.into()),
            applicant_name: applicant_name.into(),
            community_type: Field::Absent,
            residence_since: Field::Absent,
            primary_occupation: Field::Absent,
            secondary_occupation: Field::Absent,
            forest_activities: Field::Absent,
            documents: Field::Absent,
            land_use: Field::Absent,
            land_type: Field::Absent,
            gram_sabha_resolution: false,
            community_support_letters: Field::Absent,
        }
    }

    /// Validate a JSON-like intake payload.
    ///
    /// Only structural problems are errors: the payload must be an object and the identity
    /// fields must be scalar. Individually malformed criteria fields are kept as
    /// [`Field::Malformed`] so scoring can apply its fallbacks.
    pub fn from_value(value: &Value) -> Result<Self, RecordError> {
        let object = value.as_object().ok_or(RecordError::NotAnObject)?;

        let application_id = match identity(object, "id")? {
            Some(id) => ApplicationId(id),
            None => ApplicationId::unknown(),
        };
        let applicant_name = identity(object, "name")?.unwrap_or_else(|| UNKNOWN.to_string());

        Ok(Self {
            application_id,
            applicant_name,
            community_type: text_field(object, "community_type"),
            residence_since: residence_field(object),
            primary_occupation: text_field(object, "primary_occupation"),
            secondary_occupation: text_field(object, "secondary_occupation"),
            forest_activities: text_list_field(object, "forest_activities"),
            documents: text_list_field(object, "documents"),
            land_use: text_field(object, "land_use"),
            land_type: text_field(object, "land_type"),
            gram_sabha_resolution: object
                .get("gram_sabha_resolution")
                .map(truthy)
                .unwrap_or(false),
            community_support_letters: count_field(object, "community_support_letters"),
        })
    }
}

impl TryFrom<Value> for ApplicantRecord {
    type Error = RecordError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

/// Best-effort id for error reporting on payloads that failed validation.
pub fn application_id_hint(value: &Value) -> ApplicationId {
    match value.get("id") {
        Some(Value::String(id)) => ApplicationId(id.clone()),
        Some(Value::Number(id)) => ApplicationId(id.to_string()),
        _ => ApplicationId::unknown(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("application record must be a JSON object")]
    NotAnObject,
    #[error("field '{field}' must be text or a number")]
    InvalidIdentity { field: &'static str },
}

fn identity(object: &Map<String, Value>, key: &'static str) -> Result<Option<String>, RecordError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(Value::Number(value)) => Ok(Some(value.to_string())),
        Some(_) => Err(RecordError::InvalidIdentity { field: key }),
    }
}

// An explicit `null` is a supplied value of the wrong shape, not an omission.
fn text_field(object: &Map<String, Value>, key: &str) -> Field<String> {
    match object.get(key) {
        None => Field::Absent,
        Some(Value::String(value)) => Field::Present(value.clone()),
        Some(other) => Field::Malformed(other.clone()),
    }
}

fn text_list_field(object: &Map<String, Value>, key: &str) -> Field<Vec<String>> {
    match object.get(key) {
        None => Field::Absent,
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .map(Field::Present)
            .unwrap_or_else(|| Field::Malformed(Value::Array(items.clone()))),
        Some(other) => Field::Malformed(other.clone()),
    }
}

fn residence_field(object: &Map<String, Value>) -> Field<ResidenceSince> {
    match object.get("residence_since") {
        None => Field::Absent,
        Some(Value::String(value)) => Field::Present(ResidenceSince::Text(value.clone())),
        Some(Value::Number(number)) => match whole_year(number) {
            Some(year) => Field::Present(ResidenceSince::Year(year)),
            None => Field::Malformed(Value::Number(number.clone())),
        },
        Some(other) => Field::Malformed(other.clone()),
    }
}

/// Fractional years are truncated toward zero.
fn whole_year(number: &Number) -> Option<i64> {
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|value| value.is_finite())
            .map(|value| value.trunc() as i64)
    })
}

fn count_field(object: &Map<String, Value>, key: &str) -> Field<i64> {
    match object.get(key) {
        None | Some(Value::Null) => Field::Absent,
        Some(Value::Number(number)) => match number.as_i64() {
            Some(count) => Field::Present(count),
            None => Field::Malformed(Value::Number(number.clone())),
        },
        Some(other) => Field::Malformed(other.clone()),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_identity_defaults_to_unknown() {
        let record = ApplicantRecord::from_value(&json!({})).expect("empty object is valid");
        assert_eq!(record.application_id, ApplicationId::unknown());
        assert_eq!(record.applicant_name, "N/A");
        assert_eq!(record.community_type, Field::Absent);
        assert!(!record.gram_sabha_resolution);
    }

    #[test]
    fn numeric_ids_are_rendered_as_text() {
        let record = ApplicantRecord::from_value(&json!({ "id": 42 })).expect("valid");
        assert_eq!(record.application_id.0, "42");
    }

    #[test]
    fn non_objects_are_rejected() {
        assert_eq!(
            ApplicantRecord::from_value(&json!(["not", "a", "record"])),
            Err(RecordError::NotAnObject)
        );
    }

    #[test]
    fn structured_names_are_rejected() {
        let err = ApplicantRecord::from_value(&json!({ "id": "A-1", "name": { "first": "X" } }))
            .expect_err("object name is invalid");
        assert_eq!(err, RecordError::InvalidIdentity { field: "name" });
        assert_eq!(application_id_hint(&json!({ "id": "A-1" })).0, "A-1");
    }

    #[test]
    fn wrongly_shaped_fields_are_kept_as_malformed() {
        let record = ApplicantRecord::from_value(&json!({
            "community_type": 7,
            "documents": "ration card",
            "forest_activities": ["honey", 3],
            "community_support_letters": "two",
        }))
        .expect("valid");

        assert!(record.community_type.is_malformed());
        assert!(record.documents.is_malformed());
        assert!(record.forest_activities.is_malformed());
        assert!(record.community_support_letters.is_malformed());
    }

    #[test]
    fn explicit_nulls_are_malformed_not_absent() {
        let record = ApplicantRecord::from_value(&json!({
            "community_type": null,
            "residence_since": null,
            "documents": null,
            "community_support_letters": null,
        }))
        .expect("valid");

        assert_eq!(record.community_type, Field::Malformed(Value::Null));
        assert_eq!(record.residence_since, Field::Malformed(Value::Null));
        assert_eq!(record.documents, Field::Malformed(Value::Null));
        assert_eq!(record.land_use, Field::Absent);
        assert_eq!(record.community_support_letters, Field::Absent);
    }

    #[test]
    fn residence_accepts_text_and_numbers() {
        let text = ApplicantRecord::from_value(&json!({ "residence_since": "01/01/1975" }))
            .expect("valid");
        assert_eq!(
            text.residence_since,
            Field::Present(ResidenceSince::Text("01/01/1975".to_string()))
        );

        let float = ApplicantRecord::from_value(&json!({ "residence_since": 1975.8 }))
            .expect("valid");
        assert_eq!(
            float.residence_since,
            Field::Present(ResidenceSince::Year(1975))
        );
    }

    #[test]
    fn resolution_flag_uses_truthiness() {
        let yes = ApplicantRecord::from_value(&json!({ "gram_sabha_resolution": "yes" }))
            .expect("valid");
        assert!(yes.gram_sabha_resolution);

        let zero = ApplicantRecord::from_value(&json!({ "gram_sabha_resolution": 0 }))
            .expect("valid");
        assert!(!zero.gram_sabha_resolution);
    }

    #[test]
    fn deserializes_through_validation() {
        let record: ApplicantRecord =
            serde_json::from_str(r#"{"id":"FRA-1","name":"Sita","community_type":"ST"}"#)
                .expect("deserializes");
        assert_eq!(record.community_type, Field::Present("ST".to_string()));
        assert!(serde_json::from_str::<ApplicantRecord>("[1,2]").is_err());
    }
}
