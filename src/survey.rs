// Survey input record as handed over by the form collaborator

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::{PricerError, PricerResult};

/// One respondent's answers, carried as the raw display strings.
///
/// Membership of each categorical answer is checked during encoding, not
/// here, so a record can always be built from whatever the form produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub age: i32,
    pub gender: String,
    pub zone: String,
    pub occupation: String,
    pub income_levels: String,
    pub health_concerns: String,
    #[serde(rename = "consume_frequency(weekly)")]
    pub consume_frequency: String,
    pub preferable_consumption_size: String,
    pub typical_consumption_situations: String,
    pub purchase_channel: String,
    pub packaging_preference: String,
    pub flavor_preference: String,
    pub current_brand: String,
    pub awareness_of_other_brands: String,
    pub reasons_for_choosing_brands: String,
}

impl SurveyResponse {
    /// Parse a response from its JSON form.
    pub fn from_json(input: &str) -> PricerResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| PricerError::serialization("survey response", e))
    }

    /// Build a response from a field-name to value mapping.
    pub fn from_map(fields: HashMap<String, serde_json::Value>) -> PricerResult<Self> {
        let object: serde_json::Map<String, serde_json::Value> = fields.into_iter().collect();
        serde_json::from_value(serde_json::Value::Object(object))
            .map_err(|e| PricerError::serialization("survey response", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_json() -> serde_json::Value {
        json!({
            "age": 25,
            "gender": "Male",
            "zone": "Urban",
            "occupation": "Student",
            "income_levels": "<10L",
            "consume_frequency(weekly)": "0-2 times",
            "health_concerns": "Low (Not very concerned)",
            "preferable_consumption_size": "Small",
            "awareness_of_other_brands": "0 to 1",
            "current_brand": "Newcomer",
            "reasons_for_choosing_brands": "Price",
            "flavor_preference": "Traditional",
            "purchase_channel": "Online",
            "packaging_preference": "Simple",
            "typical_consumption_situations": "Casual (eg. At home)"
        })
    }

    #[test]
    fn parses_form_field_names() {
        let response = SurveyResponse::from_json(&sample_json().to_string()).unwrap();
        assert_eq!(response.age, 25);
        assert_eq!(response.consume_frequency, "0-2 times");
        assert_eq!(response.typical_consumption_situations, "Casual (eg. At home)");
    }

    #[test]
    fn builds_from_map() {
        let fields: HashMap<String, serde_json::Value> = sample_json()
            .as_object()
            .unwrap()
            .clone()
            .into_iter()
            .collect();
        let response = SurveyResponse::from_map(fields).unwrap();
        assert_eq!(response.zone, "Urban");
    }

    #[test]
    fn missing_field_is_a_serialization_error() {
        let mut value = sample_json();
        value.as_object_mut().unwrap().remove("zone");

        let err = SurveyResponse::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, PricerError::Serialization { .. }));
    }
}
