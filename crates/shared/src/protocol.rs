use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Valid attribute values served by `GET /api/options`.
///
/// Fetched once at startup and read-only afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionsCatalog {
    pub makes: Vec<String>,
    pub conditions: Vec<String>,
    pub models: Vec<String>,
    /// Which makes each model token is valid for. Servers may omit it.
    #[serde(default)]
    pub model_make_mapping: HashMap<String, Vec<String>>,
}

impl OptionsCatalog {
    pub fn makes_for_model(&self, model: &str) -> &[String] {
        self.model_make_mapping
            .get(model)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Body of `POST /api/predict`. The JSON keys mirror the backend's training
/// column names, two of which contain spaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(rename = "Make")]
    pub make: String,
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Condition")]
    pub condition: String,
    #[serde(rename = "Age")]
    pub age: f64,
    #[serde(rename = "Engine Size")]
    pub engine_size: f64,
    #[serde(rename = "Horse Power")]
    pub horse_power: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predicted_price: f64,
}

/// Error body returned with a non-2xx status from the predict endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prediction_request_serializes_backend_column_names() {
        let request = PredictionRequest {
            make: "toyota".to_string(),
            model: "corolla".to_string(),
            condition: "foreign_used".to_string(),
            age: 3.0,
            engine_size: 1.8,
            horse_power: 140.0,
        };
        let value = serde_json::to_value(&request).expect("serialize");
        let object = value.as_object().expect("json object");
        for key in ["Make", "Model", "Condition", "Age", "Engine Size", "Horse Power"] {
            assert!(object.contains_key(key), "missing wire key {key}");
        }
        assert_eq!(object["Engine Size"], 1.8);
    }

    #[test]
    fn catalog_tolerates_missing_mapping() {
        let catalog: OptionsCatalog = serde_json::from_str(
            r#"{"makes":["mazda"],"conditions":["new"],"models":["mazda_cx5"]}"#,
        )
        .expect("deserialize");
        assert!(catalog.model_make_mapping.is_empty());
        assert!(catalog.makes_for_model("mazda_cx5").is_empty());
    }
}
