use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Form payload: field name to string value, sent exactly as collected.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct PredictionRequest {
    pub fields: BTreeMap<String, String>,
}

impl FromIterator<(String, String)> for PredictionRequest {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResponse {
    pub attrition_probability: f64,
    pub retention_probability: f64,
    pub prediction: i64,
    pub risk_level: String,
}

/// Error payload the service attaches to non-success responses.
#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub model_loaded: bool,
    pub features_count: usize,
}
