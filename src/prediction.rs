//! Request routing and response interpretation for the hosted candidate
//! classifier. Nothing here talks to the network; the caller ships the
//! payload and hands the raw response back.

use crate::planet::ExoplanetMeasurement;
use log::debug;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

const FINAL_DIR: &str = "gs://nasa-exoplanets/final_vote3";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Koi,
    Toi,
    K2,
}

impl Domain {
    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Koi => "koi",
            Domain::Toi => "toi",
            Domain::K2 => "k2",
        }
    }

    pub fn bucket(self) -> &'static str {
        match self {
            Domain::Koi => "gs://nasa-exoplanets/koi",
            Domain::Toi => "gs://nasa-exoplanets/toi",
            Domain::K2 => "gs://nasa-exoplanets/k2",
        }
    }
}

/// Which trained model family can score a record, decided by which stellar
/// fields it carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelRoute {
    SixFields,
    SevenFieldsTeff,
    SevenFieldsLogg,
    EightFields,
}

impl ModelRoute {
    pub fn for_measurement(m: &ExoplanetMeasurement) -> Self {
        match (m.st_teff.is_some(), m.st_logg.is_some()) {
            (false, false) => ModelRoute::SixFields,
            (true, false) => ModelRoute::SevenFieldsTeff,
            (false, true) => ModelRoute::SevenFieldsLogg,
            (true, true) => ModelRoute::EightFields,
        }
    }

    pub fn model_type(self) -> &'static str {
        match self {
            ModelRoute::SixFields => "6_fields",
            ModelRoute::SevenFieldsTeff => "7_fields_teff",
            ModelRoute::SevenFieldsLogg => "7_fields_logg",
            ModelRoute::EightFields => "8_fields",
        }
    }

    pub fn domain(self) -> Domain {
        match self {
            ModelRoute::SixFields => Domain::Koi,
            ModelRoute::SevenFieldsTeff => Domain::Toi,
            ModelRoute::SevenFieldsLogg => Domain::K2,
            ModelRoute::EightFields => Domain::Toi,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredictionConfig {
    pub project_id: String,
    pub region: String,
    pub endpoint_id: String,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            project_id: "nasa-exoplanetas".to_string(),
            region: "us-central1".to_string(),
            endpoint_id: "807757316857266176".to_string(),
        }
    }
}

impl PredictionConfig {
    pub fn endpoint_url(&self) -> String {
        format!(
            "https://{region}-prediction-aiplatform.googleapis.com/v1/projects/{project}/locations/{region}/endpoints/{endpoint}:rawPredict",
            region = self.region,
            project = self.project_id,
            endpoint = self.endpoint_id
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PredictionInstance {
    pub domain: Domain,
    pub features: ExoplanetMeasurement,
}

/// Body of a rawPredict call. Absent fields are left out of `features`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub domains: BTreeMap<&'static str, &'static str>,
    pub final_dir: &'static str,
    pub instances: Vec<PredictionInstance>,
}

impl PredictionRequest {
    pub fn new(measurement: &ExoplanetMeasurement) -> Self {
        let route = ModelRoute::for_measurement(measurement);
        let domains = [Domain::Koi, Domain::Toi, Domain::K2]
            .into_iter()
            .map(|d| (d.as_str(), d.bucket()))
            .collect();

        Self {
            domains,
            final_dir: FINAL_DIR,
            instances: vec![PredictionInstance {
                domain: route.domain(),
                features: *measurement,
            }],
        }
    }
}

/// Binary label plus confidence pulled out of a raw model response.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Verdict {
    pub label: u8,
    pub confidence: f64,
}

impl Default for Verdict {
    fn default() -> Self {
        Self {
            label: 0,
            confidence: 0.5,
        }
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn first_truthy<'a>(obj: &'a serde_json::Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().filter_map(|k| obj.get(*k)).find(|v| truthy(v))
}

/// Index and value of the largest number in `values`; non-numbers are skipped.
fn arg_max(values: &[Value]) -> Option<(usize, f64)> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.as_f64().map(|f| (i, f)))
        .fold(None, |best, (i, f)| match best {
            Some((_, b)) if b >= f => best,
            _ => Some((i, f)),
        })
}

impl Verdict {
    pub fn from_response(response: &Value) -> Self {
        let mut label = 0.0;
        let mut confidence = 0.5;

        let first = response
            .get("predictions")
            .and_then(Value::as_array)
            .and_then(|p| p.first());

        match first {
            Some(Value::Object(pred)) => {
                label = first_truthy(pred, &["label", "prediction"])
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0);
                confidence = first_truthy(pred, &["confidence", "score"])
                    .and_then(Value::as_f64)
                    .unwrap_or(0.5);
                if let Some((idx, max)) = pred
                    .get("scores")
                    .and_then(Value::as_array)
                    .and_then(|s| arg_max(s))
                {
                    confidence = max;
                    label = idx as f64;
                }
            }
            Some(Value::Array(scores)) => {
                if let Some((idx, max)) = arg_max(scores) {
                    confidence = max;
                    label = idx as f64;
                }
            }
            Some(scalar) => {
                let score = match scalar {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) if s.trim().is_empty() => Some(0.0),
                    Value::String(s) => s.trim().parse::<f64>().ok(),
                    Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
                    Value::Null => Some(0.0),
                    _ => None,
                };
                if let Some(score) = score {
                    label = if score >= 0.5 { 1.0 } else { 0.0 };
                    confidence = score.abs();
                }
            }
            None => {}
        }

        let verdict = Self {
            label: if label == 1.0 { 1 } else { 0 },
            confidence: if confidence.is_finite() {
                confidence.clamp(0.0, 1.0)
            } else {
                0.5
            },
        };
        debug!("model verdict {:?}", verdict);
        verdict
    }

    pub fn is_exoplanet(&self) -> bool {
        self.label == 1
    }
}

/// Shape the identification page renders.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IdentificationResult {
    pub success: bool,
    pub prediction: u8,
    pub confidence: f64,
    pub message: &'static str,
    pub classification: &'static str,
    pub model_type: &'static str,
    pub domain_used: Domain,
    pub field_count: usize,
}

impl IdentificationResult {
    pub fn new(verdict: Verdict, measurement: &ExoplanetMeasurement) -> Self {
        let route = ModelRoute::for_measurement(measurement);
        let (message, classification) = if verdict.is_exoplanet() {
            (
                "✅ Os dados indicam que este é um EXOPLANETA!",
                "Exoplaneta Confirmado",
            )
        } else {
            (
                "❌ Os dados NÃO correspondem a um exoplaneta.",
                "Não Exoplaneta",
            )
        };

        Self {
            success: true,
            prediction: verdict.label,
            confidence: verdict.confidence,
            message,
            classification,
            model_type: route.model_type(),
            domain_used: route.domain(),
            field_count: measurement.field_count(),
        }
    }
}
