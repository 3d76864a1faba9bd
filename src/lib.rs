use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod comparison;
pub mod error;
pub mod logging;
pub mod planet;
pub mod prediction;
pub mod texture_gen;

use comparison::ComparisonView;
use error::{error_json, BindingError};
use planet::{Classifier, ExoplanetMeasurement};
use prediction::{IdentificationResult, ModelRoute, PredictionConfig, PredictionRequest, Verdict};
use texture_gen::{TexturePlan, TextureRequest};

fn parse_measurement(input: &str) -> Result<ExoplanetMeasurement, BindingError> {
    serde_json::from_str(input).map_err(|e| BindingError::input("measurement", e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, BindingError> {
    Ok(serde_json::to_string(value)?)
}

fn respond(result: Result<String, BindingError>) -> String {
    match result {
        Ok(v) => v,
        Err(e) => {
            log::warn!("{}", e);
            error_json(&e)
        }
    }
}

/// Sets up panic reporting and console logging. Safe to call more than once.
#[wasm_bindgen]
pub fn init_runtime(log_level: Option<String>) {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let level = log_level
        .as_deref()
        .map(logging::parse_level)
        .unwrap_or(log::LevelFilter::Info);
    logging::init(level);
}

#[wasm_bindgen]
pub fn classify_planet(measurement_json: &str) -> String {
    respond(parse_measurement(measurement_json).and_then(|m| {
        let profile = Classifier::new().classify(&m);
        to_json(&profile)
    }))
}

#[wasm_bindgen]
pub fn texture_path(planet_type: &str, variation: u32, has_clouds: bool) -> String {
    planet::texture::texture_path(planet_type, variation, has_clouds)
}

#[wasm_bindgen]
pub fn compare_to_earth(measurement_json: &str, texture_override: Option<String>) -> String {
    respond(parse_measurement(measurement_json).and_then(|m| {
        let view =
            ComparisonView::from_measurement(&Classifier::new(), &m, texture_override.as_deref());
        to_json(&view)
    }))
}

#[wasm_bindgen]
pub fn showcase_planet() -> String {
    comparison::comparison_json(None)
}

#[derive(Serialize)]
struct RouteView {
    model_type: &'static str,
    domain: prediction::Domain,
    field_count: usize,
}

#[wasm_bindgen]
pub fn model_route(measurement_json: &str) -> String {
    respond(parse_measurement(measurement_json).and_then(|m| {
        let route = ModelRoute::for_measurement(&m);
        to_json(&RouteView {
            model_type: route.model_type(),
            domain: route.domain(),
            field_count: m.field_count(),
        })
    }))
}

#[wasm_bindgen]
pub fn prediction_payload(measurement_json: &str) -> String {
    respond(parse_measurement(measurement_json).and_then(|m| to_json(&PredictionRequest::new(&m))))
}

#[wasm_bindgen]
pub fn interpret_prediction(measurement_json: &str, response_json: &str) -> String {
    respond(parse_measurement(measurement_json).and_then(|m| {
        let raw: serde_json::Value = serde_json::from_str(response_json)
            .map_err(|e| BindingError::input("prediction response", e))?;
        to_json(&IdentificationResult::new(Verdict::from_response(&raw), &m))
    }))
}

/// Vertex AI rawPredict URL; any argument left out keeps the site's value.
#[wasm_bindgen]
pub fn prediction_endpoint(
    project_id: Option<String>,
    region: Option<String>,
    endpoint_id: Option<String>,
) -> String {
    let defaults = PredictionConfig::default();
    PredictionConfig {
        project_id: project_id.unwrap_or(defaults.project_id),
        region: region.unwrap_or(defaults.region),
        endpoint_id: endpoint_id.unwrap_or(defaults.endpoint_id),
    }
    .endpoint_url()
}

#[wasm_bindgen]
pub fn texture_request(measurement_json: &str) -> String {
    respond(parse_measurement(measurement_json).and_then(|m| to_json(&TextureRequest::new(&m))))
}

#[wasm_bindgen]
pub fn texture_plan(measurement_json: &str, seed: u64) -> String {
    respond(parse_measurement(measurement_json).and_then(|m| to_json(&TexturePlan::new(&m, seed))))
}

/// Square RGB texture, three bytes per pixel. Empty when the input is unreadable.
#[wasm_bindgen]
pub fn generate_texture(measurement_json: &str, size: u32, seed: u64) -> Vec<u8> {
    match parse_measurement(measurement_json) {
        Ok(m) => TexturePlan::new(&m, seed).render(size as usize),
        Err(e) => {
            log::warn!("{}", e);
            Vec::new()
        }
    }
}
