use crate::planet::{Classifier, ExoplanetMeasurement, PlanetType};
use serde::Serialize;

const MIN_VISUAL_RADIUS: f64 = 0.5;
const MAX_VISUAL_RADIUS: f64 = 6.0;
const SHOWCASE_TEXTURE: &str = "/textures/Terrestrial/Terrestrial_1_clouds.png";
const SHOWCASE_CHARACTERISTICS: &[&str] = &[
    "Oceanos e continentes",
    "Atmosfera respirável",
    "Vida possível",
];

/// What the side-by-side Earth scene needs to draw the exoplanet sphere.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonView {
    #[serde(rename = "type")]
    pub planet_type: PlanetType,
    pub variation: u32,
    pub has_clouds: bool,
    pub description: &'static str,
    pub characteristics: &'static [&'static str],
    /// Sphere radius in Earth radii, clamped so the scene stays legible.
    pub radius: f64,
    pub actual_radius: f64,
    pub texture_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_temperature: Option<f64>,
    /// The submitted record, echoed so the panel can list it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_data: Option<ExoplanetMeasurement>,
}

impl ComparisonView {
    pub fn from_measurement(
        classifier: &Classifier,
        measurement: &ExoplanetMeasurement,
        texture_override: Option<&str>,
    ) -> Self {
        let classification = classifier.classify_detailed(measurement);
        let profile = classification.profile;

        let actual_radius = match measurement.pl_rade {
            Some(r) if r.is_finite() => r.abs(),
            _ => 1.0,
        };
        let texture_path = texture_override
            .map(str::to_string)
            .unwrap_or_else(|| profile.texture_path());

        Self {
            planet_type: profile.planet_type,
            variation: profile.variation,
            has_clouds: profile.has_clouds,
            description: profile.description,
            characteristics: profile.characteristics,
            radius: actual_radius.clamp(MIN_VISUAL_RADIUS, MAX_VISUAL_RADIUS),
            actual_radius,
            texture_path,
            surface_temperature: Some(classification.surface_temp),
            original_data: Some(*measurement),
        }
    }

    /// Earth-like stand-in shown before the visitor submits any data.
    pub fn showcase(texture_override: Option<&str>) -> Self {
        Self {
            planet_type: PlanetType::Terrestrial,
            variation: 1,
            has_clouds: true,
            description: "Um planeta similar à Terra para demonstração.",
            characteristics: SHOWCASE_CHARACTERISTICS,
            radius: 1.0,
            actual_radius: 1.0,
            texture_path: texture_override.unwrap_or(SHOWCASE_TEXTURE).to_string(),
            surface_temperature: None,
            original_data: None,
        }
    }
}

pub fn comparison_json(measurement: Option<&ExoplanetMeasurement>) -> String {
    let view = match measurement {
        Some(m) => ComparisonView::from_measurement(&Classifier::new(), m, None),
        None => ComparisonView::showcase(None),
    };
    serde_json::to_string(&view).unwrap_or_else(|_| "{}".to_string())
}
