use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Form fields arrive loosely typed; anything that is not a JSON number
/// counts as missing.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

/// Raw form input for one candidate. Values may be physical or feature-scaled;
/// the classifier decides which.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExoplanetMeasurement {
    /// Orbital period, days.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub pl_orbper: Option<f64>,
    /// Transit duration, hours.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub pl_trandurh: Option<f64>,
    /// Transit depth, ppm.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub pl_trandep: Option<f64>,
    /// Planetary radius, Earth radii.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub pl_rade: Option<f64>,
    /// Insolation flux, Earth units.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub pl_insol: Option<f64>,
    /// Equilibrium temperature, Kelvin.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub pl_eqt: Option<f64>,
    /// Stellar effective temperature, Kelvin.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub st_teff: Option<f64>,
    /// Stellar surface gravity, log10 cm/s².
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub st_logg: Option<f64>,
}

impl ExoplanetMeasurement {
    /// Number of the eight known fields carrying a value.
    pub fn field_count(&self) -> usize {
        [
            self.pl_orbper,
            self.pl_trandurh,
            self.pl_trandep,
            self.pl_rade,
            self.pl_insol,
            self.pl_eqt,
            self.st_teff,
            self.st_logg,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count()
    }
}

/// Sanitized physical values the decision table runs on.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PhysicalMeasurement {
    pub equilibrium_temp: f64,
    pub insolation: f64,
    pub orbital_period: f64,
    pub radius: f64,
    pub stellar_temp: f64,
}

/// Inclusive clamp range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Limits {
    pub min: f64,
    pub max: f64,
}

impl Limits {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

/// Takes `value` if finite, otherwise `fallback`. The result is optionally
/// made absolute and then clamped; the fallback goes through the same steps.
pub fn sanitize(value: Option<f64>, fallback: f64, abs: bool, limits: Option<Limits>) -> f64 {
    let mut x = match value {
        Some(v) if v.is_finite() => v,
        _ => fallback,
    };
    if abs {
        x = x.abs();
    }
    match limits {
        Some(limits) => limits.clamp(x),
        None => x,
    }
}
