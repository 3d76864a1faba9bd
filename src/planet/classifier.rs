use crate::planet::measurement::{sanitize, ExoplanetMeasurement, Limits, PhysicalMeasurement};
use crate::planet::planet_type::PlanetType;
use crate::planet::texture::texture_path;
use log::{debug, trace};
use serde::Serialize;

/// Physical defaults substituted for missing or non-finite inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Defaults {
    pub equilibrium_temp: f64,
    pub insolation: f64,
    pub orbital_period: f64,
    pub radius: f64,
    pub stellar_temp: f64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            equilibrium_temp: 288.0,
            insolation: 1.0,
            orbital_period: 365.0,
            radius: 1.0,
            stellar_temp: 5778.0,
        }
    }
}

/// Affine map from feature-scaled inputs back to physical ranges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Denormalization {
    /// Detection fires when every magnitude is at most this.
    pub max_magnitude: f64,
    pub temp_scale: f64,
    pub temp_offset: f64,
    pub temp_limits: Limits,
    pub insolation_scale: f64,
    pub radius_scale: f64,
    pub period_scale: f64,
}

impl Default for Denormalization {
    fn default() -> Self {
        Self {
            max_magnitude: 10.0,
            temp_scale: 500.0,
            temp_offset: 288.0,
            temp_limits: Limits::new(50.0, 2000.0),
            insolation_scale: 2.0,
            radius_scale: 1.5,
            period_scale: 365.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassifierConfig {
    pub defaults: Defaults,
    pub denormalization: Denormalization,
    pub insolation_limits: Limits,
    pub radius_limits: Limits,
    pub period_limits: Limits,
    pub stellar_temp_limits: Limits,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults::default(),
            denormalization: Denormalization::default(),
            insolation_limits: Limits::new(0.02, 32.0),
            radius_limits: Limits::new(0.1, 6.0),
            period_limits: Limits::new(0.01, 1e6),
            stellar_temp_limits: Limits::new(2400.0, 20000.0),
        }
    }
}

/// Result handed to the comparison scene.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetProfile {
    #[serde(rename = "type")]
    pub planet_type: PlanetType,
    pub variation: u32,
    pub has_clouds: bool,
    pub description: &'static str,
    pub characteristics: &'static [&'static str],
}

impl PlanetProfile {
    pub fn texture_path(&self) -> String {
        texture_path(self.planet_type.as_ref(), self.variation, self.has_clouds)
    }
}

/// Profile together with the intermediate values it was derived from.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub profile: PlanetProfile,
    pub normalized: bool,
    pub physical: PhysicalMeasurement,
    pub surface_temp: f64,
}

#[derive(Clone, Copy, Debug)]
enum Threshold {
    Any,
    Above(f64),
    AtLeast(f64),
}

impl Threshold {
    fn admits(self, value: f64) -> bool {
        match self {
            Threshold::Any => true,
            Threshold::Above(limit) => value > limit,
            Threshold::AtLeast(limit) => value >= limit,
        }
    }
}

struct Rule {
    surface_temp: Threshold,
    insolation: Threshold,
    planet_type: PlanetType,
    has_clouds: bool,
    characteristics: &'static [&'static str],
}

const fn rule(
    surface_temp: Threshold,
    insolation: Threshold,
    planet_type: PlanetType,
    has_clouds: bool,
    characteristics: &'static [&'static str],
) -> Rule {
    Rule {
        surface_temp,
        insolation,
        planet_type,
        has_clouds,
        characteristics,
    }
}

use Threshold::{Above, Any, AtLeast};

// Evaluated top to bottom, first match wins. Every row relies on the rows
// above it having taken the hotter or brighter cases.
const RULES: &[Rule] = &[
    rule(Above(1500.0), Any, PlanetType::Volcanic, false, &[
        "Superfície parcialmente derretida",
        "Atividade vulcânica extrema",
        "Atmosfera de vapor mineral",
    ]),
    rule(Above(800.0), Any, PlanetType::Venusian, false, &[
        "Efeito estufa descontrolado",
        "Atmosfera densa e corrosiva",
        "Pressão e temperatura muito elevadas",
    ]),
    rule(Above(400.0), Above(4.0), PlanetType::Dry, false, &[
        "Desertos extremos",
        "Água superficial escassa",
        "Atmosfera árida",
    ]),
    rule(Above(400.0), Any, PlanetType::Martian, false, &[
        "Atmosfera fina e seca",
        "Superfície desértica",
        "Gelo sazonal nos polos",
    ]),
    rule(AtLeast(350.0), AtLeast(1.8), PlanetType::Tropical, true, &[
        "Oceanos quentes",
        "Evaporação intensa",
        "Florestas úmidas",
    ]),
    rule(AtLeast(250.0), AtLeast(1.8), PlanetType::Savannah, true, &[
        "Estações secas/úmidas",
        "Gramíneas extensas",
        "Rios sazonais",
    ]),
    rule(AtLeast(320.0), AtLeast(1.2), PlanetType::Swamp, true, &[
        "Pântanos extensos",
        "Alta umidade",
        "Vegetação aquática",
    ]),
    rule(AtLeast(250.0), AtLeast(1.2), PlanetType::Wetlands, true, &[
        "Lagos e brejos",
        "Biodiversidade aquática",
        "Clima úmido",
    ]),
    rule(AtLeast(300.0), AtLeast(0.8), PlanetType::Terrestrial, true, &[
        "Oceanos e continentes",
        "Ciclo hidrológico ativo",
        "Clima estável",
    ]),
    rule(AtLeast(250.0), AtLeast(0.8), PlanetType::Oceanic, true, &[
        "Oceanos globais",
        "Pouca terra emersa",
        "Correntes intensas",
    ]),
    rule(AtLeast(250.0), AtLeast(0.5), PlanetType::Alpine, false, &[
        "Regiões montanhosas",
        "Geleiras",
        "Vales frios",
    ]),
    rule(AtLeast(250.0), Any, PlanetType::Tundra, true, &[
        "Permafrost",
        "Verões curtos",
        "Vegetação baixa",
    ]),
    rule(AtLeast(150.0), Above(0.3), PlanetType::Tundra, false, &[
        "Gelo superficial",
        "Atmosfera fria e fina",
        "Água líquida rara",
    ]),
    rule(AtLeast(150.0), Any, PlanetType::Ice, false, &[
        "Superfície congelada",
        "Atividade atmosférica mínima",
        "Gelo permanente",
    ]),
    rule(Any, Any, PlanetType::Ice, false, &[
        "Mundo congelado",
        "Gelo e rocha",
        "Sem atividade atmosférica",
    ]),
];

const PRIMORDIAL_CHARACTERISTICS: &[&str] = &[
    "Radiação predominante em infravermelho",
    "Possível travamento de maré",
    "Atmosfera em evolução",
];

const EARTH_GREENHOUSE_K: f64 = 33.0;
const MAX_GREENHOUSE_K: f64 = 120.0;

/// Atmospheric retention by planet size.
fn atmosphere_factor(radius: f64) -> f64 {
    match radius {
        r if r < 0.5 => 0.2,
        r if r < 1.0 => 0.7,
        r if r < 1.8 => 1.0,
        r if r < 2.5 => 1.2,
        _ => 1.5,
    }
}

fn insolation_factor(insolation: f64) -> f64 {
    insolation.powf(0.25).clamp(0.5, 2.0)
}

pub struct Classifier {
    config: ClassifierConfig,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self::with_config(ClassifierConfig::default())
    }

    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn classify(&self, measurement: &ExoplanetMeasurement) -> PlanetProfile {
        self.classify_detailed(measurement).profile
    }

    pub fn classify_detailed(&self, measurement: &ExoplanetMeasurement) -> Classification {
        let normalized = self.looks_normalized(measurement);
        let physical = self.physical(measurement, normalized);
        let surface_temp = self.surface_temperature(
            physical.equilibrium_temp,
            physical.radius,
            physical.insolation,
        );

        let matched = RULES
            .iter()
            .find(|r| r.surface_temp.admits(surface_temp) && r.insolation.admits(physical.insolation))
            .unwrap_or(&RULES[RULES.len() - 1]);

        let mut planet_type = matched.planet_type;
        let mut has_clouds = matched.has_clouds;
        let mut characteristics = matched.characteristics;
        trace!(
            "table picked {} at surface {:.1} K, insolation {:.2}",
            planet_type,
            surface_temp,
            physical.insolation
        );

        let period = physical.orbital_period;
        if period < 0.5 && surface_temp > 700.0 {
            planet_type = PlanetType::Volcanic;
            has_clouds = false;
        } else if period > 5000.0 && surface_temp < 260.0 {
            planet_type = PlanetType::Ice;
            has_clouds = false;
        }

        let stellar = physical.stellar_temp;
        if stellar > 7000.0 && surface_temp > 600.0 {
            planet_type = PlanetType::Venusian;
            has_clouds = false;
        } else if stellar < 4000.0 && (250.0..=350.0).contains(&surface_temp) {
            planet_type = PlanetType::Primordial;
            has_clouds = false;
            characteristics = PRIMORDIAL_CHARACTERISTICS;
        }

        if planet_type != matched.planet_type {
            debug!("override {} -> {}", matched.planet_type, planet_type);
        }

        let profile = PlanetProfile {
            planet_type,
            variation: variation_for(period),
            has_clouds,
            description: planet_type.description(),
            characteristics,
        };

        Classification {
            profile,
            normalized,
            physical,
            surface_temp,
        }
    }

    /// Feature-scaled records show up with small magnitudes or with signs
    /// that make no physical sense.
    pub fn looks_normalized(&self, m: &ExoplanetMeasurement) -> bool {
        let raw = [m.pl_eqt, m.pl_insol, m.pl_rade, m.pl_orbper].map(|v| v.unwrap_or(0.0));
        let limit = self.config.denormalization.max_magnitude;
        let small_scales = raw.iter().all(|v| v.abs() <= limit);
        let any_negative = raw.iter().any(|v| *v < 0.0);
        small_scales || any_negative
    }

    fn physical(&self, m: &ExoplanetMeasurement, normalized: bool) -> PhysicalMeasurement {
        let cfg = &self.config;
        let d = &cfg.defaults;

        let (eqt, insol, radius, period) = if normalized {
            let n = &cfg.denormalization;
            (
                Some(sanitize(
                    Some(m.pl_eqt.unwrap_or(0.0) * n.temp_scale + n.temp_offset),
                    d.equilibrium_temp,
                    false,
                    Some(n.temp_limits),
                )),
                Some(sanitize(
                    Some(m.pl_insol.unwrap_or(1.0).abs() * n.insolation_scale),
                    d.insolation,
                    false,
                    Some(cfg.insolation_limits),
                )),
                Some(sanitize(
                    Some(m.pl_rade.unwrap_or(1.0).abs() * n.radius_scale),
                    d.radius,
                    false,
                    Some(cfg.radius_limits),
                )),
                Some(sanitize(
                    Some(m.pl_orbper.unwrap_or(1.0).abs() * n.period_scale),
                    d.orbital_period,
                    false,
                    Some(cfg.period_limits),
                )),
            )
        } else {
            (m.pl_eqt, m.pl_insol, m.pl_rade, m.pl_orbper)
        };

        PhysicalMeasurement {
            equilibrium_temp: sanitize(eqt, d.equilibrium_temp, true, None),
            insolation: sanitize(insol, d.insolation, true, Some(cfg.insolation_limits)),
            orbital_period: sanitize(period, d.orbital_period, true, Some(cfg.period_limits)),
            radius: sanitize(radius, d.radius, true, Some(cfg.radius_limits)),
            stellar_temp: sanitize(m.st_teff, d.stellar_temp, true, Some(cfg.stellar_temp_limits)),
        }
    }

    /// Equilibrium temperature plus a greenhouse term scaled by size and
    /// irradiation, capped at 120 K.
    pub fn surface_temperature(&self, equilibrium_temp: f64, radius: f64, insolation: f64) -> f64 {
        let cfg = &self.config;
        let t_eq = sanitize(Some(equilibrium_temp), cfg.defaults.equilibrium_temp, true, None);
        let r = sanitize(Some(radius), cfg.defaults.radius, true, Some(cfg.radius_limits));
        let s = sanitize(Some(insolation), cfg.defaults.insolation, true, Some(cfg.insolation_limits));

        let delta = EARTH_GREENHOUSE_K * atmosphere_factor(r) * insolation_factor(s);
        t_eq + delta.clamp(0.0, MAX_GREENHOUSE_K)
    }
}

/// Texture variant, 1 through 4, picked from the orbital period.
pub fn variation_for(period_days: f64) -> u32 {
    let v = (period_days % 4.0).floor();
    if v.is_finite() && v >= 0.0 {
        (v as u32).min(3) + 1
    } else {
        1
    }
}

/// Classifies with the stock configuration.
pub fn classify(measurement: &ExoplanetMeasurement) -> PlanetProfile {
    Classifier::new().classify(measurement)
}
