//! Procedural planet textures: the request the site posts to its texture
//! service and the generator behind it.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use strum_macros::Display;

use crate::planet::measurement::{sanitize, Limits};
use crate::planet::ExoplanetMeasurement;

pub type Rgb = [u8; 3];

const DEEP_WATER: Rgb = [5, 25, 80];
const SHALLOW_WATER: Rgb = [25, 90, 150];
const MOUNTAINS: Rgb = [140, 140, 140];
const ICE: Rgb = [230, 235, 240];

/// Shoreline band above the water level.
const SHALLOW_BAND: f64 = 0.05;
const SNOW_LINE: f64 = 0.85;

const SIZE_LIMITS: Limits = Limits::new(16.0, 2048.0);

/// Terrain hint sent along with a texture request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TerrainType {
    Ice,
    Desert,
    Rocky,
    Vegetation,
    Terrestrial,
}

/// JS-style truthiness for an optional number: missing, zero and NaN are falsy.
fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

impl TerrainType {
    pub fn for_measurement(m: &ExoplanetMeasurement) -> Self {
        let temp = present(m.pl_eqt).unwrap_or(288.0);
        if temp < 200.0 {
            TerrainType::Ice
        } else if temp > 400.0 {
            TerrainType::Desert
        } else if m.pl_rade.map(|r| r < 0.5).unwrap_or(false) {
            TerrainType::Rocky
        } else if temp > 273.0 && temp < 373.0 {
            TerrainType::Vegetation
        } else {
            TerrainType::Terrestrial
        }
    }
}

/// Mean surface temperature in Celsius, from equilibrium temperature when
/// known, else a rough insolation estimate.
pub fn average_temp(m: &ExoplanetMeasurement) -> f64 {
    if let Some(eqt) = present(m.pl_eqt) {
        eqt - 273.15
    } else if let Some(insol) = present(m.pl_insol) {
        insol * 15.0 - 15.0
    } else {
        15.0
    }
}

/// Body of the site's texture generation call.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureRequest {
    pub main_terrain: TerrainType,
    pub average_temp: f64,
    #[serde(rename = "pl_rade")]
    pub radius: Option<f64>,
    #[serde(rename = "pl_insol")]
    pub insolation: f64,
    #[serde(rename = "pl_eqt")]
    pub equilibrium_temp: f64,
    pub has_atmosphere: bool,
    pub has_water: bool,
}

impl TextureRequest {
    pub fn new(m: &ExoplanetMeasurement) -> Self {
        let eqt = present(m.pl_eqt);
        TextureRequest {
            main_terrain: TerrainType::for_measurement(m),
            average_temp: average_temp(m),
            radius: m.pl_rade,
            insolation: present(m.pl_insol).unwrap_or(1.0),
            equilibrium_temp: eqt.unwrap_or(288.0),
            has_atmosphere: m.pl_rade.map(|r| r > 0.5).unwrap_or(false),
            has_water: eqt.map(|t| t > 273.0 && t < 373.0).unwrap_or(false),
        }
    }
}

/// Base palette family chosen from equilibrium temperature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Biome {
    Ice,
    Vegetation,
    Desert,
}

impl Biome {
    pub fn for_temperature(eqt: f64) -> Self {
        if eqt < 220.0 {
            Biome::Ice
        } else if eqt <= 370.0 {
            Biome::Vegetation
        } else {
            Biome::Desert
        }
    }

    /// Fraction of the heightmap below sea level.
    pub fn water_level(self) -> f64 {
        match self {
            Biome::Vegetation => 0.45,
            Biome::Ice | Biome::Desert => 0.0,
        }
    }

    /// Land color between the shore and the snow line.
    pub fn land_color(self) -> Rgb {
        match self {
            Biome::Ice => [200, 200, 220],
            Biome::Vegetation => [80, 120, 80],
            Biome::Desert => [180, 140, 100],
        }
    }
}

/// Color cast from the host star, applied over the finished map.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StarTint {
    pub color: Rgb,
    pub alpha: f64,
}

impl StarTint {
    pub fn for_star(stellar_temp: f64) -> Option<Self> {
        if stellar_temp < 4000.0 {
            Some(StarTint { color: [100, 60, 30], alpha: 0.25 })
        } else if stellar_temp > 7500.0 {
            Some(StarTint { color: [180, 200, 255], alpha: 0.2 })
        } else {
            None
        }
    }

    pub fn apply(&self, pixel: Rgb) -> Rgb {
        let mut out = pixel;
        for (channel, tint) in out.iter_mut().zip(self.color) {
            let mixed = f64::from(*channel) * (1.0 - self.alpha) + f64::from(tint) * self.alpha;
            *channel = mixed.round().clamp(0.0, 255.0) as u8;
        }
        out
    }
}

/// Layered sine noise settings for the heightmap.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NoiseConfig {
    pub octaves: u8,
    /// Wavelength of the first octave in pixels.
    pub scale: f64,
    /// Amplitude decay per octave.
    pub persistence: f64,
    /// Half-width of the uniform per-pixel jitter.
    pub jitter: f64,
    pub seed: u64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        NoiseConfig {
            octaves: 3,
            scale: 80.0,
            persistence: 0.5,
            jitter: 0.1,
            seed: 42,
        }
    }
}

impl NoiseConfig {
    pub fn with_seed(seed: u64) -> Self {
        NoiseConfig {
            seed,
            ..Default::default()
        }
    }

    /// Larger planets get finer features.
    pub fn for_radius(radius: f64, seed: u64) -> Self {
        let modifier = 1.0 / radius.clamp(0.8, 1.5);
        NoiseConfig {
            scale: 80.0 * modifier,
            ..Self::with_seed(seed)
        }
    }
}

fn wave(x: f64, y: f64, scale: f64) -> f64 {
    (x / scale).sin() * (y / scale).cos()
        + 0.5 * (2.0 * x / scale).sin() * (2.0 * y / scale).cos()
        + 0.25 * (4.0 * x / scale).sin() * (4.0 * y / scale).cos()
}

/// Row-major heightmap normalized to [0, 1].
pub fn heightmap(size: usize, config: &NoiseConfig) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut cells = Vec::with_capacity(size * size);

    for y in 0..size {
        for x in 0..size {
            let (fx, fy) = (x as f64, y as f64);
            let mut total = 0.0;
            let mut scale = config.scale;
            let mut amplitude = 1.0;
            for _ in 0..config.octaves {
                total += wave(fx, fy, scale) * amplitude;
                scale /= 2.0;
                amplitude *= config.persistence;
            }
            if config.jitter > 0.0 {
                total += rng.gen_range(-config.jitter..config.jitter);
            }
            cells.push(total);
        }
    }

    let (min, max) = cells
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let span = max - min;
    for v in cells.iter_mut() {
        *v = if span > 0.0 { (*v - min) / span } else { 0.0 };
    }
    cells
}

/// Everything the generator derives from a measurement before painting.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TexturePlan {
    pub biome: Biome,
    pub water_level: f64,
    pub tint: Option<StarTint>,
    pub noise: NoiseConfig,
}

impl TexturePlan {
    pub fn new(m: &ExoplanetMeasurement, seed: u64) -> Self {
        let eqt = sanitize(m.pl_eqt, 288.0, false, None);
        let radius = sanitize(m.pl_rade, 1.0, true, None);
        let stellar = sanitize(m.st_teff, 5778.0, true, None);
        let biome = Biome::for_temperature(eqt);
        TexturePlan {
            biome,
            water_level: biome.water_level(),
            tint: StarTint::for_star(stellar),
            noise: NoiseConfig::for_radius(radius, seed),
        }
    }

    pub fn color_at(&self, height: f64) -> Rgb {
        let base = match self.biome {
            Biome::Ice => {
                let k = 0.8 + height * 0.2;
                ICE.map(|c| (f64::from(c) * k).round().clamp(0.0, 255.0) as u8)
            }
            _ if height < self.water_level => DEEP_WATER,
            _ if height < self.water_level + SHALLOW_BAND => SHALLOW_WATER,
            _ if height < SNOW_LINE => self.biome.land_color(),
            _ => MOUNTAINS,
        };
        match &self.tint {
            Some(tint) => tint.apply(base),
            None => base,
        }
    }

    /// Paints a square RGB texture, three bytes per pixel, row-major.
    pub fn render(&self, size: usize) -> Vec<u8> {
        let size = SIZE_LIMITS.clamp(size as f64) as usize;
        log::debug!("rendering {}x{} {} texture", size, size, self.biome);
        heightmap(size, &self.noise)
            .into_iter()
            .flat_map(|h| self.color_at(h))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurement(eqt: Option<f64>, rade: Option<f64>, insol: Option<f64>) -> ExoplanetMeasurement {
        ExoplanetMeasurement {
            pl_eqt: eqt,
            pl_rade: rade,
            pl_insol: insol,
            ..Default::default()
        }
    }

    #[test]
    fn terrain_hint_follows_temperature_then_radius() {
        let cases = [
            (Some(150.0), Some(0.3), TerrainType::Ice),
            (Some(450.0), Some(1.0), TerrainType::Desert),
            (Some(300.0), Some(0.4), TerrainType::Rocky),
            (Some(300.0), Some(1.0), TerrainType::Vegetation),
            (Some(373.0), Some(1.0), TerrainType::Terrestrial),
            (Some(250.0), None, TerrainType::Terrestrial),
            (None, None, TerrainType::Vegetation),
            (Some(0.0), None, TerrainType::Vegetation),
        ];
        for (eqt, rade, expected) in cases {
            assert_eq!(
                TerrainType::for_measurement(&measurement(eqt, rade, None)),
                expected,
                "eqt {:?} rade {:?}",
                eqt,
                rade
            );
        }
    }

    #[test]
    fn average_temp_prefers_equilibrium_then_insolation() {
        assert!((average_temp(&measurement(Some(300.0), None, Some(4.0))) - 26.85).abs() < 1e-9);
        assert_eq!(average_temp(&measurement(None, None, Some(2.0))), 15.0);
        assert_eq!(average_temp(&measurement(None, None, Some(4.0))), 45.0);
        assert_eq!(average_temp(&measurement(Some(0.0), None, None)), 15.0);
    }

    #[test]
    fn request_fills_site_defaults() {
        let request = TextureRequest::new(&ExoplanetMeasurement::default());
        assert_eq!(request.main_terrain, TerrainType::Vegetation);
        assert_eq!(request.insolation, 1.0);
        assert_eq!(request.equilibrium_temp, 288.0);
        assert!(!request.has_atmosphere);
        assert!(!request.has_water);

        let json = serde_json::to_value(&request).expect("serializable");
        assert_eq!(json["mainTerrain"], "vegetation");
        assert_eq!(json["averageTemp"], 15.0);
        assert!(json["pl_rade"].is_null());
        assert_eq!(json["pl_eqt"], 288.0);
        assert_eq!(json["hasAtmosphere"], false);
    }

    #[test]
    fn request_flags_atmosphere_and_water() {
        let wet = TextureRequest::new(&measurement(Some(300.0), Some(1.2), None));
        assert!(wet.has_atmosphere);
        assert!(wet.has_water);

        let small_hot = TextureRequest::new(&measurement(Some(373.0), Some(0.5), None));
        assert!(!small_hot.has_atmosphere);
        assert!(!small_hot.has_water);
    }

    #[test]
    fn biome_bands() {
        assert_eq!(Biome::for_temperature(219.9), Biome::Ice);
        assert_eq!(Biome::for_temperature(220.0), Biome::Vegetation);
        assert_eq!(Biome::for_temperature(370.0), Biome::Vegetation);
        assert_eq!(Biome::for_temperature(370.1), Biome::Desert);
        assert_eq!(Biome::Vegetation.water_level(), 0.45);
        assert_eq!(Biome::Desert.water_level(), 0.0);
    }

    #[test]
    fn star_tint_only_for_cool_and_hot_stars() {
        let red = StarTint::for_star(3500.0).expect("red tint");
        assert_eq!(red.color, [100, 60, 30]);
        assert_eq!(red.alpha, 0.25);
        let blue = StarTint::for_star(8000.0).expect("blue tint");
        assert_eq!(blue.color, [180, 200, 255]);
        assert_eq!(blue.alpha, 0.2);
        assert!(StarTint::for_star(4000.0).is_none());
        assert!(StarTint::for_star(7500.0).is_none());

        assert_eq!(red.apply([200, 100, 50]), [175, 90, 45]);
    }

    #[test]
    fn heightmap_is_seeded_and_normalized() {
        let config = NoiseConfig::with_seed(7);
        let a = heightmap(32, &config);
        let b = heightmap(32, &config);
        assert_eq!(a, b);
        assert_eq!(a.len(), 32 * 32);
        assert!(a.iter().all(|h| (0.0..=1.0).contains(h)));
        assert!(a.iter().any(|h| *h == 0.0));
        assert!(a.iter().any(|h| *h == 1.0));

        let other = heightmap(32, &NoiseConfig::with_seed(8));
        assert_ne!(a, other);
    }

    #[test]
    fn flat_heightmap_without_jitter_is_zero() {
        let config = NoiseConfig {
            octaves: 0,
            jitter: 0.0,
            ..Default::default()
        };
        assert!(heightmap(4, &config).iter().all(|h| *h == 0.0));
    }

    #[test]
    fn noise_scale_shrinks_for_large_planets() {
        assert_eq!(NoiseConfig::for_radius(1.0, 0).scale, 80.0);
        assert!((NoiseConfig::for_radius(0.2, 0).scale - 100.0).abs() < 1e-9);
        assert!((NoiseConfig::for_radius(4.0, 0).scale - 80.0 / 1.5).abs() < 1e-9);
    }

    #[test]
    fn vegetation_palette_by_height() {
        let plan = TexturePlan::new(&measurement(Some(288.0), Some(1.0), None), 1);
        assert_eq!(plan.biome, Biome::Vegetation);
        assert!(plan.tint.is_none());
        assert_eq!(plan.color_at(0.1), DEEP_WATER);
        assert_eq!(plan.color_at(0.47), SHALLOW_WATER);
        assert_eq!(plan.color_at(0.6), [80, 120, 80]);
        assert_eq!(plan.color_at(0.9), MOUNTAINS);
    }

    #[test]
    fn ice_and_desert_have_no_oceans() {
        let ice = TexturePlan::new(&measurement(Some(150.0), None, None), 1);
        assert_eq!(ice.color_at(0.0), [184, 188, 192]);
        assert_eq!(ice.color_at(1.0), ICE);

        let desert = TexturePlan::new(&measurement(Some(900.0), None, None), 1);
        assert_eq!(desert.color_at(0.0), SHALLOW_WATER);
        assert_eq!(desert.color_at(0.5), [180, 140, 100]);
    }

    #[test]
    fn render_is_deterministic_rgb() {
        let m = ExoplanetMeasurement {
            pl_eqt: Some(300.0),
            st_teff: Some(3200.0),
            ..Default::default()
        };
        let plan = TexturePlan::new(&m, 11);
        assert!(plan.tint.is_some());
        let pixels = plan.render(20);
        assert_eq!(pixels.len(), 20 * 20 * 3);
        assert_eq!(pixels, plan.render(20));
        assert_eq!(plan.render(1).len(), 16 * 16 * 3);
    }
}
