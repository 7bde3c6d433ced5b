//! Tuning constants and the configuration record that drives a scene.
//!
//! The gravitational constant, the scale divisors and the trail capacity are
//! coupled: explicit Euler only stays well-behaved while `gravity * mass` is
//! small relative to the orbital distances, so change them together.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{OrreryError, Result};

/// Mass divisor; distances are divided by its square root.
pub const SCALAR: f64 = 20.0;
/// Downward acceleration a freshly built body starts with.
pub const GRAVITY_BIAS: f64 = 0.2;
pub const DEFAULT_TRAIL_CAP: usize = 50_000;
/// Display radius multiplier applied when a body is clicked.
pub const CLICK_FACTOR: f64 = 1.2;
pub const COMET_TRAIL_LEN: usize = 6;

/// One bracket of the hover enlargement table.
///
/// A body whose resting radius is strictly greater than `min_radius` is
/// enlarged by `factor`. Tiers are checked in order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverTier {
    pub min_radius: f64,
    pub factor: f64,
}

/// When a clicked body gets its radius back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionRestore {
    /// Only when the host closes the selection.
    #[default]
    OnClose,
    /// Also when another body is selected.
    OnReselect,
}

/// The stationary body at the centre of the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralSpec {
    pub name: String,
    /// Radius in km.
    pub radius: f64,
    /// Mass in 10^24 kg.
    pub mass: f64,
    pub color: String,
}

/// An orbiting body, in raw (unscaled) units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetSpec {
    pub name: String,
    /// Distance from the central body in 10^6 km.
    pub distance: f64,
    /// Radius in km.
    pub radius: f64,
    /// Mass in 10^24 kg.
    pub mass: f64,
    pub color: String,
}

impl PlanetSpec {
    fn new(name: &str, distance: f64, radius: f64, mass: f64, color: &str) -> Self {
        Self {
            name: name.to_string(),
            distance,
            radius,
            mass,
            color: color.to_string(),
        }
    }
}

/// Everything a host may tune about a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Gravitational constant in simulation units.
    pub gravity: f64,
    /// Constant downward acceleration added to every moving body each tick.
    /// The presets use 0.0; [`GRAVITY_BIAS`] is the artistic drift value.
    pub gravity_bias: f64,
    pub mass_divisor: f64,
    pub distance_divisor: f64,
    pub planet_radius_divisor: f64,
    pub sun_radius_divisor: f64,
    /// Radius divisor used for the central body while it is shown to scale.
    pub sun_scaled_radius_divisor: f64,
    pub trail_cap: usize,
    pub click_factor: f64,
    pub hover_tiers: Vec<HoverTier>,
    /// Hover factor for bodies below every tier.
    pub hover_fallback: f64,
    pub selection_restore: SelectionRestore,
    pub star_count: usize,
    /// Star field extent as a multiple of the canvas size, centred on it.
    pub star_field_scale: f64,
    pub comet_count: usize,
    pub comet_trail_len: usize,
    pub central: CentralSpec,
    pub planets: Vec<PlanetSpec>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl SimConfig {
    /// Weak gravity, small planets and a wide star field.
    pub fn classic() -> Self {
        Self {
            gravity: 1e-5,
            gravity_bias: 0.0,
            mass_divisor: SCALAR,
            distance_divisor: SCALAR.sqrt(),
            planet_radius_divisor: 1500.0,
            sun_radius_divisor: 100_000.0,
            sun_scaled_radius_divisor: 1500.0,
            trail_cap: DEFAULT_TRAIL_CAP,
            click_factor: CLICK_FACTOR,
            hover_tiers: vec![
                HoverTier { min_radius: 10.0, factor: 1.2 },
                HoverTier { min_radius: 5.0, factor: 1.5 },
                HoverTier { min_radius: 1.0, factor: 1.8 },
            ],
            hover_fallback: 2.0,
            selection_restore: SelectionRestore::OnClose,
            star_count: 8000,
            star_field_scale: 8.0,
            comet_count: 3,
            comet_trail_len: COMET_TRAIL_LEN,
            central: solar_central(),
            planets: solar_planets(),
        }
    }

    /// Ten times stronger gravity, larger planets, stars confined to the canvas.
    pub fn compact() -> Self {
        Self {
            gravity: 1e-4,
            planet_radius_divisor: 1000.0,
            star_count: 400,
            star_field_scale: 1.0,
            ..Self::classic()
        }
    }

    /// Parses a JSON configuration. Missing fields fall back to [`SimConfig::classic`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Hover multiplier for a body with the given resting radius.
    pub fn hover_factor(&self, base_radius: f64) -> f64 {
        hover_factor(&self.hover_tiers, self.hover_fallback, base_radius)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("mass_divisor", self.mass_divisor),
            ("distance_divisor", self.distance_divisor),
            ("planet_radius_divisor", self.planet_radius_divisor),
            ("sun_radius_divisor", self.sun_radius_divisor),
            ("sun_scaled_radius_divisor", self.sun_scaled_radius_divisor),
            ("click_factor", self.click_factor),
            ("hover_fallback", self.hover_fallback),
            ("star_field_scale", self.star_field_scale),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if !(self.gravity.is_finite() && self.gravity >= 0.0) {
            return Err(invalid(format!("gravity must be non-negative, got {}", self.gravity)));
        }
        if !self.gravity_bias.is_finite() {
            return Err(invalid("gravity_bias must be finite".to_string()));
        }
        if self.trail_cap == 0 {
            return Err(invalid("trail_cap must be at least 1".to_string()));
        }
        if self.comet_trail_len == 0 {
            return Err(invalid("comet_trail_len must be at least 1".to_string()));
        }
        if let Some(tier) = self.hover_tiers.iter().find(|t| !(t.factor > 0.0)) {
            return Err(invalid(format!("hover factor must be positive, got {}", tier.factor)));
        }

        check_body(&self.central.name, self.central.radius, self.central.mass)?;
        let mut names = HashSet::new();
        names.insert(self.central.name.as_str());
        for planet in &self.planets {
            check_body(&planet.name, planet.radius, planet.mass)?;
            if !(planet.distance.is_finite() && planet.distance > 0.0) {
                return Err(invalid(format!("{} must orbit at a positive distance", planet.name)));
            }
            if !names.insert(planet.name.as_str()) {
                return Err(OrreryError::DuplicateName(planet.name.clone()));
            }
        }
        Ok(())
    }
}

/// Factor of the first tier whose bracket `base_radius` exceeds, else `fallback`.
pub fn hover_factor(tiers: &[HoverTier], fallback: f64, base_radius: f64) -> f64 {
    tiers
        .iter()
        .find(|tier| base_radius > tier.min_radius)
        .map_or(fallback, |tier| tier.factor)
}

fn invalid(msg: String) -> OrreryError {
    OrreryError::InvalidConfig(msg)
}

fn check_body(name: &str, radius: f64, mass: f64) -> Result<()> {
    if !(radius.is_finite() && radius >= 0.0) {
        return Err(invalid(format!("{name} has invalid radius {radius}")));
    }
    if !(mass.is_finite() && mass >= 0.0) {
        return Err(invalid(format!("{name} has invalid mass {mass}")));
    }
    Ok(())
}

fn solar_central() -> CentralSpec {
    CentralSpec {
        name: "Sun".to_string(),
        radius: 695_508.0,
        mass: 1_988_500.0,
        color: "yellow".to_string(),
    }
}

fn solar_planets() -> Vec<PlanetSpec> {
    vec![
        PlanetSpec::new("Mercury", 57.9, 2439.5, 0.33, "lightgray"),
        PlanetSpec::new("Venus", 108.2, 6052.0, 4.87, "pink"),
        PlanetSpec::new("Earth", 149.6, 6378.0, 5.97, "lightblue"),
        PlanetSpec::new("Mars", 228.0, 3396.0, 0.642, "red"),
        PlanetSpec::new("Jupiter", 778.5, 71492.0, 1898.0, "#FF7000"),
        PlanetSpec::new("Saturn", 1432.0, 60268.0, 568.0, "#FF9E00"),
        PlanetSpec::new("Uranus", 2867.0, 25559.0, 86.8, "#00FFD8"),
        PlanetSpec::new("Neptune", 4515.0, 24764.0, 102.0, "#0023FF"),
        PlanetSpec::new("Pluto", 5906.4, 1188.0, 0.013, "#999"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        SimConfig::classic().validate().unwrap();
        SimConfig::compact().validate().unwrap();
        assert_eq!(SimConfig::default(), SimConfig::classic());
    }

    #[test]
    fn hover_tiers_follow_resting_radius() {
        let config = SimConfig::classic();
        assert_eq!(config.hover_factor(20.0), 1.2);
        assert_eq!(config.hover_factor(7.0), 1.5);
        assert_eq!(config.hover_factor(3.0), 1.8);
        assert_eq!(config.hover_factor(0.5), 2.0);
        // Brackets are strict: exactly 10 falls into the next tier.
        assert_eq!(config.hover_factor(10.0), 1.5);
    }

    #[test]
    fn json_overrides_only_named_fields() {
        let config = SimConfig::from_json(r#"{ "gravity": 0.0001, "trail_cap": 100 }"#).unwrap();
        assert_eq!(config.gravity, 1e-4);
        assert_eq!(config.trail_cap, 100);
        assert_eq!(config.planets.len(), 9);
        assert_eq!(config.selection_restore, SelectionRestore::OnClose);
    }

    #[test]
    fn json_selection_restore_is_snake_case() {
        let config = SimConfig::from_json(r#"{ "selection_restore": "on_reselect" }"#).unwrap();
        assert_eq!(config.selection_restore, SelectionRestore::OnReselect);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = SimConfig::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, OrreryError::ConfigParse(_)));
    }

    #[test]
    fn duplicate_planet_names_are_rejected() {
        let mut config = SimConfig::classic();
        config.planets[1].name = "Mercury".to_string();
        match config.validate() {
            Err(OrreryError::DuplicateName(name)) => assert_eq!(name, "Mercury"),
            other => panic!("expected duplicate name, got {other:?}"),
        }

        let mut config = SimConfig::classic();
        config.planets[0].name = "Sun".to_string();
        assert!(matches!(config.validate(), Err(OrreryError::DuplicateName(_))));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let mut config = SimConfig::classic();
        config.trail_cap = 0;
        assert!(matches!(config.validate(), Err(OrreryError::InvalidConfig(_))));

        let mut config = SimConfig::classic();
        config.mass_divisor = 0.0;
        assert!(matches!(config.validate(), Err(OrreryError::InvalidConfig(_))));

        let mut config = SimConfig::classic();
        config.planets[3].mass = -1.0;
        assert!(matches!(config.validate(), Err(OrreryError::InvalidConfig(_))));

        let mut config = SimConfig::classic();
        config.gravity = f64::NAN;
        assert!(matches!(config.validate(), Err(OrreryError::InvalidConfig(_))));
    }
}
