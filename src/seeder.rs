use std::f64::consts::TAU;

use crate::{
    body::Body,
    config::SimConfig,
    error::{OrreryError, Result},
    vector::{self, Vector2},
};

/// Speed of a circular orbit at `distance` around `central_mass`: `v = sqrt(G * M / r)`.
pub fn orbital_speed(gravity: f64, central_mass: f64, distance: f64) -> f64 {
    (gravity * central_mass / distance).sqrt()
}

/// Position and velocity of a body `distance` away from `center` at `angle`,
/// moving perpendicular to the radius vector at circular-orbit speed.
pub fn place_orbiter(
    center: Vector2,
    central_mass: f64,
    distance: f64,
    angle: f64,
    gravity: f64,
) -> (Vector2, Vector2) {
    let pos = center + vector::from_polar(angle, distance);
    let speed = orbital_speed(gravity, central_mass, distance);
    let vel = vector::perpendicular(vector::from_polar(angle, speed));
    (pos, vel)
}

/// Builds the initial body set from the configured orbital tables.
///
/// The central body sits at the canvas centre and is stationary. Every planet
/// starts at a uniformly random angle; everything else is deterministic.
#[derive(Debug, Clone, Copy)]
pub struct SceneSeeder<'a> {
    config: &'a SimConfig,
}

impl<'a> SceneSeeder<'a> {
    pub fn new(config: &'a SimConfig) -> Self {
        Self { config }
    }

    /// Returns the bodies in seed order: central body first, then planets in table order.
    pub fn seed(&self, width: f64, height: f64, rng: &mut fastrand::Rng) -> Result<Vec<Body>> {
        check_canvas(width, height)?;
        self.config.validate()?;

        let config = self.config;
        let center = Vector2::new(width / 2.0, height / 2.0);
        let sun_mass = config.central.mass / config.mass_divisor;

        let mut bodies = Vec::with_capacity(config.planets.len() + 1);
        bodies.push(
            Body::new(
                config.central.name.clone(),
                center,
                sun_mass,
                config.central.radius / config.sun_radius_divisor,
                config.trail_cap,
            )
            .with_color(config.central.color.clone())
            .stationary(),
        );

        for planet in &config.planets {
            let distance = planet.distance / config.distance_divisor;
            let angle = rng.f64() * TAU;
            let (pos, vel) = place_orbiter(center, sun_mass, distance, angle, config.gravity);

            bodies.push(
                Body::new(
                    planet.name.clone(),
                    pos,
                    planet.mass / config.mass_divisor,
                    planet.radius / config.planet_radius_divisor,
                    config.trail_cap,
                )
                .with_velocity(vel)
                .with_color(planet.color.clone()),
            );
        }

        Ok(bodies)
    }
}

pub(crate) fn check_canvas(width: f64, height: f64) -> Result<()> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(OrreryError::InvalidConfig(format!(
            "canvas must have a positive size, got {width}x{height}"
        )))
    }
}
