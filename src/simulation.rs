use std::collections::HashSet;

use crate::{
    body::Body,
    error::{OrreryError, Result},
    vector::{self, Vector2},
};

/// Squared separations at or below this are treated as coincident bodies.
pub const DEGENERATE_DISTANCE_SQ: f64 = 1e-12;

/// Computes the acceleration of every body from pairwise Newtonian attraction.
///
/// The result is index-aligned with `bodies`. Stationary bodies get zero.
/// Every moving body starts from `(0, gravity_bias)` and accumulates
/// `G * m_other / d^2` along the direction to each other body. Pairs that are
/// closer than [`DEGENERATE_DISTANCE_SQ`] are skipped, so coincident bodies
/// never produce NaN or infinite accelerations.
pub fn compute_accelerations(bodies: &[Body], gravity: f64, gravity_bias: f64) -> Vec<Vector2> {
    bodies
        .iter()
        .enumerate()
        .map(|(i, body)| {
            if body.is_stationary {
                return Vector2::zero();
            }

            let mut acc = Vector2::new(0.0, gravity_bias);
            for (j, other) in bodies.iter().enumerate() {
                if i == j {
                    continue;
                }

                let d = other.pos - body.pos;
                let dist_sq = d.mag_sq();
                // Negated comparison also rejects NaN separations.
                if !(dist_sq > DEGENERATE_DISTANCE_SQ) {
                    log::debug!("skipping degenerate pair {} / {}", body.name, other.name);
                    continue;
                }

                // F / m_body with m_body cancelled, so massless bodies stay finite.
                let magnitude = gravity * other.mass / dist_sq;
                let contribution = vector::from_polar(d.y.atan2(d.x), magnitude);
                if !vector::is_finite(contribution) {
                    log::debug!("skipping non-finite pull on {} from {}", body.name, other.name);
                    continue;
                }
                acc += contribution;
            }
            acc
        })
        .collect()
}

/// Owns the bodies of one scene and advances them one frame at a time.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Gravitational constant in simulation units.
    pub gravity: f64,
    /// Constant downward acceleration added to moving bodies every tick.
    pub gravity_bias: f64,
    /// Number of ticks since construction or the last reseed.
    pub frame: u64,
    bodies: Vec<Body>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            gravity: Self::DEFAULT_GRAVITY,
            gravity_bias: 0.0,
            frame: 0,
            bodies: Vec::new(),
        }
    }
}

impl Simulation {
    pub const DEFAULT_GRAVITY: f64 = 1e-4;

    /// Builds a simulation over `bodies`, kept in the given (seed) order.
    ///
    /// Fails with [`OrreryError::DuplicateName`] if two bodies share a name.
    pub fn with_bodies(bodies: Vec<Body>, gravity: f64, gravity_bias: f64) -> Result<Self> {
        check_unique_names(&bodies)?;
        Ok(Self {
            gravity,
            gravity_bias,
            frame: 0,
            bodies,
        })
    }

    /// Swaps in a whole new body set. On error the current set is left untouched.
    pub fn replace_bodies(&mut self, bodies: Vec<Body>) -> Result<()> {
        check_unique_names(&bodies)?;
        self.bodies = bodies;
        self.frame = 0;
        Ok(())
    }

    /// Advances every integrated body by one frame.
    ///
    /// Accelerations are computed for all bodies from the same snapshot of
    /// positions, then each moving body is integrated. Stationary bodies keep
    /// their position; dragged bodies get a fresh acceleration but are not moved.
    pub fn tick(&mut self) {
        let accelerations = compute_accelerations(&self.bodies, self.gravity, self.gravity_bias);

        for (body, acc) in self.bodies.iter_mut().zip(accelerations) {
            if body.is_stationary {
                continue;
            }
            body.acc = acc;
            if !body.is_integrated() {
                continue;
            }
            body.update();
        }

        self.frame += 1;
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Mutable access to individual bodies. The set itself (and so name
    /// uniqueness) can only change through [`Simulation::replace_bodies`].
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn body_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.bodies.get_mut(index)
    }

    /// Index of the body called `name`.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.bodies.iter().position(|body| body.name == name)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

fn check_unique_names(bodies: &[Body]) -> Result<()> {
    let mut seen = HashSet::with_capacity(bodies.len());
    for body in bodies {
        if !seen.insert(body.name.as_str()) {
            return Err(OrreryError::DuplicateName(body.name.clone()));
        }
    }
    Ok(())
}
