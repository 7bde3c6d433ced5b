//! Decorative particles: twinkling stars and short-lived comets.
//!
//! Nothing here interacts gravitationally with bodies or with each other.

use std::ops::Range;

use crate::{
    body::Trail,
    config::SimConfig,
    vector::Vector2,
};

pub const STAR_MAX_SIZE: f64 = 2.0;
/// Largest absolute comet velocity component, in units per tick.
pub const COMET_MAX_SPEED: f64 = 10.0;
/// Comet lifespans, in ticks.
pub const COMET_LIFESPAN: Range<u32> = 20..120;

/// The visible canvas, `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn contains(&self, p: Vector2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// Whether `p` lies on one of the four edges.
    pub fn on_edge(&self, p: Vector2) -> bool {
        self.contains(p) && (p.x == 0.0 || p.x == self.width || p.y == 0.0 || p.y == self.height)
    }
}

/// A fixed background star. Only its brightness changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub pos: Vector2,
    pub size: f64,
    /// Alpha in `[0, 1]`.
    pub brightness: f64,
}

impl Star {
    /// Places a star uniformly inside a field `scale` times the canvas size, centred on the canvas.
    pub fn random(bounds: Bounds, scale: f64, rng: &mut fastrand::Rng) -> Self {
        let extent = Vector2::new(bounds.width * scale, bounds.height * scale);
        let jitter = Vector2::new(rng.f64() - 0.5, rng.f64() - 0.5);
        Self {
            pos: bounds.center() + Vector2::new(jitter.x * extent.x, jitter.y * extent.y),
            size: rng.f64() * STAR_MAX_SIZE,
            brightness: rng.f64(),
        }
    }

    /// Re-rolls the brightness into `[0.5, 1)`.
    pub fn twinkle(&mut self, rng: &mut fastrand::Rng) {
        self.brightness = 0.5 + rng.f64() * 0.5;
    }
}

/// A comet crossing the canvas in a straight line with a short trail.
#[derive(Debug, Clone)]
pub struct Comet {
    pub pos: Vector2,
    pub vel: Vector2,
    pub trail: Trail,
    /// Ticks left before the comet is recycled.
    pub lifespan: u32,
}

impl Comet {
    pub fn new(bounds: Bounds, trail_len: usize, rng: &mut fastrand::Rng) -> Self {
        let mut comet = Self {
            pos: Vector2::zero(),
            vel: Vector2::zero(),
            trail: Trail::new(trail_len),
            lifespan: 0,
        };
        comet.reset(bounds, rng);
        comet
    }

    /// Re-rolls every field: a random point on a random canvas edge, a random
    /// velocity, a fresh lifespan and an empty trail.
    pub fn reset(&mut self, bounds: Bounds, rng: &mut fastrand::Rng) {
        self.pos = if rng.bool() {
            let x = if rng.bool() { 0.0 } else { bounds.width };
            Vector2::new(x, rng.f64() * bounds.height)
        } else {
            let y = if rng.bool() { 0.0 } else { bounds.height };
            Vector2::new(rng.f64() * bounds.width, y)
        };
        self.vel = Vector2::new(
            (rng.f64() - 0.5) * 2.0 * COMET_MAX_SPEED,
            (rng.f64() - 0.5) * 2.0 * COMET_MAX_SPEED,
        );
        self.trail.clear();
        self.lifespan = rng.u32(COMET_LIFESPAN);
    }

    /// Moves the comet one tick. Returns true if it burnt out or left the
    /// canvas and was recycled.
    pub fn update(&mut self, bounds: Bounds, rng: &mut fastrand::Rng) -> bool {
        self.pos += self.vel;
        self.trail.push(self.pos);
        self.lifespan = self.lifespan.saturating_sub(1);

        if self.lifespan == 0 || !bounds.contains(self.pos) {
            self.reset(bounds, rng);
            return true;
        }
        false
    }
}

/// Owns the stars and comets of a scene and their random source.
#[derive(Debug, Clone)]
pub struct EphemeraField {
    pub stars: Vec<Star>,
    pub comets: Vec<Comet>,
    bounds: Bounds,
    star_count: usize,
    star_field_scale: f64,
    rng: fastrand::Rng,
}

impl EphemeraField {
    pub fn new(config: &SimConfig, bounds: Bounds, mut rng: fastrand::Rng) -> Self {
        let stars = generate_stars(config.star_count, bounds, config.star_field_scale, &mut rng);
        let comets = (0..config.comet_count)
            .map(|_| Comet::new(bounds, config.comet_trail_len, &mut rng))
            .collect();
        Self {
            stars,
            comets,
            bounds,
            star_count: config.star_count,
            star_field_scale: config.star_field_scale,
            rng,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Twinkles every star and moves every comet. Returns how many comets were recycled.
    pub fn tick(&mut self) -> usize {
        for star in &mut self.stars {
            star.twinkle(&mut self.rng);
        }

        let mut recycled = 0;
        for comet in &mut self.comets {
            if comet.update(self.bounds, &mut self.rng) {
                recycled += 1;
            }
        }
        recycled
    }

    /// Regenerates the star set for a new canvas size. Comets keep flying and
    /// are recycled against the new bounds.
    pub fn resize(&mut self, bounds: Bounds) {
        let stars = generate_stars(self.star_count, bounds, self.star_field_scale, &mut self.rng);
        self.stars = stars;
        self.bounds = bounds;
    }
}

fn generate_stars(count: usize, bounds: Bounds, scale: f64, rng: &mut fastrand::Rng) -> Vec<Star> {
    (0..count).map(|_| Star::random(bounds, scale, rng)).collect()
}
