use std::collections::VecDeque;

use crate::config::GRAVITY_BIAS;
use crate::vector::Vector2;

/// Bounded history of past positions, oldest first.
#[derive(Clone, Debug)]
pub struct Trail {
    points: VecDeque<Vector2>,
    cap: usize,
}

impl Trail {
    /// Creates an empty trail holding at most `cap` points.
    pub fn new(cap: usize) -> Self {
        Self {
            points: VecDeque::new(),
            cap,
        }
    }

    /// Appends a point, dropping the oldest ones once the capacity is exceeded.
    pub fn push(&mut self, point: Vector2) {
        self.points.push_back(point);
        while self.points.len() > self.cap {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn get(&self, index: usize) -> Option<Vector2> {
        self.points.get(index).copied()
    }

    /// Iterates from the oldest to the newest point.
    pub fn iter(&self) -> impl Iterator<Item = Vector2> + '_ {
        self.points.iter().copied()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// A point mass taking part in the gravitational simulation.
#[derive(Clone, Debug)]
pub struct Body {
    /// Unique within one simulation; used for lookups by the host.
    pub name: String,
    /// Position in simulation space.
    pub pos: Vector2,
    /// Velocity, in units per tick.
    pub vel: Vector2,
    /// Acceleration from the latest tick (recomputed from scratch every tick).
    pub acc: Vector2,
    pub mass: f64,
    /// Radius at rest; the target whenever an enlargement is undone.
    pub base_radius: f64,
    /// Current radius, used for drawing and hit-testing.
    pub display_radius: f64,
    /// CSS-style colour name handed back to the host for drawing.
    pub color: String,
    /// Stationary bodies attract others but are never integrated.
    pub is_stationary: bool,
    /// Set while the pointer is over the body, so hover enlargement is applied once.
    pub is_hovered: bool,
    /// Set while the body is the active click selection.
    pub is_selected: bool,
    /// Set while the body is being dragged; integration skips it.
    pub is_dragged: bool,
    pub trail: Trail,
}

impl Body {
    /// Creates a body at rest. The acceleration starts with the downward
    /// [`GRAVITY_BIAS`] until the first tick recomputes it.
    pub fn new(name: impl Into<String>, pos: Vector2, mass: f64, radius: f64, trail_cap: usize) -> Self {
        Self {
            name: name.into(),
            pos,
            vel: Vector2::zero(),
            acc: Vector2::new(0.0, GRAVITY_BIAS),
            mass,
            base_radius: radius,
            display_radius: radius,
            color: String::from("white"),
            is_stationary: false,
            is_hovered: false,
            is_selected: false,
            is_dragged: false,
            trail: Trail::new(trail_cap),
        }
    }

    pub fn with_velocity(mut self, vel: Vector2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Pins the body in place. Its velocity is zeroed and stays zero.
    pub fn stationary(mut self) -> Self {
        self.is_stationary = true;
        self.vel = Vector2::zero();
        self
    }

    /// Whether the integration pass moves this body.
    pub fn is_integrated(&self) -> bool {
        !self.is_stationary && !self.is_dragged
    }

    /// Advances the body by one frame with explicit Euler
    /// (velocity from the old acceleration, then position from the new velocity)
    /// and records the new position in the trail.
    pub fn update(&mut self) {
        self.vel += self.acc;
        self.pos += self.vel;
        self.trail.push(self.pos);
    }

    /// Whether `point` lies strictly inside the current display radius.
    pub fn contains(&self, point: Vector2) -> bool {
        (point - self.pos).mag() < self.display_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_drops_oldest_first() {
        let mut trail = Trail::new(3);
        for i in 0..4 {
            trail.push(Vector2::new(i as f64, 0.0));
        }
        assert_eq!(trail.len(), 3);
        let xs: Vec<f64> = trail.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn update_is_explicit_euler() {
        let mut body = Body::new("moon", Vector2::new(1.0, 1.0), 1.0, 1.0, 10)
            .with_velocity(Vector2::new(1.0, 0.0));
        body.acc = Vector2::new(0.5, 0.5);
        body.update();
        assert_eq!(body.vel, Vector2::new(1.5, 0.5));
        assert_eq!(body.pos, Vector2::new(2.5, 1.5));
        assert_eq!(body.trail.get(0), Some(Vector2::new(2.5, 1.5)));
    }

    #[test]
    fn fresh_body_carries_gravity_bias() {
        let body = Body::new("moon", Vector2::zero(), 1.0, 1.0, 10);
        assert_eq!(body.acc, Vector2::new(0.0, GRAVITY_BIAS));
        assert_eq!(body.base_radius, body.display_radius);
    }

    #[test]
    fn stationary_bodies_have_no_velocity() {
        let body = Body::new("sun", Vector2::zero(), 1.0, 1.0, 10)
            .with_velocity(Vector2::new(3.0, 4.0))
            .stationary();
        assert!(body.is_stationary);
        assert_eq!(body.vel, Vector2::zero());
        assert!(!body.is_integrated());
    }

    #[test]
    fn contains_is_strict() {
        let body = Body::new("moon", Vector2::new(0.0, 0.0), 1.0, 2.0, 10);
        assert!(body.contains(Vector2::new(1.9, 0.0)));
        assert!(!body.contains(Vector2::new(2.0, 0.0)));
    }
}
