use ultraviolet::DVec2;

/// 2D vector in simulation space.
pub type Vector2 = DVec2;

/// Euclidean distance between two points.
pub fn distance(a: Vector2, b: Vector2) -> f64 {
    (b - a).mag()
}

/// Squared distance between two points.
pub fn distance_sq(a: Vector2, b: Vector2) -> f64 {
    (b - a).mag_sq()
}

/// Builds a vector of length `magnitude` pointing along `angle` (radians).
pub fn from_polar(angle: f64, magnitude: f64) -> Vector2 {
    let (sin, cos) = angle.sin_cos();
    Vector2::new(cos, sin) * magnitude
}

/// Rotates `v` by +90 degrees.
pub fn perpendicular(v: Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

pub fn is_finite(v: Vector2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
