//! Vector helpers for 2-D `Array1<f32>` positions, velocities and forces.

use geo::algorithm::Distance;
use geo::{Euclidean, Point};
use ndarray::Array1;

/// A zero vector in 2-D.
pub fn zero() -> Array1<f32> {
    Array1::zeros(2)
}

/// Builds a 2-D vector from its components.
pub fn vec2(x: f32, y: f32) -> Array1<f32> {
    Array1::from_vec(vec![x, y])
}

/// Euclidean length of a vector.
pub fn magnitude(v: &Array1<f32>) -> f32 {
    v.dot(v).sqrt()
}

/// Euclidean distance between two points.
pub fn euclidean_distance(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    Euclidean.distance(Point::new(a[0], a[1]), Point::new(b[0], b[1]))
}

/// Rescales `v` to `max` if it is longer, otherwise returns it unchanged.
pub fn clamp_magnitude(v: &Array1<f32>, max: f32) -> Array1<f32> {
    let length = magnitude(v);
    if length > max {
        v * (max / length)
    } else {
        v.clone()
    }
}

/// Rescales `v` to exactly `length`. A zero vector has no direction and is returned as is.
pub fn scale_to_length(v: &Array1<f32>, length: f32) -> Array1<f32> {
    let current = magnitude(v);
    if current > 0.0 {
        v * (length / current)
    } else {
        v.clone()
    }
}

/// Wraps a position vector around the simulation box boundaries (toroidal topology).
///
/// # Arguments
///
/// * `v` - Mutable position vector to wrap
/// * `box_width` - Width of the simulation box
/// * `box_height` - Height of the simulation box
pub fn wrap_around_mut(v: &mut Array1<f32>, box_width: f32, box_height: f32) {
    v[0] = v[0].rem_euclid(box_width);
    v[1] = v[1].rem_euclid(box_height);
}
