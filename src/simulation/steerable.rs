//! Trait for entities that turn a neighbor list into a steering force.

use ndarray::Array1;

use super::boid::Boid;
use super::geometric_utils::zero;
use super::params::Params;

/// Produces the flocking force an entity applies given its neighbors.
pub trait Steerable {
    /// Returns the combined flocking force for `neighbors`.
    ///
    /// # Arguments
    ///
    /// * `neighbors` - Entities within perception, never including `self`.
    /// * `params` - Shared simulation parameters.
    fn steering(&self, neighbors: &[&Self], params: &Params) -> Array1<f32>;
}

impl Steerable for Boid {
    fn steering(&self, neighbors: &[&Self], params: &Params) -> Array1<f32> {
        if neighbors.is_empty() {
            return zero();
        }

        let separation = self.separation(neighbors, params);
        let alignment = self.alignment(neighbors);
        let cohesion = self.cohesion(neighbors);

        if params.debug {
            tracing::trace!(
                boid = self.id,
                neighbors = neighbors.len(),
                ?separation,
                ?alignment,
                ?cohesion,
                "steering"
            );
        }

        separation + alignment + cohesion
    }
}
