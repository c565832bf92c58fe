//! The set of boids taking part in a tick, and the ids handed to them.

use ndarray::Array1;
use rand::Rng;

use super::boid::Boid;
use super::error::Result;
use super::geometric_utils::vec2;
use super::params::Params;

/// Hands out increasing boid ids. Ids are never reused, even after a boid is eaten.
#[derive(Debug, Clone, Default)]
pub struct IdSequence {
    next: usize,
}

impl IdSequence {
    /// Returns the next id.
    pub fn next_id(&mut self) -> usize {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> usize {
        self.next
    }
}

/// Boids in container order.
///
/// Eaten boids stay in place, with zero mass, until [`Population::compact`]
/// runs, so indices stay stable while a tick walks the container.
#[derive(Debug, Clone, Default)]
pub struct Population {
    boids: Vec<Boid>,
    ids: IdSequence,
}

impl Population {
    /// Creates an empty population.
    pub fn new() -> Self {
        Self::default()
    }

    /// All boids, including any eaten this tick that have not been compacted yet.
    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    /// Mutable view for the tick loop. The length cannot change through it.
    pub fn boids_mut(&mut self) -> &mut [Boid] {
        &mut self.boids
    }

    /// Live boids only.
    pub fn alive(&self) -> impl Iterator<Item = &Boid> {
        self.boids.iter().filter(|boid| boid.is_alive())
    }

    /// Number of slots, tombstones included.
    pub fn len(&self) -> usize {
        self.boids.len()
    }

    /// Whether there are no boids at all.
    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    /// Looks a boid up by id.
    pub fn get(&self, id: usize) -> Option<&Boid> {
        self.boids.iter().find(|boid| boid.id == id)
    }

    /// Adds a boid at `pos` with velocity `vel` and `mass`, returning its id.
    pub fn insert(
        &mut self,
        pos: Array1<f32>,
        vel: Array1<f32>,
        mass: f32,
        params: &Params,
    ) -> Result<usize> {
        let id = self.ids.next_id();
        self.boids.push(Boid::new(id, pos, vel, mass, params)?);
        Ok(id)
    }

    /// Adds a boid with a random position inside the world and a random velocity.
    ///
    /// Velocity components are drawn from `[-max_speed, max_speed)`.
    /// `params` is validated first, so a zero-sized world fails with
    /// [`InvalidParams`](super::error::SimulationError::InvalidParams).
    pub fn spawn<R: Rng>(&mut self, rng: &mut R, params: &Params) -> Result<usize> {
        params.validate()?;
        let pos = vec2(
            rng.random_range(0.0..params.box_width),
            rng.random_range(0.0..params.box_height),
        );
        let vel = vec2(
            rng.random_range(-1.0..1.0) * params.max_speed,
            rng.random_range(-1.0..1.0) * params.max_speed,
        );
        self.insert(pos, vel, params.spawn_mass, params)
    }

    /// Removes eaten boids, returning how many were dropped.
    pub fn compact(&mut self) -> usize {
        let before = self.boids.len();
        self.boids.retain(Boid::is_alive);
        before - self.boids.len()
    }

    /// Number of ids handed out, including those of eaten boids.
    pub fn ids_issued(&self) -> usize {
        self.ids.issued()
    }
}
