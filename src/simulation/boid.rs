//! Boid state, steering behaviors and the predation protocol.
//!
//! A boid is a [`KinematicBody`] with an identity and a drawable [`Shape`].
//! While it looks for neighbors it also eats any lighter boid that overlaps
//! its radius, so a neighbor scan can change the population it walks over.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::error::Result;
use super::geometric_utils::{euclidean_distance, zero};
use super::kinematics::{KinematicBody, Limits};
use super::params::Params;

/// Outline drawn for a boid.
///
/// Renderers compare `revision` with the one they last drew to know when to
/// rebuild their sprite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Circle radius.
    pub radius: f32,
    /// Bumped every time the shape is regenerated.
    pub revision: u32,
}

impl Shape {
    /// A first-revision circle of `radius`.
    pub fn circle(radius: f32) -> Self {
        Self {
            radius,
            revision: 0,
        }
    }

    /// Replaces the circle with one of `radius`.
    pub fn regenerate(&mut self, radius: f32) {
        self.radius = radius;
        self.revision += 1;
    }
}

/// One predation event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Id of the boid that ate.
    pub predator_id: usize,
    /// Id of the boid that was eaten.
    pub prey_id: usize,
    /// Mass transferred to the predator.
    pub prey_mass: f32,
    /// Predator mass after the meal.
    pub predator_mass: f32,
    /// Predator radius after the meal.
    pub predator_radius: f32,
}

/// Result of a neighbor scan.
#[derive(Debug, Default)]
pub struct Discovery<'a> {
    /// Live boids within perception, in population order.
    pub neighbors: Vec<&'a Boid>,
    /// Boids eaten during the scan, in the order they were eaten.
    pub meals: Vec<Meal>,
}

/// A flocking entity that can eat smaller flockmates.
#[derive(Debug, Clone)]
pub struct Boid {
    /// Unique identifier, never reused within a run.
    pub id: usize,
    /// Position, velocity, mass and radius.
    pub body: KinematicBody,
    /// Outline sized to the current radius.
    pub shape: Shape,
}

impl Boid {
    /// Creates a boid at `pos` moving with `vel`.
    pub fn new(
        id: usize,
        pos: Array1<f32>,
        vel: Array1<f32>,
        mass: f32,
        params: &Params,
    ) -> Result<Self> {
        let body = KinematicBody::new(pos, vel, mass, params.mass_to_size, Limits::from(params))?;
        let shape = Shape::circle(body.radius());
        Ok(Self { id, body, shape })
    }

    /// Position in 2D space.
    pub fn pos(&self) -> &Array1<f32> {
        &self.body.pos
    }

    /// Velocity.
    pub fn vel(&self) -> &Array1<f32> {
        &self.body.vel
    }

    /// Current mass.
    pub fn mass(&self) -> f32 {
        self.body.mass()
    }

    /// Current radius.
    pub fn radius(&self) -> f32 {
        self.body.radius()
    }

    /// Checks if the boid is alive.
    ///
    /// # Returns
    ///
    /// `true` if mass > 0, `false` once it has been eaten.
    pub fn is_alive(&self) -> bool {
        self.body.mass() > 0.0
    }

    /// Kills the boid by setting its mass to 0.
    pub fn kill(&mut self) {
        self.body.drain();
    }

    /// Scans `population` for neighbors, eating overlapping lighter boids on the way.
    ///
    /// `population` must not contain `self`. Boids that are already dead are
    /// skipped, and boids eaten by this scan are not returned as neighbors.
    /// Each candidate is tested against the predator's current radius and
    /// mass, so a meal early in the scan can enable further meals later on.
    pub fn discover_neighbors<'a, I>(
        &mut self,
        population: I,
        params: &Params,
    ) -> Result<Discovery<'a>>
    where
        I: IntoIterator<Item = &'a mut Boid>,
    {
        let mut discovery = Discovery::default();

        for other in population {
            if other.id == self.id || !other.is_alive() {
                continue;
            }

            let distance = euclidean_distance(self.pos(), other.pos());

            if distance < self.radius() && self.mass() > other.mass() {
                discovery.meals.push(self.devour(other, params)?);
                continue;
            }

            if distance < params.perception_radius {
                discovery.neighbors.push(other);
            }
        }

        Ok(discovery)
    }

    /// Eats `prey`: takes its mass, grows, shifts by half the radius gain on
    /// both axes and regenerates the shape.
    pub fn devour(&mut self, prey: &mut Boid, params: &Params) -> Result<Meal> {
        let prey_mass = prey.mass();
        let old_radius = self.radius();

        self.body.set_mass(self.mass() + prey_mass, params.mass_to_size)?;
        prey.kill();

        let center_offset = (self.radius() - old_radius) / 2.0;
        self.body.pos += center_offset;
        self.shape.regenerate(self.radius());

        tracing::debug!(
            predator = self.id,
            prey = prey.id,
            prey_mass,
            mass = self.mass(),
            "boid eaten"
        );

        Ok(Meal {
            predator_id: self.id,
            prey_id: prey.id,
            prey_mass,
            predator_mass: self.mass(),
            predator_radius: self.radius(),
        })
    }

    /// Steers away from neighbors closer than `high_crowding`.
    pub fn separation(&self, neighbors: &[&Boid], params: &Params) -> Array1<f32> {
        let mut steering = zero();
        for neighbor in neighbors {
            if euclidean_distance(self.pos(), neighbor.pos()) < params.high_crowding {
                steering -= &(neighbor.pos() - self.pos());
            }
        }
        self.body.clamp_force(&steering)
    }

    /// Steers toward the mean neighbor velocity, at one eighth strength.
    pub fn alignment(&self, neighbors: &[&Boid]) -> Array1<f32> {
        if neighbors.is_empty() {
            return zero();
        }
        let mut steering = zero();
        for neighbor in neighbors {
            steering += neighbor.vel();
        }
        steering /= neighbors.len() as f32;
        steering -= self.vel();
        self.body.clamp_force(&steering) / 8.0
    }

    /// Steers toward the mean neighbor position, at one hundredth strength.
    pub fn cohesion(&self, neighbors: &[&Boid]) -> Array1<f32> {
        if neighbors.is_empty() {
            return zero();
        }
        let mut steering = zero();
        for neighbor in neighbors {
            steering += neighbor.pos();
        }
        steering /= neighbors.len() as f32;
        steering -= self.pos();
        self.body.clamp_force(&steering) / 100.0
    }
}
