//! Main flock simulation.
//!
//! The flock owns the population, the world boundary and the clock. Each
//! tick walks the population in container order; for every boid still alive
//! it runs neighbor discovery (which may eat other boids), sums edge
//! avoidance and flocking forces, and advances the body. Boids eaten during
//! the tick stay in their slots until the walk is over and are then removed.

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::boid::Meal;
use super::error::Result;
use super::event_log::{EventKind, EventLog};
use super::geometric_utils::zero;
use super::kinematics::Boundary;
use super::params::Params;
use super::population::Population;
use super::steerable::Steerable;

/// Outcome of one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickReport {
    /// Tick number, starting at 1 for the first step.
    pub tick: u64,
    /// Meals in the order they happened.
    pub meals: Vec<Meal>,
    /// Live boids left after compaction.
    pub population: usize,
}

/// Aggregate figures for the current population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlockStats {
    /// Ticks run so far.
    pub tick: u64,
    /// Simulation time elapsed.
    pub time: f32,
    /// Live boids.
    pub population: usize,
    /// Sum of all live masses. Predation never changes it.
    pub total_mass: f32,
    /// Heaviest live boid, 0 for an empty flock.
    pub largest_mass: f32,
    /// Mean speed of live boids, 0 for an empty flock.
    pub mean_speed: f32,
}

/// The flock containing all simulation state.
#[derive(Debug, Clone)]
pub struct Flock {
    /// Boids in container order.
    pub population: Population,
    /// World extent and edge margin.
    pub boundary: Boundary,
    /// Total simulation time elapsed.
    pub time: f32,
    /// Ticks run so far.
    pub tick: u64,
    /// Recent spawns and meals.
    pub event_log: EventLog,
}

impl Flock {
    /// Creates an empty flock for the world described by `params`.
    pub fn empty(params: &Params) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            population: Population::new(),
            boundary: Boundary::from_params(params),
            time: 0.0,
            tick: 0,
            event_log: EventLog::default(),
        })
    }

    /// Creates a flock of `params.n_boids` randomly placed boids.
    pub fn new<R: Rng>(params: &Params, rng: &mut R) -> Result<Self> {
        let mut flock = Self::empty(params)?;
        for _ in 0..params.n_boids {
            flock.spawn(params, rng)?;
        }
        tracing::debug!(boids = flock.population.len(), "flock spawned");
        Ok(flock)
    }

    /// Adds one randomly placed boid.
    pub fn spawn<R: Rng>(&mut self, params: &Params, rng: &mut R) -> Result<usize> {
        let id = self.population.spawn(rng, params)?;
        self.event_log
            .log(self.time, format!("boid {id} spawned"), EventKind::Spawn);
        Ok(id)
    }

    /// Adds a boid at a chosen position, velocity and mass.
    pub fn spawn_at(
        &mut self,
        pos: Array1<f32>,
        vel: Array1<f32>,
        mass: f32,
        params: &Params,
    ) -> Result<usize> {
        let id = self.population.insert(pos, vel, mass, params)?;
        self.event_log
            .log(self.time, format!("boid {id} spawned"), EventKind::Spawn);
        Ok(id)
    }

    /// Advances the simulation by one timestep.
    ///
    /// An error means an invariant was broken mid-tick; the flock should be
    /// discarded.
    pub fn step(&mut self, params: &Params, dt: f32) -> Result<TickReport> {
        self.time += dt;
        self.tick += 1;

        let mut report = TickReport {
            tick: self.tick,
            ..TickReport::default()
        };

        let boids = self.population.boids_mut();
        for i in 0..boids.len() {
            let (before, rest) = boids.split_at_mut(i);
            let Some((current, after)) = rest.split_first_mut() else {
                break;
            };

            if !current.is_alive() {
                continue;
            }

            let mut force = if current.body.limits.can_wrap {
                zero()
            } else {
                current.body.avoid_edge(&self.boundary)
            };

            let discovery =
                current.discover_neighbors(before.iter_mut().chain(after.iter_mut()), params)?;
            force += &current.steering(&discovery.neighbors, params);

            for meal in &discovery.meals {
                self.event_log.log(
                    self.time,
                    format!(
                        "boid {} ate boid {} (mass {:.1})",
                        meal.predator_id, meal.prey_id, meal.predator_mass
                    ),
                    EventKind::Predation,
                );
            }
            report.meals.extend(discovery.meals);

            current.body.advance(dt, &force, &self.boundary)?;
        }

        let eaten = self.population.compact();
        report.population = self.population.len();

        if eaten > 0 {
            tracing::debug!(
                tick = self.tick,
                eaten,
                population = report.population,
                "compacted population"
            );
        }

        Ok(report)
    }

    /// Aggregate figures for the live boids.
    pub fn stats(&self) -> FlockStats {
        let mut population = 0;
        let mut total_mass = 0.0;
        let mut largest_mass: f32 = 0.0;
        let mut total_speed = 0.0;

        for boid in self.population.alive() {
            population += 1;
            total_mass += boid.mass();
            largest_mass = largest_mass.max(boid.mass());
            total_speed += boid.body.speed();
        }

        let mean_speed = if population > 0 {
            total_speed / population as f32
        } else {
            0.0
        };

        FlockStats {
            tick: self.tick,
            time: self.time,
            population,
            total_mass,
            largest_mass,
            mean_speed,
        }
    }
}
