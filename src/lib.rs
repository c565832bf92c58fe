//! # Boids - Predatory Flocking Simulation
//!
//! A flock of boids steering by separation, alignment and cohesion, where a
//! boid that overlaps a lighter flockmate eats it. The flock shrinks while
//! the survivors grow.
//!
//! ## Features
//!
//! - Classic three-rule flocking with clamped steering forces
//! - Mass-based predation during neighbor discovery
//! - Point-mass kinematics with speed limits and edge wrap or avoidance
//! - Seedable spawning and stable, never reused boid ids
//! - JSON parameter files
//!
//! ## Core Modules
//!
//! - [`simulation::boid`] - Boid state, steering and predation
//! - [`simulation::kinematics`] - Body integration and world boundary
//! - [`simulation::flock`] - Per-tick orchestration
//! - [`simulation::population`] - Boid container and id sequence
//! - [`simulation::params`] - Simulation parameters

/// Core simulation logic and data structures.
pub mod simulation {
    /// Boid state, steering behaviors and the predation protocol.
    pub mod boid;
    /// Error type and result alias.
    pub mod error;
    /// Bounded log of recent spawns and meals.
    pub mod event_log;
    /// Per-tick orchestration of the whole flock.
    pub mod flock;
    /// Vector helpers for distance and magnitude calculations.
    pub mod geometric_utils;
    /// Point-mass kinematics and world boundary.
    pub mod kinematics;
    /// Simulation parameters.
    pub mod params;
    /// Boid container with stable indices during a tick.
    pub mod population;
    /// Trait for entities that produce a flocking force from their neighbors.
    ///
    /// The [`steerable::Steerable`] trait is implemented by [`boid::Boid`] and
    /// consumed by [`flock::Flock::step`].
    pub mod steerable;
}
