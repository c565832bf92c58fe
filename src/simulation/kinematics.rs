//! Point-mass kinematics shared by every boid.
//!
//! A [`KinematicBody`] integrates velocity and position from a net steering
//! force, enforces the speed and force limits, and either wraps around the
//! world or steers back from its edges. Where the edges are is described by a
//! [`Boundary`], owned by the flock rather than by each body.

use ndarray::Array1;

use super::error::{Result, SimulationError};
use super::geometric_utils::{
    clamp_magnitude, magnitude, scale_to_length, vec2, wrap_around_mut, zero,
};
use super::params::Params;

/// World extent plus the inner rectangle outside of which edge avoidance kicks in.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    /// World width.
    pub max_x: f32,
    /// World height.
    pub max_y: f32,
    /// Inner edges as `[left, top, right, bottom]`.
    pub edges: [f32; 4],
}

impl Boundary {
    /// Creates a boundary for a `max_x` by `max_y` world with a margin in percent.
    pub fn new(max_x: f32, max_y: f32, margin_pct: f32) -> Self {
        let mut boundary = Self {
            max_x,
            max_y,
            edges: [0.0, 0.0, max_x, max_y],
        };
        boundary.set_margin(margin_pct);
        boundary
    }

    /// Builds the boundary described by the world size and edge margin in `params`.
    pub fn from_params(params: &Params) -> Self {
        Self::new(params.box_width, params.box_height, params.edge_margin_pct)
    }

    /// Moves the inner edges to `margin_pct` percent of the world size.
    pub fn set_margin(&mut self, margin_pct: f32) {
        let margin_w = self.max_x * margin_pct / 100.0;
        let margin_h = self.max_y * margin_pct / 100.0;
        self.edges = [
            margin_w,
            margin_h,
            self.max_x - margin_w,
            self.max_y - margin_h,
        ];
    }

    /// Center of the world.
    pub fn center(&self) -> Array1<f32> {
        vec2(self.max_x / 2.0, self.max_y / 2.0)
    }

    /// Whether `pos` lies outside the inner edges.
    pub fn in_margin(&self, pos: &Array1<f32>) -> bool {
        let [left, top, right, bottom] = self.edges;
        pos[0] < left || pos[1] < top || pos[0] > right || pos[1] > bottom
    }
}

/// Speed and force limits copied into each body at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    /// Lower speed bound.
    pub min_speed: f32,
    /// Upper speed bound.
    pub max_speed: f32,
    /// Force magnitude cap.
    pub max_force: f32,
    /// Wrap around edges instead of avoiding them.
    pub can_wrap: bool,
}

impl From<&Params> for Limits {
    fn from(params: &Params) -> Self {
        Self {
            min_speed: params.min_speed,
            max_speed: params.max_speed,
            max_force: params.max_force,
            can_wrap: params.can_wrap,
        }
    }
}

/// Computes the radius of a body of `mass`.
///
/// Fails on a non-positive mass: no live body can have one.
pub fn radius_for_mass(mass: f32, mass_to_size: f32) -> Result<f32> {
    if mass.is_nan() || mass <= 0.0 {
        return Err(SimulationError::NonPositiveMass { mass });
    }
    Ok(mass.sqrt() * mass_to_size)
}

/// A moving circle with mass.
///
/// `mass` and `radius` are private so that they can only change together.
#[derive(Debug, Clone)]
pub struct KinematicBody {
    /// Position in 2D space.
    pub pos: Array1<f32>,
    /// Velocity in units per unit of time.
    pub vel: Array1<f32>,
    mass: f32,
    radius: f32,
    /// Speed and force limits.
    pub limits: Limits,
}

impl KinematicBody {
    /// Creates a body, deriving its radius from `mass`.
    pub fn new(
        pos: Array1<f32>,
        vel: Array1<f32>,
        mass: f32,
        mass_to_size: f32,
        limits: Limits,
    ) -> Result<Self> {
        let radius = radius_for_mass(mass, mass_to_size)?;
        Ok(Self {
            pos,
            vel,
            mass,
            radius,
            limits,
        })
    }

    /// Current mass. Zero once the body has been eaten.
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Current radius, always `sqrt(mass) * mass_to_size` for a live body.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Current speed.
    pub fn speed(&self) -> f32 {
        magnitude(&self.vel)
    }

    /// Sets a new mass and recomputes the radius from it.
    pub fn set_mass(&mut self, mass: f32, mass_to_size: f32) -> Result<()> {
        self.radius = radius_for_mass(mass, mass_to_size)?;
        self.mass = mass;
        Ok(())
    }

    /// Drops the mass to zero. The body must not be advanced afterwards.
    pub fn drain(&mut self) {
        self.mass = 0.0;
    }

    /// Rescales `force` to the force limit if it exceeds it.
    pub fn clamp_force(&self, force: &Array1<f32>) -> Array1<f32> {
        clamp_magnitude(force, self.limits.max_force)
    }

    /// Steering toward the world center while the body is inside the edge margin, zero otherwise.
    pub fn avoid_edge(&self, boundary: &Boundary) -> Array1<f32> {
        if boundary.in_margin(&self.pos) {
            boundary.center() - &self.pos
        } else {
            zero()
        }
    }

    /// Integrates `force` over `dt`, clamps the speed, moves, then wraps if allowed.
    ///
    /// A body that would stop keeps its previous heading at minimum speed,
    /// or heads along +x if it never had one.
    pub fn advance(&mut self, dt: f32, force: &Array1<f32>, boundary: &Boundary) -> Result<()> {
        if self.mass <= 0.0 {
            return Err(SimulationError::DeadBodyAdvanced);
        }

        let heading = self.vel.clone();
        self.vel += &(force * dt);

        let speed = magnitude(&self.vel);
        if speed < self.limits.min_speed {
            let direction = if speed > 0.0 {
                self.vel.clone()
            } else if magnitude(&heading) > 0.0 {
                heading
            } else {
                vec2(1.0, 0.0)
            };
            self.vel = scale_to_length(&direction, self.limits.min_speed);
        } else if speed > self.limits.max_speed {
            self.vel = scale_to_length(&self.vel, self.limits.max_speed);
        }

        self.pos += &(&self.vel * dt);

        if self.limits.can_wrap {
            wrap_around_mut(&mut self.pos, boundary.max_x, boundary.max_y);
        }
        Ok(())
    }
}
