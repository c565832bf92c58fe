use serde::{Deserialize, Serialize};

use super::error::{Result, SimulationError};

/// Simulation parameters shared by every boid.
///
/// Set before the flock is created and read-only while a tick runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Lower bound on speed after each advance.
    pub min_speed: f32,
    /// Upper bound on speed after each advance.
    pub max_speed: f32,
    /// Magnitude cap applied to each steering behavior.
    pub max_force: f32,
    /// Distance below which another boid counts as a neighbor.
    pub perception_radius: f32,
    /// Reserved crowding threshold. Not read by any steering behavior.
    pub low_crowding: f32,
    /// Distance below which a neighbor produces separation force.
    pub high_crowding: f32,
    /// Wrap positions around the world edges instead of steering away from them.
    pub can_wrap: bool,
    /// Width of the edge band, in percent of the world size, that triggers edge avoidance.
    pub edge_margin_pct: f32,
    /// Trace per-boid steering breakdowns.
    pub debug: bool,
    /// Mass of a freshly spawned boid.
    pub spawn_mass: f32,
    /// Factor turning `sqrt(mass)` into a radius.
    pub mass_to_size: f32,
    /// Number of boids spawned with the flock.
    pub n_boids: usize,
    /// Simulation area width.
    pub box_width: f32,
    /// Simulation area height.
    pub box_height: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            min_speed: 0.001,
            max_speed: 0.02,
            max_force: 1.0,
            perception_radius: 60.0,
            low_crowding: 1.0,
            high_crowding: 15.0,
            can_wrap: true,
            edge_margin_pct: 5.0,
            debug: false,
            spawn_mass: 20.0,
            mass_to_size: 1.0,
            n_boids: 120,
            box_width: 1280.0,
            box_height: 720.0,
        }
    }
}

impl Params {
    /// Checks that the parameters describe a runnable simulation.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("box_width", self.box_width),
            ("box_height", self.box_height),
            ("spawn_mass", self.spawn_mass),
            ("mass_to_size", self.mass_to_size),
            ("perception_radius", self.perception_radius),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(SimulationError::InvalidParams(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("min_speed", self.min_speed),
            ("max_speed", self.max_speed),
            ("max_force", self.max_force),
            ("low_crowding", self.low_crowding),
            ("high_crowding", self.high_crowding),
        ];
        for (name, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(SimulationError::InvalidParams(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        if self.min_speed > self.max_speed {
            return Err(SimulationError::InvalidParams(format!(
                "min_speed {} exceeds max_speed {}",
                self.min_speed, self.max_speed
            )));
        }

        if !(0.0..50.0).contains(&self.edge_margin_pct) {
            return Err(SimulationError::InvalidParams(format!(
                "edge_margin_pct must lie in [0, 50), got {}",
                self.edge_margin_pct
            )));
        }

        Ok(())
    }

    /// Saves the parameters to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads parameters from a JSON file and validates them.
    ///
    /// Fields missing from the file keep their default values.
    pub fn load_from_file(path: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }
}
