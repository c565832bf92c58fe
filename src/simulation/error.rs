//! Error type shared by the simulation and its configuration layer.

use thiserror::Error;

/// Everything that can stop a tick or reject a configuration.
///
/// The core has no recoverable failures: `NonPositiveMass` and
/// `DeadBodyAdvanced` mean an invariant was broken and the run is failed.
#[derive(Error, Debug)]
pub enum SimulationError {
    /// A parameter set failed validation.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// A radius was requested for a mass that is zero or negative.
    #[error("internal invariant violated: radius requested for mass {mass}")]
    NonPositiveMass {
        /// The offending mass.
        mass: f32,
    },

    /// A body with zero mass was advanced.
    #[error("internal invariant violated: body advanced after its mass reached zero")]
    DeadBodyAdvanced,

    /// Reading or writing a parameter file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A parameter file could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimulationError>;
