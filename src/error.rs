//! Error types for morphsim.
//!
//! The per-particle kernel itself is infallible (see [`crate::kernel`]);
//! errors only arise at the host boundary, when a configuration is
//! installed or buffers are handed over.

use std::fmt;

/// Errors produced by [`crate::SimulationConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// `num_particles` is zero; a simulation needs at least one particle.
    ZeroParticles,
    /// `damping` is outside the documented `(0, 1]` range.
    DampingOutOfRange(f32),
    /// A float field holds a NaN or infinity. Carries the field name.
    NonFinite(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroParticles => write!(f, "num_particles must be greater than zero"),
            ConfigError::DampingOutOfRange(v) => {
                write!(f, "damping must be in (0, 1], got {}", v)
            }
            ConfigError::NonFinite(field) => {
                write!(f, "config field `{}` is not finite", field)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that can occur when reconfiguring a [`crate::Simulation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimulationError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// The configuration names more active particles than the allocated
    /// buffers can hold.
    BufferTooSmall {
        /// Slots the configuration requires (`num_particles`).
        required: usize,
        /// Slots actually allocated.
        available: usize,
    },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Config(e) => write!(f, "invalid configuration: {}", e),
            SimulationError::BufferTooSmall {
                required,
                available,
            } => write!(
                f,
                "particle buffers hold {} slots but the config names {} active particles",
                available, required
            ),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for SimulationError {
    fn from(e: ConfigError) -> Self {
        SimulationError::Config(e)
    }
}
