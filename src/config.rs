//! Simulation configuration and behavior modes.
//!
//! A [`SimulationConfig`] is the read-only parameter block the kernel sees
//! for one step: attractor, damping, noise settings, shape scale and the
//! mode scalar. The host owns it and may change it freely between steps;
//! during a step it is immutable.
//!
//! # Modes
//!
//! The mode is carried as a continuous scalar so hosts can animate it,
//! but the kernel resolves it into one of four discrete bands at the start
//! of each step:
//!
//! | Band          | Behavior                                        |
//! |---------------|-------------------------------------------------|
//! | `[0.0, 0.5)`  | [`Mode::Flow`] - noise-driven flow + attractor  |
//! | `[0.5, 1.5)`  | [`Mode::Absorb`] - radial pull into the origin  |
//! | `[1.5, 2.5)`  | [`Mode::Heart`] - spring onto the heart curve   |
//! | `[2.5, ..)`   | [`Mode::Star`] - spring onto the star curve     |
//!
//! There is no blending at band boundaries; the switch is a hard cut.
//!
//! # Example
//!
//! ```
//! use morphsim::{Mode, SimulationConfig};
//!
//! let config = SimulationConfig::new(100_000)
//!     .with_damping(0.9)
//!     .with_noise(8.0, 0.002)
//!     .with_mode(Mode::Heart);
//! assert_eq!(Mode::from_scalar(config.mode), Mode::Heart);
//! ```

use crate::error::ConfigError;
use glam::Vec3;

/// Behavior rule applied uniformly to the whole population for one step.
///
/// Resolved once per batch from the continuous mode scalar; the hot
/// per-particle path switches on this discriminant, never on the float.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    /// Free flow: fractal noise drift plus a softened inverse-square
    /// attractor.
    #[default]
    Flow,
    /// Radial absorption into the origin, with a terminal snap.
    Absorb,
    /// Spring convergence onto the parametric heart curve.
    Heart,
    /// Spring convergence onto the five-pointed star curve.
    Star,
}

impl Mode {
    /// Bucket a continuous mode scalar into its band.
    ///
    /// Bands are `[0, 0.5)`, `[0.5, 1.5)`, `[1.5, 2.5)`, `[2.5, ∞)`.
    /// Values below zero fall into the first band.
    pub fn from_scalar(value: f32) -> Self {
        if value < 0.5 {
            Mode::Flow
        } else if value < 1.5 {
            Mode::Absorb
        } else if value < 2.5 {
            Mode::Heart
        } else {
            Mode::Star
        }
    }

    /// The canonical scalar at the center of this mode's band.
    pub fn scalar(self) -> f32 {
        match self {
            Mode::Flow => 0.0,
            Mode::Absorb => 1.0,
            Mode::Heart => 2.0,
            Mode::Star => 3.0,
        }
    }
}

/// Read-only parameter block for one simulation step.
///
/// Defaults match the original demo: damping 0.95, noise frequency 10.0,
/// noise strength 0.001, shape scale 0.3, attractor at the origin with
/// zero strength, mode 0 (Flow).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    /// World-space position of the flow-mode attractor.
    pub attractor_position: Vec3,
    /// Scale applied to the attraction force. Zero disables it.
    pub attractor_strength: f32,
    /// Number of active particles. Slots at or beyond this index are
    /// never read or written by a step.
    pub num_particles: u32,
    /// Per-step velocity multiplier in flow mode, in `(0, 1]`.
    /// Applied after integration, so it shapes the *next* step's
    /// starting velocity.
    pub damping: f32,
    /// Spatial frequency of the noise field lookup in flow mode.
    pub noise_frequency: f32,
    /// Scale applied to the fractal noise contribution.
    pub noise_strength: f32,
    /// Continuous mode scalar; see [`Mode::from_scalar`] for the bands.
    pub mode: f32,
    /// Seconds since the current mode was entered. Threaded through for
    /// future mode-transition effects; no current rule consumes it.
    pub mode_elapsed_time: f32,
    /// Size of the heart/star target curves.
    pub shape_scale: f32,
}

impl SimulationConfig {
    /// Create a configuration for `num_particles` particles with the
    /// default physical constants.
    pub fn new(num_particles: u32) -> Self {
        Self {
            attractor_position: Vec3::ZERO,
            attractor_strength: 0.0,
            num_particles,
            damping: 0.95,
            noise_frequency: 10.0,
            noise_strength: 0.001,
            mode: 0.0,
            mode_elapsed_time: 0.0,
            shape_scale: 0.3,
        }
    }

    /// Set the attractor position and strength.
    pub fn with_attractor(mut self, position: Vec3, strength: f32) -> Self {
        self.attractor_position = position;
        self.attractor_strength = strength;
        self
    }

    /// Set the flow-mode damping factor, clamped to `(0, 1]`.
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping.clamp(f32::MIN_POSITIVE, 1.0);
        self
    }

    /// Set the noise lookup frequency and strength.
    pub fn with_noise(mut self, frequency: f32, strength: f32) -> Self {
        self.noise_frequency = frequency;
        self.noise_strength = strength;
        self
    }

    /// Hard-set the mode to the center of the given band.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode.scalar();
        self
    }

    /// Set the raw mode scalar (for hosts animating the band value).
    pub fn with_mode_scalar(mut self, value: f32) -> Self {
        self.mode = value;
        self
    }

    /// Set the target-curve scale.
    pub fn with_shape_scale(mut self, scale: f32) -> Self {
        self.shape_scale = scale;
        self
    }

    /// Check the documented host-side ranges.
    ///
    /// The step kernel performs no validation of its own; this is the
    /// host's chance to reject a block before installing it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_particles == 0 {
            return Err(ConfigError::ZeroParticles);
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ConfigError::DampingOutOfRange(self.damping));
        }
        let fields = [
            ("attractor_position.x", self.attractor_position.x),
            ("attractor_position.y", self.attractor_position.y),
            ("attractor_position.z", self.attractor_position.z),
            ("attractor_strength", self.attractor_strength),
            ("noise_frequency", self.noise_frequency),
            ("noise_strength", self.noise_strength),
            ("mode", self.mode),
            ("mode_elapsed_time", self.mode_elapsed_time),
            ("shape_scale", self.shape_scale),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite(name));
            }
        }
        Ok(())
    }
}
