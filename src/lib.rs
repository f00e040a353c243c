//! # morphsim - shape-morphing particle simulation kernel
//!
//! Massively parallel CPU particle updates with a small, explicit API.
//!
//! Every frame, each particle in the population is advanced by one of
//! four behavior rules, selected uniformly for the whole batch from a
//! continuous mode scalar:
//!
//! - **Flow**: fractal-noise flow field plus a softened inverse-square
//!   attractor.
//! - **Absorb**: radial pull into the origin with a terminal snap.
//! - **Heart** / **Star**: distance-proportional springs that converge
//!   the population onto a parametric target curve.
//!
//! Each particle's update is an independent pure function of
//! `(id, state, config)`; the population is advanced with a parallel
//! iterator and no locks, and a step is atomic from the host's
//! perspective.
//!
//! ## Quick Start
//!
//! ```
//! use morphsim::prelude::*;
//!
//! let mut sim = Simulation::new(100_000)
//!     .with_noise_field(NoiseField::new(16, 42))
//!     .with_fixed_delta(1.0 / 60.0);
//!
//! for _ in 0..10 {
//!     sim.step(); // noise-driven flow
//! }
//!
//! sim.set_mode(Mode::Star); // hard cut: spring onto the star curve
//! sim.step();
//! ```
//!
//! ## Bring your own buffers
//!
//! Hosts that own their particle storage can call the kernel directly;
//! the simulation owner above is a convenience, not a requirement:
//!
//! ```
//! use morphsim::{step_population, NoiseField, SimulationConfig, Vec4};
//!
//! let config = SimulationConfig::new(2);
//! let noise = NoiseField::new(16, 0);
//! let mut positions = vec![Vec4::new(0.0, 0.0, 0.0, 1.0); 2];
//! let mut velocities = vec![Vec4::ZERO; 2];
//! step_population(&mut positions, &mut velocities, &config, &noise);
//! ```
//!
//! Slots at or beyond `config.num_particles` are never touched, and the
//! kernel performs no other validation: buffer capacity and sane config
//! ranges are the host's contract (checked at configuration time by
//! [`Simulation::set_config`], never in the hot path).

pub mod config;
pub mod error;
pub mod kernel;
pub mod noise;
pub mod shapes;
pub mod simulation;
pub mod spawn;
pub mod time;

pub use bytemuck;
pub use config::{Mode, SimulationConfig};
pub use error::{ConfigError, SimulationError};
pub use glam::{Vec3, Vec4};
pub use kernel::{attract, step_particle, step_population};
pub use noise::NoiseField;
pub use shapes::{heart_position, star_position};
pub use simulation::Simulation;
pub use spawn::SpawnContext;

/// Convenient re-exports for common usage.
///
/// ```
/// use morphsim::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{Mode, SimulationConfig};
    pub use crate::kernel::{step_particle, step_population};
    pub use crate::noise::NoiseField;
    pub use crate::shapes::{heart_position, star_position};
    pub use crate::simulation::Simulation;
    pub use crate::spawn::SpawnContext;
    pub use crate::time::Time;
    pub use crate::{Vec3, Vec4};
}
