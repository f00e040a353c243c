//! Simulation owner: particle buffers, config, noise field and mode clock.
//!
//! [`Simulation`] is the host-side collaborator around the kernel. It
//! allocates the position/velocity stores once, seeds them, and hands the
//! kernel exclusive write access for the duration of each [`step`]
//! (`Simulation::step`). Buffers are never reallocated after construction.
//!
//! # Example
//!
//! ```
//! use morphsim::{Mode, Simulation};
//!
//! let mut sim = Simulation::new(10_000).with_fixed_delta(1.0 / 60.0);
//!
//! sim.step();                 // flow field
//! sim.set_mode(Mode::Heart);  // hard cut to the heart spring
//! sim.step();
//!
//! let bytes = sim.position_bytes(); // ready for GPU/IPC upload
//! assert_eq!(bytes.len(), 10_000 * 16);
//! ```

use crate::config::{Mode, SimulationConfig};
use crate::error::SimulationError;
use crate::kernel::step_population;
use crate::noise::NoiseField;
use crate::shapes::heart_position;
use crate::spawn::SpawnContext;
use crate::time::Time;
use glam::{Vec3, Vec4};

/// A particle population and everything needed to advance it.
///
/// Positions are stored as `Vec4` with `w = 1`, velocities with `w = 0`,
/// the layout GPU hosts expect for std140-style upload.
pub struct Simulation {
    positions: Vec<Vec4>,
    velocities: Vec<Vec4>,
    config: SimulationConfig,
    noise: NoiseField,
    mode_clock: Time,
    spawn_seed: u64,
}

impl Simulation {
    /// Allocate a population of `particle_count` particles, scattered
    /// through a half-extent 0.5 cube with zero velocity.
    ///
    /// # Panics
    ///
    /// Panics if `particle_count` is zero.
    pub fn new(particle_count: u32) -> Self {
        assert!(particle_count > 0, "particle_count must be greater than zero");

        let n = particle_count as usize;
        let seed: u64 = rand::random();
        let mut sim = Self {
            positions: vec![Vec4::new(0.0, 0.0, 0.0, 1.0); n],
            velocities: vec![Vec4::ZERO; n],
            config: SimulationConfig::new(particle_count),
            noise: NoiseField::new(NoiseField::DEFAULT_SIZE, seed),
            mode_clock: Time::new(),
            spawn_seed: seed,
        };
        sim.reset_scatter(0.5);
        sim
    }

    /// Replace the noise field.
    pub fn with_noise_field(mut self, noise: NoiseField) -> Self {
        self.noise = noise;
        self
    }

    /// Reseed the spawn helpers and rescatter, so the initial layout is
    /// reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.spawn_seed = seed;
        self.reset_scatter(0.5);
        self
    }

    /// Place every particle via a spawner closure returning
    /// `(position, velocity)`.
    pub fn with_spawner<F>(mut self, mut spawner: F) -> Self
    where
        F: FnMut(&mut SpawnContext) -> (Vec3, Vec3),
    {
        let count = self.config.num_particles;
        for i in 0..count {
            let mut ctx = SpawnContext::new(i, count, self.spawn_seed);
            let (p, v) = spawner(&mut ctx);
            self.positions[i as usize] = p.extend(1.0);
            self.velocities[i as usize] = v.extend(0.0);
        }
        self
    }

    /// Hard-set the starting mode.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.set_mode(mode);
        self
    }

    /// Step the mode clock by a fixed delta instead of the wall clock,
    /// for deterministic runs.
    pub fn with_fixed_delta(mut self, delta: f32) -> Self {
        self.mode_clock.set_fixed_delta(Some(delta));
        self
    }

    /// Scatter all particles uniformly through a cube of the given
    /// half-extent and zero their velocities.
    pub fn reset_scatter(&mut self, half_extent: f32) {
        let count = self.config.num_particles;
        for i in 0..count {
            let mut ctx = SpawnContext::new(i, count, self.spawn_seed);
            self.positions[i as usize] = ctx.random_in_cube(half_extent).extend(1.0);
            self.velocities[i as usize] = Vec4::ZERO;
        }
    }

    /// Place all particles directly onto the heart curve at the given
    /// scale and zero their velocities.
    pub fn reset_to_heart(&mut self, scale: f32) {
        let count = self.config.num_particles;
        for i in 0..count {
            self.positions[i as usize] = heart_position(i, count, scale).extend(1.0);
            self.velocities[i as usize] = Vec4::ZERO;
        }
    }

    /// Install a new configuration.
    ///
    /// Rejects configs that fail [`SimulationConfig::validate`] or that
    /// name more active particles than the allocated buffers hold. This
    /// is the only capacity check in the system; the kernel trusts it.
    pub fn set_config(&mut self, config: SimulationConfig) -> Result<(), SimulationError> {
        config.validate()?;
        let required = config.num_particles as usize;
        let available = self.positions.len();
        if required > available {
            return Err(SimulationError::BufferTooSmall {
                required,
                available,
            });
        }
        self.config = config;
        Ok(())
    }

    /// Switch to the given mode and restart the mode clock.
    pub fn set_mode(&mut self, mode: Mode) {
        self.config.mode = mode.scalar();
        self.config.mode_elapsed_time = 0.0;
        self.mode_clock.restart();
    }

    /// Set the raw mode scalar, for hosts animating the band value.
    ///
    /// The mode clock restarts only when the scalar crosses into a
    /// different band.
    pub fn set_mode_scalar(&mut self, value: f32) {
        let band_changed = Mode::from_scalar(value) != Mode::from_scalar(self.config.mode);
        self.config.mode = value;
        if band_changed {
            self.config.mode_elapsed_time = 0.0;
            self.mode_clock.restart();
        }
    }

    /// Advance the whole population by one frame.
    ///
    /// Atomic from the host's perspective: when this returns, every
    /// active particle has been advanced exactly once.
    pub fn step(&mut self) {
        let (elapsed, _) = self.mode_clock.update();
        self.config.mode_elapsed_time = elapsed;
        step_population(&mut self.positions, &mut self.velocities, &self.config, &self.noise);
    }

    /// Currently active behavior mode.
    pub fn mode(&self) -> Mode {
        Mode::from_scalar(self.config.mode)
    }

    /// Number of active particles.
    pub fn particle_count(&self) -> u32 {
        self.config.num_particles
    }

    /// Current configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Mutable configuration access.
    ///
    /// Values set here are not validated; keeping them in the documented
    /// ranges is the host's responsibility, as it is for any raw config.
    pub fn config_mut(&mut self) -> &mut SimulationConfig {
        &mut self.config
    }

    /// The noise field sampled by the flow mode.
    pub fn noise_field(&self) -> &NoiseField {
        &self.noise
    }

    /// Position buffer, one `Vec4` per slot (`w = 1`).
    pub fn positions(&self) -> &[Vec4] {
        &self.positions
    }

    /// Velocity buffer, one `Vec4` per slot (`w = 0`).
    pub fn velocities(&self) -> &[Vec4] {
        &self.velocities
    }

    /// Mutable position buffer, for hosts that seed or perturb directly.
    pub fn positions_mut(&mut self) -> &mut [Vec4] {
        &mut self.positions
    }

    /// Mutable velocity buffer.
    pub fn velocities_mut(&mut self) -> &mut [Vec4] {
        &mut self.velocities
    }

    /// Position buffer as raw bytes, for upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Velocity buffer as raw bytes, for upload.
    pub fn velocity_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.velocities)
    }
}
