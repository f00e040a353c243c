//! Spawn context for particle initialization.
//!
//! Provides helper methods to reduce boilerplate when seeding the
//! particle buffers. A context is created per particle and handed to the
//! spawner closure:
//!
//! ```
//! use morphsim::{Simulation, Vec3};
//!
//! let sim = Simulation::new(1_000).with_spawner(|ctx| {
//!     // Scatter through a cube, drift along +y.
//!     (ctx.random_in_cube(0.5), Vec3::new(0.0, 0.01, 0.0))
//! });
//! assert_eq!(sim.particle_count(), 1_000);
//! ```

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{PI, TAU};

/// Context provided to spawner functions, with helpers for common
/// placement patterns.
pub struct SpawnContext {
    /// Index of the particle being spawned (0 to count-1).
    pub index: u32,
    /// Total number of particles being spawned.
    pub count: u32,
    /// Internal RNG - use the helper methods instead of accessing directly.
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a spawn context for one particle.
    ///
    /// The RNG is seeded from the index and the given base seed, so a
    /// fixed seed reproduces the same spawn layout.
    pub(crate) fn new(index: u32, count: u32, seed: u64) -> Self {
        Self {
            index,
            count,
            rng: SmallRng::seed_from_u64(seed ^ index as u64),
        }
    }

    /// Normalized progress through the spawn (0.0 to 1.0).
    ///
    /// Useful for distributing particles evenly along a curve.
    #[inline]
    pub fn progress(&self) -> f32 {
        self.index as f32 / self.count as f32
    }

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in the given range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..max)
    }

    /// Random point inside a cube of the given half-extent, centered at
    /// the origin. This is the original demo's scatter pattern.
    pub fn random_in_cube(&mut self, half_extent: f32) -> Vec3 {
        Vec3::new(
            self.rng.gen_range(-1.0..=1.0) * half_extent,
            self.rng.gen_range(-1.0..=1.0) * half_extent,
            self.rng.gen_range(-1.0..=1.0) * half_extent,
        )
    }

    /// Random point inside a sphere of the given radius, centered at the
    /// origin. Uniform throughout the volume.
    pub fn random_in_sphere(&mut self, radius: f32) -> Vec3 {
        let theta = self.rng.gen_range(0.0..TAU);
        let phi = self.rng.gen_range(0.0..PI);
        // Cube root for uniform volume distribution
        let r = radius * self.rng.gen::<f32>().cbrt();

        Vec3::new(
            r * phi.sin() * theta.cos(),
            r * phi.sin() * theta.sin(),
            r * phi.cos(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress() {
        let ctx = SpawnContext::new(25, 100, 0);
        assert!((ctx.progress() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_same_seed_reproduces_layout() {
        let mut a = SpawnContext::new(7, 100, 42);
        let mut b = SpawnContext::new(7, 100, 42);
        assert_eq!(a.random_in_cube(0.5), b.random_in_cube(0.5));
    }

    #[test]
    fn test_random_in_cube_bounds() {
        let mut ctx = SpawnContext::new(0, 1, 9);
        for _ in 0..100 {
            let p = ctx.random_in_cube(0.5);
            assert!(p.x.abs() <= 0.5 && p.y.abs() <= 0.5 && p.z.abs() <= 0.5);
        }
    }

    #[test]
    fn test_random_in_sphere_bounds() {
        let mut ctx = SpawnContext::new(0, 1, 9);
        for _ in 0..100 {
            let p = ctx.random_in_sphere(2.0);
            assert!(p.length() <= 2.0 + 1e-5);
        }
    }
}
