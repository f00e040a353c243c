//! Sampled 3D vector noise for the flow-field mode.
//!
//! A [`NoiseField`] is a small cubic lattice of random vectors, sampled
//! with trilinear interpolation and toroidal wrap - the CPU equivalent of
//! a tiled `RGBA8_SNORM` 3D texture with linear filtering. Values are
//! signed, uniform in `[-1, 1]` per component, so the field carries no
//! DC bias and flow-mode drift stays centered.
//!
//! The field is immutable after construction and safe to sample from any
//! number of threads concurrently.
//!
//! # Example
//!
//! ```
//! use morphsim::NoiseField;
//! use morphsim::Vec3;
//!
//! let noise = NoiseField::new(16, 42);
//! let v = noise.fbm(Vec3::new(0.3, -1.2, 4.0), 4, 2.0, 0.5);
//! assert!(v.length() < 4.0);
//! ```

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Read-only 3D lattice of random unit-range vectors.
#[derive(Clone, Debug)]
pub struct NoiseField {
    size: u32,
    inv_size: f32,
    values: Vec<Vec3>,
}

impl NoiseField {
    /// Default lattice resolution, matching the 16³ noise texture of the
    /// original demo.
    pub const DEFAULT_SIZE: u32 = 16;

    /// Create a `size`³ lattice filled from a seeded RNG.
    ///
    /// The same `(size, seed)` pair always produces the same field.
    ///
    /// # Panics
    ///
    /// Panics if `size < 2` (trilinear sampling needs two texels per axis).
    pub fn new(size: u32, seed: u64) -> Self {
        assert!(size >= 2, "noise field size must be at least 2");

        let mut rng = SmallRng::seed_from_u64(seed);
        let count = (size * size * size) as usize;
        let values = (0..count)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-1.0..=1.0),
                    rng.gen_range(-1.0..=1.0),
                    rng.gen_range(-1.0..=1.0),
                )
            })
            .collect();

        Self {
            size,
            inv_size: 1.0 / size as f32,
            values,
        }
    }

    /// Lattice resolution per axis.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Domain-scale factor mapping world-space query points into the
    /// field's normalized `[0, 1]³` space.
    pub fn inv_size(&self) -> f32 {
        self.inv_size
    }

    fn texel(&self, x: i64, y: i64, z: i64) -> Vec3 {
        let n = self.size as i64;
        let x = x.rem_euclid(n) as usize;
        let y = y.rem_euclid(n) as usize;
        let z = z.rem_euclid(n) as usize;
        self.values[(z * n as usize + y) * n as usize + x]
    }

    /// Sample the field at a world-space point.
    ///
    /// The point is scaled by [`inv_size`](Self::inv_size) and sampled at
    /// texel centers with trilinear interpolation, wrapping on every axis.
    /// Returns the interpolated vector directly; no remapping is applied.
    pub fn sample(&self, p: Vec3) -> Vec3 {
        let n = self.size as f32;
        // Normalized coords, texel-center addressing.
        let u = p.x * self.inv_size * n - 0.5;
        let v = p.y * self.inv_size * n - 0.5;
        let w = p.z * self.inv_size * n - 0.5;

        let x0 = u.floor() as i64;
        let y0 = v.floor() as i64;
        let z0 = w.floor() as i64;
        let fx = u - x0 as f32;
        let fy = v - y0 as f32;
        let fz = w - z0 as f32;

        let v000 = self.texel(x0, y0, z0);
        let v100 = self.texel(x0 + 1, y0, z0);
        let v010 = self.texel(x0, y0 + 1, z0);
        let v110 = self.texel(x0 + 1, y0 + 1, z0);
        let v001 = self.texel(x0, y0, z0 + 1);
        let v101 = self.texel(x0 + 1, y0, z0 + 1);
        let v011 = self.texel(x0, y0 + 1, z0 + 1);
        let v111 = self.texel(x0 + 1, y0 + 1, z0 + 1);

        let v00 = v000.lerp(v100, fx);
        let v10 = v010.lerp(v110, fx);
        let v01 = v001.lerp(v101, fx);
        let v11 = v011.lerp(v111, fx);
        let v0 = v00.lerp(v10, fy);
        let v1 = v01.lerp(v11, fy);
        v0.lerp(v1, fz)
    }

    /// Fractal sum of `octaves` samples.
    ///
    /// Starts at frequency 1 and amplitude 0.5; each octave multiplies
    /// frequency by `lacunarity` and amplitude by `gain`. Every call
    /// resamples the lattice - there is no caching, by design.
    pub fn fbm(&self, p: Vec3, octaves: u32, lacunarity: f32, gain: f32) -> Vec3 {
        let mut freq = 1.0;
        let mut amp = 0.5;
        let mut sum = Vec3::ZERO;
        for _ in 0..octaves {
            sum += self.sample(p * freq) * amp;
            freq *= lacunarity;
            amp *= gain;
        }
        sum
    }
}
