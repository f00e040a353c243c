//! The per-particle update kernel and its mode dispatcher.
//!
//! One call to [`step_population`] advances the whole population by one
//! frame. Each particle is an independent pure transition
//! `(id, state, config) -> state`: no particle reads or writes another's
//! slot, so the population is advanced with a parallel iterator and no
//! locks. The mode band is resolved from the config's continuous scalar
//! once per batch; every particle in a step runs the same rule.
//!
//! All arithmetic is single-precision. The snap thresholds and softening
//! constants below are part of the behavior, not tunables.
//!
//! # Example
//!
//! ```
//! use morphsim::{step_population, NoiseField, SimulationConfig, Mode};
//! use morphsim::{Vec3, Vec4};
//!
//! let config = SimulationConfig::new(2).with_mode(Mode::Absorb);
//! let noise = NoiseField::new(16, 0);
//! let mut positions = vec![Vec4::new(0.4, 0.0, 0.0, 1.0); 2];
//! let mut velocities = vec![Vec4::ZERO; 2];
//!
//! step_population(&mut positions, &mut velocities, &config, &noise);
//! assert!(positions[0].x < 0.4);
//! ```

use crate::config::{Mode, SimulationConfig};
use crate::noise::NoiseField;
use crate::shapes::{heart_position, star_position};
use glam::{Vec3, Vec4};
use rayon::prelude::*;

/// Below this distance to the target a particle snaps exactly onto it.
/// Also the guard against normalizing a near-zero vector.
const SNAP_DISTANCE: f32 = 0.001;
/// Softening term added to the squared separation in [`attract`].
const SOFTENING_SQUARED: f32 = 0.01;
/// Pull strength of the absorb rule.
const ABSORB_STRENGTH: f32 = 5.0;
/// Distance-proportional spring constant of the shape rules.
const SPRING_STRENGTH: f32 = 2.0;

/// Softened inverse-square attraction of `p` toward `target`.
///
/// The softening constant keeps the force finite at zero separation.
/// Strength is scaled externally by the caller.
pub fn attract(p: Vec3, target: Vec3) -> Vec3 {
    let v = target - p;
    let r2 = v.dot(v) + SOFTENING_SQUARED;
    let inv_dist = 1.0 / r2.sqrt();
    v * (inv_dist * inv_dist * inv_dist)
}

/// Advance one particle by one frame under the given mode.
///
/// Pure: reads nothing but its arguments, touches no other particle.
/// `index` only matters to the shape rules, which use it to pick the
/// particle's fixed point on the target curve.
pub fn step_particle(
    index: u32,
    position: Vec3,
    velocity: Vec3,
    mode: Mode,
    config: &SimulationConfig,
    noise: &NoiseField,
) -> (Vec3, Vec3) {
    let mut p = position;
    let mut v = velocity;

    match mode {
        Mode::Flow => {
            v += noise.fbm(p * config.noise_frequency, 4, 2.0, 0.5) * config.noise_strength;
            v += attract(p, config.attractor_position) * config.attractor_strength;
            // Damping after integration: it shapes the next step's
            // starting velocity, not this step's displacement.
            p += v;
            v *= config.damping;
        }
        Mode::Absorb => {
            let to_center = -p;
            let dist = to_center.length();
            if dist > SNAP_DISTANCE {
                v += to_center / dist * (ABSORB_STRENGTH / (dist + 0.01));
            } else {
                // Terminal micro-state: exact origin, dead stop.
                v = Vec3::ZERO;
                p = Vec3::ZERO;
            }
            p += v * 0.5;
            v *= 0.8;
        }
        Mode::Heart | Mode::Star => {
            let target = match mode {
                Mode::Heart => heart_position(index, config.num_particles, config.shape_scale),
                _ => star_position(index, config.num_particles, config.shape_scale),
            };
            let to_target = target - p;
            let dist = to_target.length();
            if dist > SNAP_DISTANCE {
                // Spring force grows with distance; overshoot and
                // oscillation near the target are intended.
                v += to_target / dist * (SPRING_STRENGTH * dist);
                p += v * 0.3;
                v *= 0.85;
            } else {
                p = target;
                v = Vec3::ZERO;
            }
        }
    }

    (p, v)
}

/// Advance every active particle by one frame, in place and in parallel.
///
/// Only slots below `config.num_particles` are read or written; anything
/// past that index is left untouched. The host must size both buffers to
/// at least `num_particles` slots - that capacity contract is checked
/// when a [`crate::Simulation`] is reconfigured, never here. After the
/// call every written position has `w == 1` and every written velocity
/// `w == 0`.
///
/// The call returns only once the whole population is advanced, so a
/// host never observes a partially stepped buffer.
pub fn step_population(
    positions: &mut [Vec4],
    velocities: &mut [Vec4],
    config: &SimulationConfig,
    noise: &NoiseField,
) {
    let mode = Mode::from_scalar(config.mode);
    let active = (config.num_particles as usize)
        .min(positions.len())
        .min(velocities.len());

    positions[..active]
        .par_iter_mut()
        .zip(velocities[..active].par_iter_mut())
        .enumerate()
        .for_each(|(i, (pos, vel))| {
            let (p, v) = step_particle(i as u32, pos.truncate(), vel.truncate(), mode, config, noise);
            *pos = p.extend(1.0);
            *vel = v.extend(0.0);
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_noise() -> NoiseField {
        NoiseField::new(16, 12345)
    }

    #[test]
    fn test_attract_points_at_target() {
        let f = attract(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO);
        assert!(f.x < 0.0);
        assert!(f.y.abs() < 1e-6 && f.z.abs() < 1e-6);
    }

    #[test]
    fn test_attract_finite_at_zero_separation() {
        let f = attract(Vec3::ZERO, Vec3::ZERO);
        assert_eq!(f, Vec3::ZERO);

        let close = attract(Vec3::splat(1e-6), Vec3::ZERO);
        assert!(close.is_finite());
    }

    #[test]
    fn test_attract_softened_inverse_square() {
        // |f| = d / (d² + 0.01)^1.5 for separation d along one axis.
        let d = 2.0f32;
        let f = attract(Vec3::new(d, 0.0, 0.0), Vec3::ZERO);
        let expected = d / (d * d + 0.01).powf(1.5);
        assert!((f.length() - expected).abs() < 1e-5);
    }

    #[test]
    fn test_flow_inertial_drift() {
        // No noise, no attractor, damping 1: velocity is untouched and
        // position advances by exactly the incoming velocity.
        let mut config = SimulationConfig::new(1)
            .with_noise(10.0, 0.0)
            .with_damping(1.0);
        config.attractor_strength = 0.0;
        let noise = test_noise();

        let p0 = Vec3::new(0.1, -0.2, 0.3);
        let v0 = Vec3::new(0.01, 0.02, -0.03);
        let (p1, v1) = step_particle(0, p0, v0, Mode::Flow, &config, &noise);

        assert!((p1 - (p0 + v0)).length() < 1e-7);
        assert!((v1 - v0).length() < 1e-7);
    }

    #[test]
    fn test_flow_damping_applies_after_integration() {
        let mut config = SimulationConfig::new(1)
            .with_noise(10.0, 0.0)
            .with_damping(0.5);
        config.attractor_strength = 0.0;
        let noise = test_noise();

        let v0 = Vec3::new(0.1, 0.0, 0.0);
        let (p1, v1) = step_particle(0, Vec3::ZERO, v0, Mode::Flow, &config, &noise);

        // Full velocity moved the particle, then damping halved it.
        assert!((p1.x - 0.1).abs() < 1e-7);
        assert!((v1.x - 0.05).abs() < 1e-7);
    }

    #[test]
    fn test_absorb_pulls_toward_center_from_rest() {
        let config = SimulationConfig::new(1).with_mode(Mode::Absorb);
        let noise = test_noise();

        // Far enough out that the first half-step cannot overshoot.
        let p0 = Vec3::new(3.0, 1.0, -2.0);
        let (p1, _) = step_particle(0, p0, Vec3::ZERO, Mode::Absorb, &config, &noise);
        assert!(p1.length() < p0.length());
        // The displacement points straight at the origin.
        let dir = (p1 - p0).normalize();
        assert!((dir + p0.normalize()).length() < 1e-5);
    }

    #[test]
    fn test_absorb_snap_region_is_terminal() {
        let config = SimulationConfig::new(1).with_mode(Mode::Absorb);
        let noise = test_noise();

        // Inside the snap threshold: forced onto the exact origin.
        let (p, v) = step_particle(
            0,
            Vec3::new(0.0005, 0.0, 0.0),
            Vec3::new(0.3, -0.1, 0.2),
            Mode::Absorb,
            &config,
            &noise,
        );
        assert_eq!(p, Vec3::ZERO);
        assert_eq!(v, Vec3::ZERO);

        // And the origin is a fixed point under further steps.
        let (p2, v2) = step_particle(0, p, v, Mode::Absorb, &config, &noise);
        assert_eq!(p2, Vec3::ZERO);
        assert_eq!(v2, Vec3::ZERO);
    }

    #[test]
    fn test_absorb_at_exact_center_no_nan() {
        let config = SimulationConfig::new(1).with_mode(Mode::Absorb);
        let noise = test_noise();

        let (p, v) = step_particle(0, Vec3::ZERO, Vec3::ZERO, Mode::Absorb, &config, &noise);
        assert_eq!(p, Vec3::ZERO);
        assert_eq!(v, Vec3::ZERO);
        assert!(p.is_finite() && v.is_finite());
    }

    #[test]
    fn test_heart_target_is_fixed_point() {
        let config = SimulationConfig::new(64).with_mode(Mode::Heart);
        let noise = test_noise();

        let target = heart_position(17, 64, config.shape_scale);
        let (p, v) = step_particle(17, target, Vec3::ZERO, Mode::Heart, &config, &noise);
        assert_eq!(p, target);
        assert_eq!(v, Vec3::ZERO);
    }

    #[test]
    fn test_star_target_is_fixed_point() {
        let config = SimulationConfig::new(64).with_mode(Mode::Star);
        let noise = test_noise();

        let target = star_position(33, 64, config.shape_scale);
        let (p, v) = step_particle(33, target, Vec3::ZERO, Mode::Star, &config, &noise);
        assert_eq!(p, target);
        assert_eq!(v, Vec3::ZERO);
    }

    #[test]
    fn test_spring_pulls_toward_target() {
        let config = SimulationConfig::new(8).with_mode(Mode::Heart);
        let noise = test_noise();

        let target = heart_position(3, 8, config.shape_scale);
        let start = target + Vec3::new(1.0, 0.0, 0.0);
        let (p, _) = step_particle(3, start, Vec3::ZERO, Mode::Heart, &config, &noise);
        assert!((p - target).length() < (start - target).length());
    }

    #[test]
    fn test_population_skips_inactive_slots() {
        let config = SimulationConfig::new(2).with_mode(Mode::Absorb);
        let noise = test_noise();

        let stale_pos = Vec4::new(9.0, 9.0, 9.0, 7.0);
        let stale_vel = Vec4::new(1.0, 2.0, 3.0, 4.0);
        let mut positions = vec![Vec4::new(0.5, 0.0, 0.0, 1.0), Vec4::new(0.0, 0.5, 0.0, 1.0), stale_pos];
        let mut velocities = vec![Vec4::ZERO, Vec4::ZERO, stale_vel];

        step_population(&mut positions, &mut velocities, &config, &noise);

        // Active slots moved, inactive slot is bit-identical.
        assert!(positions[0].x < 0.5);
        assert!(positions[1].y < 0.5);
        assert_eq!(positions[2], stale_pos);
        assert_eq!(velocities[2], stale_vel);
    }

    #[test]
    fn test_population_maintains_w_components() {
        let config = SimulationConfig::new(4).with_mode(Mode::Flow);
        let noise = test_noise();

        let mut positions = vec![Vec4::new(0.1, 0.2, 0.3, 0.0); 4];
        let mut velocities = vec![Vec4::new(0.0, 0.0, 0.0, 5.0); 4];

        step_population(&mut positions, &mut velocities, &config, &noise);

        for (pos, vel) in positions.iter().zip(&velocities) {
            assert_eq!(pos.w, 1.0);
            assert_eq!(vel.w, 0.0);
        }
    }

    #[test]
    fn test_population_matches_scalar_kernel() {
        let config = SimulationConfig::new(16)
            .with_mode(Mode::Star)
            .with_shape_scale(1.0);
        let noise = test_noise();

        let mut positions: Vec<Vec4> = (0..16)
            .map(|i| Vec4::new(i as f32 * 0.1 - 0.8, 0.2, -0.1, 1.0))
            .collect();
        let mut velocities = vec![Vec4::ZERO; 16];
        let reference: Vec<(Vec3, Vec3)> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| step_particle(i as u32, p.truncate(), Vec3::ZERO, Mode::Star, &config, &noise))
            .collect();

        step_population(&mut positions, &mut velocities, &config, &noise);

        for (i, (p, v)) in reference.iter().enumerate() {
            assert_eq!(positions[i].truncate(), *p);
            assert_eq!(velocities[i].truncate(), *v);
        }
    }

    #[test]
    fn test_star_boundary_scenario() {
        // numParticles = 4, mode scalar exactly on the 2.5 band edge:
        // id 0 sits at the start of a wedge, full outer radius.
        let config = SimulationConfig::new(4)
            .with_mode_scalar(2.5)
            .with_shape_scale(1.0);
        assert_eq!(Mode::from_scalar(config.mode), Mode::Star);

        let target = star_position(0, 4, 1.0);
        assert!((target - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-6);
    }
}
