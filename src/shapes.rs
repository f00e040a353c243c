//! Parametric target curves for the spring-convergence modes.
//!
//! Each generator maps a particle's normalized index to a fixed point on
//! a closed curve. They are pure functions of `(index, count, scale)`:
//! the same index always lands on the same point, which is what lets a
//! particle snap onto a stable target instead of chasing a moving one.
//! Cheap enough to recompute per particle per frame; nothing is cached.

use glam::Vec3;
use std::f32::consts::TAU;

/// Pentagram outer radius.
const STAR_OUTER_RADIUS: f32 = 1.0;
/// Pentagram inner radius (inverse golden ratio squared).
const STAR_INNER_RADIUS: f32 = 0.382;
/// Angular width of one of the five star wedges.
const STAR_WEDGE: f32 = TAU / 5.0;

fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Point on the classic closed-form heart curve for particle `index` of
/// `count`.
///
/// `x = 16 sin³u`, `y = 13 cos u − 5 cos 2u − 2 cos 3u − cos 4u`, both
/// scaled by `scale / 20`; `z` is a flat decorative depth oscillation.
pub fn heart_position(index: u32, count: u32, scale: f32) -> Vec3 {
    let t = index as f32 / count as f32;
    let u = t * TAU;

    let s = u.sin();
    let x = 16.0 * s * s * s;
    let y = 13.0 * u.cos() - 5.0 * (2.0 * u).cos() - 2.0 * (3.0 * u).cos() - (4.0 * u).cos();

    let scale = scale / 20.0;
    let z = (2.0 * u).sin() * scale * 0.5;

    Vec3::new(x * scale, y * scale, z)
}

/// Point on a five-pointed star (pentagram) for particle `index` of
/// `count`.
///
/// The full turn divides into five equal wedges; within each wedge the
/// polar radius lerps from the outer radius down to the inner radius and
/// back, so wedge boundaries sit on the star's points. Overall size is
/// `scale * 0.5`; `z` is a decorative depth oscillation.
pub fn star_position(index: u32, count: u32, scale: f32) -> Vec3 {
    let t = index as f32 / count as f32;
    let u = t * TAU;

    let wedge_angle = u % STAR_WEDGE;
    let half_wedge = STAR_WEDGE * 0.5;
    let radius = if wedge_angle < half_wedge {
        mix(STAR_OUTER_RADIUS, STAR_INNER_RADIUS, wedge_angle / half_wedge)
    } else {
        mix(
            STAR_INNER_RADIUS,
            STAR_OUTER_RADIUS,
            (wedge_angle - half_wedge) / half_wedge,
        )
    };

    let scale = scale * 0.5;
    let x = u.cos() * radius * scale;
    let y = u.sin() * radius * scale;
    let z = (3.0 * u).sin() * scale * 0.3;

    Vec3::new(x, y, z)
}
