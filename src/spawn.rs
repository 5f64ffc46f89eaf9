//! Random sampling helpers shared by the ambient field and the burst.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::f32::consts::{PI, TAU};

/// RNG owned by a scene. Seeded for reproducible runs, entropy otherwise.
pub fn scene_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Uniform value in `[-extent, extent)`.
#[inline]
pub fn random_coordinate<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * 2.0 * extent
}

/// Uniform point in the cube `[-extent, extent)^3`.
pub fn random_in_cube<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> Vec3 {
    Vec3::new(
        random_coordinate(rng, extent),
        random_coordinate(rng, extent),
        random_coordinate(rng, extent),
    )
}

/// Radial launch velocity: a speed in `[min_speed, max_speed)` along a direction
/// built from a horizontal angle in `[0, 2π)` and a polar angle in `[0, π)`.
///
/// Angles are sampled independently, so directions bunch up near the poles. That
/// is the intended look, not a uniform sphere.
pub fn radial_velocity<R: Rng + ?Sized>(rng: &mut R, min_speed: f32, max_speed: f32) -> Vec3 {
    let speed = min_speed + rng.gen::<f32>() * (max_speed - min_speed);
    let horizontal = rng.gen::<f32>() * TAU;
    let polar = rng.gen::<f32>() * PI;

    Vec3::new(
        speed * polar.sin() * horizontal.cos(),
        speed * polar.sin() * horizontal.sin(),
        speed * polar.cos(),
    )
}

/// Uniform pick from a palette. An empty palette yields white.
pub fn pick_color<R: Rng + ?Sized>(rng: &mut R, palette: &[Vec3]) -> Vec3 {
    palette.choose(rng).copied().unwrap_or(Vec3::ONE)
}
