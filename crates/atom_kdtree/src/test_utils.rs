//! Atom set generators shared by unit tests.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::AtomRecord;

/// Uniform random spheres inside `[-extent, extent]³`, indexed in order.
pub fn random_cloud(count: usize, extent: f32, max_radius: f32, seed: u64) -> Vec<AtomRecord> {
  let mut rng = StdRng::seed_from_u64(seed);
  (0..count)
    .map(|i| {
      let position = Vec3::new(
        rng.random_range(-extent..extent),
        rng.random_range(-extent..extent),
        rng.random_range(-extent..extent),
      );
      let radius = rng.random_range(0.0..max_radius);
      AtomRecord::new(position, radius, i as u32)
    })
    .collect()
}

/// Atoms on the X axis at the given coordinates.
pub fn along_x(xs: &[f32], radius: f32) -> Vec<AtomRecord> {
  xs.iter()
    .enumerate()
    .map(|(i, &x)| AtomRecord::new(Vec3::new(x, 0.0, 0.0), radius, i as u32))
    .collect()
}

/// `count` atoms at the same position.
pub fn coincident(count: usize, radius: f32) -> Vec<AtomRecord> {
  (0..count)
    .map(|i| AtomRecord::new(Vec3::ONE, radius, i as u32))
    .collect()
}

/// `side × side` atoms on the Z = 0 plane, `spacing` apart.
pub fn grid_xy(side: usize, spacing: f32, radius: f32) -> Vec<AtomRecord> {
  (0..side * side)
    .map(|i| {
      let position = Vec3::new((i / side) as f32 * spacing, (i % side) as f32 * spacing, 0.0);
      AtomRecord::new(position, radius, i as u32)
    })
    .collect()
}
