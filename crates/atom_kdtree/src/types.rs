//! Atom records and the templates they reference.

use std::collections::HashSet;

use glam::Vec3;

use crate::bounds::Aabb3;
use crate::error::{KdTreeError, KdTreeResult};

/// Index into a template table.
pub type TemplateId = u16;

/// Per-element appearance shared by every atom of that element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtomTemplate {
  /// Surface color, RGB in [0, 1].
  pub color: Vec3,
  /// Van der Waals radius in world units.
  pub radius: f32,
}

impl AtomTemplate {
  pub fn new(color: Vec3, radius: f32) -> Self {
    Self { color, radius }
  }
}

/// A positioned sphere.
///
/// `index` is assigned once by the loader and is the only link between a
/// tree node and the atom's row in the GPU atom table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtomRecord {
  /// Sphere center in world space.
  pub position: Vec3,
  /// Sphere radius (0 is a point atom).
  pub radius: f32,
  /// Template holding the atom's color.
  pub template: TemplateId,
  /// Stable index, unique within `0..N`.
  pub index: u32,
}

impl AtomRecord {
  /// Create a record using template 0.
  pub fn new(position: Vec3, radius: f32, index: u32) -> Self {
    Self {
      position,
      radius,
      template: 0,
      index,
    }
  }

  /// Create a record whose radius comes from its template.
  pub fn from_template(position: Vec3, id: TemplateId, template: &AtomTemplate, index: u32) -> Self {
    Self {
      position,
      radius: template.radius,
      template: id,
      index,
    }
  }

  /// Lower extent of the sphere along `axis`.
  #[inline(always)]
  pub fn axis_min(&self, axis: usize) -> f32 {
    self.position[axis] - self.radius
  }

  /// Upper extent of the sphere along `axis`.
  #[inline(always)]
  pub fn axis_max(&self, axis: usize) -> f32 {
    self.position[axis] + self.radius
  }

  /// Box bounding the whole sphere.
  #[inline]
  pub fn bounds(&self) -> Aabb3 {
    Aabb3::from_sphere(self.position, self.radius)
  }

  /// Whether `point` lies inside or on the sphere.
  #[inline]
  pub fn contains_point(&self, point: Vec3) -> bool {
    self.position.distance_squared(point) <= self.radius * self.radius
  }
}

/// Check the input contract of the tree builder.
///
/// Atoms must be non-empty, finite, have non-negative radii and carry
/// unique stable indices in `0..atoms.len()`.
pub fn validate_atoms(atoms: &[AtomRecord]) -> KdTreeResult<()> {
  if atoms.is_empty() {
    return Err(KdTreeError::EmptyInput);
  }

  let count = atoms.len();
  let mut seen = HashSet::with_capacity(count);
  for atom in atoms {
    if !atom.position.is_finite() {
      return Err(KdTreeError::NonFinitePosition { index: atom.index });
    }
    if !atom.radius.is_finite() || atom.radius < 0.0 {
      return Err(KdTreeError::InvalidRadius {
        index: atom.index,
        radius: atom.radius,
      });
    }
    if atom.index as usize >= count {
      return Err(KdTreeError::IndexOutOfRange {
        index: atom.index,
        count,
      });
    }
    if !seen.insert(atom.index) {
      return Err(KdTreeError::DuplicateIndex { index: atom.index });
    }
  }

  Ok(())
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
