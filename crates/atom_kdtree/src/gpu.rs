//! GPU atom table.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::error::{KdTreeError, KdTreeResult};
use crate::types::{AtomRecord, AtomTemplate};

/// Atom record in the shader's std430 layout.
///
/// `_padding` moves `position` to a 16-byte boundary.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct GpuAtom {
  pub radius: f32,
  pub transparency: f32,
  pub reflection: f32,
  pub _padding: f32,
  /// Center (x, y, z, 1)
  pub position: [f32; 4],
  /// RGBA, alpha 1
  pub color: [f32; 4],
}

const _: () = assert!(std::mem::size_of::<GpuAtom>() == 48);

impl GpuAtom {
  #[inline]
  pub fn center(&self) -> Vec3 {
    Vec3::new(self.position[0], self.position[1], self.position[2])
  }

  /// Point inside or on the sphere.
  #[inline]
  pub fn contains_point(&self, point: Vec3) -> bool {
    self.center().distance_squared(point) <= self.radius * self.radius
  }

  /// Nearest non-negative ray parameter at which the ray meets the sphere.
  ///
  /// `direction` need not be normalized. An origin inside the sphere yields
  /// the exit distance.
  pub fn ray_distance(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
    let oc = origin - self.center();
    let a = direction.length_squared();
    if a == 0.0 {
      return None;
    }
    let half_b = oc.dot(direction);
    let c = oc.length_squared() - self.radius * self.radius;
    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
      return None;
    }

    let root = discriminant.sqrt();
    let near = (-half_b - root) / a;
    if near >= 0.0 {
      return Some(near);
    }
    let far = (-half_b + root) / a;
    (far >= 0.0).then_some(far)
  }
}

/// Surface parameters shared by every atom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtomMaterial {
  pub transparency: f32,
  pub reflection: f32,
}

impl Default for AtomMaterial {
  fn default() -> Self {
    Self {
      transparency: 0.0,
      reflection: 0.0,
    }
  }
}

/// Build the atom table, one entry per atom, in slice order.
///
/// Pass [`KdTree::atoms`](crate::KdTree::atoms) to get stable-index order.
pub fn gpu_atoms(
  atoms: &[AtomRecord],
  templates: &[AtomTemplate],
  material: AtomMaterial,
) -> KdTreeResult<Vec<GpuAtom>> {
  atoms
    .iter()
    .map(|atom| {
      let template = templates
        .get(atom.template as usize)
        .ok_or(KdTreeError::UnknownTemplate {
          index: atom.index,
          template: atom.template,
        })?;
      Ok(GpuAtom {
        radius: atom.radius,
        transparency: material.transparency,
        reflection: material.reflection,
        _padding: 0.0,
        position: atom.position.extend(1.0).to_array(),
        color: template.color.extend(1.0).to_array(),
      })
    })
    .collect()
}

#[cfg(test)]
#[path = "gpu_test.rs"]
mod gpu_test;
