//! Stack-based queries over a [`FlatTree`].
//!
//! These walk the flat array the same way a shader does: a fixed-size index
//! stack, right child pushed before left, so nodes pop in pre-order.

use glam::Vec3;
use smallvec::SmallVec;

use crate::constants::TRAVERSAL_STACK_SIZE;
use crate::flatten::{FlatNode, FlatTree};
use crate::gpu::GpuAtom;

/// Inline up to the shader's stack size; spills to the heap beyond it.
type NodeStack = SmallVec<[usize; TRAVERSAL_STACK_SIZE]>;

/// Push, asserting in debug builds that the shader's stack would not
/// overflow at this point.
#[inline]
fn push(stack: &mut NodeStack, index: usize) {
  debug_assert!(
    stack.len() < TRAVERSAL_STACK_SIZE,
    "traversal stack exceeds {} entries",
    TRAVERSAL_STACK_SIZE
  );
  stack.push(index);
}

/// Half-line `origin + t * direction`, `t >= 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
  pub origin: Vec3,
  pub direction: Vec3,
}

impl Ray {
  pub fn new(origin: Vec3, direction: Vec3) -> Self {
    Self { origin, direction }
  }

  #[inline]
  pub fn at(&self, t: f32) -> Vec3 {
    self.origin + self.direction * t
  }
}

/// Nearest intersection found by [`FlatTree::intersect`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
  /// Stable index of the atom hit.
  pub atom: u32,
  /// Ray parameter of the hit, in units of `direction`.
  pub distance: f32,
}

impl Hit {
  /// Nearer hit wins; equal distances go to the lower index.
  fn is_closer_than(&self, other: Option<Hit>) -> bool {
    match other {
      None => true,
      Some(best) => {
        self.distance < best.distance || (self.distance == best.distance && self.atom < best.atom)
      }
    }
  }
}

impl FlatTree {
  /// Pop-order walk from the root, pruning with `descend`.
  fn walk(&self, mut descend: impl FnMut(usize, &FlatNode) -> bool) {
    if self.is_empty() {
      return;
    }

    let nodes = self.nodes();
    let mut stack = NodeStack::new();
    push(&mut stack, 0);

    while let Some(index) = stack.pop() {
      let node = &nodes[index];
      if !descend(index, node) {
        continue;
      }
      if let Some(right) = node.right_child() {
        push(&mut stack, right);
      }
      if let Some(left) = node.left_child() {
        push(&mut stack, left);
      }
    }
  }

  /// Call `f` for every node reachable from the root, in pre-order.
  pub fn visit(&self, mut f: impl FnMut(usize, &FlatNode)) {
    self.walk(|index, node| {
      f(index, node);
      true
    });
  }

  /// Sorted, deduplicated stable indices reachable from the root.
  pub fn collect_atoms(&self) -> Vec<u32> {
    let mut atoms = Vec::new();
    self.visit(|_, node| atoms.extend(node.atom_indices()));
    atoms.sort_unstable();
    atoms.dedup();
    atoms
  }

  /// Nearest atom hit by `ray`.
  ///
  /// Subtrees whose box the ray misses, or enters beyond the best hit so
  /// far, are skipped. Atom indices outside `atoms` are ignored.
  pub fn intersect(&self, ray: &Ray, atoms: &[GpuAtom]) -> Option<Hit> {
    let inv_dir = ray.direction.recip();
    let mut best: Option<Hit> = None;

    self.walk(|_, node| {
      let Some((t_near, _)) = node.bounds().ray_interval(ray.origin, inv_dir) else {
        return false;
      };
      if best.is_some_and(|hit| t_near > hit.distance) {
        return false;
      }

      for index in node.atom_indices() {
        let Some(atom) = atoms.get(index as usize) else {
          continue;
        };
        if let Some(distance) = atom.ray_distance(ray.origin, ray.direction) {
          let hit = Hit {
            atom: index,
            distance,
          };
          if hit.is_closer_than(best) {
            best = Some(hit);
          }
        }
      }
      true
    });

    best
  }

  /// Sorted stable indices of the atoms whose sphere contains `point`.
  pub fn atoms_at(&self, point: Vec3, atoms: &[GpuAtom]) -> Vec<u32> {
    let mut found = Vec::new();

    self.walk(|_, node| {
      if !node.bounds().contains_point(point) {
        return false;
      }
      found.extend(node.atom_indices().filter(|&index| {
        atoms
          .get(index as usize)
          .is_some_and(|atom| atom.contains_point(point))
      }));
      true
    });

    found.sort_unstable();
    found.dedup();
    found
  }
}

#[cfg(test)]
#[path = "traverse_test.rs"]
mod traverse_test;
