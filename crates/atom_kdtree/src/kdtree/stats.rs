//! Statistics gathered during tree construction.

use std::ops::AddAssign;

use super::node::{KdNode, NodeKind};

/// Counters from a single build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
  /// Nodes with atoms and no children.
  pub leaves: usize,
  /// Nodes with two children.
  pub branches: usize,
  /// Nodes with atoms and one child.
  pub leaves_with_child: usize,
  /// Nodes with no atoms and one child, left where a split made no progress.
  pub pass_throughs: usize,
  /// Total atom slots filled across all nodes.
  pub atom_slots: usize,
  /// Atoms sent to both sides of a split.
  pub straddling: usize,
  /// Splits resolved by the degenerate fallback.
  pub fallback_splits: usize,
  /// Deepest node depth.
  pub max_depth: u32,
}

impl BuildStats {
  /// Total number of nodes.
  #[inline]
  pub fn node_count(&self) -> usize {
    self.leaves + self.branches + self.leaves_with_child + self.pass_throughs
  }

  /// Slots used beyond one per atom, from straddle duplication.
  #[inline]
  pub fn duplicate_slots(&self, atom_count: usize) -> usize {
    self.atom_slots.saturating_sub(atom_count)
  }

  pub(crate) fn record_node(&mut self, node: &KdNode) {
    match node.kind() {
      NodeKind::Leaf => self.leaves += 1,
      NodeKind::Branch => self.branches += 1,
      NodeKind::LeafWithChild => self.leaves_with_child += 1,
      NodeKind::PassThrough => self.pass_throughs += 1,
    }
    self.atom_slots += node.atoms.len();
    self.max_depth = self.max_depth.max(node.depth);
  }
}

impl AddAssign for BuildStats {
  fn add_assign(&mut self, other: Self) {
    self.leaves += other.leaves;
    self.branches += other.branches;
    self.leaves_with_child += other.leaves_with_child;
    self.pass_throughs += other.pass_throughs;
    self.atom_slots += other.atom_slots;
    self.straddling += other.straddling;
    self.fallback_splits += other.fallback_splits;
    self.max_depth = self.max_depth.max(other.max_depth);
  }
}
