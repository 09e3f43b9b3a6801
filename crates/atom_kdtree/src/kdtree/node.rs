//! Arena node types for the spatial partition tree.

use smallvec::SmallVec;

use crate::bounds::Aabb3;
use crate::constants::{axis_for_depth, LEAF_CAPACITY};

/// Stable indices held directly by a node.
pub type NodeAtoms = SmallVec<[u32; LEAF_CAPACITY]>;

/// Position of a node in the tree arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct NodeId(pub u32);

impl NodeId {
  /// The root is always the first node in the arena.
  pub const ROOT: NodeId = NodeId(0);

  #[inline(always)]
  pub fn index(self) -> usize {
    self.0 as usize
  }

  /// Shift by `offset` when a separately built subtree is appended.
  #[inline(always)]
  pub(crate) fn offset(self, offset: u32) -> NodeId {
    NodeId(self.0 + offset)
  }
}

/// Shape of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
  /// Holds atoms, no children.
  Leaf,
  /// Two children, no atoms.
  Branch,
  /// Holds the atoms of one partition side and a child for the other.
  LeafWithChild,
  /// No atoms and a single left child that retries the same atoms on the
  /// next axis.
  PassThrough,
}

/// Tree node.
///
/// A node produced by a split where one side fits in [`LEAF_CAPACITY`]
/// keeps that side's atoms and has a single child for the other side.
/// A node whose split made no progress passes every atom down to one child.
#[derive(Clone, Debug, PartialEq)]
pub struct KdNode {
  /// Box bounding every sphere below this node.
  pub bounds: Aabb3,
  /// Distance from the root (root = 0).
  pub depth: u32,
  /// Stable indices of the atoms held here.
  pub atoms: NodeAtoms,
  pub left: Option<NodeId>,
  pub right: Option<NodeId>,
}

impl KdNode {
  pub(crate) fn placeholder(depth: u32) -> Self {
    Self {
      bounds: Aabb3::EMPTY,
      depth,
      atoms: NodeAtoms::new(),
      left: None,
      right: None,
    }
  }

  /// Split axis used at this node.
  #[inline]
  pub fn axis(&self) -> usize {
    axis_for_depth(self.depth)
  }

  /// No children.
  #[inline]
  pub fn is_leaf(&self) -> bool {
    self.left.is_none() && self.right.is_none()
  }

  pub fn kind(&self) -> NodeKind {
    match (self.atoms.is_empty(), self.children().count()) {
      (_, 2) => NodeKind::Branch,
      (true, 1) => NodeKind::PassThrough,
      (_, 1) => NodeKind::LeafWithChild,
      _ => NodeKind::Leaf,
    }
  }

  /// Present children, left first.
  pub fn children(&self) -> impl Iterator<Item = NodeId> {
    self.left.into_iter().chain(self.right)
  }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
