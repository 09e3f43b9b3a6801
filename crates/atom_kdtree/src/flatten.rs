//! Flattening of the tree into a GPU-consumable node array.
//!
//! Nodes are numbered in pre-order with a running counter, so the root is
//! index 0, a left subtree is contiguous and precedes its right sibling, and
//! every child index is greater than its parent's.

use bytemuck::{Pod, Zeroable};

use crate::bounds::Aabb3;
use crate::constants::{LEAF_CAPACITY, NO_INDEX};
use crate::error::{KdTreeError, KdTreeResult};
use crate::kdtree::{KdNode, KdTree, NodeId};

/// Flat tree node for GPU traversal
///
/// Matches the std430 layout of the shader's node struct: two vec4 corners
/// (w = 0), two child indices and a fixed array of atom indices. `-1` marks
/// absent children and unused atom slots.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct FlatNode {
  /// Minimum bounds (x, y, z, 0)
  pub box_min: [f32; 4],
  /// Maximum bounds (x, y, z, 0)
  pub box_max: [f32; 4],
  /// Left child index or -1
  pub left: i32,
  /// Right child index or -1
  pub right: i32,
  /// Stable atom indices, padded with -1
  pub atoms: [i32; LEAF_CAPACITY],
}

const _: () = assert!(std::mem::size_of::<FlatNode>() == 80);

impl FlatNode {
  /// Node with zero box, no children and no atoms.
  pub const EMPTY: Self = Self {
    box_min: [0.0; 4],
    box_max: [0.0; 4],
    left: NO_INDEX,
    right: NO_INDEX,
    atoms: [NO_INDEX; LEAF_CAPACITY],
  };

  fn from_node(node: &KdNode, left: i32, right: i32) -> Self {
    let mut atoms = [NO_INDEX; LEAF_CAPACITY];
    for (slot, &index) in atoms.iter_mut().zip(node.atoms.iter()) {
      *slot = index as i32;
    }
    Self {
      box_min: node.bounds.min.extend(0.0).to_array(),
      box_max: node.bounds.max.extend(0.0).to_array(),
      left,
      right,
      atoms,
    }
  }

  /// Box as an [`Aabb3`].
  #[inline]
  pub fn bounds(&self) -> Aabb3 {
    Aabb3::from_vec4(self.box_min.into(), self.box_max.into())
  }

  #[inline]
  pub fn left_child(&self) -> Option<usize> {
    (self.left != NO_INDEX).then_some(self.left as usize)
  }

  #[inline]
  pub fn right_child(&self) -> Option<usize> {
    (self.right != NO_INDEX).then_some(self.right as usize)
  }

  /// No children.
  #[inline]
  pub fn is_leaf(&self) -> bool {
    self.left == NO_INDEX && self.right == NO_INDEX
  }

  /// Stable indices in occupied slots.
  pub fn atom_indices(&self) -> impl Iterator<Item = u32> + '_ {
    self
      .atoms
      .iter()
      .take_while(|&&a| a != NO_INDEX)
      .map(|&a| a as u32)
  }

  pub fn atom_count(&self) -> usize {
    self.atom_indices().count()
  }
}

/// Pre-order array of [`FlatNode`], root at index 0.
#[derive(Clone, Debug, PartialEq)]
pub struct FlatTree {
  nodes: Vec<FlatNode>,
}

impl FlatTree {
  #[inline]
  pub fn nodes(&self) -> &[FlatNode] {
    &self.nodes
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Raw bytes for buffer upload.
  #[inline]
  pub fn as_bytes(&self) -> &[u8] {
    bytemuck::cast_slice(&self.nodes)
  }

  pub fn into_nodes(self) -> Vec<FlatNode> {
    self.nodes
  }
}

/// Pre-order numbering state.
struct Flattener<'a> {
  tree: &'a KdTree,
  out: Vec<FlatNode>,
  next: i32,
}

impl Flattener<'_> {
  fn visit(&mut self, id: NodeId, slot: usize) {
    let node = self.tree.node(id);

    let left = match node.left {
      Some(child) => self.descend(child),
      None => NO_INDEX,
    };
    let right = match node.right {
      Some(child) => self.descend(child),
      None => NO_INDEX,
    };

    self.out[slot] = FlatNode::from_node(node, left, right);
  }

  /// Assign the next index to `child` and serialize its subtree.
  fn descend(&mut self, child: NodeId) -> i32 {
    self.next += 1;
    let index = self.next;
    self.visit(child, index as usize);
    index
  }
}

impl KdTree {
  /// Serialize into a flat node array.
  ///
  /// Fails if the node count cannot be addressed by an `i32` index.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "kdtree::flatten"))]
  pub fn flatten(&self) -> KdTreeResult<FlatTree> {
    let count = self.node_count();
    if count > i32::MAX as usize {
      return Err(KdTreeError::TooManyNodes(count));
    }

    let mut flattener = Flattener {
      tree: self,
      out: vec![FlatNode::EMPTY; count],
      next: 0,
    };
    flattener.visit(self.root(), 0);
    debug_assert_eq!(flattener.next as usize + 1, count, "unreachable nodes in arena");

    log::debug!(
      "flattened kd-tree: {} nodes, {} bytes",
      count,
      count * std::mem::size_of::<FlatNode>()
    );

    Ok(FlatTree {
      nodes: flattener.out,
    })
  }
}

#[cfg(test)]
#[path = "flatten_test.rs"]
mod flatten_test;
