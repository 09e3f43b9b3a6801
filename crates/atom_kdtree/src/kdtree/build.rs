//! Recursive midpoint construction.
//!
//! # Split Rule
//!
//! At depth `d` the node splits on axis `d % 3` at the midpoint of its
//! atoms' radius-expanded extent along that axis:
//!
//! ```text
//!        box.min[axis]            half            box.max[axis]
//!             │  (  a  )           │                    │
//!             │             (  b   │   )    (  c  )     │
//!             │                    │                    │
//!   left  = { a, b }      b straddles `half`     right = { b, c }
//! ```
//!
//! An atom whose sphere crosses the plane goes to both sides, so pruning a
//! subtree by its box never clips a sphere.
//!
//! # Termination
//!
//! 1. Both sides together fit in one node → leaf holding the left side, then
//!    the right-only atoms.
//! 2. Left side fits → node keeps left, right becomes its only child.
//! 3. Right side fits → node keeps right, left becomes its only child.
//! 4. Otherwise → branch with two children.
//!
//! # Degenerate Sets
//!
//! A split *stalls* when one side receives every atom, or when the two sides
//! together hold more than five quarters of the atoms. A stalled split never
//! duplicates the set:
//!
//! - a stalled node that fits in [`LEAF_CAPACITY`] becomes a leaf;
//! - with both sides over capacity, a pass-through node hands every atom to
//!   a single child on the next axis;
//! - after stalling on all three axes in a row the configured
//!   [`DegenerateFallback`] decides.

use std::cmp::Ordering;

use super::config::{BuildConfig, DegenerateFallback};
use super::node::{KdNode, NodeAtoms, NodeId};
use super::stats::BuildStats;
use crate::bounds::Aabb3;
use crate::constants::{axis_for_depth, AXIS_COUNT, LEAF_CAPACITY};
use crate::error::{KdTreeError, KdTreeResult};
use crate::types::AtomRecord;

/// Outcome of partitioning one node's members.
#[derive(Debug, PartialEq)]
pub(crate) struct Partition {
  pub left: Vec<u32>,
  pub right: Vec<u32>,
  /// Members placed on both sides.
  pub straddling: usize,
}

impl Partition {
  /// One side received every member, or straddling grew the set by more
  /// than a quarter.
  pub(crate) fn stalled(&self, members: usize) -> bool {
    let (left, right) = (self.left.len(), self.right.len());
    left == members || right == members || 4 * (left + right) > 5 * members
  }

  /// Left side followed by the right-only members.
  fn merged(&self) -> NodeAtoms {
    let mut atoms: NodeAtoms = self.left.iter().copied().collect();
    for &m in &self.right {
      if !atoms.contains(&m) {
        atoms.push(m);
      }
    }
    atoms
  }
}

/// Immutable build context shared across (possibly parallel) recursion.
///
/// `atoms` is indexed by stable index.
pub(crate) struct Builder<'a> {
  pub atoms: &'a [AtomRecord],
  pub config: &'a BuildConfig,
}

impl<'a> Builder<'a> {
  /// Box over every member's sphere.
  pub fn enclosing_bounds(&self, members: &[u32]) -> Aabb3 {
    let mut bounds = Aabb3::EMPTY;
    for &m in members {
      let atom = &self.atoms[m as usize];
      bounds.include_sphere(atom.position, atom.radius);
    }
    bounds
  }

  /// Parent box with `axis` narrowed to the members' extent.
  pub fn node_bounds(&self, members: &[u32], parent: &Aabb3, axis: usize) -> Aabb3 {
    let (min, max) = members.iter().fold(
      (f32::INFINITY, f32::NEG_INFINITY),
      |(min, max), &m| {
        let atom = &self.atoms[m as usize];
        (min.min(atom.axis_min(axis)), max.max(atom.axis_max(axis)))
      },
    );
    parent.with_axis(axis, min, max)
  }

  /// Midpoint partition with duplicate-on-straddle.
  pub fn partition(&self, members: &[u32], axis: usize, half: f32) -> Partition {
    let mut left = Vec::with_capacity(members.len());
    let mut right = Vec::with_capacity(members.len());
    let mut straddling = 0;

    for &m in members {
      let atom = &self.atoms[m as usize];
      let in_left = atom.axis_min(axis) <= half;
      let in_right = atom.axis_max(axis) >= half;
      if in_left {
        left.push(m);
      }
      if in_right {
        right.push(m);
      }
      if in_left && in_right {
        straddling += 1;
      }
    }

    Partition {
      left,
      right,
      straddling,
    }
  }

  /// Split sorted by coordinate (ties by stable index) at the median.
  ///
  /// Both halves are non-empty and strictly smaller than `members`.
  pub fn median_split(&self, members: &[u32], axis: usize) -> Partition {
    let mut sorted = members.to_vec();
    sorted.sort_by(|&a, &b| {
      let pa = self.atoms[a as usize].position[axis];
      let pb = self.atoms[b as usize].position[axis];
      pa.partial_cmp(&pb).unwrap_or(Ordering::Equal).then(a.cmp(&b))
    });
    let right = sorted.split_off(sorted.len() / 2);
    Partition {
      left: sorted,
      right,
      straddling: 0,
    }
  }

  /// Build the subtree for `members` into `out` in pre-order.
  ///
  /// The subtree root lands at `out.len()` on entry. Child ids are absolute
  /// positions in `out`.
  pub fn build_into(
    &self,
    out: &mut Vec<KdNode>,
    members: Vec<u32>,
    parent: &Aabb3,
    depth: u32,
    stalled: u32,
  ) -> KdTreeResult<BuildStats> {
    if depth > self.config.max_depth {
      return Err(KdTreeError::DepthLimitExceeded {
        max_depth: self.config.max_depth,
      });
    }

    let axis = axis_for_depth(depth);
    let bounds = self.node_bounds(&members, parent, axis);
    let slot = out.len();
    out.push(KdNode::placeholder(depth));

    let mut stats = BuildStats::default();
    let half = bounds.axis_center(axis);
    let mut split = self.partition(&members, axis, half);

    let stalled_here = split.stalled(members.len());
    let leaf_atoms = if split.left.len() + split.right.len() <= LEAF_CAPACITY {
      Some(split.merged())
    } else if stalled_here && members.len() <= LEAF_CAPACITY {
      Some(members.iter().copied().collect())
    } else {
      None
    };
    if let Some(atoms) = leaf_atoms {
      let node = KdNode {
        bounds,
        depth,
        atoms,
        left: None,
        right: None,
      };
      stats.record_node(&node);
      out[slot] = node;
      return Ok(stats);
    }

    let mut child_stall = if stalled_here { stalled + 1 } else { 0 };
    if stalled_here && child_stall >= AXIS_COUNT as u32 {
      match self.config.fallback {
        DegenerateFallback::MedianSplit => {
          log::debug!(
            "{} atoms not separating at depth {}, falling back to median split",
            members.len(),
            depth
          );
          split = self.median_split(&members, axis);
          child_stall = 0;
          stats.fallback_splits += 1;
        }
        DegenerateFallback::Error => {
          return Err(KdTreeError::DegenerateInput {
            depth,
            atoms: members.len(),
          });
        }
      }
    } else if stalled_here
      && split.left.len() > LEAF_CAPACITY
      && split.right.len() > LEAF_CAPACITY
    {
      // Pass-through: retry the whole set on the next axis.
      let mut node = KdNode {
        bounds,
        depth,
        atoms: NodeAtoms::new(),
        left: None,
        right: None,
      };
      node.left = Some(self.child(out, members, &bounds, depth, child_stall, &mut stats)?);
      stats.record_node(&node);
      out[slot] = node;
      return Ok(stats);
    }
    stats.straddling += split.straddling;

    let mut node = KdNode {
      bounds,
      depth,
      atoms: NodeAtoms::new(),
      left: None,
      right: None,
    };

    let Partition { left, right, .. } = split;
    if left.len() <= LEAF_CAPACITY {
      node.atoms = left.into_iter().collect();
      node.right = Some(self.child(out, right, &bounds, depth, child_stall, &mut stats)?);
    } else if right.len() <= LEAF_CAPACITY {
      node.atoms = right.into_iter().collect();
      node.left = Some(self.child(out, left, &bounds, depth, child_stall, &mut stats)?);
    } else if self.config.should_fork(members.len()) {
      let (left_nodes, right_nodes) = rayon::join(
        || self.detached(left, &bounds, depth + 1, child_stall),
        || self.detached(right, &bounds, depth + 1, child_stall),
      );
      node.left = Some(self.append(out, left_nodes?, &mut stats));
      node.right = Some(self.append(out, right_nodes?, &mut stats));
    } else {
      node.left = Some(self.child(out, left, &bounds, depth, child_stall, &mut stats)?);
      node.right = Some(self.child(out, right, &bounds, depth, child_stall, &mut stats)?);
    }

    stats.record_node(&node);
    out[slot] = node;
    Ok(stats)
  }

  fn child(
    &self,
    out: &mut Vec<KdNode>,
    members: Vec<u32>,
    bounds: &Aabb3,
    depth: u32,
    stalled: u32,
    stats: &mut BuildStats,
  ) -> KdTreeResult<NodeId> {
    let id = NodeId(out.len() as u32);
    *stats += self.build_into(out, members, bounds, depth + 1, stalled)?;
    Ok(id)
  }

  /// Build a subtree into its own arena, ids relative to 0.
  fn detached(
    &self,
    members: Vec<u32>,
    bounds: &Aabb3,
    depth: u32,
    stalled: u32,
  ) -> KdTreeResult<(Vec<KdNode>, BuildStats)> {
    let mut nodes = Vec::new();
    let stats = self.build_into(&mut nodes, members, bounds, depth, stalled)?;
    Ok((nodes, stats))
  }

  /// Append a detached subtree, rebasing its child ids.
  fn append(
    &self,
    out: &mut Vec<KdNode>,
    (nodes, sub_stats): (Vec<KdNode>, BuildStats),
    stats: &mut BuildStats,
  ) -> NodeId {
    let base = out.len() as u32;
    out.extend(nodes.into_iter().map(|mut node| {
      node.left = node.left.map(|id| id.offset(base));
      node.right = node.right.map(|id| id.offset(base));
      node
    }));
    *stats += sub_stats;
    NodeId(base)
  }
}

#[cfg(test)]
#[path = "build_test.rs"]
mod build_test;
