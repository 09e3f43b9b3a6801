//! KdTree - owned atoms plus the node arena built over them.

use super::build::Builder;
use super::config::BuildConfig;
use super::node::{KdNode, NodeId};
use super::stats::BuildStats;
use crate::bounds::Aabb3;
use crate::constants::LEAF_CAPACITY;
use crate::error::KdTreeResult;
use crate::types::{validate_atoms, AtomRecord};

/// Spatial partition tree over atom spheres.
///
/// Built once and immutable afterwards. Nodes live in a single arena in
/// pre-order: the root is node 0 and every child id is greater than its
/// parent's.
#[derive(Clone, Debug)]
pub struct KdTree {
  /// Owned atoms, sorted so that `atoms[i].index == i`.
  atoms: Vec<AtomRecord>,
  nodes: Vec<KdNode>,
  stats: BuildStats,
  config: BuildConfig,
}

impl KdTree {
  /// Build with [`BuildConfig::DEFAULT`].
  pub fn build(atoms: Vec<AtomRecord>) -> KdTreeResult<Self> {
    Self::build_with_config(atoms, &BuildConfig::DEFAULT)
  }

  /// Build from a finalized atom list, taking ownership of it.
  ///
  /// Partitioning follows the input order, so the same input sequence
  /// always produces the same tree.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "kdtree::build"))]
  pub fn build_with_config(mut atoms: Vec<AtomRecord>, config: &BuildConfig) -> KdTreeResult<Self> {
    validate_atoms(&atoms)?;

    let members: Vec<u32> = atoms.iter().map(|a| a.index).collect();
    atoms.sort_unstable_by_key(|a| a.index);

    let builder = Builder {
      atoms: &atoms,
      config,
    };
    let root_bounds = builder.enclosing_bounds(&members);

    let mut nodes = Vec::with_capacity(2 * atoms.len().div_ceil(LEAF_CAPACITY));
    let stats = builder.build_into(&mut nodes, members, &root_bounds, 0, 0)?;

    log::debug!(
      "built kd-tree: {} atoms, {} nodes ({} leaves, {} branches, {} leaf+child, {} pass-through), depth {}, {} straddling, {} fallback splits",
      atoms.len(),
      stats.node_count(),
      stats.leaves,
      stats.branches,
      stats.leaves_with_child,
      stats.pass_throughs,
      stats.max_depth,
      stats.straddling,
      stats.fallback_splits
    );

    Ok(Self {
      atoms,
      nodes,
      stats,
      config: *config,
    })
  }

  #[inline]
  pub fn root(&self) -> NodeId {
    NodeId::ROOT
  }

  #[inline]
  pub fn node(&self, id: NodeId) -> &KdNode {
    &self.nodes[id.index()]
  }

  /// All nodes in pre-order.
  #[inline]
  pub fn nodes(&self) -> &[KdNode] {
    &self.nodes
  }

  #[inline]
  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  /// Owned atoms, ordered by stable index.
  #[inline]
  pub fn atoms(&self) -> &[AtomRecord] {
    &self.atoms
  }

  /// Atom by stable index.
  #[inline]
  pub fn atom(&self, index: u32) -> Option<&AtomRecord> {
    self.atoms.get(index as usize)
  }

  /// Box around every atom sphere.
  #[inline]
  pub fn bounds(&self) -> Aabb3 {
    self.nodes[0].bounds
  }

  #[inline]
  pub fn stats(&self) -> &BuildStats {
    &self.stats
  }

  #[inline]
  pub fn config(&self) -> &BuildConfig {
    &self.config
  }

  /// Nodes that hold atoms, with their stable indices.
  pub fn leaf_atoms(&self) -> impl Iterator<Item = (NodeId, &[u32])> {
    self
      .nodes
      .iter()
      .enumerate()
      .filter(|(_, node)| !node.atoms.is_empty())
      .map(|(i, node)| (NodeId(i as u32), node.atoms.as_slice()))
  }

  /// Ids of every ancestor of `id`, nearest first.
  pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
    let mut parents = vec![None; self.nodes.len()];
    for (i, node) in self.nodes.iter().enumerate() {
      for child in node.children() {
        parents[child.index()] = Some(NodeId(i as u32));
      }
    }

    let mut out = Vec::new();
    let mut current = parents[id.index()];
    while let Some(parent) = current {
      out.push(parent);
      current = parents[parent.index()];
    }
    out
  }
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;
