//! Structural properties over arbitrary atom sets.

use glam::Vec3;
use proptest::prelude::*;

use super::*;
use crate::constants::LEAF_CAPACITY;
use crate::types::AtomRecord;

/// Clouds, planes (Z flattened) and lines (Y and Z flattened).
fn atom_sets() -> impl Strategy<Value = Vec<AtomRecord>> {
  (
    0usize..3,
    prop::collection::vec(
      (-50.0f32..50.0, -50.0f32..50.0, -50.0f32..50.0, 0.0f32..2.5),
      1..150,
    ),
  )
    .prop_map(|(flattened, rows)| {
      rows
        .into_iter()
        .enumerate()
        .map(|(i, (x, y, z, r))| {
          let mut position = Vec3::new(x, y, z);
          for axis in 3 - flattened..3 {
            position[axis] = 0.0;
          }
          AtomRecord::new(position, r, i as u32)
        })
        .collect()
    })
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(64))]

  #[test]
  fn prop_every_atom_is_reachable(atoms in atom_sets()) {
    let count = atoms.len();
    let flat = KdTree::build(atoms).unwrap().flatten().unwrap();

    let mut seen = vec![false; count];
    for node in flat.nodes() {
      for index in node.atom_indices() {
        seen[index as usize] = true;
      }
    }
    prop_assert!(seen.iter().all(|&s| s));
  }

  #[test]
  fn prop_nodes_respect_capacity(atoms in atom_sets()) {
    let tree = KdTree::build(atoms).unwrap();
    prop_assert!(tree.nodes().iter().all(|n| n.atoms.len() <= LEAF_CAPACITY));
  }

  #[test]
  fn prop_duplication_is_bounded(atoms in atom_sets()) {
    let count = atoms.len();
    let tree = KdTree::build(atoms).unwrap();
    prop_assert!(
      tree.stats().atom_slots <= 4 * count,
      "{} slots for {} atoms",
      tree.stats().atom_slots,
      count
    );
  }

  #[test]
  fn prop_boxes_contain_atoms_and_children(atoms in atom_sets()) {
    let tree = KdTree::build(atoms).unwrap();

    for node in tree.nodes() {
      for &index in &node.atoms {
        let atom = tree.atom(index).unwrap();
        prop_assert!(node.bounds.contains_aabb(&atom.bounds()));
      }
      for child in node.children() {
        prop_assert!(node.bounds.contains_aabb(&tree.node(child).bounds));
      }
    }
  }

  #[test]
  fn prop_children_follow_parent(atoms in atom_sets()) {
    let tree = KdTree::build(atoms).unwrap();

    for (i, node) in tree.nodes().iter().enumerate() {
      for child in node.children() {
        prop_assert!(child.index() > i);
        prop_assert_eq!(tree.node(child).depth, node.depth + 1);
      }
    }
  }

  #[test]
  fn prop_parallel_build_is_identical(atoms in atom_sets()) {
    let sequential = KdTree::build(atoms.clone()).unwrap();
    let config = BuildConfig {
      parallel: true,
      parallel_threshold: 1,
      ..BuildConfig::DEFAULT
    };
    let parallel = KdTree::build_with_config(atoms, &config).unwrap();

    prop_assert_eq!(sequential.nodes(), parallel.nodes());
    prop_assert_eq!(
      sequential.flatten().unwrap(),
      parallel.flatten().unwrap()
    );
  }
}
