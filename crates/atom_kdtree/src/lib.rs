//! atom_kdtree - Spatial partition tree over atom spheres for GPU raytracing
//!
//! This crate builds a binary k-d tree over a set of spheres (atoms), then
//! flattens it into a fixed-layout node array that a compute shader can
//! traverse with an index stack.
//!
//! # Features
//!
//! - **Midpoint splits**: Axis cycles with depth, split value is the center
//!   of the node's radius-expanded extent
//! - **Duplicate-on-straddle**: Atoms crossing the split plane are stored on
//!   both sides, so box pruning never misses a sphere
//! - **Degenerate input handling**: Coincident atoms fall back to a median
//!   split (or fail, with [`BuildConfig::STRICT`])
//! - **Parallel construction**: Optional rayon fork per subtree, producing
//!   the same arena as a sequential build
//! - **GPU layouts**: `bytemuck` node and atom records ready for upload
//!
//! # Example
//!
//! ```
//! use atom_kdtree::{gpu_atoms, AtomMaterial, AtomRecord, AtomTemplate, KdTree, Ray};
//! use glam::Vec3;
//!
//! let atoms = (0..32)
//!   .map(|i| AtomRecord::new(Vec3::new(i as f32 * 3.0, 0.0, 0.0), 1.0, i))
//!   .collect();
//! let tree = KdTree::build(atoms)?;
//!
//! let flat = tree.flatten()?;
//! let table = gpu_atoms(
//!   tree.atoms(),
//!   &[AtomTemplate::new(Vec3::ONE, 1.0)],
//!   AtomMaterial::default(),
//! )?;
//!
//! let ray = Ray::new(Vec3::new(-10.0, 0.0, 0.0), Vec3::X);
//! assert_eq!(flat.intersect(&ray, &table).map(|hit| hit.atom), Some(0));
//! # Ok::<(), atom_kdtree::KdTreeError>(())
//! ```

pub mod bounds;
pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use bounds::Aabb3;
pub use constants::{LEAF_CAPACITY, NO_INDEX, TRAVERSAL_STACK_SIZE};
pub use error::{KdTreeError, KdTreeResult};
pub use types::{validate_atoms, AtomRecord, AtomTemplate, TemplateId};

// Tree construction
pub mod kdtree;
pub use kdtree::{BuildConfig, BuildStats, DegenerateFallback, KdNode, KdTree, NodeId, NodeKind};

// GPU serialization
pub mod flatten;
pub mod gpu;
pub use flatten::{FlatNode, FlatTree};
pub use gpu::{gpu_atoms, AtomMaterial, GpuAtom};

// Flat-array queries
pub mod traverse;
pub use traverse::{Hit, Ray};

#[cfg(test)]
mod test_utils;
