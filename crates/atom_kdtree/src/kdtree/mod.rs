//! Spatial partition tree over atom spheres.
//!
//! A binary k-d tree whose split axis cycles with depth and whose split
//! value is the spatial midpoint of the node's atoms along that axis. Atoms
//! have non-zero radius, so an atom crossing the split plane is stored on
//! both sides.
//!
//! # Module Structure
//!
//! - [`node`]: `KdNode` / `NodeId` - arena node types
//! - [`config`]: `BuildConfig` - depth ceiling, degenerate fallback, parallelism
//! - [`stats`]: `BuildStats` - counters from construction
//! - [`build`]: the recursive midpoint builder
//! - [`tree`]: `KdTree` - owned atoms plus the node arena

pub mod build;
pub mod config;
pub mod node;
pub mod stats;
pub mod tree;

// Re-exports
pub use config::{BuildConfig, DegenerateFallback};
pub use node::{KdNode, NodeAtoms, NodeId, NodeKind};
pub use stats::BuildStats;
pub use tree::KdTree;

#[cfg(test)]
#[path = "properties_test.rs"]
mod properties_test;
