//! Layout constants shared by the tree builder, the flat node format and the
//! traversal routines.
//!
//! # Flat Node Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    FLAT NODE (80 bytes)                      │
//! ├──────────────┬──────────────┬──────┬───────┬─────────────────┤
//! │ box_min vec4 │ box_max vec4 │ left │ right │ atoms[10] (i32) │
//! │   0..16      │   16..32     │32..36│ 36..40│     40..80      │
//! └──────────────┴──────────────┴──────┴───────┴─────────────────┘
//! ```
//!
//! The shader declares the node with a fixed `int atoms[10]` array, so
//! [`LEAF_CAPACITY`] cannot change without changing the shader.

/// Maximum number of atoms stored in a single node.
pub const LEAF_CAPACITY: usize = 10;

/// Number of split axes (X, Y, Z). The split axis is `depth % AXIS_COUNT`.
pub const AXIS_COUNT: usize = 3;

/// Sentinel for an absent child or an unused atom slot in the flat layout.
pub const NO_INDEX: i32 = -1;

/// Default recursion ceiling for tree construction.
pub const DEFAULT_MAX_DEPTH: u32 = 64;

/// Default member count at which a parallel build forks sibling subtrees.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Capacity of the explicit traversal stack used by flat traversal.
///
/// Mirrors the fixed-size stack array in the raytracing shader. The CPU
/// stack spills to the heap past this size; debug builds assert that it
/// never does.
pub const TRAVERSAL_STACK_SIZE: usize = 64;

/// Split axis for a node at the given depth.
#[inline(always)]
pub const fn axis_for_depth(depth: u32) -> usize {
  depth as usize % AXIS_COUNT
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
