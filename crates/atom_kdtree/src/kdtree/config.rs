//! BuildConfig - limits and policies for tree construction.

use crate::constants::{DEFAULT_MAX_DEPTH, DEFAULT_PARALLEL_THRESHOLD};

/// What to do when atoms cannot be separated on any axis.
///
/// Coincident (or fully overlapping) spheres land on both sides of every
/// midpoint split, so spatial partitioning alone never shrinks them below
/// [`LEAF_CAPACITY`](crate::LEAF_CAPACITY).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DegenerateFallback {
  /// Sort by coordinate on the current axis and split at the median.
  #[default]
  MedianSplit,
  /// Fail with [`KdTreeError::DegenerateInput`](crate::KdTreeError::DegenerateInput).
  Error,
}

/// Configuration for tree construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildConfig {
  /// Deepest node depth allowed (root = 0).
  pub max_depth: u32,

  /// Policy for inseparable atom sets.
  pub fallback: DegenerateFallback,

  /// Build sibling subtrees on the rayon pool.
  pub parallel: bool,

  /// Minimum member count at a node before its subtrees are forked.
  pub parallel_threshold: usize,
}

impl BuildConfig {
  /// Sequential build with median fallback.
  pub const DEFAULT: Self = Self {
    max_depth: DEFAULT_MAX_DEPTH,
    fallback: DegenerateFallback::MedianSplit,
    parallel: false,
    parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
  };

  /// Reject degenerate input instead of falling back.
  pub const STRICT: Self = Self {
    fallback: DegenerateFallback::Error,
    ..Self::DEFAULT
  };

  /// Copy with parallel construction enabled.
  pub fn with_parallel(mut self, parallel: bool) -> Self {
    self.parallel = parallel;
    self
  }

  /// Whether a node with `members` atoms should fork its children.
  #[inline]
  pub fn should_fork(&self, members: usize) -> bool {
    self.parallel && members >= self.parallel_threshold
  }
}

impl Default for BuildConfig {
  fn default() -> Self {
    Self::DEFAULT
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
