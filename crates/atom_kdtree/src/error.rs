//! Error types for tree construction and serialization

use thiserror::Error;

/// Errors raised while building, flattening or exporting a tree.
///
/// All of them are construction-time errors on in-memory data; nothing is
/// retried or partially applied.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KdTreeError {
  /// No atoms were supplied
  #[error("atom set must be non-empty")]
  EmptyInput,

  /// An atom position has a NaN or infinite component
  #[error("atom {index} has a non-finite position")]
  NonFinitePosition { index: u32 },

  /// An atom radius is negative or not finite
  #[error("atom {index} has invalid radius {radius}")]
  InvalidRadius { index: u32, radius: f32 },

  /// A stable index lies outside `0..count`
  #[error("atom index {index} is outside 0..{count}")]
  IndexOutOfRange { index: u32, count: usize },

  /// Two atoms share a stable index
  #[error("atom index {index} appears more than once")]
  DuplicateIndex { index: u32 },

  /// Atoms could not be separated on any axis and the fallback is disabled
  #[error("degenerate input: {atoms} atoms could not be separated at depth {depth}")]
  DegenerateInput { depth: u32, atoms: usize },

  /// Recursion went past the configured depth ceiling
  #[error("tree depth exceeded the limit of {max_depth}")]
  DepthLimitExceeded { max_depth: u32 },

  /// The node count does not fit the signed 32-bit flat index
  #[error("tree has {0} nodes, more than the flat layout can address")]
  TooManyNodes(usize),

  /// An atom references a template missing from the template table
  #[error("atom {index} references unknown template {template}")]
  UnknownTemplate { index: u32, template: u16 },
}

/// Result type for tree operations
pub type KdTreeResult<T> = Result<T, KdTreeError>;
