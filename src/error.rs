//! Crate-level error types.

use std::fmt;

/// Errors produced when building an instance grid.
///
/// All variants are argument-validation failures detected before any
/// bucketing or output allocation; a failed build leaves no partial state.
/// Building is deterministic, so retrying a failed call cannot succeed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridError {
    /// Non-positive cell size with a nonzero instance count.
    InvalidCellSize {
        /// The rejected cell edge length.
        cell_size: f32,
    },
    /// Instance id array length does not match the instance count.
    InstanceLength {
        /// Expected length (`instance_count`).
        expected: usize,
        /// Actual length of the id array.
        actual: usize,
    },
    /// Transform array length does not match `instance_count * 16`.
    TransformLength {
        /// Expected length (`instance_count * 16`).
        expected: usize,
        /// Actual length of the transform array.
        actual: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellSize { cell_size } => {
                write!(f, "cell size must be positive, got {cell_size}")
            }
            Self::InstanceLength { expected, actual } => {
                write!(
                    f,
                    "instance id array length {actual} does not match \
                     instance count {expected}"
                )
            }
            Self::TransformLength { expected, actual } => {
                write!(
                    f,
                    "transform array length {actual} does not match \
                     instance count * 16 = {expected}"
                )
            }
        }
    }
}

impl std::error::Error for GridError {}
