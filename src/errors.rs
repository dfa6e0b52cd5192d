//! Errors
//!
//! Custom error types used throughout the `branchless_forest` crate.
//! Evaluation kernels never return these; they are raised where buffers,
//! trees and configurations are built.
use thiserror::Error;

/// Errors that can occur while building inputs for the evaluators.
#[derive(Debug, Error, PartialEq)]
pub enum ForestError {
    /// Parallel buffers have different lengths.
    #[error("Buffer length mismatch, expected {expected} elements but {found} provided.")]
    LengthMismatch { expected: usize, found: usize },
    /// Buffer length is not a multiple of the vector width.
    #[error("Buffer length {len} is not a multiple of the lane width {width}.")]
    NotLaneMultiple { len: usize, width: usize },
    /// Tree is deeper than the packed layout can hold.
    #[error("Tree of depth {0} cannot be packed, the packed layout holds depth 2 at most.")]
    TreeTooDeep(usize),
    /// Tree structure is invalid.
    #[error("Malformed tree: {0}")]
    MalformedTree(String),
    /// Paired evaluation needs an even number of trees.
    #[error("Packed forest needs an even number of trees, {0} provided.")]
    OddTreeCount(usize),
    /// Scalar and vectorized evaluators disagree on a tree pair.
    #[error("Evaluators disagree on tree pair {pair}: scalar {scalar}, vectorized {vectorized}.")]
    Mismatch { pair: usize, scalar: f64, vectorized: f64 },
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
    /// Configuration could not be parsed.
    #[error("Unable to parse configuration: {0}")]
    Config(String),
}
