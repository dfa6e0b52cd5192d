//! Branchless evaluation of decision stumps and depth-2 decision forests.
//!
//! Per-element branches are replaced by vector compare-and-select: the
//! [`select`] kernels evaluate batches of stumps, and [`tree::predict`]
//! evaluates two packed depth-2 trees per vector operation. Scalar reference
//! evaluators live next to each and [`verify`] cross-checks the forest paths.

// Modules
pub mod config;
pub mod constants;
pub mod data;
pub mod errors;
pub mod generate;
pub mod lanes;
pub mod node;
pub mod select;
pub mod tree;
pub mod verify;

// Individual classes, and functions
pub use config::GeneratorConfig;
pub use data::{SelectRecord, StumpData};
pub use errors::ForestError;
pub use select::{select_branching, select_masked, select_narrow, select_records, select_wide};
pub use tree::packed::{PackedForest, PackedTree};
pub use tree::predict::{paired_mask, rf_eval_paired, tree_eval_paired};
pub use tree::tree::{rf_eval, tree_eval, Forest, Tree};
pub use verify::{check_agreement, verify};
