//! Verify
//!
//! Cross-validation of the paired evaluator against the scalar walker. It
//! gates benchmarking: timings from evaluators that disagree are worthless,
//! so [`verify`] aborts the process on the first mismatch.
use crate::constants::VERIFY_EPSILON;
use crate::errors::ForestError;
use crate::tree::packed::PackedForest;
use crate::tree::predict::tree_eval_paired;
use crate::tree::tree::{tree_eval, Forest};
use log::{error, info};

/// Compare every tree pair `(2i, 2i + 1)` of both layouts.
///
/// The scalar side adds the two leaf values in `f32`, like the vector
/// reduction does, and the sums may differ by at most [`VERIFY_EPSILON`].
pub fn check_agreement(forest: &Forest, packed: &PackedForest, features: &[f32]) -> Result<(), ForestError> {
    if forest.len() != packed.len() {
        return Err(ForestError::LengthMismatch {
            expected: forest.len(),
            found: packed.len(),
        });
    }
    for (pair, (trees, (a, b))) in forest.trees().chunks_exact(2).zip(packed.pairs()).enumerate() {
        let scalar = f64::from(tree_eval(&trees[0], features) + tree_eval(&trees[1], features));
        let vectorized = f64::from(tree_eval_paired(a, b, features));
        if (scalar - vectorized).abs() > VERIFY_EPSILON {
            return Err(ForestError::Mismatch {
                pair,
                scalar,
                vectorized,
            });
        }
    }
    info!("Scalar and paired evaluators agree on {} trees.", forest.len());
    Ok(())
}

/// Like [`check_agreement`], but a mismatch terminates the process.
pub fn verify(forest: &Forest, packed: &PackedForest, features: &[f32]) {
    if let Err(e) = check_agreement(forest, packed, features) {
        error!("{}", e);
        std::process::abort();
    }
}
