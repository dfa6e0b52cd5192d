//! Paired evaluation of packed depth-2 trees.
//!
//! Two trees share one 8-lane vector, four lanes each. Lane `k` of a tree's
//! half stands for its leaf `k` (left-left, left-right, right-left,
//! right-right). The root comparison is broadcast across the tree's four
//! lanes, the child comparisons across pairs of lanes, and each level's
//! right-branch lanes take the complement of the `<=` mask. ANDing both
//! levels leaves exactly one lane set per tree, NaN features included, which
//! is the same leaf the scalar walk reaches.
use super::packed::{PackedForest, PackedTree, LEFT_SPLIT, RIGHT_SPLIT, ROOT_SPLIT};
use crate::constants::WIDE_LANES;
use crate::lanes::{horizontal_add_wide, wide_mask, wide_mask_bits, LANE_FALSE as F, LANE_TRUE as T};
use wide::{f32x8, CmpLe};

/// Lanes taken by a root's right branch.
const ROOT_RIGHT: [u32; WIDE_LANES] = [F, F, T, T, F, F, T, T];
/// Lanes taken by a child split's right branch.
const CHILD_RIGHT: [u32; WIDE_LANES] = [F, T, F, T, F, T, F, T];

#[inline(always)]
fn paired_mask_vector(a: &PackedTree, b: &PackedTree, features: &[f32]) -> f32x8 {
    let value = |t: &PackedTree, slot: usize| features[t.features[slot] as usize];

    let (ra, rb) = (value(a, ROOT_SPLIT), value(b, ROOT_SPLIT));
    let (ta, tb) = (a.thresholds[ROOT_SPLIT], b.thresholds[ROOT_SPLIT]);
    let root_values = f32x8::from([ra, ra, ra, ra, rb, rb, rb, rb]);
    let root_thresholds = f32x8::from([ta, ta, ta, ta, tb, tb, tb, tb]);
    let root_mask = root_values.cmp_le(root_thresholds) ^ wide_mask(ROOT_RIGHT);

    let (la, lb) = (value(a, LEFT_SPLIT), value(b, LEFT_SPLIT));
    let (ca, cb) = (value(a, RIGHT_SPLIT), value(b, RIGHT_SPLIT));
    let child_values = f32x8::from([la, la, ca, ca, lb, lb, cb, cb]);
    let child_thresholds = f32x8::from([
        a.thresholds[LEFT_SPLIT],
        a.thresholds[LEFT_SPLIT],
        a.thresholds[RIGHT_SPLIT],
        a.thresholds[RIGHT_SPLIT],
        b.thresholds[LEFT_SPLIT],
        b.thresholds[LEFT_SPLIT],
        b.thresholds[RIGHT_SPLIT],
        b.thresholds[RIGHT_SPLIT],
    ]);
    let child_mask = child_values.cmp_le(child_thresholds) ^ wide_mask(CHILD_RIGHT);

    root_mask & child_mask
}

/// Combined leaf mask of a tree pair: lanes 0-3 belong to `a`, 4-7 to `b`.
pub fn paired_mask(a: &PackedTree, b: &PackedTree, features: &[f32]) -> [u32; WIDE_LANES] {
    wide_mask_bits(paired_mask_vector(a, b, features))
}

/// Sum of the leaf values `a` and `b` route `features` to.
#[inline]
pub fn tree_eval_paired(a: &PackedTree, b: &PackedTree, features: &[f32]) -> f32 {
    let mask = paired_mask_vector(a, b, features);
    let [a0, a1, a2, a3] = a.leaves;
    let [b0, b1, b2, b3] = b.leaves;
    let leaves = f32x8::from([a0, a1, a2, a3, b0, b1, b2, b3]);
    horizontal_add_wide(mask.blend(leaves, f32x8::ZERO))
}

/// Average leaf value over the forest, two trees per step.
/// An empty forest gives NaN.
pub fn rf_eval_paired(forest: &PackedForest, features: &[f32]) -> f64 {
    let total: f64 = forest
        .pairs()
        .map(|(a, b)| f64::from(tree_eval_paired(a, b, features)))
        .sum();
    total / forest.len() as f64
}
