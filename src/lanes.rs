//! Lanes
//!
//! Fixed-width views over flat `f32` buffers, lane masks, and the horizontal
//! reductions shared by the select engine and the paired tree evaluator.
//!
//! Buffers are walked with `chunks_exact` and each chunk is copied into a lane
//! array before it becomes a vector, so callers never need to hand over
//! specially aligned memory.
use crate::constants::{NARROW_LANES, WIDE_LANES};
use wide::{f32x4, f32x8};

/// All bits set, a lane that is "true".
pub const LANE_TRUE: u32 = u32::MAX;
/// All bits clear, a lane that is "false".
pub const LANE_FALSE: u32 = 0;

/// Load one 8-lane group. `chunk` must hold exactly [`WIDE_LANES`] values.
#[inline(always)]
pub fn load_wide(chunk: &[f32]) -> f32x8 {
    let mut lanes = [0.0_f32; WIDE_LANES];
    lanes.copy_from_slice(chunk);
    f32x8::from(lanes)
}

/// Load one 4-lane group. `chunk` must hold exactly [`NARROW_LANES`] values.
#[inline(always)]
pub fn load_narrow(chunk: &[f32]) -> f32x4 {
    let mut lanes = [0.0_f32; NARROW_LANES];
    lanes.copy_from_slice(chunk);
    f32x4::from(lanes)
}

/// Reinterpret 32-bit lane patterns as a float vector usable as a blend mask.
#[inline(always)]
pub fn wide_mask(bits: [u32; WIDE_LANES]) -> f32x8 {
    f32x8::from(bits.map(f32::from_bits))
}

#[inline(always)]
pub fn narrow_mask(bits: [u32; NARROW_LANES]) -> f32x4 {
    f32x4::from(bits.map(f32::from_bits))
}

/// Bit patterns of every lane of a mask vector.
#[inline]
pub fn wide_mask_bits(mask: f32x8) -> [u32; WIDE_LANES] {
    mask.to_array().map(f32::to_bits)
}

/// Read lane `i` of an 8-lane vector.
#[inline]
pub fn wide_lane(v: f32x8, i: usize) -> f32 {
    v.to_array()[i]
}

/// Sum all lanes of an 8-lane vector.
///
/// Adjacent lanes are added pairwise, the pair sums of each half are
/// combined, and finally the two halves are added. The association order is
/// fixed so results are reproducible on every target.
#[inline(always)]
pub fn horizontal_add_wide(v: f32x8) -> f32 {
    let l = v.to_array();
    let low = (l[0] + l[1]) + (l[2] + l[3]);
    let high = (l[4] + l[5]) + (l[6] + l[7]);
    low + high
}

/// Sum all lanes of a 4-lane vector, pairwise.
#[inline(always)]
pub fn horizontal_add_narrow(v: f32x4) -> f32 {
    let l = v.to_array();
    (l[0] + l[1]) + (l[2] + l[3])
}
