//! Select
//!
//! Branchless evaluation of decision stumps. Every stump picks `x[i]` when
//! `a[i] <= b[i]` and `y[i]` otherwise; the kernels below compute the mean
//! of the picked values without a data-dependent branch.
//!
//! The vector kernels build the *inverse* condition `a > b` as a lane mask
//! and blend with it, since a blend takes its second operand where the mask
//! is set. The comparison is ordered: a NaN operand leaves the lane unset and
//! the stump keeps `x`.
//!
//! # Preconditions
//!
//! The kernels do not check their inputs. All buffers must share one length
//! and that length must be a multiple of the kernel's group width
//! ([`WIDE_LANES`] for [`select_wide`], [`NARROW_LANES`] for the others).
//! Debug builds assert this; release builds silently ignore a trailing
//! partial group. An empty input returns NaN (zero divided by zero).
use crate::constants::{NARROW_LANES, WIDE_LANES};
use crate::data::SelectRecord;
use crate::lanes::{horizontal_add_narrow, horizontal_add_wide, load_narrow, load_wide, narrow_mask};
use wide::{f32x4, f32x8, CmpGt};

/// Branching reference: one conditional per stump.
pub fn select_branching(a: &[f32], b: &[f32], x: &[f32], y: &[f32]) -> f32 {
    let count = a.len();
    let mut total = 0.0_f32;
    for i in 0..count {
        if a[i] <= b[i] {
            total += x[i];
        } else {
            total += y[i];
        }
    }
    total / count as f32
}

/// Mean of the selected values, 8 lanes per step.
pub fn select_wide(a: &[f32], b: &[f32], x: &[f32], y: &[f32]) -> f32 {
    let count = a.len();
    debug_assert_eq!(count % WIDE_LANES, 0);
    debug_assert!(b.len() == count && x.len() == count && y.len() == count);

    let mut total = f32x8::ZERO;
    let groups = a
        .chunks_exact(WIDE_LANES)
        .zip(b.chunks_exact(WIDE_LANES))
        .zip(x.chunks_exact(WIDE_LANES))
        .zip(y.chunks_exact(WIDE_LANES));
    for (((a, b), x), y) in groups {
        let mask = load_wide(a).cmp_gt(load_wide(b));
        total = total + mask.blend(load_wide(y), load_wide(x));
    }
    horizontal_add_wide(total) / count as f32
}

/// Mean of the selected values, 4 lanes per step.
pub fn select_narrow(a: &[f32], b: &[f32], x: &[f32], y: &[f32]) -> f32 {
    let count = a.len();
    debug_assert_eq!(count % NARROW_LANES, 0);
    debug_assert!(b.len() == count && x.len() == count && y.len() == count);

    let mut total = f32x4::ZERO;
    let groups = a
        .chunks_exact(NARROW_LANES)
        .zip(b.chunks_exact(NARROW_LANES))
        .zip(x.chunks_exact(NARROW_LANES))
        .zip(y.chunks_exact(NARROW_LANES));
    for (((a, b), x), y) in groups {
        let mask = load_narrow(a).cmp_gt(load_narrow(b));
        total = total + mask.blend(load_narrow(y), load_narrow(x));
    }
    horizontal_add_narrow(total) / count as f32
}

/// Element-wise select with a precomputed mask.
///
/// Writes `second[i]` into `out[i]` where `mask[i]` is all ones and
/// `first[i]` where it is all zeros. Mask lanes must be one of those two
/// patterns. Nothing is reduced.
pub fn select_masked(first: &[f32], second: &[f32], mask: &[u32], out: &mut [f32]) {
    let count = first.len();
    debug_assert_eq!(count % NARROW_LANES, 0);
    debug_assert!(second.len() == count && mask.len() == count && out.len() >= count);

    let groups = first
        .chunks_exact(NARROW_LANES)
        .zip(second.chunks_exact(NARROW_LANES))
        .zip(mask.chunks_exact(NARROW_LANES))
        .zip(out.chunks_exact_mut(NARROW_LANES));
    for (((first, second), mask), out) in groups {
        let mut bits = [0_u32; NARROW_LANES];
        bits.copy_from_slice(mask);
        let res = narrow_mask(bits).blend(load_narrow(second), load_narrow(first));
        out.copy_from_slice(&res.to_array());
    }
}

/// Mean of the selected values over packed records.
///
/// Same result as [`select_narrow`] on the buffers the records were built
/// from, but each step reads a single contiguous 48-byte record.
pub fn select_records(records: &[SelectRecord]) -> f32 {
    let count = records.len() * NARROW_LANES;
    let mut total = f32x4::ZERO;
    for record in records {
        let mask = narrow_mask(record.mask);
        total = total + mask.blend(f32x4::from(record.second), f32x4::from(record.first));
    }
    horizontal_add_narrow(total) / count as f32
}
