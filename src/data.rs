//! Data
//!
//! Input layouts for the select engine: four parallel buffers describing a
//! batch of decision stumps, and the packed record layout that co-locates the
//! two candidate values with their precomputed mask.
use crate::constants::{NARROW_LANES, WIDE_LANES};
use crate::errors::ForestError;
use crate::lanes::{LANE_FALSE, LANE_TRUE};

/// One 4-lane group of a stump batch: both candidates plus the blend mask.
///
/// A lane of `mask` that is [`LANE_TRUE`] selects `second`, a lane that is
/// [`LANE_FALSE`] selects `first`. No other bit patterns are allowed.
#[repr(C, align(16))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectRecord {
    pub first: [f32; NARROW_LANES],
    pub second: [f32; NARROW_LANES],
    pub mask: [u32; NARROW_LANES],
}

const _: () = assert!(std::mem::size_of::<SelectRecord>() == 48);

/// A batch of decision stumps stored as four parallel buffers.
///
/// Stump `i` evaluates to `x[i]` when `a[i] <= b[i]` and to `y[i]` otherwise.
/// All buffers share one length, and that length is a multiple of
/// [`WIDE_LANES`] so every select variant can consume it.
#[derive(Debug, Clone, PartialEq)]
pub struct StumpData {
    a: Vec<f32>,
    b: Vec<f32>,
    x: Vec<f32>,
    y: Vec<f32>,
}

impl StumpData {
    pub fn new(a: Vec<f32>, b: Vec<f32>, x: Vec<f32>, y: Vec<f32>) -> Result<Self, ForestError> {
        let expected = a.len();
        for found in [b.len(), x.len(), y.len()] {
            if found != expected {
                return Err(ForestError::LengthMismatch { expected, found });
            }
        }
        if expected % WIDE_LANES != 0 {
            return Err(ForestError::NotLaneMultiple {
                len: expected,
                width: WIDE_LANES,
            });
        }
        Ok(StumpData { a, b, x, y })
    }

    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    pub fn a(&self) -> &[f32] {
        &self.a
    }

    pub fn b(&self) -> &[f32] {
        &self.b
    }

    pub fn x(&self) -> &[f32] {
        &self.x
    }

    pub fn y(&self) -> &[f32] {
        &self.y
    }

    /// Explicit blend mask for the batch: `a[i] > b[i]` per lane.
    ///
    /// The comparison is ordered, so a NaN operand gives a false lane.
    pub fn mask(&self) -> Vec<u32> {
        self.a
            .iter()
            .zip(self.b.iter())
            .map(|(a, b)| if a > b { LANE_TRUE } else { LANE_FALSE })
            .collect()
    }

    /// Repack the batch as [`SelectRecord`]s, one per 4-lane group.
    pub fn records(&self) -> Vec<SelectRecord> {
        let mask = self.mask();
        self.x
            .chunks_exact(NARROW_LANES)
            .zip(self.y.chunks_exact(NARROW_LANES))
            .zip(mask.chunks_exact(NARROW_LANES))
            .map(|((x, y), m)| {
                let mut record = SelectRecord {
                    first: [0.0; NARROW_LANES],
                    second: [0.0; NARROW_LANES],
                    mask: [LANE_FALSE; NARROW_LANES],
                };
                record.first.copy_from_slice(x);
                record.second.copy_from_slice(y);
                record.mask.copy_from_slice(m);
                record
            })
            .collect()
    }
}
