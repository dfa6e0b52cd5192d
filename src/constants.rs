/// Lanes in the wide (256-bit) vector.
pub const WIDE_LANES: usize = 8;
/// Lanes in the narrow (128-bit) vector.
pub const NARROW_LANES: usize = 4;
/// Absolute tolerance when cross-validating a tree pair.
pub const VERIFY_EPSILON: f64 = 1e-7;
/// Terminal values per packed depth-2 tree.
pub const PACKED_LEAVES: usize = 4;
/// Deepest tree the packed layout can express.
pub const PACKED_MAX_DEPTH: usize = 2;

pub const DEFAULT_SEED: u64 = 1234;
pub const DEFAULT_LOW: f32 = -0.1;
pub const DEFAULT_HIGH: f32 = 0.1;
pub const DEFAULT_ELEMENTS: usize = WIDE_LANES * 100_000;
pub const DEFAULT_FEATURES: usize = 256;
pub const DEFAULT_TREES: usize = 500_000;
pub const DEFAULT_TRIALS: usize = 200;
