//! Generate
//!
//! Seeded random inputs for benchmarks and tests. All randomness lives here;
//! the evaluators themselves are deterministic.
use crate::config::GeneratorConfig;
use crate::data::StumpData;
use crate::errors::ForestError;
use crate::tree::packed::PackedForest;
use crate::tree::tree::{Forest, Tree};
use log::debug;
use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A forest in both layouts plus the feature vector it is evaluated on.
#[derive(Clone, Debug)]
pub struct Workload {
    pub forest: Forest,
    pub packed: PackedForest,
    pub features: Vec<f32>,
}

fn values<R: Rng>(rng: &mut R, dist: &Uniform<f32>, n: usize) -> Vec<f32> {
    (0..n).map(|_| rng.sample(dist)).collect()
}

/// Four random stump buffers of `config.n_elements` values each.
pub fn stump_data(config: &GeneratorConfig) -> Result<StumpData, ForestError> {
    config.validate()?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let dist = Uniform::new(config.low, config.high);
    let a = values(&mut rng, &dist, config.n_elements);
    let b = values(&mut rng, &dist, config.n_elements);
    let x = values(&mut rng, &dist, config.n_elements);
    let y = values(&mut rng, &dist, config.n_elements);
    debug!("Generated {} stumps.", config.n_elements);
    StumpData::new(a, b, x, y)
}

pub fn feature_vector<R: Rng>(rng: &mut R, config: &GeneratorConfig) -> Vec<f32> {
    let dist = Uniform::new(config.low, config.high);
    values(rng, &dist, config.n_features)
}

/// One complete depth-2 tree with random splits and leaf values.
pub fn depth2_tree<R: Rng>(rng: &mut R, config: &GeneratorConfig) -> Tree {
    let dist = Uniform::new(config.low, config.high);
    let split = |rng: &mut R| (rng.gen_range(0..config.n_features), rng.sample(&dist));
    let root = split(rng);
    let left = split(rng);
    let right = split(rng);
    let leaves = [rng.sample(&dist), rng.sample(&dist), rng.sample(&dist), rng.sample(&dist)];
    Tree::depth2(root, left, right, leaves)
}

pub fn depth2_forest<R: Rng>(rng: &mut R, config: &GeneratorConfig) -> Forest {
    (0..config.n_trees).map(|_| depth2_tree(rng, config)).collect()
}

/// Build the forest, pack it once, then draw the feature vector.
pub fn workload(config: &GeneratorConfig) -> Result<Workload, ForestError> {
    config.validate()?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let forest = depth2_forest(&mut rng, config);
    let features = feature_vector(&mut rng, config);
    let packed = PackedForest::from_forest(&forest)?;
    Ok(Workload {
        forest,
        packed,
        features,
    })
}
