//! Generator Configuration
//!
//! Parameters for building reproducible workloads: stump batches, forests of
//! depth-2 trees, and the shared feature vector. Missing fields take the
//! defaults of the reference workload.
use crate::constants::{
    DEFAULT_ELEMENTS, DEFAULT_FEATURES, DEFAULT_HIGH, DEFAULT_LOW, DEFAULT_SEED, DEFAULT_TREES, WIDE_LANES,
};
use crate::errors::ForestError;
use serde::{Deserialize, Serialize};

fn default_seed() -> u64 {
    DEFAULT_SEED
}
fn default_low() -> f32 {
    DEFAULT_LOW
}
fn default_high() -> f32 {
    DEFAULT_HIGH
}
fn default_elements() -> usize {
    DEFAULT_ELEMENTS
}
fn default_features() -> usize {
    DEFAULT_FEATURES
}
fn default_trees() -> usize {
    DEFAULT_TREES
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GeneratorConfig {
    /// Seed of the random number generator.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Inclusive lower bound of every generated value.
    #[serde(default = "default_low")]
    pub low: f32,
    /// Exclusive upper bound of every generated value.
    #[serde(default = "default_high")]
    pub high: f32,
    /// Length of each stump buffer.
    #[serde(default = "default_elements")]
    pub n_elements: usize,
    /// Length of the feature vector, split features are drawn below it.
    #[serde(default = "default_features")]
    pub n_features: usize,
    /// Trees in the generated forest.
    #[serde(default = "default_trees")]
    pub n_trees: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            seed: default_seed(),
            low: default_low(),
            high: default_high(),
            n_elements: default_elements(),
            n_features: default_features(),
            n_trees: default_trees(),
        }
    }
}

impl GeneratorConfig {
    /// Parse a JSON configuration and validate it.
    pub fn from_json(json_str: &str) -> Result<Self, ForestError> {
        let config: GeneratorConfig =
            serde_json::from_str(json_str).map_err(|e| ForestError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ForestError> {
        serde_json::to_string(self).map_err(|e| ForestError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ForestError> {
        if !(self.low.is_finite() && self.high.is_finite() && self.low < self.high) {
            return Err(ForestError::InvalidParameter(
                "low, high".to_string(),
                "finite values with low < high".to_string(),
                format!("[{}, {})", self.low, self.high),
            ));
        }
        if self.n_elements % WIDE_LANES != 0 {
            return Err(ForestError::InvalidParameter(
                "n_elements".to_string(),
                format!("a multiple of {}", WIDE_LANES),
                self.n_elements.to_string(),
            ));
        }
        if self.n_features == 0 {
            return Err(ForestError::InvalidParameter(
                "n_features".to_string(),
                "a positive count".to_string(),
                self.n_features.to_string(),
            ));
        }
        if self.n_trees % 2 != 0 {
            return Err(ForestError::InvalidParameter(
                "n_trees".to_string(),
                "an even count".to_string(),
                self.n_trees.to_string(),
            ));
        }
        Ok(())
    }

    pub fn set_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn set_range(mut self, low: f32, high: f32) -> Self {
        self.low = low;
        self.high = high;
        self
    }

    pub fn set_n_elements(mut self, n_elements: usize) -> Self {
        self.n_elements = n_elements;
        self
    }

    pub fn set_n_features(mut self, n_features: usize) -> Self {
        self.n_features = n_features;
        self
    }

    pub fn set_n_trees(mut self, n_trees: usize) -> Self {
        self.n_trees = n_trees;
        self
    }
}
