use super::tree::{Forest, Tree};
use crate::constants::{PACKED_LEAVES, PACKED_MAX_DEPTH};
use crate::errors::ForestError;
use crate::node::{Node, ROOT};
use log::debug;

/// Slot of the root split in [`PackedTree::features`] and [`PackedTree::thresholds`].
pub const ROOT_SPLIT: usize = 0;
/// Slot of the split under the root's left branch.
pub const LEFT_SPLIT: usize = 1;
/// Slot of the split under the root's right branch.
pub const RIGHT_SPLIT: usize = 2;

/// One complete depth-2 tree flattened into a fixed record.
///
/// `leaves` are ordered left-left, left-right, right-left, right-right,
/// which is also the lane order of the paired evaluator's masks.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PackedTree {
    pub features: [u32; 3],
    pub thresholds: [f32; 3],
    pub leaves: [f32; PACKED_LEAVES],
}

impl PackedTree {
    /// Tree that returns `value` for every input.
    pub fn constant(value: f32) -> Self {
        PackedTree {
            features: [0; 3],
            thresholds: [0.0; 3],
            leaves: [value; PACKED_LEAVES],
        }
    }

    /// Pack a scalar tree of depth 2 or less.
    ///
    /// A leaf found above the bottom level is replicated down into the
    /// missing split, whose both leaves then carry the same value, so the
    /// packed tree returns what the scalar tree returns for every input.
    pub fn from_tree(tree: &Tree) -> Result<Self, ForestError> {
        let depth = tree.depth();
        if depth > PACKED_MAX_DEPTH {
            return Err(ForestError::TreeTooDeep(depth));
        }
        let nodes = tree.nodes();
        match nodes[ROOT] {
            Node::Leaf { value } => Ok(PackedTree::constant(value)),
            Node::Split {
                left,
                right,
                feature,
                threshold,
            } => {
                let (left_feature, left_threshold, [ll, lr]) = pack_child(nodes, left)?;
                let (right_feature, right_threshold, [rl, rr]) = pack_child(nodes, right)?;
                Ok(PackedTree {
                    features: [to_feature(feature)?, left_feature, right_feature],
                    thresholds: [threshold, left_threshold, right_threshold],
                    leaves: [ll, lr, rl, rr],
                })
            }
        }
    }

    /// Branching evaluation of the packed record.
    pub fn eval(&self, features: &[f32]) -> f32 {
        let go_left = |slot: usize| features[self.features[slot] as usize] <= self.thresholds[slot];
        if go_left(ROOT_SPLIT) {
            if go_left(LEFT_SPLIT) {
                self.leaves[0]
            } else {
                self.leaves[1]
            }
        } else if go_left(RIGHT_SPLIT) {
            self.leaves[2]
        } else {
            self.leaves[3]
        }
    }
}

fn to_feature(feature: usize) -> Result<u32, ForestError> {
    u32::try_from(feature)
        .map_err(|_| ForestError::MalformedTree(format!("feature index {} does not fit the packed layout", feature)))
}

fn leaf_value(nodes: &[Node], idx: usize) -> Result<f32, ForestError> {
    match nodes[idx] {
        Node::Leaf { value } => Ok(value),
        Node::Split { .. } => Err(ForestError::MalformedTree(format!(
            "node {} should be a leaf at depth 2",
            idx
        ))),
    }
}

fn pack_child(nodes: &[Node], idx: usize) -> Result<(u32, f32, [f32; 2]), ForestError> {
    match nodes[idx] {
        Node::Leaf { value } => Ok((0, 0.0, [value, value])),
        Node::Split {
            left,
            right,
            feature,
            threshold,
        } => Ok((
            to_feature(feature)?,
            threshold,
            [leaf_value(nodes, left)?, leaf_value(nodes, right)?],
        )),
    }
}

/// Packed trees consumed two at a time by the paired evaluator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackedForest {
    trees: Vec<PackedTree>,
}

impl PackedForest {
    pub fn new(trees: Vec<PackedTree>) -> Result<Self, ForestError> {
        if trees.len() % 2 != 0 {
            return Err(ForestError::OddTreeCount(trees.len()));
        }
        Ok(PackedForest { trees })
    }

    /// Order-preserving conversion of a scalar forest.
    pub fn from_forest(forest: &Forest) -> Result<Self, ForestError> {
        let trees = forest.iter().map(PackedTree::from_tree).collect::<Result<Vec<_>, _>>()?;
        debug!("Packed {} trees for paired evaluation.", trees.len());
        PackedForest::new(trees)
    }

    pub fn trees(&self) -> &[PackedTree] {
        &self.trees
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Trees `(2i, 2i + 1)` for every `i`.
    pub fn pairs(&self) -> impl Iterator<Item = (&PackedTree, &PackedTree)> {
        self.trees.chunks_exact(2).map(|pair| (&pair[0], &pair[1]))
    }
}
