//! Node
//!
//! Nodes of the scalar tree model, in two encodings: the tagged [`Node`] used
//! for evaluation, and the sentinel-encoded [`RawNode`] where a node with both
//! child ids equal to zero is a terminal carrying its value in `split_value`.
use crate::errors::ForestError;

/// Id of the root node, which doubles as "no child" in [`RawNode`].
pub const ROOT: usize = 0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Node {
    /// Internal node: go `left` when `features[feature] <= threshold`, else `right`.
    Split {
        left: usize,
        right: usize,
        feature: usize,
        threshold: f32,
    },
    /// Terminal node.
    Leaf { value: f32 },
}

impl Node {
    pub fn split(left: usize, right: usize, feature: usize, threshold: f32) -> Self {
        Node::Split {
            left,
            right,
            feature,
            threshold,
        }
    }

    pub fn leaf(value: f32) -> Self {
        Node::Leaf { value }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Sentinel-encoded node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawNode {
    pub left_child: usize,
    pub right_child: usize,
    pub split_feature: usize,
    pub split_value: f32,
}

impl RawNode {
    pub fn is_terminal(&self) -> bool {
        self.left_child == ROOT && self.right_child == ROOT
    }
}

impl TryFrom<RawNode> for Node {
    type Error = ForestError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        if raw.is_terminal() {
            return Ok(Node::leaf(raw.split_value));
        }
        if raw.left_child == ROOT || raw.right_child == ROOT {
            return Err(ForestError::MalformedTree(format!(
                "node has children ({}, {}), only one of them is the sentinel",
                raw.left_child, raw.right_child
            )));
        }
        Ok(Node::split(
            raw.left_child,
            raw.right_child,
            raw.split_feature,
            raw.split_value,
        ))
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        match node {
            Node::Split {
                left,
                right,
                feature,
                threshold,
            } => RawNode {
                left_child: left,
                right_child: right,
                split_feature: feature,
                split_value: threshold,
            },
            Node::Leaf { value } => RawNode {
                left_child: ROOT,
                right_child: ROOT,
                split_feature: 0,
                split_value: value,
            },
        }
    }
}
