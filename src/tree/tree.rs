use crate::errors::ForestError;
use crate::node::{Node, RawNode, ROOT};
use log::debug;

/// A binary decision tree rooted at node 0.
///
/// Construction checks that every child reference is in range, that the
/// root is never a child, and that no node is reachable twice, so evaluation
/// always terminates.
#[derive(Clone, Debug, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new(nodes: Vec<Node>) -> Result<Self, ForestError> {
        if nodes.is_empty() {
            return Err(ForestError::MalformedTree("tree has no nodes".to_string()));
        }
        let mut visited = vec![false; nodes.len()];
        let mut stack = vec![ROOT];
        while let Some(idx) = stack.pop() {
            if visited[idx] {
                return Err(ForestError::MalformedTree(format!("node {} is reachable twice", idx)));
            }
            visited[idx] = true;
            if let Node::Split { left, right, .. } = nodes[idx] {
                for child in [left, right] {
                    if child == ROOT || child >= nodes.len() {
                        return Err(ForestError::MalformedTree(format!(
                            "node {} points at invalid child {}",
                            idx, child
                        )));
                    }
                    stack.push(child);
                }
            }
        }
        Ok(Tree { nodes })
    }

    /// Complete depth-2 tree in the canonical 7-node layout: the root at 0,
    /// its children at 1 and 2, and the leaves left-left, left-right,
    /// right-left, right-right at 3 to 6.
    pub fn depth2(root: (usize, f32), left: (usize, f32), right: (usize, f32), leaves: [f32; 4]) -> Self {
        Tree {
            nodes: vec![
                Node::split(1, 2, root.0, root.1),
                Node::split(3, 4, left.0, left.1),
                Node::split(5, 6, right.0, right.1),
                Node::leaf(leaves[0]),
                Node::leaf(leaves[1]),
                Node::leaf(leaves[2]),
                Node::leaf(leaves[3]),
            ],
        }
    }

    /// Build from sentinel-encoded nodes.
    pub fn from_raw(raw: &[RawNode]) -> Result<Self, ForestError> {
        let nodes = raw.iter().map(|n| Node::try_from(*n)).collect::<Result<Vec<_>, _>>()?;
        Tree::new(nodes)
    }

    pub fn to_raw(&self) -> Vec<RawNode> {
        self.nodes.iter().map(|n| RawNode::from(*n)).collect()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Number of splits on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut stack = vec![(ROOT, 0)];
        while let Some((idx, d)) = stack.pop() {
            match self.nodes[idx] {
                Node::Split { left, right, .. } => {
                    stack.push((left, d + 1));
                    stack.push((right, d + 1));
                }
                Node::Leaf { .. } => depth = depth.max(d),
            }
        }
        depth
    }

    /// Walk from the root to a leaf and return its value.
    #[inline]
    pub fn eval(&self, features: &[f32]) -> f32 {
        let mut node_idx = ROOT;
        loop {
            match self.nodes[node_idx] {
                Node::Leaf { value } => return value,
                Node::Split {
                    left,
                    right,
                    feature,
                    threshold,
                } => {
                    node_idx = if features[feature] <= threshold { left } else { right };
                }
            }
        }
    }
}

/// Ordered collection of independently evaluated trees.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Forest {
    trees: Vec<Tree>,
}

impl Forest {
    pub fn new(trees: Vec<Tree>) -> Self {
        debug!("Built forest with {} trees.", trees.len());
        Forest { trees }
    }

    pub fn push(&mut self, tree: Tree) {
        self.trees.push(tree);
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tree> {
        self.trees.iter()
    }
}

impl FromIterator<Tree> for Forest {
    fn from_iter<I: IntoIterator<Item = Tree>>(iter: I) -> Self {
        Forest::new(iter.into_iter().collect())
    }
}

/// Value of the leaf `features` routes to.
pub fn tree_eval(tree: &Tree, features: &[f32]) -> f32 {
    tree.eval(features)
}

/// Average of [`tree_eval`] over the forest, in forest order.
/// An empty forest gives NaN.
pub fn rf_eval(forest: &Forest, features: &[f32]) -> f64 {
    let total: f64 = forest.iter().map(|t| f64::from(t.eval(features))).sum();
    total / forest.len() as f64
}
