//! Additive regression-tree ensembles.
//!
//! Nodes live in a flat array per tree; node 0 is the root and every split
//! points at children stored after it, so traversal always terminates.

use serde::{Deserialize, Serialize};

use super::{FeatureFrame, ModelError, Regressor};

/// Split condition for a decision node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Split {
    /// Column index into the feature row.
    pub feature: usize,
    /// Go left if the feature value is below this.
    pub threshold: f64,
    pub left: usize,
    pub right: usize,
}

impl Split {
    #[inline]
    pub fn next(&self, row: &[f64]) -> usize {
        if row[self.feature] < self.threshold {
            self.left
        } else {
            self.right
        }
    }
}

/// A node in a decision tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Split(Split),
    Leaf(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    /// Walk from the root to a leaf.
    pub fn leaf_value(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf(value) => return *value,
                Node::Split(split) => idx = split.next(row),
            }
        }
    }

    fn validate(&self, tree: usize, n_features: usize) -> Result<(), ModelError> {
        if self.nodes.is_empty() {
            return Err(ModelError::invalid(format!("tree {tree} has no nodes")));
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            let Node::Split(split) = node else { continue };
            if split.feature >= n_features {
                return Err(ModelError::invalid(format!(
                    "tree {tree} node {idx} splits on feature {} of {n_features}",
                    split.feature
                )));
            }
            for child in [split.left, split.right] {
                if child <= idx || child >= self.nodes.len() {
                    return Err(ModelError::invalid(format!(
                        "tree {tree} node {idx} has out-of-order child {child}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Sum of tree outputs on top of a base score. Single output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub base_score: f64,
    pub trees: Vec<Tree>,
}

impl TreeEnsemble {
    pub fn validate(&self) -> Result<(), ModelError> {
        let n_features = self.feature_names.len();
        self.trees
            .iter()
            .enumerate()
            .try_for_each(|(i, tree)| tree.validate(i, n_features))
    }
}

impl Regressor for TreeEnsemble {
    fn predict(&self, frame: &FeatureFrame) -> Result<Vec<Vec<f64>>, ModelError> {
        frame.check_columns(&self.feature_names)?;

        Ok(frame
            .rows()
            .iter()
            .map(|row| {
                let score = self.trees.iter().map(|t| t.leaf_value(row)).sum::<f64>();
                vec![self.base_score + score]
            })
            .collect())
    }
}
