//! Decision-tree ensembles exported as flat node arrays.
//!
//! Random forests store P(diabetic) in their leaves and average across
//! trees; gradient-boosted models store log-odds contributions and sum them
//! onto a base margin. Both share the same node layout.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::artifact::{file_label, read_json, sigmoid};
use super::BinaryClassifier;
use crate::error::ClassifierError;
use crate::models::{ScaledFeatures, FEATURE_COUNT};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// Go to `left` when `x[feature]` is below `threshold`, otherwise
    /// `right`. Averaged trees also send `x == threshold` left; additive
    /// trees send it right.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf { value: f64 },
}

/// A single tree. Node 0 is the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Aggregation {
    /// Leaves are probabilities; the ensemble averages them.
    Average,
    /// Leaves are margins; the ensemble sums them onto `base_margin`.
    Additive { base_margin: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub aggregation: Aggregation,
    pub trees: Vec<DecisionTree>,
}

impl DecisionTree {
    fn validate(&self, file: &str, index: usize) -> Result<(), ClassifierError> {
        let invalid = |reason: String| {
            ClassifierError::InvalidArtifact(file.into(), format!("tree {index}: {reason}"))
        };
        if self.nodes.is_empty() {
            return Err(invalid("no nodes".into()));
        }
        for (at, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(invalid(format!("node {at} splits on feature {feature}")));
                    }
                    if !threshold.is_finite() {
                        return Err(invalid(format!("node {at} has a non-finite threshold")));
                    }
                    // children must point forward, which also rules out cycles
                    for child in [*left, *right] {
                        if child <= at || child >= self.nodes.len() {
                            return Err(invalid(format!("node {at} has bad child {child}")));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(invalid(format!("leaf {at} is not finite")));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf. Assumes `validate` has passed.
    fn evaluate(
        &self,
        x: &[f64; FEATURE_COUNT],
        ties_left: bool,
    ) -> Result<f64, ClassifierError> {
        let mut at = 0;
        loop {
            match self.nodes.get(at) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = x.get(*feature).copied().ok_or(ClassifierError::FeatureCount {
                        expected: feature + 1,
                        actual: FEATURE_COUNT,
                    })?;
                    let go_left = if ties_left {
                        value <= *threshold
                    } else {
                        value < *threshold
                    };
                    at = if go_left { *left } else { *right };
                }
                None => {
                    return Err(ClassifierError::InvalidArtifact(
                        "tree".into(),
                        format!("node {at} out of range"),
                    ))
                }
            }
        }
    }
}

impl TreeEnsemble {
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let ensemble: Self = read_json(path)?;
        ensemble.validate(&file_label(path))?;
        Ok(ensemble)
    }

    pub fn validate(&self, file: &str) -> Result<(), ClassifierError> {
        if self.trees.is_empty() {
            return Err(ClassifierError::InvalidArtifact(file.into(), "no trees".into()));
        }
        if let Aggregation::Additive { base_margin } = self.aggregation {
            if !base_margin.is_finite() {
                return Err(ClassifierError::InvalidArtifact(
                    file.into(),
                    "base_margin is not finite".into(),
                ));
            }
        }
        for (index, tree) in self.trees.iter().enumerate() {
            tree.validate(file, index)?;
        }
        Ok(())
    }
}

impl BinaryClassifier for TreeEnsemble {
    fn predict_probability(&self, features: &ScaledFeatures) -> Result<f64, ClassifierError> {
        let x = features.values();
        // forests export `<=` splits, boosters export `<` splits
        let ties_left = matches!(self.aggregation, Aggregation::Average);
        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.evaluate(x, ties_left)?;
        }
        let probability = match self.aggregation {
            Aggregation::Average => total / self.trees.len() as f64,
            Aggregation::Additive { base_margin } => sigmoid(base_margin + total),
        };
        Ok(probability.clamp(0.0, 1.0))
    }
}
