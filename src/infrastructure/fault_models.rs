// Fault model implementations backed by exported classifier artifacts
use crate::application::fault_model::FaultModel;
use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    /// Samples with `features[feature] <= threshold` go left
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf { fault_probability: f64 },
}

/// One decision tree; node 0 is the root and children always point forward
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    fn leaf_probability(&self, features: &[f64]) -> Result<f64> {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(TreeNode::Leaf { fault_probability }) => return Ok(*fault_probability),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = features
                        .get(*feature)
                        .with_context(|| format!("feature {} missing from input", feature))?;
                    let next = if *value <= *threshold { *left } else { *right };
                    if next <= index {
                        anyhow::bail!("node {} points backwards to {}", index, next);
                    }
                    index = next;
                }
                None => anyhow::bail!("node index {} out of bounds", index),
            }
        }
    }
}

/// Ensemble of decision trees averaging their leaf probabilities
#[derive(Debug, Clone)]
pub struct ForestModel {
    trees: Vec<DecisionTree>,
    threshold: f64,
}

impl ForestModel {
    pub fn new(trees: Vec<DecisionTree>, threshold: f64) -> Self {
        Self { trees, threshold }
    }
}

impl FaultModel for ForestModel {
    // Ties go to the normal class
    fn predict(&self, features: &[f64]) -> Result<bool> {
        Ok(self.predict_probability(features)? > self.threshold)
    }

    fn predict_probability(&self, features: &[f64]) -> Result<f64> {
        if self.trees.is_empty() {
            anyhow::bail!("forest has no trees");
        }

        let mut total = 0.0;
        for (i, tree) in self.trees.iter().enumerate() {
            total += tree
                .leaf_probability(features)
                .with_context(|| format!("tree {}", i))?;
        }
        Ok(total / self.trees.len() as f64)
    }
}

/// Logistic regression over optionally standardised features
#[derive(Debug, Clone)]
pub struct LogisticModel {
    weights: Vec<f64>,
    intercept: f64,
    means: Vec<f64>,
    scales: Vec<f64>,
    threshold: f64,
}

impl LogisticModel {
    /// `means` and `scales` are zeros and ones when the artifact carries no standardisation
    pub fn new(
        weights: Vec<f64>,
        intercept: f64,
        means: Vec<f64>,
        scales: Vec<f64>,
        threshold: f64,
    ) -> Self {
        Self {
            weights,
            intercept,
            means,
            scales,
            threshold,
        }
    }

    fn decision_function(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.weights.len() {
            anyhow::bail!(
                "expected {} features, got {}",
                self.weights.len(),
                features.len()
            );
        }

        let z = features
            .iter()
            .zip(&self.weights)
            .zip(self.means.iter().zip(&self.scales))
            .map(|((x, w), (mean, scale))| w * (x - mean) / scale)
            .sum::<f64>()
            + self.intercept;
        Ok(z)
    }
}

impl FaultModel for LogisticModel {
    fn predict(&self, features: &[f64]) -> Result<bool> {
        Ok(self.predict_probability(features)? > self.threshold)
    }

    fn predict_probability(&self, features: &[f64]) -> Result<f64> {
        let z = self.decision_function(features)?;
        Ok(1.0 / (1.0 + (-z).exp()))
    }
}
