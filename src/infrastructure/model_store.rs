// Classifier artifact loading and validation
use crate::application::fault_model::FaultModel;
use crate::domain::error::DiagnosisError;
use crate::domain::telemetry::FEATURE_COUNT;
use crate::infrastructure::fault_models::{DecisionTree, ForestModel, LogisticModel, TreeNode};
use anyhow::{bail, ensure, Context};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

const DEFAULT_THRESHOLD: f64 = 0.5;

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ModelArtifact {
    Forest(ForestArtifact),
    Logistic(LogisticArtifact),
}

#[derive(Debug, Deserialize)]
struct ForestArtifact {
    feature_count: usize,
    #[serde(default = "default_threshold")]
    threshold: f64,
    trees: Vec<TreeArtifact>,
}

#[derive(Debug, Deserialize)]
struct TreeArtifact {
    nodes: Vec<NodeArtifact>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum NodeArtifact {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        fault_probability: f64,
    },
}

#[derive(Debug, Deserialize)]
struct LogisticArtifact {
    feature_count: usize,
    #[serde(default = "default_threshold")]
    threshold: f64,
    weights: Vec<f64>,
    intercept: f64,
    #[serde(default)]
    means: Option<Vec<f64>>,
    #[serde(default)]
    scales: Option<Vec<f64>>,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

/// Load the classifier once at startup.
///
/// Any problem with the artifact is reported as `ModelUnavailable`.
pub fn load_model(path: &Path) -> Result<Arc<dyn FaultModel>, DiagnosisError> {
    let location = path.display().to_string();
    let model = read_model(path)
        .map_err(|e| DiagnosisError::model_unavailable(&location, format!("{:#}", e)))?;

    tracing::info!("Loaded classifier model from {}", location);
    Ok(model)
}

fn read_model(path: &Path) -> anyhow::Result<Arc<dyn FaultModel>> {
    let contents = std::fs::read_to_string(path).context("cannot read artifact")?;
    parse_model(&contents)
}

/// Parse and validate a JSON artifact
pub fn parse_model(contents: &str) -> anyhow::Result<Arc<dyn FaultModel>> {
    let artifact: ModelArtifact = serde_json::from_str(contents).context("malformed artifact")?;

    match artifact {
        ModelArtifact::Forest(forest) => Ok(Arc::new(build_forest(forest)?)),
        ModelArtifact::Logistic(logistic) => Ok(Arc::new(build_logistic(logistic)?)),
    }
}

fn check_common(feature_count: usize, threshold: f64) -> anyhow::Result<()> {
    ensure!(
        feature_count == FEATURE_COUNT,
        "model expects {} features, telemetry provides {}",
        feature_count,
        FEATURE_COUNT
    );
    ensure!(
        (0.0..=1.0).contains(&threshold),
        "decision threshold {} outside [0, 1]",
        threshold
    );
    Ok(())
}

fn build_forest(artifact: ForestArtifact) -> anyhow::Result<ForestModel> {
    check_common(artifact.feature_count, artifact.threshold)?;
    ensure!(!artifact.trees.is_empty(), "forest has no trees");

    let trees = artifact
        .trees
        .into_iter()
        .enumerate()
        .map(|(i, tree)| build_tree(tree).with_context(|| format!("tree {}", i)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(ForestModel::new(trees, artifact.threshold))
}

fn build_tree(artifact: TreeArtifact) -> anyhow::Result<DecisionTree> {
    ensure!(!artifact.nodes.is_empty(), "tree has no nodes");

    let count = artifact.nodes.len();
    let mut nodes = Vec::with_capacity(count);

    for (index, node) in artifact.nodes.into_iter().enumerate() {
        let node = match node {
            NodeArtifact::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if feature >= FEATURE_COUNT {
                    bail!("node {} splits on unknown feature {}", index, feature);
                }
                if !threshold.is_finite() {
                    bail!("node {} has a non-finite threshold", index);
                }
                // Forward-only children rule out cycles
                for child in [left, right] {
                    if child <= index || child >= count {
                        bail!("node {} has invalid child {}", index, child);
                    }
                }
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }
            }
            NodeArtifact::Leaf { fault_probability } => {
                if !(0.0..=1.0).contains(&fault_probability) {
                    bail!(
                        "node {} has leaf probability {} outside [0, 1]",
                        index,
                        fault_probability
                    );
                }
                TreeNode::Leaf { fault_probability }
            }
        };
        nodes.push(node);
    }

    Ok(DecisionTree::new(nodes))
}

fn build_logistic(artifact: LogisticArtifact) -> anyhow::Result<LogisticModel> {
    check_common(artifact.feature_count, artifact.threshold)?;

    let means = artifact.means.unwrap_or_else(|| vec![0.0; FEATURE_COUNT]);
    let scales = artifact.scales.unwrap_or_else(|| vec![1.0; FEATURE_COUNT]);

    for (name, values) in [
        ("weights", &artifact.weights),
        ("means", &means),
        ("scales", &scales),
    ] {
        if values.len() != FEATURE_COUNT {
            bail!(
                "{} has {} entries, expected {}",
                name,
                values.len(),
                FEATURE_COUNT
            );
        }
        ensure!(
            values.iter().all(|v| v.is_finite()),
            "{} contains a non-finite value",
            name
        );
    }
    ensure!(scales.iter().all(|s| *s != 0.0), "scales contains a zero entry");
    ensure!(artifact.intercept.is_finite(), "intercept is not finite");

    Ok(LogisticModel::new(
        artifact.weights,
        artifact.intercept,
        means,
        scales,
        artifact.threshold,
    ))
}
