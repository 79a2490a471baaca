//! Artifact adapter: loads the trained classifier and label encoders.
//!
//! The training pipeline exports three JSON files into the model directory:
//!
//! - `diabetes_model.json`: the classifier (`logistic` or `forest`)
//! - `le_gender.json`, `le_smoking.json`: fitted label vocabularies
//!
//! If the directory also holds a `manifest.json` mapping file names to SHA-256
//! digests, every artifact must be listed there and match its digest.
//!
//! Artifacts are read once at startup and never reloaded.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{EncoderError, LabelEncoder, PredictionResult, FEATURE_NAMES};
use crate::ports::{Classifier, ClassifierError};

pub const MODEL_FILE: &str = "diabetes_model.json";
pub const GENDER_ENCODER_FILE: &str = "le_gender.json";
pub const SMOKING_ENCODER_FILE: &str = "le_smoking.json";
pub const MANIFEST_FILE: &str = "manifest.json";

/// Error type for artifact loading.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{file} is not listed in {MANIFEST_FILE}")]
    Unlisted { file: String },

    #[error("SHA-256 digest mismatch for {file}")]
    DigestMismatch { file: String },

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error(transparent)]
    Encoder(#[from] EncoderError),
}

/// Standard scaler parameters applied before the linear model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// One node of a binary decision tree.
///
/// Samples with `x[feature] <= threshold` go to `left`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        /// Class weights `[negative, positive]`
        value: [f64; 2],
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

/// Classifier as exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExportedModel {
    Logistic {
        feature_names: Vec<String>,
        #[serde(default)]
        scaler: Option<Scaler>,
        coefficients: Vec<f64>,
        intercept: f64,
    },
    Forest {
        feature_names: Vec<String>,
        trees: Vec<DecisionTree>,
    },
}

impl ExportedModel {
    fn feature_names(&self) -> &[String] {
        match self {
            Self::Logistic { feature_names, .. } | Self::Forest { feature_names, .. } => {
                feature_names
            }
        }
    }

    fn validate(&self) -> Result<(), ArtifactError> {
        let invalid = |msg: String| Err(ArtifactError::InvalidModel(msg));
        let n = self.feature_names().len();
        if n == 0 {
            return invalid("model has no features".into());
        }

        match self {
            Self::Logistic {
                scaler,
                coefficients,
                intercept,
                ..
            } => {
                if coefficients.len() != n {
                    return invalid(format!(
                        "{} coefficients for {n} features",
                        coefficients.len()
                    ));
                }
                if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    return invalid("non-finite coefficient".into());
                }
                if let Some(scaler) = scaler {
                    if scaler.mean.len() != n || scaler.scale.len() != n {
                        return invalid("scaler lengths do not match feature count".into());
                    }
                    if scaler.mean.iter().any(|m| !m.is_finite())
                        || scaler.scale.iter().any(|s| !s.is_finite() || *s <= 0.0)
                    {
                        return invalid("scaler must be finite with positive scale".into());
                    }
                }
            }
            Self::Forest { trees, .. } => {
                if trees.is_empty() {
                    return invalid("forest has no trees".into());
                }
                for (t, tree) in trees.iter().enumerate() {
                    if tree.nodes.is_empty() {
                        return invalid(format!("tree {t} has no nodes"));
                    }
                    let len = tree.nodes.len();
                    for (i, node) in tree.nodes.iter().enumerate() {
                        match node {
                            TreeNode::Split {
                                feature,
                                threshold,
                                left,
                                right,
                            } => {
                                if *feature >= n || !threshold.is_finite() {
                                    return invalid(format!("tree {t} node {i}: bad split"));
                                }
                                // Children after their parent rules out cycles.
                                if *left <= i || *right <= i || *left >= len || *right >= len {
                                    return invalid(format!("tree {t} node {i}: bad child index"));
                                }
                            }
                            TreeNode::Leaf { value } => {
                                let total = value[0] + value[1];
                                if value.iter().any(|v| !v.is_finite() || *v < 0.0) || total <= 0.0
                                {
                                    return invalid(format!("tree {t} node {i}: bad leaf weights"));
                                }
                            }
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

/// A validated classifier ready for evaluation.
#[derive(Debug, Clone)]
pub struct TrainedClassifier {
    model: ExportedModel,
}

impl TrainedClassifier {
    /// Wrap an exported model after checking its structure.
    ///
    /// # Errors
    /// Returns `ArtifactError::InvalidModel` if parameter shapes are inconsistent.
    pub fn from_model(model: ExportedModel) -> Result<Self, ArtifactError> {
        model.validate()?;
        Ok(Self { model })
    }

    fn positive_probability(&self, x: &[f64]) -> f64 {
        match &self.model {
            ExportedModel::Logistic {
                scaler,
                coefficients,
                intercept,
                ..
            } => {
                let logit = coefficients
                    .iter()
                    .enumerate()
                    .map(|(i, w)| {
                        let z = match scaler {
                            Some(s) => (x[i] - s.mean[i]) / s.scale[i],
                            None => x[i],
                        };
                        w * z
                    })
                    .sum::<f64>()
                    + intercept;
                1.0 / (1.0 + (-logit).exp())
            }
            ExportedModel::Forest { trees, .. } => {
                let total: f64 = trees.iter().map(|tree| leaf_probability(tree, x)).sum();
                total / trees.len() as f64
            }
        }
    }
}

fn leaf_probability(tree: &DecisionTree, x: &[f64]) -> f64 {
    let mut idx = 0;
    loop {
        match &tree.nodes[idx] {
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                idx = if x[*feature] <= *threshold { *left } else { *right };
            }
            TreeNode::Leaf { value } => return value[1] / (value[0] + value[1]),
        }
    }
}

impl Classifier for TrainedClassifier {
    fn feature_names(&self) -> &[String] {
        self.model.feature_names()
    }

    fn predict(&self, features: &[f64]) -> Result<PredictionResult, ClassifierError> {
        let names = self.model.feature_names();
        if features.len() != names.len() {
            return Err(ClassifierError::ShapeMismatch {
                expected: names.len(),
                got: features.len(),
            });
        }
        if let Some(column) = features.iter().position(|v| !v.is_finite()) {
            return Err(ClassifierError::NonFinite {
                column,
                name: names[column].clone(),
            });
        }

        Ok(PredictionResult::from_probability(
            self.positive_probability(features),
        ))
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    files: BTreeMap<String, String>,
}

/// Everything the prediction panel needs, loaded from one directory.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub classifier: TrainedClassifier,
    pub gender: LabelEncoder,
    pub smoking: LabelEncoder,
}

impl Artifacts {
    /// Load and verify the classifier and both encoders.
    ///
    /// # Errors
    /// Returns `ArtifactError` if any file is missing, malformed, fails its
    /// manifest digest, or if the classifier's columns are not the expected
    /// training order.
    pub fn load(model_dir: &Path) -> Result<Self, ArtifactError> {
        let manifest = read_manifest(model_dir)?;
        if manifest.is_none() {
            tracing::warn!("No {} in {:?}; artifact digests not verified", MANIFEST_FILE, model_dir);
        }

        let model: ExportedModel = read_json(model_dir, MODEL_FILE, manifest.as_ref())?;
        let columns = model.feature_names();
        if columns.len() != FEATURE_NAMES.len()
            || columns.iter().zip(FEATURE_NAMES).any(|(a, b)| a != b)
        {
            return Err(ArtifactError::InvalidModel(format!(
                "expected columns {FEATURE_NAMES:?}, artifact has {columns:?}"
            )));
        }
        let classifier = TrainedClassifier::from_model(model)?;

        let gender = read_encoder(model_dir, GENDER_ENCODER_FILE, "gender", manifest.as_ref())?;
        let smoking = read_encoder(
            model_dir,
            SMOKING_ENCODER_FILE,
            "smoking_history",
            manifest.as_ref(),
        )?;

        tracing::info!(
            "Loaded artifacts from {:?} ({} gender classes, {} smoking classes)",
            model_dir,
            gender.classes().len(),
            smoking.classes().len()
        );

        Ok(Self {
            classifier,
            gender,
            smoking,
        })
    }
}

fn read_manifest(dir: &Path) -> Result<Option<Manifest>, ArtifactError> {
    let path = dir.join(MANIFEST_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let bytes = std::fs::read(&path).map_err(|source| ArtifactError::Io {
        path: path.clone(),
        source,
    })?;
    let manifest = serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse { path, source })?;
    Ok(Some(manifest))
}

fn read_json<T: serde::de::DeserializeOwned>(
    dir: &Path,
    file: &str,
    manifest: Option<&Manifest>,
) -> Result<T, ArtifactError> {
    let path = dir.join(file);
    let bytes = std::fs::read(&path).map_err(|source| ArtifactError::Io {
        path: path.clone(),
        source,
    })?;

    if let Some(manifest) = manifest {
        let expected = manifest
            .files
            .get(file)
            .ok_or_else(|| ArtifactError::Unlisted {
                file: file.to_string(),
            })?;
        if !sha256_hex(&bytes).eq_ignore_ascii_case(expected.trim()) {
            return Err(ArtifactError::DigestMismatch {
                file: file.to_string(),
            });
        }
    }

    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse { path, source })
}

fn read_encoder(
    dir: &Path,
    file: &str,
    name: &str,
    manifest: Option<&Manifest>,
) -> Result<LabelEncoder, ArtifactError> {
    let encoder: LabelEncoder = read_json(dir, file, manifest)?;
    let encoder = encoder.named(name);
    encoder.check()?;
    Ok(encoder)
}

fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes).iter().map(|b| format!("{b:02x}")).collect()
}
