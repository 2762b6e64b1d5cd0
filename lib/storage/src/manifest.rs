//! Deployment manifest
//!
//! Optional `pathwise.json` at the root of an artifact directory. Every field
//! has a default, so a directory holding only the standard artifact files is
//! a valid deployment.

use pathwise_core::TableLayout;
use pathwise_similarity::{RecommendConfig, SubjectCategory};
use serde::{Deserialize, Serialize};

pub const MANIFEST_FILE: &str = "pathwise.json";

pub const DEFAULT_FEATURES_FILE: &str = "features.json";
pub const DEFAULT_SCALER_FILE: &str = "scaler.json";
pub const DEFAULT_DATASET_FILE: &str = "dataset.json";
pub const DEFAULT_CLASSIFIER_FILE: &str = "classifier.json";
pub const DEFAULT_LABEL_ENCODER_FILE: &str = "label_encoder.json";

/// Artifact file names, relative to the artifact directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtifactFiles {
    #[serde(default = "default_features")]
    pub features: String,
    #[serde(default = "default_scaler")]
    pub scaler: String,
    #[serde(default = "default_dataset")]
    pub dataset: String,
    /// Skipped when the file does not exist
    #[serde(default = "default_classifier")]
    pub classifier: String,
    /// Skipped when the file does not exist
    #[serde(default = "default_label_encoder")]
    pub label_encoder: String,
}

fn default_features() -> String {
    DEFAULT_FEATURES_FILE.to_string()
}

fn default_scaler() -> String {
    DEFAULT_SCALER_FILE.to_string()
}

fn default_dataset() -> String {
    DEFAULT_DATASET_FILE.to_string()
}

fn default_classifier() -> String {
    DEFAULT_CLASSIFIER_FILE.to_string()
}

fn default_label_encoder() -> String {
    DEFAULT_LABEL_ENCODER_FILE.to_string()
}

impl Default for ArtifactFiles {
    fn default() -> Self {
        Self {
            features: default_features(),
            scaler: default_scaler(),
            dataset: default_dataset(),
            classifier: default_classifier(),
            label_encoder: default_label_encoder(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeploymentManifest {
    /// Deployment variant, e.g. `pcb` or `commerce`
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(flatten)]
    pub layout: TableLayout,

    #[serde(default)]
    pub files: ArtifactFiles,

    #[serde(default)]
    pub recommend: RecommendConfig,

    #[serde(default)]
    pub categories: Vec<SubjectCategory>,
}

fn default_name() -> String {
    "default".to_string()
}

impl Default for DeploymentManifest {
    fn default() -> Self {
        Self {
            name: default_name(),
            layout: TableLayout::default(),
            files: ArtifactFiles::default(),
            recommend: RecommendConfig::default(),
            categories: Vec::new(),
        }
    }
}
