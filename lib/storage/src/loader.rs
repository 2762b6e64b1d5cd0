use crate::manifest::{DeploymentManifest, MANIFEST_FILE};
use anyhow::Context;
use pathwise_core::{
    Error, FeatureSchema, LabelEncoder, LinearClassifier, ReferenceDataset, Result, Scaler,
    ScalerParams,
};
use pathwise_similarity::EngineContext;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Read-only view of an artifact directory
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
    manifest: DeploymentManifest,
}

impl ArtifactStore {
    /// Open `dir`, reading `pathwise.json` when present
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.is_dir() {
            return Err(Error::artifact(
                dir.display().to_string(),
                "not a directory",
            ));
        }

        let manifest_path = dir.join(MANIFEST_FILE);
        let manifest = if manifest_path.exists() {
            read_json::<DeploymentManifest>(&manifest_path)
                .map_err(|e| Error::artifact(MANIFEST_FILE, format!("{:#}", e)))?
        } else {
            debug!(dir = %dir.display(), "No manifest found, using defaults");
            DeploymentManifest::default()
        };

        Ok(Self { dir, manifest })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn manifest(&self) -> &DeploymentManifest {
        &self.manifest
    }

    /// Mutable manifest, for command line overrides applied before [`ArtifactStore::load`]
    pub fn manifest_mut(&mut self) -> &mut DeploymentManifest {
        &mut self.manifest
    }

    pub fn load_schema(&self) -> Result<FeatureSchema> {
        let name = &self.manifest.files.features;
        self.read(name)
    }

    pub fn load_scaler(&self) -> Result<Box<dyn Scaler>> {
        let name = &self.manifest.files.scaler;
        let params: ScalerParams = self.read(name)?;
        params.build().map_err(|e| Error::artifact(name.as_str(), e))
    }

    pub fn load_dataset(&self, schema: FeatureSchema) -> Result<ReferenceDataset> {
        let name = &self.manifest.files.dataset;
        let rows: Vec<Map<String, Value>> = self.read(name)?;
        if rows.is_empty() {
            warn!(artifact = %name, "Reference dataset has no rows");
        }
        ReferenceDataset::from_json_rows(schema, &rows, &self.manifest.layout)
            .map_err(|e| Error::artifact(name.as_str(), e))
    }

    /// `None` when the classifier file is absent
    pub fn load_classifier(&self) -> Result<Option<LinearClassifier>> {
        let name = &self.manifest.files.classifier;
        if !self.path(name).exists() {
            return Ok(None);
        }
        let classifier: LinearClassifier = self.read(name)?;
        classifier
            .validate()
            .map_err(|e| Error::artifact(name.as_str(), e))?;
        Ok(Some(classifier))
    }

    /// `None` when the label encoder file is absent
    pub fn load_label_encoder(&self) -> Result<Option<LabelEncoder>> {
        let name = &self.manifest.files.label_encoder;
        if !self.path(name).exists() {
            return Ok(None);
        }
        let encoder: LabelEncoder = self.read(name)?;
        if encoder.is_empty() {
            return Err(Error::artifact(name.as_str(), "no classes"));
        }
        Ok(Some(encoder))
    }

    /// Load every artifact and build the shared engine context
    pub fn load(&self) -> Result<Arc<EngineContext>> {
        let schema = self.load_schema()?;
        let scaler = self.load_scaler()?;
        let dataset = self.load_dataset(schema)?;

        let mut builder = EngineContext::builder(dataset, scaler)
            .name(self.manifest.name.clone())
            .config(self.manifest.recommend.clone())
            .categories(self.manifest.categories.clone());

        match (self.load_classifier()?, self.load_label_encoder()?) {
            (Some(classifier), Some(encoder)) => {
                builder = builder.classifier(Box::new(classifier)).label_encoder(encoder);
            }
            (None, None) => {
                debug!("No classifier artifacts, prediction disabled");
            }
            (classifier, _) => {
                warn!(
                    classifier = classifier.is_some(),
                    "Classifier and label encoder must both be present, prediction disabled"
                );
            }
        }

        let context = builder.build().map_err(|err| match err {
            Error::DimensionMismatch { context, .. } => Error::artifact(context, err),
            Error::InvalidConfig(_) => Error::artifact(MANIFEST_FILE, err),
            other => other,
        })?;

        info!(
            dir = %self.dir.display(),
            name = %context.name(),
            "Artifacts loaded"
        );

        Ok(context)
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn read<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        read_json(&self.path(name)).map_err(|e| Error::artifact(name, format!("{:#}", e)))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let value = serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(value)
}
