//! Immutable engine context
//!
//! Holds every artifact a request needs: the reference dataset, the scaler,
//! the optional classifier and label encoder, and the recommendation
//! settings. Built once at startup and shared through `Arc`; nothing in it
//! changes afterwards, so reads need no locking.

use crate::catalog::SubjectCategory;
use crate::config::RecommendConfig;
use pathwise_core::{
    Classifier, Error, FeatureSchema, LabelEncoder, ReferenceDataset, Result, Scaler, Vector,
};
use std::sync::Arc;
use tracing::info;

#[derive(Debug)]
pub struct EngineContext {
    name: String,
    dataset: ReferenceDataset,
    scaler: Box<dyn Scaler>,
    classifier: Option<Box<dyn Classifier>>,
    label_encoder: Option<LabelEncoder>,
    config: RecommendConfig,
    categories: Vec<SubjectCategory>,
    /// Reference rows passed through `scaler`, in dataset order
    scaled_rows: Vec<Vector>,
}

impl EngineContext {
    pub fn builder(dataset: ReferenceDataset, scaler: Box<dyn Scaler>) -> EngineContextBuilder {
        EngineContextBuilder {
            name: "default".to_string(),
            dataset,
            scaler,
            classifier: None,
            label_encoder: None,
            config: RecommendConfig::default(),
            categories: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &FeatureSchema {
        self.dataset.schema()
    }

    pub fn dataset(&self) -> &ReferenceDataset {
        &self.dataset
    }

    pub fn scaler(&self) -> &dyn Scaler {
        self.scaler.as_ref()
    }

    pub fn classifier(&self) -> Option<&dyn Classifier> {
        self.classifier.as_deref()
    }

    pub fn label_encoder(&self) -> Option<&LabelEncoder> {
        self.label_encoder.as_ref()
    }

    pub fn config(&self) -> &RecommendConfig {
        &self.config
    }

    pub fn categories(&self) -> &[SubjectCategory] {
        &self.categories
    }

    pub fn scaled_rows(&self) -> &[Vector] {
        &self.scaled_rows
    }

    pub fn has_predictor(&self) -> bool {
        self.classifier.is_some() && self.label_encoder.is_some()
    }
}

pub struct EngineContextBuilder {
    name: String,
    dataset: ReferenceDataset,
    scaler: Box<dyn Scaler>,
    classifier: Option<Box<dyn Classifier>>,
    label_encoder: Option<LabelEncoder>,
    config: RecommendConfig,
    categories: Vec<SubjectCategory>,
}

impl EngineContextBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn classifier(mut self, classifier: Box<dyn Classifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn label_encoder(mut self, encoder: LabelEncoder) -> Self {
        self.label_encoder = Some(encoder);
        self
    }

    pub fn config(mut self, config: RecommendConfig) -> Self {
        self.config = config;
        self
    }

    pub fn categories(mut self, categories: Vec<SubjectCategory>) -> Self {
        self.categories = categories;
        self
    }

    /// Cross-check the artifacts and scale the reference rows once
    pub fn build(self) -> Result<Arc<EngineContext>> {
        self.config.validate()?;

        let dim = self.dataset.schema().len();
        if self.scaler.n_features() != dim {
            return Err(Error::dimension("scaler", dim, self.scaler.n_features()));
        }

        if let Some(classifier) = &self.classifier {
            if classifier.n_features() != dim {
                return Err(Error::dimension("classifier", dim, classifier.n_features()));
            }
            if let Some(encoder) = &self.label_encoder {
                if encoder.len() != classifier.n_classes() {
                    return Err(Error::dimension(
                        "label encoder",
                        classifier.n_classes(),
                        encoder.len(),
                    ));
                }
            }
        }

        let rows: Vec<Vector> = self
            .dataset
            .records()
            .iter()
            .map(|record| record.features.clone())
            .collect();
        let scaled_rows = self.scaler.transform_batch(&rows)?;

        info!(
            name = %self.name,
            features = dim,
            rows = self.dataset.len(),
            courses = self.dataset.courses().len(),
            predictor = self.classifier.is_some() && self.label_encoder.is_some(),
            "Engine context ready"
        );

        Ok(Arc::new(EngineContext {
            name: self.name,
            dataset: self.dataset,
            scaler: self.scaler,
            classifier: self.classifier,
            label_encoder: self.label_encoder,
            config: self.config,
            categories: self.categories,
            scaled_rows,
        }))
    }
}
