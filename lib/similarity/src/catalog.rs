//! Feature catalog for front ends
//!
//! Groups schema features into display categories (core subjects, electives,
//! aptitudes) and reports category subjects the schema does not know about.

use pathwise_core::FeatureSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubjectCategory {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub subjects: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FeatureCatalog {
    /// Schema features in vector order
    pub features: Vec<String>,
    pub count: usize,
    /// Categories restricted to subjects present in the schema; empty ones dropped
    pub categories: Vec<SubjectCategory>,
    /// Category subjects missing from the schema
    pub missing: Vec<String>,
}

impl FeatureCatalog {
    pub fn build(schema: &FeatureSchema, categories: &[SubjectCategory]) -> Self {
        let mut missing = Vec::new();
        let mut filtered = Vec::with_capacity(categories.len());

        for category in categories {
            let (known, unknown): (Vec<String>, Vec<String>) = category
                .subjects
                .iter()
                .cloned()
                .partition(|subject| schema.contains(subject));

            missing.extend(unknown);
            if !known.is_empty() {
                filtered.push(SubjectCategory {
                    subjects: known,
                    ..category.clone()
                });
            }
        }

        if !missing.is_empty() {
            warn!(subjects = ?missing, "Category subjects not in the feature schema");
        }

        Self {
            features: schema.names().to_vec(),
            count: schema.len(),
            categories: filtered,
            missing,
        }
    }
}
