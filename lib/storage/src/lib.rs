//! Artifact loading for Pathwise
//!
//! An artifact directory holds the feature schema, the fitted scaler, the
//! reference dataset and, optionally, a classifier with its label encoder,
//! all as JSON. An optional `pathwise.json` manifest renames files, sets the
//! dataset column layout and carries the recommendation settings.

pub mod manifest;
pub mod loader;

pub use manifest::{ArtifactFiles, DeploymentManifest, MANIFEST_FILE};
pub use loader::ArtifactStore;
