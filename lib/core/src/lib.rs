//! # Pathwise Core
//!
//! Core types for the Pathwise course recommender.
//!
//! This crate provides the data model shared by the engine and the loader:
//!
//! - [`FeatureSchema`] - Ordered feature names fixing the vector layout
//! - [`Vector`] - Dense profile vector with cosine similarity
//! - [`Scaler`] - Pre-fitted scaler contract ([`StandardScaler`], [`MinMaxScaler`])
//! - [`Classifier`] - Pre-trained classifier contract ([`LinearClassifier`]) and [`LabelEncoder`]
//! - [`ReferenceDataset`] - Immutable reference rows indexed by course
//!
//! ## Example
//!
//! ```rust
//! use pathwise_core::{FeatureSchema, ReferenceDataset, ReferenceRecord, Scaler, StandardScaler, Vector};
//!
//! let schema = FeatureSchema::new(["Mathematics", "Biology"]).unwrap();
//! let dataset = ReferenceDataset::new(
//!     schema,
//!     vec![ReferenceRecord::new(Vector::new(vec![90.0, 30.0]), "B.Tech", vec!["Engineer".to_string()])],
//! )
//! .unwrap();
//!
//! let scaler = StandardScaler::new(vec![50.0, 50.0], vec![20.0, 20.0]).unwrap();
//! let scaled = scaler.transform(&dataset.records()[0].features).unwrap();
//! assert_eq!(scaled.as_slice(), &[2.0, -1.0]);
//! ```

pub mod error;
pub mod vector;
pub mod schema;
pub mod scaler;
pub mod classifier;
pub mod dataset;

pub use error::{Error, ErrorKind, Result};
pub use vector::Vector;
pub use schema::FeatureSchema;
pub use scaler::{MinMaxScaler, Scaler, ScalerParams, StandardScaler};
pub use classifier::{Classifier, LabelEncoder, LinearClassifier};
pub use dataset::{
    coerce_number, CareerOptions, CourseGroup, ReferenceDataset, ReferenceRecord, TableLayout,
};
