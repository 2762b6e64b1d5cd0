//! # Pathwise Similarity
//!
//! A profile-similarity recommendation engine for course selection.
//!
//! This crate turns a student's subject scores into ranked, explained course
//! recommendations by comparing them against a reference dataset of past
//! students.
//!
//! ## Features
//!
//! - **Profile Normalization**: Partial or messy input aligned to the feature schema
//! - **Similarity Ranking**: Mean cosine similarity per course in scaled space
//! - **Explainability**: Career options and the subjects that drive each match
//! - **Prediction**: Optional best-fit course from a pre-trained classifier
//!
//! ## Example
//!
//! ```rust
//! use pathwise_core::{FeatureSchema, ReferenceDataset, ReferenceRecord, StandardScaler, Vector};
//! use pathwise_similarity::{EngineContext, Recommender};
//! use serde_json::json;
//!
//! let schema = FeatureSchema::new(["Mathematics", "Biology"]).unwrap();
//! let dataset = ReferenceDataset::new(
//!     schema,
//!     vec![
//!         ReferenceRecord::new(Vector::new(vec![90.0, 30.0]), "B.Tech", vec!["Engineer".to_string()]),
//!         ReferenceRecord::new(Vector::new(vec![30.0, 90.0]), "MBBS", vec!["Doctor".to_string()]),
//!     ],
//! )
//! .unwrap();
//! let scaler = StandardScaler::new(vec![60.0, 60.0], vec![30.0, 30.0]).unwrap();
//!
//! let context = EngineContext::builder(dataset, Box::new(scaler)).build().unwrap();
//! let recommender = Recommender::new(context);
//!
//! let profile = json!({"Mathematics": 95, "Biology": 40});
//! let recs = recommender.recommend(profile.as_object().unwrap(), 1).unwrap();
//! assert_eq!(recs[0].course, "B.Tech");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Raw profile │────>│ Normalizer  │────>│   Engine    │
//! │  (scores)   │     │ (schema)    │     │  (cosine)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │  Predictor  │     │  Explain    │
//!                     │ (classifier)│     │ (careers)   │
//!                     └─────────────┘     └─────────────┘
//! ```

pub mod config;
pub mod normalize;
pub mod catalog;
pub mod context;
pub mod engine;
pub mod explain;
pub mod predict;
pub mod recommender;

// Re-export main types for convenience
pub use config::{RecommendConfig, SkillPolicy, CAREER_FALLBACK, DEFAULT_TOP_N};
pub use normalize::{
    raw_profile_from_value, NormalizedProfile, ProfileNormalizer, RawProfile, DEFAULT_SCORE,
    MAX_SCORE, MIN_SCORE,
};
pub use catalog::{FeatureCatalog, SubjectCategory};
pub use context::{EngineContext, EngineContextBuilder};
pub use engine::{CourseScore, SimilarityEngine};
pub use explain::{
    select_top_skills, CourseRecommendation, Explanation, ExplanationDeriver, RecommendationStats,
};
pub use predict::{CoursePredictor, Prediction, RankedPrediction, DEFAULT_TOP_K};
pub use recommender::{Advice, Outcome, Recommender};
