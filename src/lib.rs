//! # Pathwise
//!
//! Course and career recommendations from self-assessed subject scores.
//!
//! A student's scores are aligned to a feature schema, scaled with a
//! pre-fitted scaler and compared by cosine similarity against a reference
//! dataset of past students. Courses are ranked by their mean similarity and
//! each recommendation is explained with career options and the subjects
//! that drive the match. A pre-trained classifier, when present, predicts a
//! single best-fit course alongside.
//!
//! ## Quick Start
//!
//! ### From the Command Line
//!
//! ```bash
//! pathwise --artifacts ./artifacts recommend --profile scores.json --top-n 3
//! echo '{"Mathematics": 92, "Physics": 81}' | pathwise --artifacts ./artifacts advise
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use pathwise::prelude::*;
//! use serde_json::json;
//!
//! let context = ArtifactStore::open("./artifacts")?.load()?;
//! let recommender = Recommender::new(context);
//!
//! let raw = raw_profile_from_value(json!({"Mathematics": 92, "Physics": 81}))?;
//! for rec in recommender.recommend(&raw, 5)? {
//!     println!("{} {:.3} {:?}", rec.course, rec.similarity, rec.top_skills);
//! }
//! # Ok::<(), pathwise::Error>(())
//! ```
//!
//! ## Crate Structure
//!
//! - `pathwise-core` - Feature schema, vectors, scalers, classifiers and the reference dataset
//! - `pathwise-similarity` - Normalization, ranking, explanations and prediction
//! - `pathwise-storage` - Artifact directory and manifest loading

// Re-export core types
pub use pathwise_core::{
    Classifier, Error, ErrorKind, FeatureSchema, LabelEncoder, LinearClassifier,
    ReferenceDataset, ReferenceRecord, Result, Scaler, ScalerParams, StandardScaler, MinMaxScaler,
    TableLayout, Vector,
};

// Re-export the engine
pub use pathwise_similarity::{
    raw_profile_from_value, Advice, CourseRecommendation, EngineContext, FeatureCatalog,
    NormalizedProfile, Outcome, Prediction, RankedPrediction, RawProfile, RecommendConfig,
    RecommendationStats, Recommender, SkillPolicy, SubjectCategory,
};

// Re-export storage
pub use pathwise_storage::{ArtifactStore, DeploymentManifest};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        raw_profile_from_value, Advice, ArtifactStore, CourseRecommendation, EngineContext,
        Error, ErrorKind, FeatureSchema, Outcome, RawProfile, RecommendConfig, Recommender,
        Result, SkillPolicy, Vector,
    };
}
