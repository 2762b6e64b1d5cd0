//! Request-level entry points
//!
//! [`Recommender`] is what callers hold: it normalizes raw input, runs the
//! similarity engine, explains the results and optionally predicts the best
//! course. [`Outcome`] turns a per-request error into a structured failure
//! instead of propagating it.

use crate::catalog::FeatureCatalog;
use crate::context::EngineContext;
use crate::engine::SimilarityEngine;
use crate::explain::{CourseRecommendation, ExplanationDeriver, RecommendationStats};
use crate::normalize::{NormalizedProfile, ProfileNormalizer, RawProfile};
use crate::predict::{CoursePredictor, Prediction, RankedPrediction};
use pathwise_core::{ErrorKind, Result, Vector};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Recommendations and prediction surfaced side by side, unreconciled
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advice {
    /// Classifier pick, present only when a classifier is loaded
    pub best_course: Option<String>,
    pub recommendations: Vec<CourseRecommendation>,
    /// All known careers for `best_course`
    pub careers: Vec<String>,
    pub defaulted: Vec<String>,
    pub clamped: Vec<String>,
    pub stats: RecommendationStats,
}

/// Result of a request as reported to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    Success { result: T },
    Error { kind: ErrorKind, message: String },
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

impl<T> From<Result<T>> for Outcome<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(result) => Outcome::Success { result },
            Err(err) => {
                warn!(kind = ?err.kind(), error = %err, "Request failed");
                Outcome::Error {
                    kind: err.kind(),
                    message: err.to_string(),
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Recommender {
    context: Arc<EngineContext>,
    engine: SimilarityEngine,
    deriver: ExplanationDeriver,
    predictor: CoursePredictor,
}

impl Recommender {
    pub fn new(context: Arc<EngineContext>) -> Self {
        Self {
            engine: SimilarityEngine::new(context.clone()),
            deriver: ExplanationDeriver::new(context.clone()),
            predictor: CoursePredictor::new(context.clone()),
            context,
        }
    }

    pub fn context(&self) -> &EngineContext {
        &self.context
    }

    pub fn normalize(&self, raw: &RawProfile) -> Result<NormalizedProfile> {
        ProfileNormalizer::new(self.context.schema()).normalize(raw)
    }

    /// Top `top_n` explained course recommendations for a raw profile
    pub fn recommend(&self, raw: &RawProfile, top_n: usize) -> Result<Vec<CourseRecommendation>> {
        let normalized = self.normalize(raw)?;
        self.recommend_profile(&normalized.profile, top_n)
    }

    /// Same as [`Recommender::recommend`] for an already normalized profile
    pub fn recommend_profile(
        &self,
        profile: &Vector,
        top_n: usize,
    ) -> Result<Vec<CourseRecommendation>> {
        let scores = self.engine.recommend(profile, top_n)?;
        let recommendations = self.deriver.explain_all(&scores, profile);
        debug!(count = recommendations.len(), top_n, "Recommendations generated");
        Ok(recommendations)
    }

    /// Best-fit course according to the classifier
    pub fn predict_best(&self, raw: &RawProfile) -> Result<String> {
        let normalized = self.normalize(raw)?;
        self.predictor.predict_best(&normalized.profile)
    }

    /// The `k` most probable courses according to the classifier
    pub fn predict_ranked(&self, raw: &RawProfile, k: usize) -> Result<Vec<RankedPrediction>> {
        let normalized = self.normalize(raw)?;
        self.predictor.predict_ranked(&normalized.profile, k)
    }

    /// Best-fit course plus the `k` most probable courses
    pub fn predict(&self, raw: &RawProfile, k: usize) -> Result<Prediction> {
        let normalized = self.normalize(raw)?;
        self.predictor.predict(&normalized.profile, k)
    }

    /// Recommendations plus the classifier's pick when one is loaded
    pub fn advise(&self, raw: &RawProfile, top_n: usize) -> Result<Advice> {
        let normalized = self.normalize(raw)?;
        let recommendations = self.recommend_profile(&normalized.profile, top_n)?;

        let best_course = if self.predictor.is_available() {
            Some(self.predictor.predict_best(&normalized.profile)?)
        } else {
            None
        };

        let careers = best_course
            .as_deref()
            .and_then(|course| self.context.dataset().course(course))
            .map(|group| group.careers.clone())
            .unwrap_or_default();

        let stats =
            RecommendationStats::compute(&recommendations, self.context.dataset().courses().len());

        let NormalizedProfile {
            defaulted, clamped, ..
        } = normalized;

        Ok(Advice {
            best_course,
            recommendations,
            careers,
            defaulted,
            clamped,
            stats,
        })
    }

    pub fn catalog(&self) -> FeatureCatalog {
        FeatureCatalog::build(self.context.schema(), self.context.categories())
    }

    /// Default number of recommendations for this deployment
    pub fn default_top_n(&self) -> usize {
        self.context.config().top_n
    }
}

impl From<Arc<EngineContext>> for Recommender {
    fn from(context: Arc<EngineContext>) -> Self {
        Self::new(context)
    }
}
