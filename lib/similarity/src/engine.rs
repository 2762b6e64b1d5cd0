//! Similarity engine
//!
//! Ranks courses by the mean cosine similarity between the scaled user
//! profile and the scaled reference rows of each course.

use crate::context::EngineContext;
use ordered_float::OrderedFloat;
use pathwise_core::{Error, Result, Vector};
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Reverse;
use std::sync::Arc;
use tracing::debug;

/// Mean similarity of one course, unrounded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseScore {
    pub course: String,
    pub similarity: f32,
}

#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    context: Arc<EngineContext>,
}

impl SimilarityEngine {
    pub fn new(context: Arc<EngineContext>) -> Self {
        Self { context }
    }

    /// Cosine similarity of the profile against every reference row
    pub fn row_similarities(&self, profile: &Vector) -> Result<Vec<f32>> {
        self.context.schema().check(profile, "profile")?;

        if self.context.dataset().is_empty() {
            return Err(Error::EmptyDataset);
        }

        let scaled = self.context.scaler().transform(profile)?;

        Ok(self
            .context
            .scaled_rows()
            .par_iter()
            .map(|row| scaled.cosine_similarity(row))
            .collect())
    }

    /// Every course ordered by mean similarity, best first.
    ///
    /// Ties keep the order in which courses first appear in the dataset.
    pub fn rank(&self, profile: &Vector) -> Result<Vec<CourseScore>> {
        let similarities = self.row_similarities(profile)?;

        let mut scores: Vec<CourseScore> = self
            .context
            .dataset()
            .courses()
            .iter()
            .filter(|group| !group.rows.is_empty())
            .map(|group| {
                let total: f32 = group.rows.iter().map(|&row| similarities[row]).sum();
                CourseScore {
                    course: group.name.clone(),
                    similarity: total / group.rows.len() as f32,
                }
            })
            .collect();

        // Stable sort keeps first-seen order for equal means
        scores.sort_by_key(|score| Reverse(OrderedFloat(score.similarity)));

        debug!(
            courses = scores.len(),
            best = ?scores.first().map(|s| s.course.as_str()),
            "Courses ranked"
        );

        Ok(scores)
    }

    /// The `top_n` best courses, or all of them when there are fewer
    pub fn recommend(&self, profile: &Vector, top_n: usize) -> Result<Vec<CourseScore>> {
        let mut scores = self.rank(profile)?;
        scores.truncate(top_n);
        Ok(scores)
    }
}
