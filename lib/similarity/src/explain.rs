//! Explainability for course recommendations
//!
//! Attaches career options and the features that best explain each match,
//! and summarizes a recommendation list.

use crate::config::SkillPolicy;
use crate::context::EngineContext;
use crate::engine::CourseScore;
use ordered_float::OrderedFloat;
use pathwise_core::{FeatureSchema, Vector};
use serde::Serialize;
use std::cmp::Reverse;
use std::sync::Arc;

/// A recommended course with its explanation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseRecommendation {
    pub course: String,
    /// Mean cosine similarity, rounded for reporting
    pub similarity: f32,
    pub career_options: Vec<String>,
    pub top_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub career_options: Vec<String>,
    pub top_skills: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ExplanationDeriver {
    context: Arc<EngineContext>,
}

impl ExplanationDeriver {
    pub fn new(context: Arc<EngineContext>) -> Self {
        Self { context }
    }

    /// Explain why `course` matches `profile` (raw, unscaled values)
    pub fn explain(&self, course: &str, profile: &Vector) -> Explanation {
        let config = self.context.config();

        let Some(group) = self.context.dataset().course(course) else {
            return Explanation {
                career_options: vec![config.career_fallback.clone()],
                top_skills: Vec::new(),
            };
        };

        let mut career_options: Vec<String> =
            group.careers.iter().take(config.max_careers).cloned().collect();
        if career_options.is_empty() {
            career_options.push(config.career_fallback.clone());
        }

        let top_skills = if group.rows.is_empty() || profile.dim() != group.centroid.dim() {
            Vec::new()
        } else {
            select_top_skills(
                self.context.schema(),
                profile,
                &group.centroid,
                config.skill_policy,
                config.max_skills,
            )
        };

        Explanation {
            career_options,
            top_skills,
        }
    }

    /// Turn ranked course scores into explained recommendations
    pub fn explain_all(&self, scores: &[CourseScore], profile: &Vector) -> Vec<CourseRecommendation> {
        let config = self.context.config();
        scores
            .iter()
            .map(|score| {
                let Explanation {
                    career_options,
                    top_skills,
                } = self.explain(&score.course, profile);
                CourseRecommendation {
                    course: score.course.clone(),
                    similarity: config.round_score(score.similarity),
                    career_options,
                    top_skills,
                }
            })
            .collect()
    }
}

/// Pick up to `limit` feature names from `profile - centroid`.
///
/// Ties are broken by schema order.
pub fn select_top_skills(
    schema: &FeatureSchema,
    profile: &Vector,
    centroid: &Vector,
    policy: SkillPolicy,
    limit: usize,
) -> Vec<String> {
    let diffs = profile - centroid;
    let mut indexed: Vec<(usize, f32)> = diffs.iter().copied().enumerate().collect();

    match policy {
        SkillPolicy::Strengths => {
            indexed.retain(|(_, diff)| *diff > 0.0);
            indexed.sort_by_key(|(_, diff)| Reverse(OrderedFloat(*diff)));
        }
        SkillPolicy::Alignment => {
            indexed.sort_by_key(|(_, diff)| OrderedFloat(diff.abs()));
        }
    }

    indexed
        .into_iter()
        .take(limit)
        .filter_map(|(index, _)| schema.name(index).map(str::to_string))
        .collect()
}

/// Summary of a recommendation list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationStats {
    /// Distinct courses in the reference dataset
    pub courses_considered: usize,
    pub results_count: usize,
    pub avg_similarity: f32,
    pub best_similarity: f32,
}

impl RecommendationStats {
    pub fn compute(results: &[CourseRecommendation], courses_considered: usize) -> Self {
        if results.is_empty() {
            return Self {
                courses_considered,
                results_count: 0,
                avg_similarity: 0.0,
                best_similarity: 0.0,
            };
        }

        let total: f32 = results.iter().map(|r| r.similarity).sum();

        Self {
            courses_considered,
            results_count: results.len(),
            avg_similarity: total / results.len() as f32,
            // Results are sorted
            best_similarity: results[0].similarity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecommendConfig;
    use pathwise_core::{ReferenceDataset, ReferenceRecord, StandardScaler};

    fn schema() -> FeatureSchema {
        FeatureSchema::new(["Physics", "Chemistry", "Biology", "English"]).unwrap()
    }

    fn deriver(policy: SkillPolicy) -> ExplanationDeriver {
        let dataset = ReferenceDataset::new(
            schema(),
            vec![
                ReferenceRecord::new(
                    Vector::new(vec![60.0, 70.0, 90.0, 50.0]),
                    "MBBS",
                    vec!["Doctor".into(), "Surgeon".into()],
                ),
                ReferenceRecord::new(
                    Vector::new(vec![70.0, 80.0, 90.0, 60.0]),
                    "MBBS",
                    vec!["Surgeon".into(), "Physician".into(), "Researcher".into()],
                ),
                ReferenceRecord::new(Vector::new(vec![40.0, 50.0, 60.0, 90.0]), "B.A. English", Vec::new()),
            ],
        )
        .unwrap();
        let scaler = StandardScaler::new(vec![50.0; 4], vec![20.0; 4]).unwrap();
        let config = RecommendConfig {
            skill_policy: policy,
            ..RecommendConfig::default()
        };
        let context = EngineContext::builder(dataset, Box::new(scaler))
            .config(config)
            .build()
            .unwrap();
        ExplanationDeriver::new(context)
    }

    #[test]
    fn test_careers_capped_first_seen() {
        let explanation = deriver(SkillPolicy::Strengths)
            .explain("MBBS", &Vector::new(vec![50.0; 4]));
        assert_eq!(explanation.career_options, vec!["Doctor", "Surgeon", "Physician"]);
    }

    #[test]
    fn test_career_fallback() {
        let deriver = deriver(SkillPolicy::Strengths);
        let explanation = deriver.explain("B.A. English", &Vector::new(vec![50.0; 4]));
        assert_eq!(explanation.career_options, vec!["Various career options available"]);

        let unknown = deriver.explain("Astronomy", &Vector::new(vec![50.0; 4]));
        assert_eq!(unknown.career_options, vec!["Various career options available"]);
        assert!(unknown.top_skills.is_empty());
    }

    #[test]
    fn test_strengths_policy() {
        // MBBS centroid: [65, 75, 90, 55]
        let explanation = deriver(SkillPolicy::Strengths)
            .explain("MBBS", &Vector::new(vec![85.0, 80.0, 95.0, 50.0]));
        assert_eq!(explanation.top_skills, vec!["Physics", "Chemistry", "Biology"]);
    }

    #[test]
    fn test_strengths_only_positive() {
        let explanation = deriver(SkillPolicy::Strengths)
            .explain("MBBS", &Vector::new(vec![70.0, 60.0, 80.0, 40.0]));
        assert_eq!(explanation.top_skills, vec!["Physics"]);
    }

    #[test]
    fn test_alignment_policy() {
        // diffs: [+1, -10, +3, -25]
        let explanation = deriver(SkillPolicy::Alignment)
            .explain("MBBS", &Vector::new(vec![66.0, 65.0, 93.0, 30.0]));
        assert_eq!(explanation.top_skills, vec!["Physics", "Biology", "Chemistry"]);
    }

    #[test]
    fn test_ties_use_schema_order() {
        let schema = schema();
        let centroid = Vector::new(vec![50.0; 4]);
        let profile = Vector::new(vec![60.0, 70.0, 60.0, 70.0]);

        let skills = select_top_skills(&schema, &profile, &centroid, SkillPolicy::Strengths, 3);
        assert_eq!(skills, vec!["Chemistry", "English", "Physics"]);

        let skills = select_top_skills(&schema, &profile, &centroid, SkillPolicy::Alignment, 2);
        assert_eq!(skills, vec!["Physics", "Biology"]);
    }

    #[test]
    fn test_explain_all_rounds() {
        let deriver = deriver(SkillPolicy::Strengths);
        let scores = vec![
            CourseScore { course: "MBBS".to_string(), similarity: 0.987654 },
            CourseScore { course: "B.A. English".to_string(), similarity: 0.123456 },
        ];
        let recs = deriver.explain_all(&scores, &Vector::new(vec![50.0; 4]));
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].similarity, 0.988);
        assert_eq!(recs[1].similarity, 0.123);
    }

    #[test]
    fn test_stats() {
        let rec = |s: f32| CourseRecommendation {
            course: "X".to_string(),
            similarity: s,
            career_options: Vec::new(),
            top_skills: Vec::new(),
        };
        let stats = RecommendationStats::compute(&[rec(0.9), rec(0.7), rec(0.5)], 8);
        assert_eq!(stats.courses_considered, 8);
        assert_eq!(stats.results_count, 3);
        assert_eq!(stats.best_similarity, 0.9);
        assert!((stats.avg_similarity - 0.7).abs() < 1e-6);

        let empty = RecommendationStats::compute(&[], 4);
        assert_eq!(empty.results_count, 0);
        assert_eq!(empty.best_similarity, 0.0);
    }
}
