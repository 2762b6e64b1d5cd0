//! Recommendation settings
//!
//! Per-deployment knobs for ranking and explanation. Loaded from the
//! deployment manifest and optionally overridden on the command line.

use pathwise_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_TOP_N: usize = 5;
pub const DEFAULT_MAX_CAREERS: usize = 3;
pub const DEFAULT_MAX_SKILLS: usize = 3;
pub const DEFAULT_SCORE_DECIMALS: u32 = 3;
pub const CAREER_FALLBACK: &str = "Various career options available";

/// How "top skills" are picked for a recommended course
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SkillPolicy {
    /// Features where the user most exceeds the course average (positive gaps only)
    #[default]
    Strengths,
    /// Features closest to the course average (smallest absolute gap)
    Alignment,
}

impl FromStr for SkillPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strengths" | "strength" => Ok(SkillPolicy::Strengths),
            "alignment" | "aligned" => Ok(SkillPolicy::Alignment),
            other => Err(format!(
                "unknown skill policy '{}', expected 'strengths' or 'alignment'",
                other
            )),
        }
    }
}

impl fmt::Display for SkillPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillPolicy::Strengths => write!(f, "strengths"),
            SkillPolicy::Alignment => write!(f, "alignment"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendConfig {
    /// Courses returned when the caller does not ask for a count
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    #[serde(default)]
    pub skill_policy: SkillPolicy,

    #[serde(default = "default_max_careers")]
    pub max_careers: usize,

    #[serde(default = "default_max_skills")]
    pub max_skills: usize,

    /// Decimal places kept in reported similarity scores
    #[serde(default = "default_score_decimals")]
    pub score_decimals: u32,

    #[serde(default = "default_career_fallback")]
    pub career_fallback: String,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_max_careers() -> usize {
    DEFAULT_MAX_CAREERS
}

fn default_max_skills() -> usize {
    DEFAULT_MAX_SKILLS
}

fn default_score_decimals() -> u32 {
    DEFAULT_SCORE_DECIMALS
}

fn default_career_fallback() -> String {
    CAREER_FALLBACK.to_string()
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            skill_policy: SkillPolicy::default(),
            max_careers: DEFAULT_MAX_CAREERS,
            max_skills: DEFAULT_MAX_SKILLS,
            score_decimals: DEFAULT_SCORE_DECIMALS,
            career_fallback: default_career_fallback(),
        }
    }
}

impl RecommendConfig {
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(Error::InvalidConfig("top_n must be at least 1".to_string()));
        }
        if self.score_decimals > 6 {
            return Err(Error::InvalidConfig(format!(
                "score_decimals must be at most 6, got {}",
                self.score_decimals
            )));
        }
        if self.career_fallback.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "career_fallback cannot be blank".to_string(),
            ));
        }
        Ok(())
    }

    /// Round a similarity score for reporting
    pub fn round_score(&self, score: f32) -> f32 {
        let factor = 10f64.powi(self.score_decimals as i32);
        ((score as f64 * factor).round() / factor) as f32
    }
}
