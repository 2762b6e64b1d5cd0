//! Pre-trained course classifier and label encoder
//!
//! Both are opaque artifacts produced by the training pipeline; only their
//! inference contracts are implemented here.

use crate::{Error, Result, Vector};
use serde::{Deserialize, Serialize};

/// Inference contract of a pre-trained classifier over scaled profiles
pub trait Classifier: Send + Sync + std::fmt::Debug {
    fn n_features(&self) -> usize;

    fn n_classes(&self) -> usize;

    /// Class probabilities, one per class index, summing to 1
    fn predict_proba(&self, scaled: &Vector) -> Result<Vec<f32>>;

    /// Most probable class index; the lowest index wins ties
    fn predict(&self, scaled: &Vector) -> Result<usize> {
        let proba = self.predict_proba(scaled)?;
        let mut best: Option<(usize, f32)> = None;
        for (index, p) in proba.into_iter().enumerate() {
            match best {
                Some((_, best_p)) if p <= best_p => {}
                _ => best = Some((index, p)),
            }
        }
        best.map(|(index, _)| index)
            .ok_or_else(|| Error::Prediction("classifier returned no classes".to_string()))
    }
}

/// Logistic regression exported as coefficients and intercepts.
///
/// One coefficient row means a binary model (`sigmoid` of the decision value
/// gives the probability of class 1); more rows mean a multinomial model
/// scored with softmax.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinearClassifier {
    pub coef: Vec<Vec<f32>>,
    pub intercept: Vec<f32>,
}

impl LinearClassifier {
    pub fn new(coef: Vec<Vec<f32>>, intercept: Vec<f32>) -> Result<Self> {
        let classifier = Self { coef, intercept };
        classifier.validate()?;
        Ok(classifier)
    }

    pub fn validate(&self) -> Result<()> {
        let first = self
            .coef
            .first()
            .ok_or_else(|| Error::InvalidConfig("classifier has no coefficients".to_string()))?;

        if first.is_empty() {
            return Err(Error::InvalidConfig(
                "classifier coefficients are empty".to_string(),
            ));
        }
        if let Some(row) = self.coef.iter().find(|row| row.len() != first.len()) {
            return Err(Error::dimension("classifier coefficient row", first.len(), row.len()));
        }
        if self.intercept.len() != self.coef.len() {
            return Err(Error::dimension(
                "classifier intercept",
                self.coef.len(),
                self.intercept.len(),
            ));
        }
        Ok(())
    }

    fn decision(&self, scaled: &Vector) -> Vec<f32> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| {
                row.iter()
                    .zip(scaled.iter())
                    .map(|(w, x)| w * x)
                    .sum::<f32>()
                    + b
            })
            .collect()
    }
}

impl Classifier for LinearClassifier {
    fn n_features(&self) -> usize {
        self.coef.first().map_or(0, Vec::len)
    }

    fn n_classes(&self) -> usize {
        if self.coef.len() == 1 {
            2
        } else {
            self.coef.len()
        }
    }

    fn predict_proba(&self, scaled: &Vector) -> Result<Vec<f32>> {
        if scaled.dim() != self.n_features() {
            return Err(Error::Prediction(format!(
                "classifier expects {} features, got {}",
                self.n_features(),
                scaled.dim()
            )));
        }

        let scores = self.decision(scaled);

        if scores.len() == 1 {
            let p = 1.0 / (1.0 + (-scores[0]).exp());
            return Ok(vec![1.0 - p, p]);
        }

        let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let exp: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f32 = exp.iter().sum();
        Ok(exp.into_iter().map(|e| e / total).collect())
    }
}

/// Maps class indices back to course labels
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn decode(&self, index: usize) -> Result<&str> {
        self.classes.get(index).map(String::as_str).ok_or_else(|| {
            Error::Prediction(format!(
                "class index {} out of range for {} labels",
                index,
                self.classes.len()
            ))
        })
    }
}
