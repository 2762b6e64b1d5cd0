//! Course prediction with the pre-trained classifier
//!
//! Independent of the similarity ranking; the two may disagree and both are
//! reported as-is.

use crate::context::EngineContext;
use ordered_float::OrderedFloat;
use pathwise_core::{Classifier, Error, LabelEncoder, Result, Vector};
use serde::Serialize;
use std::cmp::Reverse;
use std::sync::Arc;

/// A predicted course with its probability in percent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPrediction {
    pub course: String,
    pub probability: f32,
}

/// Classifier output as reported to callers: the pick plus the runners-up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub best_course: String,
    pub predictions: Vec<RankedPrediction>,
}

/// Ranked predictions returned when the caller does not ask for a count
pub const DEFAULT_TOP_K: usize = 3;

#[derive(Debug, Clone)]
pub struct CoursePredictor {
    context: Arc<EngineContext>,
}

impl CoursePredictor {
    pub fn new(context: Arc<EngineContext>) -> Self {
        Self { context }
    }

    pub fn is_available(&self) -> bool {
        self.context.has_predictor()
    }

    fn models(&self) -> Result<(&dyn Classifier, &LabelEncoder)> {
        let classifier = self
            .context
            .classifier()
            .ok_or_else(|| Error::Prediction("classifier is not loaded".to_string()))?;
        let encoder = self
            .context
            .label_encoder()
            .ok_or_else(|| Error::Prediction("label encoder is not loaded".to_string()))?;
        Ok((classifier, encoder))
    }

    fn scale(&self, profile: &Vector) -> Result<Vector> {
        let expected = self.context.schema().len();
        if profile.dim() != expected {
            return Err(Error::Prediction(format!(
                "expected {} features, got {}",
                expected,
                profile.dim()
            )));
        }
        self.context.scaler().transform(profile)
    }

    /// The single best-fit course label
    pub fn predict_best(&self, profile: &Vector) -> Result<String> {
        let (classifier, encoder) = self.models()?;
        let scaled = self.scale(profile)?;
        let index = classifier.predict(&scaled)?;
        Ok(encoder.decode(index)?.to_string())
    }

    /// The `k` most probable courses, most probable first
    pub fn predict_ranked(&self, profile: &Vector, k: usize) -> Result<Vec<RankedPrediction>> {
        let (classifier, encoder) = self.models()?;
        let scaled = self.scale(profile)?;
        let proba = classifier.predict_proba(&scaled)?;

        let mut indexed: Vec<(usize, f32)> = proba.into_iter().enumerate().collect();
        indexed.sort_by_key(|(_, p)| Reverse(OrderedFloat(*p)));

        indexed
            .into_iter()
            .take(k)
            .map(|(index, p)| -> Result<RankedPrediction> {
                Ok(RankedPrediction {
                    course: encoder.decode(index)?.to_string(),
                    probability: p * 100.0,
                })
            })
            .collect()
    }

    /// Best course together with the `k` most probable ones
    pub fn predict(&self, profile: &Vector, k: usize) -> Result<Prediction> {
        Ok(Prediction {
            best_course: self.predict_best(profile)?,
            predictions: self.predict_ranked(profile, k)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathwise_core::{FeatureSchema, LinearClassifier, ReferenceDataset, ReferenceRecord, StandardScaler};

    fn dataset() -> ReferenceDataset {
        let schema = FeatureSchema::new(["Accountancy", "Economics"]).unwrap();
        ReferenceDataset::new(
            schema,
            vec![
                ReferenceRecord::new(Vector::new(vec![90.0, 40.0]), "CA", Vec::new()),
                ReferenceRecord::new(Vector::new(vec![40.0, 90.0]), "B.A. Economics", Vec::new()),
            ],
        )
        .unwrap()
    }

    fn scaler() -> Box<StandardScaler> {
        Box::new(StandardScaler::new(vec![50.0, 50.0], vec![10.0, 10.0]).unwrap())
    }

    fn predictor() -> CoursePredictor {
        let clf = LinearClassifier::new(
            vec![vec![1.0, -1.0], vec![-1.0, 1.0], vec![0.0, 0.0]],
            vec![0.0, 0.0, 0.5],
        )
        .unwrap();
        let encoder = LabelEncoder::new(vec![
            "CA".to_string(),
            "B.A. Economics".to_string(),
            "BBA".to_string(),
        ]);
        let context = EngineContext::builder(dataset(), scaler())
            .classifier(Box::new(clf))
            .label_encoder(encoder)
            .build()
            .unwrap();
        CoursePredictor::new(context)
    }

    #[test]
    fn test_predict_best() {
        let predictor = predictor();
        assert!(predictor.is_available());
        assert_eq!(predictor.predict_best(&Vector::new(vec![90.0, 30.0])).unwrap(), "CA");
        assert_eq!(
            predictor.predict_best(&Vector::new(vec![30.0, 90.0])).unwrap(),
            "B.A. Economics"
        );
        assert_eq!(predictor.predict_best(&Vector::new(vec![50.0, 50.0])).unwrap(), "BBA");
    }

    #[test]
    fn test_predict_ranked() {
        let ranked = predictor().predict_ranked(&Vector::new(vec![80.0, 40.0]), 3).unwrap();
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].course, "CA");
        for pair in ranked.windows(2) {
            assert!(pair[0].probability >= pair[1].probability);
        }
        let total: f32 = ranked.iter().map(|r| r.probability).sum();
        assert!((total - 100.0).abs() < 1e-3);

        let top1 = predictor().predict_ranked(&Vector::new(vec![80.0, 40.0]), 1).unwrap();
        assert_eq!(top1.len(), 1);
    }

    #[test]
    fn test_predict_combined() {
        let prediction = predictor().predict(&Vector::new(vec![30.0, 90.0]), DEFAULT_TOP_K).unwrap();
        assert_eq!(prediction.best_course, "B.A. Economics");
        assert_eq!(prediction.predictions.len(), 3);
        assert_eq!(prediction.predictions[0].course, prediction.best_course);

        let json = serde_json::to_value(&prediction).unwrap();
        assert_eq!(json["best_course"], "B.A. Economics");
        assert_eq!(json["predictions"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_missing_models() {
        let context = EngineContext::builder(dataset(), scaler()).build().unwrap();
        let predictor = CoursePredictor::new(context);
        assert!(!predictor.is_available());
        assert!(matches!(
            predictor.predict_best(&Vector::new(vec![50.0, 50.0])),
            Err(Error::Prediction(_))
        ));
    }

    #[test]
    fn test_wrong_dimension() {
        assert!(matches!(
            predictor().predict_best(&Vector::new(vec![50.0])),
            Err(Error::Prediction(_))
        ));
    }
}
