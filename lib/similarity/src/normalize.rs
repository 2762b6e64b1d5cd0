//! Profile normalization
//!
//! Turns a keyed, possibly partial request into a complete profile vector in
//! feature schema order.

use pathwise_core::{coerce_number, Error, FeatureSchema, Result, Vector};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Score used for absent or non-numeric features (midpoint of the scale)
pub const DEFAULT_SCORE: f32 = 50.0;
pub const MIN_SCORE: f32 = 0.0;
pub const MAX_SCORE: f32 = 100.0;

/// Keyed raw input: feature name to number, numeric string or anything else
pub type RawProfile = Map<String, Value>;

/// Envelope keys some front ends wrap the scores in
const ENVELOPE_KEYS: [&str; 2] = ["scores", "user_profile"];

/// Profile vector plus a record of what was filled in or adjusted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedProfile {
    #[serde(skip)]
    pub profile: Vector,
    /// Features that were absent or non-numeric and got [`DEFAULT_SCORE`]
    pub defaulted: Vec<String>,
    /// Features whose value fell outside [`MIN_SCORE`, `MAX_SCORE`]
    pub clamped: Vec<String>,
}

/// Aligns raw input with a feature schema
#[derive(Debug, Clone, Copy)]
pub struct ProfileNormalizer<'a> {
    schema: &'a FeatureSchema,
}

impl<'a> ProfileNormalizer<'a> {
    pub fn new(schema: &'a FeatureSchema) -> Self {
        Self { schema }
    }

    pub fn normalize(&self, raw: &RawProfile) -> Result<NormalizedProfile> {
        let mut values = Vec::with_capacity(self.schema.len());
        let mut defaulted = Vec::new();
        let mut clamped = Vec::new();

        for feature in self.schema.names() {
            let value = match raw.get(feature).and_then(coerce_number) {
                Some(value) => value,
                None => {
                    defaulted.push(feature.clone());
                    DEFAULT_SCORE
                }
            };

            let bounded = value.clamp(MIN_SCORE, MAX_SCORE);
            if bounded != value {
                clamped.push(feature.clone());
            }
            values.push(bounded);
        }

        if values.len() != self.schema.len() {
            return Err(Error::SchemaMismatch(format!(
                "expected {} features, built {}",
                self.schema.len(),
                values.len()
            )));
        }

        if !defaulted.is_empty() {
            warn!(features = ?defaulted, "Missing or non-numeric scores, using default {}", DEFAULT_SCORE);
        }
        if !clamped.is_empty() {
            debug!(features = ?clamped, "Scores clamped to [{}, {}]", MIN_SCORE, MAX_SCORE);
        }

        let unknown: Vec<&String> = raw.keys().filter(|k| !self.schema.contains(k)).collect();
        if !unknown.is_empty() {
            debug!(keys = ?unknown, "Ignoring keys outside the feature schema");
        }

        Ok(NormalizedProfile {
            profile: Vector::new(values),
            defaulted,
            clamped,
        })
    }
}

/// Extract the score mapping from a request body.
///
/// Accepts a bare object or one wrapped as `{"scores": {...}}` or
/// `{"user_profile": {...}}`.
pub fn raw_profile_from_value(value: Value) -> Result<RawProfile> {
    let Value::Object(mut map) = value else {
        return Err(Error::SchemaMismatch(
            "profile must be a JSON object of feature scores".to_string(),
        ));
    };

    for key in ENVELOPE_KEYS {
        if map.len() == 1 && matches!(map.get(key), Some(Value::Object(_))) {
            if let Some(Value::Object(inner)) = map.remove(key) {
                return Ok(inner);
            }
        }
    }

    Ok(map)
}
