//! Feature schema definitions
//!
//! The feature schema is the ordered list of subject and aptitude names that
//! fixes the layout of every profile vector, every reference row and the
//! input of the scaler and classifier.

use crate::{Error, Result, Vector};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Ordered, non-empty list of unique feature names
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FeatureSchema {
    names: Vec<String>,
    positions: AHashMap<String, usize>,
}

impl FeatureSchema {
    /// Create a schema, rejecting empty lists, blank names and duplicates
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        if names.is_empty() {
            return Err(Error::InvalidConfig(
                "feature schema cannot be empty".to_string(),
            ));
        }

        let mut positions = AHashMap::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(Error::InvalidConfig(format!(
                    "feature name at position {} is blank",
                    index
                )));
            }
            if positions.insert(name.clone(), index).is_some() {
                return Err(Error::InvalidConfig(format!(
                    "feature '{}' appears more than once",
                    name
                )));
            }
        }

        Ok(Self { names, positions })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Check that a vector is laid out for this schema
    pub fn check(&self, vector: &Vector, context: &'static str) -> Result<()> {
        if vector.dim() != self.len() {
            return Err(Error::dimension(context, self.len(), vector.dim()));
        }
        Ok(())
    }
}

impl PartialEq for FeatureSchema {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
    }
}

impl TryFrom<Vec<String>> for FeatureSchema {
    type Error = Error;

    fn try_from(names: Vec<String>) -> Result<Self> {
        Self::new(names)
    }
}

impl From<FeatureSchema> for Vec<String> {
    fn from(schema: FeatureSchema) -> Self {
        schema.names
    }
}
