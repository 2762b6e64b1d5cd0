//! Pre-fitted feature scalers
//!
//! Scalers are fitted by an external training pipeline and only ever applied
//! here. The same instance must scale both sides of every comparison.

use crate::{Error, Result, Vector};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Inference contract of a pre-fitted, deterministic feature transform
pub trait Scaler: Send + Sync + std::fmt::Debug {
    /// Number of input features the scaler was fitted on
    fn n_features(&self) -> usize;

    /// Scale a single vector
    fn transform(&self, input: &Vector) -> Result<Vector>;

    /// Scale many vectors, preserving input order
    fn transform_batch(&self, inputs: &[Vector]) -> Result<Vec<Vector>> {
        inputs.par_iter().map(|v| self.transform(v)).collect()
    }
}

/// Standardization: `(x - mean) / scale`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandardScaler {
    pub mean: Vec<f32>,
    pub scale: Vec<f32>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f32>, scale: Vec<f32>) -> Result<Self> {
        if mean.len() != scale.len() {
            return Err(Error::dimension("scaler scale", mean.len(), scale.len()));
        }
        Ok(Self { mean, scale })
    }
}

impl Scaler for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, input: &Vector) -> Result<Vector> {
        if input.dim() != self.n_features() {
            return Err(Error::dimension("scaler input", self.n_features(), input.dim()));
        }

        Ok(Vector::new(
            input
                .iter()
                .zip(self.mean.iter().zip(&self.scale))
                .map(|(x, (mean, scale))| {
                    // Constant features were fitted with zero variance
                    let scale = if *scale == 0.0 { 1.0 } else { *scale };
                    (x - mean) / scale
                })
                .collect(),
        ))
    }
}

/// Range scaling: `x * scale + min`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MinMaxScaler {
    pub min: Vec<f32>,
    pub scale: Vec<f32>,
}

impl MinMaxScaler {
    pub fn new(min: Vec<f32>, scale: Vec<f32>) -> Result<Self> {
        if min.len() != scale.len() {
            return Err(Error::dimension("scaler scale", min.len(), scale.len()));
        }
        Ok(Self { min, scale })
    }
}

impl Scaler for MinMaxScaler {
    fn n_features(&self) -> usize {
        self.min.len()
    }

    fn transform(&self, input: &Vector) -> Result<Vector> {
        if input.dim() != self.n_features() {
            return Err(Error::dimension("scaler input", self.n_features(), input.dim()));
        }

        Ok(Vector::new(
            input
                .iter()
                .zip(self.min.iter().zip(&self.scale))
                .map(|(x, (min, scale))| x * scale + min)
                .collect(),
        ))
    }
}

/// Serialized scaler artifact, tagged by `kind`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerParams {
    Standard { mean: Vec<f32>, scale: Vec<f32> },
    MinMax { min: Vec<f32>, scale: Vec<f32> },
}

impl ScalerParams {
    /// Validate the parameters and build the concrete scaler
    pub fn build(self) -> Result<Box<dyn Scaler>> {
        match self {
            ScalerParams::Standard { mean, scale } => {
                Ok(Box::new(StandardScaler::new(mean, scale)?))
            }
            ScalerParams::MinMax { min, scale } => Ok(Box::new(MinMaxScaler::new(min, scale)?)),
        }
    }
}
