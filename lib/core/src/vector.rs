use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A vector of floating point numbers laid out in feature schema order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self {
            data: vec![0.0; dim],
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, f32> {
        self.data.iter()
    }

    #[inline]
    pub fn dot(&self, other: &Vector) -> f32 {
        // Two accumulators keep the dependency chain short
        let mut sum0 = 0.0f32;
        let mut sum1 = 0.0f32;
        let chunks_a = self.data.chunks_exact(2);
        let chunks_b = other.data.chunks_exact(2);
        let rem_a = chunks_a.remainder();
        let rem_b = chunks_b.remainder();

        for (a, b) in chunks_a.zip(chunks_b) {
            sum0 += a[0] * b[0];
            sum1 += a[1] * b[1];
        }
        for (a, b) in rem_a.iter().zip(rem_b) {
            sum0 += a * b;
        }

        sum0 + sum1
    }

    #[inline]
    pub fn norm(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Compute cosine similarity with another vector.
    ///
    /// Returns 0.0 when the dimensions differ or either vector has zero norm.
    #[inline]
    pub fn cosine_similarity(&self, other: &Vector) -> f32 {
        if self.dim() != other.dim() {
            return 0.0;
        }

        let norm_a = self.norm();
        let norm_b = other.norm();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        self.dot(other) / (norm_a * norm_b)
    }

    /// Element-wise arithmetic mean of `rows`, or `None` when empty.
    ///
    /// All rows must share the first row's dimension.
    pub fn mean_of<'a, I>(rows: I) -> Option<Vector>
    where
        I: IntoIterator<Item = &'a Vector>,
    {
        let mut iter = rows.into_iter();
        let first = iter.next()?;
        let mut sum = first.clone();
        let mut count = 1usize;

        for row in iter {
            sum = &sum + row;
            count += 1;
        }

        Some(&sum * (1.0 / count as f32))
    }
}

impl From<Vec<f32>> for Vector {
    fn from(data: Vec<f32>) -> Self {
        Self::new(data)
    }
}

impl Add for &Vector {
    type Output = Vector;

    fn add(self, other: &Vector) -> Vector {
        assert_eq!(self.dim(), other.dim());
        Vector::new(
            self.data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| a + b)
                .collect(),
        )
    }
}

impl Sub for &Vector {
    type Output = Vector;

    fn sub(self, other: &Vector) -> Vector {
        assert_eq!(self.dim(), other.dim());
        Vector::new(
            self.data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| a - b)
                .collect(),
        )
    }
}

impl Mul<f32> for &Vector {
    type Output = Vector;

    fn mul(self, scalar: f32) -> Vector {
        Vector::new(self.data.iter().map(|x| x * scalar).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let v1 = Vector::new(vec![1.0, 0.0]);
        let v2 = Vector::new(vec![1.0, 0.0]);
        assert!((v1.cosine_similarity(&v2) - 1.0).abs() < 1e-6);

        let v3 = Vector::new(vec![1.0, 0.0]);
        let v4 = Vector::new(vec![0.0, 1.0]);
        assert!((v3.cosine_similarity(&v4) - 0.0).abs() < 1e-6);

        let v5 = Vector::new(vec![1.0, 2.0, 3.0]);
        let v6 = Vector::new(vec![-1.0, -2.0, -3.0]);
        assert!((v5.cosine_similarity(&v6) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_zero_norm() {
        let zero = Vector::zeros(3);
        let v = Vector::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(zero.cosine_similarity(&v), 0.0);
        assert_eq!(v.cosine_similarity(&zero), 0.0);
        assert_eq!(zero.cosine_similarity(&zero), 0.0);
    }

    #[test]
    fn test_cosine_dimension_mismatch() {
        let a = Vector::new(vec![1.0, 2.0]);
        let b = Vector::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(a.cosine_similarity(&b), 0.0);
    }

    #[test]
    fn test_dot_odd_length() {
        let a = Vector::new(vec![1.0, 2.0, 3.0]);
        let b = Vector::new(vec![4.0, 5.0, 6.0]);
        assert_eq!(a.dot(&b), 32.0);
        assert!((Vector::new(vec![3.0, 4.0]).norm() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_mean_of() {
        let rows = vec![
            Vector::new(vec![80.0, 20.0]),
            Vector::new(vec![60.0, 40.0]),
        ];
        let mean = Vector::mean_of(&rows).unwrap();
        assert_eq!(mean.as_slice(), &[70.0, 30.0]);

        let empty: Vec<Vector> = Vec::new();
        assert!(Vector::mean_of(&empty).is_none());
    }

    #[test]
    fn test_transparent_serde() {
        let v = Vector::new(vec![1.5, 2.0]);
        assert_eq!(serde_json::to_string(&v).unwrap(), "[1.5,2.0]");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn cosine_is_bounded(
                a in prop::collection::vec(-100.0f32..100.0, 8),
                b in prop::collection::vec(-100.0f32..100.0, 8),
            ) {
                let sim = Vector::new(a).cosine_similarity(&Vector::new(b));
                prop_assert!(sim >= -1.0 - 1e-4 && sim <= 1.0 + 1e-4);
            }

            #[test]
            fn self_similarity_is_one(a in prop::collection::vec(1.0f32..100.0, 1..24)) {
                let v = Vector::new(a);
                prop_assert!((v.cosine_similarity(&v) - 1.0).abs() < 1e-4);
            }
        }
    }
}
