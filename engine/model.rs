//! # Standardization, Linear Scoring, and Probability Mapping
//!
//! The per-request prediction path. Three small pure stages:
//!
//! 1. Standardize: `(raw − mean) / std`, element-wise against the embedded
//!    training statistics.
//! 2. Score: `dot(standardized, weights) + bias`, the log-odds of the benign
//!    class.
//! 3. Map: a numerically stable logistic transform from log-odds to a benign
//!    probability in (0, 1).
//!
//! The logistic transform branches on the sign of the score so the
//! exponential argument is never positive. This keeps `exp` from overflowing
//! for large |z| while staying exact at the boundary: a score of 0 maps to
//! exactly 0.5.

use crate::features::{FeatureVector, InvalidInputError};
use crate::params::ModelParameters;
use ndarray::{Array1, ArrayView1};
use serde::Serialize;
use std::fmt;

/// Diagnostic class of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Label {
    Benign,
    Malignant,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Benign => write!(f, "benign"),
            Label::Malignant => write!(f, "malignant"),
        }
    }
}

/// The outcome of scoring one feature vector. Ephemeral; produced per request.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ClassificationResult {
    /// Calibrated probability of the benign class, in (0, 1).
    pub benign_probability: f64,
    /// `(1 − benign probability) × 100`, the figure shown to clinicians.
    pub malignant_percentage: f64,
    pub label: Label,
}

impl ClassificationResult {
    /// Maps a raw score to its classification. A malignant probability of
    /// exactly 0.5 classifies as malignant.
    pub fn from_raw_score(z: f64) -> Self {
        let benign = benign_probability(z);
        let malignant = 1.0 - benign;
        let label = if malignant >= 0.5 {
            Label::Malignant
        } else {
            Label::Benign
        };
        ClassificationResult {
            benign_probability: benign,
            malignant_percentage: malignant * 100.0,
            label,
        }
    }

    #[inline]
    pub fn malignant_probability(&self) -> f64 {
        1.0 - self.benign_probability
    }
}

/// Standardizes a raw vector against the training statistics, rejecting
/// non-finite input before any arithmetic.
pub fn standardize(
    vector: &FeatureVector,
    params: &ModelParameters,
) -> Result<Array1<f64>, InvalidInputError> {
    vector.check_finite()?;
    Ok(standardize_validated(vector, params))
}

/// Standardization without the finiteness check, for inputs already validated
/// at a boundary (the reference-dataset loader checks every row on load).
pub(crate) fn standardize_validated(
    vector: &FeatureVector,
    params: &ModelParameters,
) -> Array1<f64> {
    let raw = Array1::from_iter(vector.values().iter().copied());
    (raw - &params.means) / &params.stds
}

/// The raw decision score: log-odds of the benign class.
pub fn raw_score(standardized: ArrayView1<f64>, params: &ModelParameters) -> f64 {
    standardized.dot(&params.weights) + params.bias
}

/// Stable logistic transform. Monotonically increasing, finite for any finite
/// input, exactly 0.5 at zero.
pub fn benign_probability(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + f64::exp(-z))
    } else {
        let ez = f64::exp(z);
        ez / (1.0 + ez)
    }
}

/// Scores one sample: standardize, score, map. The only failure mode is
/// invalid input; the arithmetic itself is total.
pub fn score(
    vector: &FeatureVector,
    params: &ModelParameters,
) -> Result<ClassificationResult, InvalidInputError> {
    let standardized = standardize(vector, params)?;
    let z = raw_score(standardized.view(), params);
    Ok(ClassificationResult::from_raw_score(z))
}
