//! # Feature Schema and Input Contract
//!
//! This module is the single source of truth for the feature layout every other
//! module depends on: 30 morphological measurements of a cell nucleus, in a
//! fixed order that must match the embedded model parameters index-for-index.
//!
//! - Fixed Order: the 10 underlying quantities (radius, texture, perimeter,
//!   area, smoothness, compactness, concavity, concave points, symmetry,
//!   fractal dimension) appear three times: mean values first, then standard
//!   errors, then "worst" (largest observed) values.
//! - Typed Length: `FeatureVector` wraps a `[f64; 30]`, so a vector of the
//!   wrong length cannot be constructed except through the fallible slice
//!   boundary, which rejects it up front.
//! - No Coercion: non-finite entries are rejected with an error, never
//!   silently replaced.

use serde::Serialize;
use thiserror::Error;

/// Total number of features in the fixed schema.
pub const FEATURE_COUNT: usize = 30;

/// Number of leading "mean" features (the subset used for profile comparison).
pub const MEAN_FEATURE_COUNT: usize = 10;

/// Canonical English display names, indexed in schema order. Presentation
/// layers with their own locale catalogs supply replacements; the engine only
/// ever identifies a feature by index.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Mean Radius",
    "Mean Texture",
    "Mean Perimeter",
    "Mean Area",
    "Mean Smoothness",
    "Mean Compactness",
    "Mean Concavity",
    "Mean Concave Pts",
    "Mean Symmetry",
    "Mean Fractal Dim",
    "Radius SE",
    "Texture SE",
    "Perimeter SE",
    "Area SE",
    "Smoothness SE",
    "Compactness SE",
    "Concavity SE",
    "Concave Pts SE",
    "Symmetry SE",
    "Fractal Dim SE",
    "Worst Radius",
    "Worst Texture",
    "Worst Perimeter",
    "Worst Area",
    "Worst Smoothness",
    "Worst Compactness",
    "Worst Concavity",
    "Worst Concave Pts",
    "Worst Symmetry",
    "Worst Fractal Dim",
];

/// A reference measurement set from a confirmed benign sample, usable as a
/// demonstration input.
pub const SAMPLE_BENIGN: [f64; FEATURE_COUNT] = [
    12.25, 17.94, 78.27, 462.0, 0.0869, 0.0678, 0.029, 0.0149, 0.172, 0.0596, 0.236, 0.866, 1.68,
    19.54, 0.0054, 0.0137, 0.0186, 0.0072, 0.0163, 0.0025, 13.5, 22.46, 86.92, 562.1, 0.119,
    0.142, 0.093, 0.044, 0.247, 0.071,
];

/// A reference measurement set from a confirmed malignant sample.
pub const SAMPLE_MALIGNANT: [f64; FEATURE_COUNT] = [
    19.81, 22.15, 130.0, 1260.0, 0.0984, 0.159, 0.1974, 0.1049, 0.19, 0.061, 0.746, 1.153, 5.439,
    94.44, 0.0061, 0.0349, 0.056, 0.0179, 0.0225, 0.0043, 25.67, 29.33, 170.1, 2027.0, 0.145,
    0.4504, 0.5187, 0.2154, 0.369, 0.1048,
];

/// Rejection of a raw measurement vector at the input boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInputError {
    #[error("expected exactly {FEATURE_COUNT} feature values, got {found}")]
    WrongLength { found: usize },
    #[error("feature '{name}' (index {index}) has non-finite value {value}")]
    NonFinite {
        index: usize,
        name: &'static str,
        value: f64,
    },
}

/// An ordered, fixed-length set of raw feature measurements.
///
/// Construction from an array is infallible (the length is part of the type);
/// construction from a slice and finiteness checking are the two fallible
/// boundaries, both reporting [`InvalidInputError`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        FeatureVector(values)
    }

    /// Builds a vector from a runtime-sized slice, rejecting any length other
    /// than the schema's 30.
    pub fn from_slice(values: &[f64]) -> Result<Self, InvalidInputError> {
        let array: [f64; FEATURE_COUNT] = values
            .try_into()
            .map_err(|_| InvalidInputError::WrongLength {
                found: values.len(),
            })?;
        Ok(FeatureVector(array))
    }

    /// Verifies every entry is finite. Scoring paths call this before any
    /// arithmetic so NaN/infinity can never leak into a probability.
    pub fn check_finite(&self) -> Result<(), InvalidInputError> {
        for (index, &value) in self.0.iter().enumerate() {
            if !value.is_finite() {
                return Err(InvalidInputError::NonFinite {
                    index,
                    name: FEATURE_NAMES[index],
                    value,
                });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    /// The leading 10 "mean" measurements, the axes of the radial profile.
    #[inline]
    pub fn mean_features(&self) -> [f64; MEAN_FEATURE_COUNT] {
        let mut out = [0.0; MEAN_FEATURE_COUNT];
        out.copy_from_slice(&self.0[..MEAN_FEATURE_COUNT]);
        out
    }
}
