//! # Per-Feature Contribution Ranking
//!
//! Decomposes a single prediction into signed per-feature contributions to
//! the decision score. The sign convention is flipped relative to the raw
//! (benign-log-odds) score so that a positive contribution reads as "pushes
//! toward malignant", matching the direction of the reported malignant
//! percentage.
//!
//! The engine identifies features by index; display labels are supplied by
//! the caller so locale-specific catalogs stay outside this crate.

use crate::features::{FEATURE_COUNT, FeatureVector, InvalidInputError};
use crate::model;
use crate::params::ModelParameters;
use serde::Serialize;
use std::cmp::Ordering;

/// At most this many entries are reported per prediction.
const RANKED_LIMIT: usize = 10;

/// One feature's signed share of a prediction. Positive values push toward
/// malignant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributionEntry {
    pub feature_index: usize,
    pub label: String,
    pub value: f64,
}

/// Ranks the strongest per-feature contributions for one prediction.
///
/// Each contribution is `−(standardized[i] · weight[i])`. Entries are ordered
/// by descending absolute value; equal magnitudes keep the lower feature
/// index first, so the ordering is deterministic. At most 10 entries are
/// returned.
pub fn rank_contributions(
    vector: &FeatureVector,
    params: &ModelParameters,
    labels: &[&str; FEATURE_COUNT],
) -> Result<Vec<ContributionEntry>, InvalidInputError> {
    let standardized = model::standardize(vector, params)?;

    let mut entries: Vec<ContributionEntry> = standardized
        .iter()
        .zip(params.weights.iter())
        .enumerate()
        .map(|(feature_index, (&s, &w))| ContributionEntry {
            feature_index,
            label: labels[feature_index].to_string(),
            value: -(s * w),
        })
        .collect();

    entries.sort_by(|a, b| {
        b.value
            .abs()
            .partial_cmp(&a.value.abs())
            .unwrap_or(Ordering::Equal)
            .then(a.feature_index.cmp(&b.feature_index))
    });
    entries.truncate(RANKED_LIMIT);
    Ok(entries)
}
