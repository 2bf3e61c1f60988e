//! # Radial Profile Normalization
//!
//! Prepares the data behind the radar chart that compares one patient against
//! the benign and malignant class averages on the 10 mean features. The three
//! vectors are min-max scaled *jointly*, per dimension, so they share one
//! [0, 1] axis system, and each output sequence is closed by repeating its
//! first value so the renderer can draw a closed polygon.

use crate::features::MEAN_FEATURE_COUNT;
use serde::Serialize;

/// Three normalized, closed traces ready for radial rendering. Each sequence
/// has length 11: the 10 mean-feature dimensions plus the repeated first
/// point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadialProfile {
    pub patient: Vec<f64>,
    pub benign_average: Vec<f64>,
    pub malignant_average: Vec<f64>,
}

/// Jointly min-max scales the patient vector and the two class-average
/// vectors.
///
/// For each dimension the minimum and maximum are taken across all three
/// inputs. A degenerate dimension (max == min) uses a denominator of 1, which
/// normalizes all three values to 0 instead of dividing by zero.
pub fn normalize_profile(
    patient: &[f64; MEAN_FEATURE_COUNT],
    benign_average: &[f64; MEAN_FEATURE_COUNT],
    malignant_average: &[f64; MEAN_FEATURE_COUNT],
) -> RadialProfile {
    let mut low = [f64::INFINITY; MEAN_FEATURE_COUNT];
    let mut range = [1.0; MEAN_FEATURE_COUNT];
    for dim in 0..MEAN_FEATURE_COUNT {
        let values = [patient[dim], benign_average[dim], malignant_average[dim]];
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        low[dim] = min;
        range[dim] = if max == min { 1.0 } else { max - min };
    }

    let scale = |vector: &[f64; MEAN_FEATURE_COUNT]| -> Vec<f64> {
        let mut trace: Vec<f64> = vector
            .iter()
            .enumerate()
            .map(|(dim, &v)| (v - low[dim]) / range[dim])
            .collect();
        // Close the polygon with the trace's own first point.
        trace.push(trace[0]);
        trace
    };

    RadialProfile {
        patient: scale(patient),
        benign_average: scale(benign_average),
        malignant_average: scale(malignant_average),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traces_are_closed_and_bounded() {
        let patient = [5.0, 1.0, 9.0, 2.0, 3.0, 4.0, 7.0, 8.0, 6.0, 0.5];
        let benign = [1.0; MEAN_FEATURE_COUNT];
        let malignant = [10.0; MEAN_FEATURE_COUNT];
        let profile = normalize_profile(&patient, &benign, &malignant);

        for trace in [
            &profile.patient,
            &profile.benign_average,
            &profile.malignant_average,
        ] {
            assert_eq!(trace.len(), MEAN_FEATURE_COUNT + 1);
            assert_eq!(trace[0], trace[MEAN_FEATURE_COUNT]);
            assert!(trace.iter().all(|&v| (0.0..=1.0).contains(&v)));
        }
        // Per-dimension extremes land on the axis bounds.
        assert_eq!(profile.benign_average[0], 0.0);
        assert_eq!(profile.malignant_average[0], 1.0);
    }

    #[test]
    fn identical_vectors_normalize_to_zero() {
        let same = [3.25; MEAN_FEATURE_COUNT];
        let profile = normalize_profile(&same, &same, &same);
        for trace in [
            profile.patient,
            profile.benign_average,
            profile.malignant_average,
        ] {
            assert!(trace.iter().all(|&v| v == 0.0));
        }
    }
}
