//! # Classification Metrics
//!
//! Confusion-matrix statistics, the ROC curve, and trapezoidal AUC for the
//! binary malignancy classifier. Malignant is the positive class throughout.
//!
//! Precision, recall, and F1 define their zero-division cases as 0 rather
//! than an error, so a degenerate prediction set still yields a complete
//! metrics table.

use crate::model::Label;
use serde::Serialize;
use std::cmp::Ordering;

/// 2×2 confusion matrix with malignant as the positive class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

impl ConfusionMatrix {
    /// Tallies predictions against ground truth. Both slices are index-aligned
    /// per sample.
    pub fn from_labels(actual: &[Label], predicted: &[Label]) -> Self {
        debug_assert_eq!(actual.len(), predicted.len());
        let mut matrix = ConfusionMatrix {
            true_positives: 0,
            false_positives: 0,
            true_negatives: 0,
            false_negatives: 0,
        };
        for (&truth, &guess) in actual.iter().zip(predicted) {
            match (truth, guess) {
                (Label::Malignant, Label::Malignant) => matrix.true_positives += 1,
                (Label::Benign, Label::Malignant) => matrix.false_positives += 1,
                (Label::Benign, Label::Benign) => matrix.true_negatives += 1,
                (Label::Malignant, Label::Benign) => matrix.false_negatives += 1,
            }
        }
        matrix
    }

    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positives + self.true_negatives, self.total())
    }

    /// `TP / (TP + FP)`; 0 when nothing was predicted positive.
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// `TP / (TP + FN)`; 0 when no positives exist.
    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    /// Harmonic mean of precision and recall; 0 when both are 0.
    pub fn f1(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 { 0.0 } else { 2.0 * p * r / (p + r) }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// ROC curve as parallel, ordered rate sequences. The first point is always
/// (0, 0) and the last is always (1, 1).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RocCurve {
    pub false_positive_rates: Vec<f64>,
    pub true_positive_rates: Vec<f64>,
}

impl RocCurve {
    /// Sweeps the decision threshold across the sorted distinct malignant
    /// probabilities, from most to least confident, recording one (fpr, tpr)
    /// point per distinct value.
    pub fn compute(actual: &[Label], malignant_probabilities: &[f64]) -> Self {
        debug_assert_eq!(actual.len(), malignant_probabilities.len());
        let positives = actual.iter().filter(|&&l| l == Label::Malignant).count();
        let negatives = actual.len() - positives;

        let mut order: Vec<usize> = (0..actual.len()).collect();
        order.sort_by(|&a, &b| {
            malignant_probabilities[b]
                .partial_cmp(&malignant_probabilities[a])
                .unwrap_or(Ordering::Equal)
        });

        let mut fpr = vec![0.0];
        let mut tpr = vec![0.0];
        let mut true_positives = 0usize;
        let mut false_positives = 0usize;

        let mut i = 0;
        while i < order.len() {
            // Samples sharing a probability fall together at one threshold.
            let threshold = malignant_probabilities[order[i]];
            while i < order.len() && malignant_probabilities[order[i]] == threshold {
                match actual[order[i]] {
                    Label::Malignant => true_positives += 1,
                    Label::Benign => false_positives += 1,
                }
                i += 1;
            }
            fpr.push(rate(false_positives, negatives));
            tpr.push(rate(true_positives, positives));
        }

        if fpr.last() != Some(&1.0) || tpr.last() != Some(&1.0) {
            fpr.push(1.0);
            tpr.push(1.0);
        }

        RocCurve {
            false_positive_rates: fpr,
            true_positive_rates: tpr,
        }
    }

    /// Area under the curve by trapezoidal integration.
    pub fn auc(&self) -> f64 {
        let x = &self.false_positive_rates;
        let y = &self.true_positive_rates;
        let mut area = 0.0;
        for i in 1..x.len() {
            area += (x[i] - x[i - 1]) * (y[i] + y[i - 1]) / 2.0;
        }
        area
    }
}

fn rate(count: usize, population: usize) -> f64 {
    if population == 0 {
        0.0
    } else {
        count as f64 / population as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const B: Label = Label::Benign;
    const M: Label = Label::Malignant;

    #[test]
    fn confusion_matrix_tallies_and_totals() {
        let actual = [M, M, M, B, B, B];
        let predicted = [M, M, B, B, B, M];
        let matrix = ConfusionMatrix::from_labels(&actual, &predicted);

        assert_eq!(matrix.true_positives, 2);
        assert_eq!(matrix.false_negatives, 1);
        assert_eq!(matrix.true_negatives, 2);
        assert_eq!(matrix.false_positives, 1);
        assert_eq!(matrix.total(), 6);
        assert_abs_diff_eq!(matrix.accuracy(), 4.0 / 6.0);
        assert_abs_diff_eq!(matrix.precision(), 2.0 / 3.0);
        assert_abs_diff_eq!(matrix.recall(), 2.0 / 3.0);
        assert_abs_diff_eq!(matrix.f1(), 2.0 / 3.0);
    }

    #[test]
    fn zero_division_yields_zero_not_error() {
        // Nothing predicted positive, and no positives in the ground truth.
        let matrix = ConfusionMatrix::from_labels(&[B, B], &[B, B]);
        assert_eq!(matrix.precision(), 0.0);
        assert_eq!(matrix.recall(), 0.0);
        assert_eq!(matrix.f1(), 0.0);
        assert_eq!(matrix.accuracy(), 1.0);
    }

    #[test]
    fn roc_endpoints_are_fixed() {
        let actual = [M, B, M, B];
        let probabilities = [0.9, 0.8, 0.4, 0.1];
        let curve = RocCurve::compute(&actual, &probabilities);

        assert_eq!(curve.false_positive_rates[0], 0.0);
        assert_eq!(curve.true_positive_rates[0], 0.0);
        assert_eq!(*curve.false_positive_rates.last().unwrap(), 1.0);
        assert_eq!(*curve.true_positive_rates.last().unwrap(), 1.0);
        assert_eq!(
            curve.false_positive_rates.len(),
            curve.true_positive_rates.len()
        );
    }

    #[test]
    fn perfect_separation_has_unit_auc() {
        let actual = [M, M, B, B];
        let probabilities = [0.9, 0.8, 0.2, 0.1];
        let curve = RocCurve::compute(&actual, &probabilities);
        assert_abs_diff_eq!(curve.auc(), 1.0);
    }

    #[test]
    fn symmetric_mix_has_half_auc() {
        // Half the malignant/benign pairs are ranked correctly, half are not.
        let actual = [M, B, B, M];
        let probabilities = [0.8, 0.6, 0.4, 0.2];
        let curve = RocCurve::compute(&actual, &probabilities);
        assert_abs_diff_eq!(curve.auc(), 0.5);
    }

    #[test]
    fn tied_probabilities_collapse_to_one_threshold() {
        let actual = [M, B, M, B];
        let probabilities = [0.7, 0.7, 0.7, 0.7];
        let curve = RocCurve::compute(&actual, &probabilities);
        // One sweep step covering everything, plus the fixed origin.
        assert_eq!(curve.false_positive_rates, vec![0.0, 1.0]);
        assert_eq!(curve.true_positive_rates, vec![0.0, 1.0]);
        assert_abs_diff_eq!(curve.auc(), 0.5);
    }
}
