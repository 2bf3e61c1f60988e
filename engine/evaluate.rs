//! # One-Time Model Evaluation
//!
//! Scores the entire reference corpus through the same standardize → score →
//! map path used for individual predictions, and aggregates the results into
//! a [`MetricsBundle`]. The corpus and the parameters never change within a
//! process, so the bundle is computed at most once: the first caller pays for
//! the pass, every later caller (from any thread) gets the same cached,
//! thereafter-immutable result.
//!
//! The memoization is the only mutable state in the engine. Its lifecycle is
//! strictly `uninitialized → computing → cached`, enforced by
//! [`std::sync::OnceLock`]; there is no path back to uninitialized.

use crate::dataset::ReferenceDataset;
use crate::features::FEATURE_COUNT;
use crate::metrics::{ConfusionMatrix, RocCurve};
use crate::model::{self, Label};
use crate::params::ModelParameters;
use serde::Serialize;
use std::sync::OnceLock;

/// Aggregate evaluation of the classifier against the reference corpus,
/// with malignant as the positive class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsBundle {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub confusion: ConfusionMatrix,
    pub roc: RocCurve,
    pub auc: f64,
    /// Element-wise mean of the raw feature vectors of benign samples.
    pub benign_average: [f64; FEATURE_COUNT],
    /// Element-wise mean of the raw feature vectors of malignant samples.
    pub malignant_average: [f64; FEATURE_COUNT],
}

/// Evaluates the model against a reference corpus exactly once per instance.
///
/// Constructing the evaluator requires an already-materialized dataset, so a
/// missing or malformed corpus fails before any metric exists, never
/// partially. The evaluator is `Sync`; concurrent first calls to
/// [`Evaluator::metrics`] serialize on the initialization lock and the corpus
/// pass runs a single time.
#[derive(Debug)]
pub struct Evaluator {
    params: ModelParameters,
    dataset: ReferenceDataset,
    bundle: OnceLock<MetricsBundle>,
}

impl Evaluator {
    pub fn new(params: ModelParameters, dataset: ReferenceDataset) -> Self {
        Evaluator {
            params,
            dataset,
            bundle: OnceLock::new(),
        }
    }

    /// The cached metrics bundle, computing it on first use.
    pub fn metrics(&self) -> &MetricsBundle {
        self.bundle.get_or_init(|| self.compute())
    }

    pub fn dataset(&self) -> &ReferenceDataset {
        &self.dataset
    }

    fn compute(&self) -> MetricsBundle {
        let n = self.dataset.len();
        let mut actual = Vec::with_capacity(n);
        let mut predicted = Vec::with_capacity(n);
        let mut malignant_probabilities = Vec::with_capacity(n);

        for sample in self.dataset.iter() {
            // Rows were validated finite at load time.
            let standardized = model::standardize_validated(&sample.features, &self.params);
            let z = model::raw_score(standardized.view(), &self.params);
            let result = model::ClassificationResult::from_raw_score(z);

            actual.push(sample.label);
            predicted.push(result.label);
            malignant_probabilities.push(result.malignant_probability());
        }

        let confusion = ConfusionMatrix::from_labels(&actual, &predicted);
        let roc = RocCurve::compute(&actual, &malignant_probabilities);
        let auc = roc.auc();

        let bundle = MetricsBundle {
            accuracy: confusion.accuracy(),
            precision: confusion.precision(),
            recall: confusion.recall(),
            f1: confusion.f1(),
            confusion,
            roc,
            auc,
            benign_average: self.class_average(Label::Benign),
            malignant_average: self.class_average(Label::Malignant),
        };

        log::info!(
            "evaluated {} reference samples: accuracy={:.4} precision={:.4} recall={:.4} f1={:.4} auc={:.4}",
            n,
            bundle.accuracy,
            bundle.precision,
            bundle.recall,
            bundle.f1,
            bundle.auc
        );
        bundle
    }

    /// Element-wise mean of the raw vectors with the given ground-truth label.
    /// The dataset invariant guarantees at least one sample per class.
    fn class_average(&self, label: Label) -> [f64; FEATURE_COUNT] {
        let mut sums = [0.0; FEATURE_COUNT];
        let mut count = 0usize;
        for sample in self.dataset.iter().filter(|s| s.label == label) {
            for (sum, value) in sums.iter_mut().zip(sample.features.values()) {
                *sum += value;
            }
            count += 1;
        }
        for sum in &mut sums {
            *sum /= count as f64;
        }
        sums
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::LabeledSample;
    use crate::features::{FeatureVector, MEAN_FEATURE_COUNT, SAMPLE_BENIGN, SAMPLE_MALIGNANT};
    use crate::profile;

    fn synthetic_dataset() -> ReferenceDataset {
        let mut samples = Vec::new();
        for shift in 0..4 {
            let mut benign = SAMPLE_BENIGN;
            let mut malignant = SAMPLE_MALIGNANT;
            benign[0] += shift as f64 * 0.1;
            malignant[0] += shift as f64 * 0.1;
            samples.push(LabeledSample {
                features: FeatureVector::new(benign),
                label: Label::Benign,
            });
            samples.push(LabeledSample {
                features: FeatureVector::new(malignant),
                label: Label::Malignant,
            });
        }
        ReferenceDataset::new(samples).unwrap()
    }

    fn evaluator() -> Evaluator {
        Evaluator::new(ModelParameters::embedded().clone(), synthetic_dataset())
    }

    #[test]
    fn confusion_total_matches_corpus_size() {
        let evaluator = evaluator();
        let bundle = evaluator.metrics();
        assert_eq!(bundle.confusion.total(), evaluator.dataset().len());
    }

    #[test]
    fn roc_is_anchored_and_auc_bounded() {
        let evaluator = evaluator();
        let bundle = evaluator.metrics();
        assert_eq!(bundle.roc.false_positive_rates[0], 0.0);
        assert_eq!(bundle.roc.true_positive_rates[0], 0.0);
        assert_eq!(*bundle.roc.false_positive_rates.last().unwrap(), 1.0);
        assert_eq!(*bundle.roc.true_positive_rates.last().unwrap(), 1.0);
        assert!((0.0..=1.0).contains(&bundle.auc));
    }

    #[test]
    fn separable_synthetic_corpus_is_classified_cleanly() {
        // The canonical samples sit far apart in score space, so the model
        // must separate the two clusters perfectly.
        let bundle = evaluator().metrics().clone();
        assert_eq!(bundle.accuracy, 1.0);
        assert_eq!(bundle.precision, 1.0);
        assert_eq!(bundle.recall, 1.0);
        assert_eq!(bundle.auc, 1.0);
    }

    #[test]
    fn metrics_are_computed_once_and_shared() {
        let evaluator = evaluator();
        let first = evaluator.metrics();
        let second = evaluator.metrics();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first, second);
    }

    #[test]
    fn class_averages_feed_profile_normalization() {
        let evaluator = evaluator();
        let bundle = evaluator.metrics();

        // Averages follow their class (shifts cancel around a +0.15 offset
        // on the first feature).
        assert!(bundle.malignant_average[0] > bundle.benign_average[0]);

        let mut patient = [0.0; MEAN_FEATURE_COUNT];
        patient.copy_from_slice(&SAMPLE_BENIGN[..MEAN_FEATURE_COUNT]);
        let mut benign_avg = [0.0; MEAN_FEATURE_COUNT];
        benign_avg.copy_from_slice(&bundle.benign_average[..MEAN_FEATURE_COUNT]);
        let mut malignant_avg = [0.0; MEAN_FEATURE_COUNT];
        malignant_avg.copy_from_slice(&bundle.malignant_average[..MEAN_FEATURE_COUNT]);

        let radial = profile::normalize_profile(&patient, &benign_avg, &malignant_avg);
        assert_eq!(radial.patient.len(), MEAN_FEATURE_COUNT + 1);
    }
}
