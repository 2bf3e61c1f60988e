//! # Reference Dataset Loading and Validation
//!
//! The exclusive entry point for the labeled reference corpus the evaluator
//! scores the model against. The corpus arrives as a CSV file with a strict,
//! non-configurable schema: one sample per row, `id, diagnosis, feature×30`,
//! no header, with `diagnosis` being the letter `M` or `B`.
//!
//! - Strict Schema: column order and count are fixed. This keeps the loader
//!   boring and eliminates a class of configuration errors.
//! - Eager Validation: every row is fully validated at load time (width,
//!   label, numeric parse, finiteness), and the corpus as a whole must
//!   contain both classes. A dataset that fails any check is rejected
//!   outright; the evaluator never sees a partially valid corpus.

use crate::features::{FEATURE_COUNT, FeatureVector, InvalidInputError};
use crate::model::Label;
use std::path::Path;
use thiserror::Error;

/// Columns per row: sample id, diagnosis letter, then the 30 features.
const COLUMN_COUNT: usize = FEATURE_COUNT + 2;

/// A reference dataset that could not be materialized. Fatal to evaluation:
/// no metrics are computed or approximated from a bad corpus.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to read reference dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row} has {found} columns, expected {COLUMN_COUNT}")]
    WrongColumnCount { row: usize, found: usize },
    #[error("row {row} has unknown diagnosis label '{found}', expected 'M' or 'B'")]
    UnknownLabel { row: usize, found: String },
    #[error("row {row}, column {column} contains unparsable number '{value}'")]
    UnparsableFeature {
        row: usize,
        column: usize,
        value: String,
    },
    #[error("row {row} contains a non-finite value at feature index {index}")]
    NonFiniteFeature { row: usize, index: usize },
    #[error("reference dataset contains no samples")]
    Empty,
    #[error("reference dataset contains no {label} samples")]
    MissingClass { label: Label },
}

/// One labeled sample of the reference corpus.
#[derive(Debug, Clone)]
pub struct LabeledSample {
    pub features: FeatureVector,
    pub label: Label,
}

/// The validated, immutable reference corpus.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    samples: Vec<LabeledSample>,
}

impl ReferenceDataset {
    /// Wraps pre-built samples, enforcing the corpus-level invariants: at
    /// least one sample of each class.
    pub fn new(samples: Vec<LabeledSample>) -> Result<Self, DatasetError> {
        if samples.is_empty() {
            return Err(DatasetError::Empty);
        }
        for label in [Label::Benign, Label::Malignant] {
            if !samples.iter().any(|s| s.label == label) {
                return Err(DatasetError::MissingClass { label });
            }
        }
        Ok(ReferenceDataset { samples })
    }

    /// Loads and validates the corpus from its CSV file.
    pub fn from_csv_path(path: &Path) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let mut samples = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let row = index + 1;
            let record = record?;
            samples.push(parse_row(row, &record)?);
        }

        let dataset = ReferenceDataset::new(samples)?;
        log::info!(
            "loaded {} reference samples ({} benign, {} malignant) from {}",
            dataset.len(),
            dataset.class_count(Label::Benign),
            dataset.class_count(Label::Malignant),
            path.display()
        );
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabeledSample> {
        self.samples.iter()
    }

    pub fn class_count(&self, label: Label) -> usize {
        self.samples.iter().filter(|s| s.label == label).count()
    }
}

fn parse_row(row: usize, record: &csv::StringRecord) -> Result<LabeledSample, DatasetError> {
    if record.len() != COLUMN_COUNT {
        return Err(DatasetError::WrongColumnCount {
            row,
            found: record.len(),
        });
    }

    let label = match &record[1] {
        "M" => Label::Malignant,
        "B" => Label::Benign,
        other => {
            return Err(DatasetError::UnknownLabel {
                row,
                found: other.to_string(),
            });
        }
    };

    let mut values = [0.0; FEATURE_COUNT];
    for (offset, field) in record.iter().skip(2).enumerate() {
        values[offset] = field
            .parse::<f64>()
            .map_err(|_| DatasetError::UnparsableFeature {
                row,
                column: offset + 3,
                value: field.to_string(),
            })?;
    }

    let features = FeatureVector::new(values);
    features.check_finite().map_err(|err| match err {
        InvalidInputError::NonFinite { index, .. } => DatasetError::NonFiniteFeature { row, index },
        // Length is fixed by the array type above.
        InvalidInputError::WrongLength { .. } => unreachable!(),
    })?;

    Ok(LabeledSample { features, label })
}
