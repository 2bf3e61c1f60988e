//! # Embedded Model Parameters
//!
//! The trained logistic-regression parameters and the standardization
//! statistics that accompany them. Everything here is baked in at compile
//! time: the engine ships with zero external model files, and the parameters
//! are never recomputed or mutated after process start.
//!
//! The weight, mean, and std arrays are index-aligned with the feature schema
//! in [`crate::features`]. A single validated [`ModelParameters`] instance is
//! published process-wide through [`ModelParameters::embedded`]; user-supplied
//! parameter sets (tests, retrained models) pass through the same
//! [`ModelParameters::new`] constructor and the same validation.

use crate::features::FEATURE_COUNT;
use ndarray::Array1;
use std::sync::OnceLock;
use thiserror::Error;

/// Trained logistic-regression weights, one per feature in schema order.
/// Mostly negative: the raw score is the log-odds of the *benign* class, and
/// elevated nuclear measurements push the score down.
const WEIGHTS: [f64; FEATURE_COUNT] = [
    -0.5389699731743985,
    -0.6434330617896211,
    -0.5174582015672622,
    -0.5770918729105026,
    -0.2008837293724098,
    0.1789416511927587,
    -0.6330460231705183,
    -0.7811099571940602,
    0.030956916449250783,
    0.29941691085377464,
    -0.8980222254853673,
    0.0585137030636357,
    -0.6163295474882419,
    -0.6953746065699656,
    -0.17861237266070726,
    0.5966244425141785,
    0.07464162683808573,
    -0.1349711696127181,
    0.3070665545532483,
    0.5311932217459552,
    -0.8192697259096365,
    -1.0289293339678638,
    -0.7069306940664978,
    -0.7941580589413779,
    -0.6927809984196284,
    -0.13324953592635932,
    -0.7214969938484923,
    -0.7540139817698556,
    -0.8482017996838813,
    -0.13518883825108646,
];

/// Intercept term of the linear model.
const BIAS: f64 = 0.5602710363570669;

/// Per-feature means of the training corpus, used to center raw inputs.
const FEATURE_MEANS: [f64; FEATURE_COUNT] = [
    14.117635164835171,
    19.18503296703298,
    91.88224175824185,
    654.3775824175825,
    0.09574402197802204,
    0.10361931868131863,
    0.08889814505494498,
    0.04827987032967031,
    0.18109868131868148,
    0.06275676923076925,
    0.40201582417582393,
    1.2026868131868136,
    2.858253406593405,
    40.0712989010989,
    0.00698907472527473,
    0.025635448351648396,
    0.0328236723076923,
    0.011893940659340657,
    0.020573512087912114,
    0.003820455604395603,
    16.23510329670329,
    25.535692307692308,
    107.10312087912091,
    876.9870329670341,
    0.13153213186813184,
    0.2527418021978023,
    0.27459456923076936,
    0.11418222197802197,
    0.29050219780219777,
    0.0838678461538462,
];

/// Per-feature standard deviations of the training corpus, used to scale
/// centered inputs. All strictly positive; validation enforces this for any
/// parameter set constructed at runtime.
const FEATURE_STDS: [f64; FEATURE_COUNT] = [
    3.5319276091287684,
    4.261314035201523,
    24.29528446596607,
    354.5529252060648,
    0.013907698124434402,
    0.052412805496132024,
    0.07938050908411763,
    0.038018354057687886,
    0.027457084964442154,
    0.0072017850581413915,
    0.2828495575198162,
    0.5411516758817481,
    2.068931392290445,
    47.18438200914984,
    0.003053473706769491,
    0.01858629695791424,
    0.032110245434099904,
    0.006287187209688091,
    0.008162966415892984,
    0.0027840687418581585,
    4.805977154451531,
    6.058439641882756,
    33.33796863783808,
    567.0486811155924,
    0.02305712569565531,
    0.15484384737160206,
    0.20916786137677873,
    0.06525425828147159,
    0.06308179580673515,
    0.017828276003334045,
];

/// A structurally invalid parameter set. Fatal at initialization: no scoring
/// happens against parameters that failed validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("parameter array '{name}' has length {found}, expected {FEATURE_COUNT}")]
    LengthMismatch { name: &'static str, found: usize },
    #[error("standard deviation at feature index {index} is zero; standardization would divide by zero")]
    ZeroStandardDeviation { index: usize },
}

/// The immutable parameter store shared read-only by every component.
#[derive(Debug, Clone)]
pub struct ModelParameters {
    pub weights: Array1<f64>,
    pub bias: f64,
    pub means: Array1<f64>,
    pub stds: Array1<f64>,
}

impl ModelParameters {
    /// Validates and assembles a parameter set. All three arrays must have
    /// length 30 and every std entry must be nonzero.
    pub fn new(
        weights: Array1<f64>,
        bias: f64,
        means: Array1<f64>,
        stds: Array1<f64>,
    ) -> Result<Self, ConfigurationError> {
        for (name, array) in [("weights", &weights), ("means", &means), ("stds", &stds)] {
            if array.len() != FEATURE_COUNT {
                return Err(ConfigurationError::LengthMismatch {
                    name,
                    found: array.len(),
                });
            }
        }
        if let Some(index) = stds.iter().position(|&s| s == 0.0) {
            return Err(ConfigurationError::ZeroStandardDeviation { index });
        }
        Ok(ModelParameters {
            weights,
            bias,
            means,
            stds,
        })
    }

    /// The process-wide handle to the embedded, pre-validated parameters.
    /// Initialized on first access and shared thereafter.
    pub fn embedded() -> &'static ModelParameters {
        static EMBEDDED: OnceLock<ModelParameters> = OnceLock::new();
        EMBEDDED.get_or_init(|| {
            ModelParameters::new(
                Array1::from_iter(WEIGHTS),
                BIAS,
                Array1::from_iter(FEATURE_MEANS),
                Array1::from_iter(FEATURE_STDS),
            )
            .expect("embedded model parameters are index-aligned and nonzero by construction")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_parameters_validate_and_are_shared() {
        let first = ModelParameters::embedded();
        let second = ModelParameters::embedded();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.weights.len(), FEATURE_COUNT);
        assert_eq!(first.bias, BIAS);
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let err = ModelParameters::new(
            Array1::zeros(29),
            0.0,
            Array1::zeros(FEATURE_COUNT),
            Array1::ones(FEATURE_COUNT),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::LengthMismatch {
                name: "weights",
                found: 29
            }
        );
    }

    #[test]
    fn rejects_zero_standard_deviation() {
        let mut stds = Array1::ones(FEATURE_COUNT);
        stds[12] = 0.0;
        let err = ModelParameters::new(
            Array1::zeros(FEATURE_COUNT),
            0.0,
            Array1::zeros(FEATURE_COUNT),
            stds,
        )
        .unwrap_err();
        assert_eq!(err, ConfigurationError::ZeroStandardDeviation { index: 12 });
    }
}
