//! Fitted regression coefficients and their JSON representation.
//!
//! The bundles were exported from the offline training pipeline as plain
//! intercept + weight vectors, one extent model and one production model
//! per season. Feature order is fixed and shared by every model:
//!
//! 0. year
//! 1. season encoding (constant within a per-season model, weight ~0)
//! 2. district encoding (position in the canonical district list)
//! 3. sown extent in hectares, or the stage-1 extent estimate for the
//!    production stage
//! 4. previous yield
//! 5. previous production

use serde::Deserialize;

use crate::error::{ForecastError, Result};

/// Number of features every fitted model expects.
pub const FEATURE_COUNT: usize = 6;

/// A single fitted linear model.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub weights: Vec<f64>,
}

impl LinearModel {
    /// Dot product against the fixed feature layout.
    pub fn predict(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.weights.len() {
            return Err(ForecastError::ModelShape {
                expected: self.weights.len(),
                got: features.len(),
            });
        }
        let value = self.intercept
            + self
                .weights
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>();
        if !value.is_finite() {
            return Err(ForecastError::NonFinite);
        }
        Ok(value)
    }
}

/// The extent and production models fitted for one season.
#[derive(Debug, Clone, Deserialize)]
pub struct SeasonModels {
    pub extent: LinearModel,
    pub production: LinearModel,
}

/// Every model the service ships, keyed by season.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelSet {
    pub maha: SeasonModels,
    pub yala: SeasonModels,
}

impl ModelSet {
    /// Parses a coefficient bundle, verifying every weight vector length.
    pub fn from_json(raw: &str) -> Result<Self> {
        let set: ModelSet = serde_json::from_str(raw)?;
        for model in [
            &set.maha.extent,
            &set.maha.production,
            &set.yala.extent,
            &set.yala.production,
        ] {
            if model.weights.len() != FEATURE_COUNT {
                return Err(ForecastError::ModelShape {
                    expected: FEATURE_COUNT,
                    got: model.weights.len(),
                });
            }
        }
        Ok(set)
    }

    /// The coefficient bundle compiled into the crate.
    pub fn embedded() -> Result<Self> {
        Self::from_json(include_str!("../models/coefficients.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_model_is_a_dot_product() {
        let model = LinearModel {
            intercept: 10.0,
            weights: vec![1.0, 2.0, 0.5],
        };
        let value = model.predict(&[1.0, 2.0, 4.0]).unwrap();
        assert_eq!(value, 10.0 + 1.0 + 4.0 + 2.0);
    }

    #[test]
    fn test_feature_count_mismatch_is_an_error() {
        let model = LinearModel {
            intercept: 0.0,
            weights: vec![1.0, 2.0],
        };
        let err = model.predict(&[1.0]).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::ModelShape {
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn test_non_finite_output_is_an_error() {
        let model = LinearModel {
            intercept: 0.0,
            weights: vec![f64::MAX],
        };
        assert!(matches!(
            model.predict(&[f64::MAX]),
            Err(ForecastError::NonFinite)
        ));
    }

    #[test]
    fn test_embedded_bundle_parses_and_has_full_vectors() {
        let set = ModelSet::embedded().unwrap();
        assert_eq!(set.maha.extent.weights.len(), FEATURE_COUNT);
        assert_eq!(set.yala.production.weights.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_truncated_bundle_is_rejected() {
        let raw = r#"{
            "maha": {
                "extent": {"intercept": 0.0, "weights": [1.0]},
                "production": {"intercept": 0.0, "weights": [1.0, 1.0, 1.0, 1.0, 1.0, 1.0]}
            },
            "yala": {
                "extent": {"intercept": 0.0, "weights": [1.0, 1.0, 1.0, 1.0, 1.0, 1.0]},
                "production": {"intercept": 0.0, "weights": [1.0, 1.0, 1.0, 1.0, 1.0, 1.0]}
            }
        }"#;
        assert!(matches!(
            ModelSet::from_json(raw),
            Err(ForecastError::ModelShape { expected: 6, got: 1 })
        ));
    }
}
