//! Configuration for scoring and duplicate detection
//!
//! Weights and thresholds are data, not code: both pipeline stages take a
//! validated config at construction so operators can retune without
//! touching the algorithms. Validation is eager and strict; silently
//! renormalizing a bad weight set would mask operator mistakes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tolerance when checking that field weights sum to 1.0
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// A configuration value the core refuses to run with
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("field weights must sum to 1.0, got {0}")]
    WeightSum(f64),
    #[error("{name} must be within [0.0, 1.0], got {value}")]
    OutOfRange { name: &'static str, value: f64 },
    #[error("amount cutoff must be within (0.0, 1.0], got {0}")]
    AmountCutoff(f64),
    #[error("date window must be at least 1 day, got {0}")]
    DateWindow(i64),
    #[error("minor unit must be non-negative, got {0}")]
    MinorUnit(Decimal),
}

/// Per-field weights for the confidence aggregate and for pairwise
/// similarity; must sum to 1.0
///
/// Vendor and amount dominate the defaults: they are what a reviewer
/// reconciles a transaction by, and the strongest duplicate signals.
/// Category is cheap to correct later and gets the smallest weight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldWeights {
    pub vendor: f64,
    pub amount: f64,
    pub date: f64,
    pub category: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            vendor: 0.40,
            amount: 0.40,
            date: 0.15,
            category: 0.05,
        }
    }
}

impl FieldWeights {
    pub fn sum(&self) -> f64 {
        self.vendor + self.amount + self.date + self.category
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("vendor weight", self.vendor),
            ("amount weight", self.amount),
            ("date weight", self.date),
            ("category weight", self.category),
        ] {
            check_unit_range(name, value)?;
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum(sum));
        }
        Ok(())
    }
}

/// Configuration for the confidence scorer
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: FieldWeights,
    /// Records with an aggregate below this need review
    pub review_threshold: f64,
    /// Records with a date confidence below this need review regardless of
    /// the aggregate; a wrong date misplaces the transaction into the
    /// wrong period
    pub date_min_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: FieldWeights::default(),
            review_threshold: 0.70,
            date_min_threshold: 0.50,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;
        check_unit_range("review threshold", self.review_threshold)?;
        check_unit_range("date minimum threshold", self.date_min_threshold)?;
        Ok(())
    }
}

/// Configuration for the duplicate detector
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarityConfig {
    /// Tunable independently of the scoring weights
    pub weights: FieldWeights,
    /// Best candidate score at or above this is a duplicate
    pub duplicate_threshold: f64,
    /// Relative amount difference at which amount similarity reaches 0.0
    pub amount_cutoff: f64,
    /// Absolute amount difference still treated as an exact match
    /// (currency rounding, one minor unit)
    pub minor_unit: Decimal,
    /// Day distance beyond which date similarity is 0.0
    pub date_window_days: i64,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            weights: FieldWeights::default(),
            // 0.75 rather than the earlier 0.85: the stricter value
            // under-flagged duplicates with minor OCR noise
            duplicate_threshold: 0.75,
            amount_cutoff: 0.10,
            minor_unit: Decimal::new(1, 2),
            date_window_days: 3,
        }
    }
}

impl SimilarityConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;
        check_unit_range("duplicate threshold", self.duplicate_threshold)?;
        if !self.amount_cutoff.is_finite() || self.amount_cutoff <= 0.0 || self.amount_cutoff > 1.0
        {
            return Err(ConfigError::AmountCutoff(self.amount_cutoff));
        }
        if self.minor_unit < Decimal::ZERO {
            return Err(ConfigError::MinorUnit(self.minor_unit));
        }
        if self.date_window_days < 1 {
            return Err(ConfigError::DateWindow(self.date_window_days));
        }
        Ok(())
    }
}

fn check_unit_range(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::OutOfRange { name, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs_are_valid() {
        assert!(ScoringConfig::default().validate().is_ok());
        assert!(SimilarityConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = FieldWeights::default();
        assert!((weights.sum() - 1.0).abs() < WEIGHT_SUM_TOLERANCE);
    }

    #[test]
    fn test_rejects_weights_not_summing_to_one() {
        let config = ScoringConfig {
            weights: FieldWeights {
                vendor: 0.5,
                amount: 0.5,
                date: 0.5,
                category: 0.5,
            },
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::WeightSum(2.0)));
    }

    #[test]
    fn test_rejects_negative_weight() {
        let config = ScoringConfig {
            weights: FieldWeights {
                vendor: -0.1,
                amount: 0.5,
                date: 0.55,
                category: 0.05,
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_rejects_threshold_outside_unit_range() {
        let config = ScoringConfig {
            review_threshold: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { .. })
        ));

        let config = SimilarityConfig {
            duplicate_threshold: -0.2,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_cutoffs() {
        let config = SimilarityConfig {
            amount_cutoff: 0.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::AmountCutoff(0.0)));

        let config = SimilarityConfig {
            date_window_days: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::DateWindow(0)));
    }

    #[test]
    fn test_rejects_nan_weight() {
        let config = ScoringConfig {
            weights: FieldWeights {
                vendor: f64::NAN,
                amount: 0.4,
                date: 0.15,
                category: 0.05,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
