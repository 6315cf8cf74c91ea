//! Record confidence scoring

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_domain::{ConfidenceLevel, DraftRecord, FieldConfidence};

use crate::config::{ConfigError, ScoringConfig};

/// A draft record with normalized confidences and a review verdict
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub record: DraftRecord,
    /// Post-normalization confidence; differs from the raw values when a
    /// field is missing or malformed
    pub field_confidence: FieldConfidence,
    /// Weighted aggregate in [0.0, 1.0]
    pub overall_confidence: f64,
    pub needs_review: bool,
}

impl ScoredRecord {
    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_score(self.overall_confidence)
    }
}

/// Scores draft records against a fixed, validated configuration
///
/// Scoring is pure and total: malformed fields degrade to confidence 0.0
/// and the record gets flagged, it never fails.
#[derive(Clone, Debug)]
pub struct ConfidenceScorer {
    config: ScoringConfig,
}

impl ConfidenceScorer {
    /// Rejects invalid weights or thresholds up front
    pub fn new(config: ScoringConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a draft record
    pub fn score(&self, draft: &DraftRecord) -> ScoredRecord {
        let field_confidence = normalize_confidence(draft);

        let weights = &self.config.weights;
        let overall_confidence = weights.vendor * field_confidence.vendor
            + weights.amount * field_confidence.amount
            + weights.date * field_confidence.date
            + weights.category * field_confidence.category;

        // A low-confidence date forces review on its own; the aggregate
        // can hide a badly wrong date behind strong vendor/amount scores.
        let needs_review = overall_confidence < self.config.review_threshold
            || field_confidence.date < self.config.date_min_threshold;

        tracing::debug!(
            overall = overall_confidence,
            needs_review,
            "scored draft record"
        );

        ScoredRecord {
            record: draft.clone(),
            field_confidence,
            overall_confidence,
            needs_review,
        }
    }
}

impl Default for ConfidenceScorer {
    fn default() -> Self {
        Self {
            config: ScoringConfig::default(),
        }
    }
}

/// Zero out confidence for fields that are missing or malformed, pass the
/// rest through clamped to [0.0, 1.0]
fn normalize_confidence(draft: &DraftRecord) -> FieldConfidence {
    let raw = draft.raw_confidence;
    FieldConfidence {
        vendor: if draft.vendor_trimmed().is_none() {
            0.0
        } else {
            clamp_unit(raw.vendor)
        },
        amount: if draft.amount <= Decimal::ZERO {
            0.0
        } else {
            clamp_unit(raw.amount)
        },
        date: if draft.parsed_date().is_none() {
            0.0
        } else {
            clamp_unit(raw.date)
        },
        category: if is_blank(draft.category.as_deref()) {
            0.0
        } else {
            clamp_unit(raw.category)
        },
    }
}

fn is_blank(text: Option<&str>) -> bool {
    text.map_or(true, |t| t.trim().is_empty())
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(vendor: &str, amount: i64, date: &str, category: &str) -> DraftRecord {
        let mut d = DraftRecord::new(
            Some(vendor.to_string()),
            Decimal::from(amount),
            Some(date.to_string()),
        );
        d.category = Some(category.to_string());
        d
    }

    #[test]
    fn test_perfect_record_scores_one() {
        let mut d = draft("KFC Gulberg", 1450, "2025-11-29", "Food");
        d.raw_confidence = FieldConfidence::uniform(1.0);

        let scored = ConfidenceScorer::default().score(&d);
        assert!((scored.overall_confidence - 1.0).abs() < f64::EPSILON);
        assert!(!scored.needs_review);
        assert_eq!(scored.confidence_level(), ConfidenceLevel::High);
    }

    #[test]
    fn test_missing_date_forces_review() {
        let mut d = draft("KFC Gulberg", 1450, "2025-11-29", "Food");
        d.date = None;
        d.raw_confidence = FieldConfidence::uniform(1.0);

        let scored = ConfidenceScorer::default().score(&d);
        assert_eq!(scored.field_confidence.date, 0.0);
        assert!(scored.needs_review);
    }

    #[test]
    fn test_unparseable_date_zeroes_confidence() {
        let mut d = draft("KFC Gulberg", 1450, "29th of November", "Food");
        d.raw_confidence = FieldConfidence::uniform(1.0);

        let scored = ConfidenceScorer::default().score(&d);
        assert_eq!(scored.field_confidence.date, 0.0);
        assert!(scored.needs_review);
    }

    #[test]
    fn test_low_date_confidence_overrides_strong_aggregate() {
        let mut d = draft("KFC Gulberg", 1450, "2025-11-29", "Food");
        d.raw_confidence = FieldConfidence {
            vendor: 0.9,
            amount: 0.9,
            date: 0.3,
            category: 0.9,
        };

        let scored = ConfidenceScorer::default().score(&d);
        assert!((scored.overall_confidence - 0.81).abs() < 1e-12);
        assert!(scored.needs_review, "0.3 date confidence must force review");
    }

    #[test]
    fn test_zero_amount_zeroes_confidence() {
        let mut d = draft("KFC Gulberg", 0, "2025-11-29", "Food");
        d.raw_confidence = FieldConfidence::uniform(1.0);

        let scored = ConfidenceScorer::default().score(&d);
        assert_eq!(scored.field_confidence.amount, 0.0);
        assert!(scored.needs_review);
    }

    #[test]
    fn test_blank_vendor_and_category_zeroed() {
        let mut d = draft("  ", 1450, "2025-11-29", "");
        d.raw_confidence = FieldConfidence::uniform(1.0);

        let scored = ConfidenceScorer::default().score(&d);
        assert_eq!(scored.field_confidence.vendor, 0.0);
        assert_eq!(scored.field_confidence.category, 0.0);
    }

    #[test]
    fn test_raw_confidence_clamped() {
        let mut d = draft("KFC", 10, "2025-11-29", "Food");
        d.raw_confidence = FieldConfidence {
            vendor: 1.7,
            amount: -0.5,
            date: f64::NAN,
            category: 0.5,
        };

        let scored = ConfidenceScorer::default().score(&d);
        assert_eq!(scored.field_confidence.vendor, 1.0);
        assert_eq!(scored.field_confidence.amount, 0.0);
        assert_eq!(scored.field_confidence.date, 0.0);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let mut d = draft("Careem", 780, "2025-07-03", "Transport");
        d.raw_confidence = FieldConfidence::uniform(0.85);

        let scorer = ConfidenceScorer::default();
        assert_eq!(scorer.score(&d), scorer.score(&d));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = ScoringConfig {
            review_threshold: 2.0,
            ..Default::default()
        };
        assert!(ConfidenceScorer::new(config).is_err());
    }
}
