//! Risk analysis over the accepted ledger
//!
//! Batch-level rules that scan accepted records for patterns a bookkeeper
//! should know about: duplicate charges, outlier amounts, recurring
//! payments, and the like. Pure over its input snapshot; alerts are
//! advisory and the caller decides what to do with them.

mod rules;

use serde::{Deserialize, Serialize};
use tally_domain::LedgerRecord;

use crate::config::{ConfigError, SimilarityConfig};
use crate::deduplication::DuplicateDetector;

/// How urgently an alert deserves attention
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSeverity {
    Low,
    Medium,
    High,
}

/// The rule that produced an alert
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskKind {
    DuplicateCharges,
    UnusuallyLargeTransaction,
    LowConfidenceFields,
    SubscriptionDetected,
    FirstTimeHighValueVendor,
    WeekendSpendingSpike,
}

/// An advisory finding over a batch of accepted records
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskAlert {
    pub severity: RiskSeverity,
    pub kind: RiskKind,
    pub message: String,
    pub transaction_ids: Vec<i64>,
    pub recommended_action: String,
}

/// Runs every risk rule over a ledger snapshot
pub struct RiskAnalyzer {
    detector: DuplicateDetector,
}

impl RiskAnalyzer {
    /// Build with the given similarity config for the duplicate rule
    pub fn new(config: SimilarityConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            detector: DuplicateDetector::new(config)?,
        })
    }

    /// Similarity config recommended for risk scanning: stricter than the
    /// ingest threshold, since these records were all accepted already
    pub fn recommended_config() -> SimilarityConfig {
        SimilarityConfig {
            duplicate_threshold: 0.90,
            ..Default::default()
        }
    }

    /// Run all rules over a snapshot of accepted records
    pub fn analyze(&self, transactions: &[LedgerRecord]) -> Vec<RiskAlert> {
        if transactions.is_empty() {
            return Vec::new();
        }

        let mut alerts = Vec::new();
        alerts.extend(rules::duplicate_charges(&self.detector, transactions));
        alerts.extend(rules::unusually_large(transactions));
        alerts.extend(rules::low_confidence_fields(transactions));
        alerts.extend(rules::subscriptions(transactions));
        alerts.extend(rules::first_time_high_value(transactions));
        alerts.extend(rules::weekend_spike(transactions));

        tracing::debug!(
            records = transactions.len(),
            alerts = alerts.len(),
            "risk analysis complete"
        );
        alerts
    }
}
