//! Individual risk rules

use chrono::Datelike;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use tally_domain::LedgerRecord;

use super::{RiskAlert, RiskKind, RiskSeverity};
use crate::deduplication::DuplicateDetector;

/// A transaction is an outlier above this multiple of the mean
const LARGE_MULTIPLE: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Spike multiple shared by the first-time vendor and weekend rules
const HIGH_VALUE_MULTIPLE: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Per-field confidence below this is worth an alert even post-acceptance
const LOW_CONFIDENCE: f64 = 0.9;

/// Monthly cadence window for subscription detection, in days
const MONTHLY_INTERVAL: std::ops::RangeInclusive<f64> = 25.0..=35.0;

/// Flag groups of accepted records that look like the same charge
pub(super) fn duplicate_charges(
    detector: &DuplicateDetector,
    transactions: &[LedgerRecord],
) -> Vec<RiskAlert> {
    let mut alerts = Vec::new();
    let mut processed: HashSet<i64> = HashSet::new();

    for (i, tx) in transactions.iter().enumerate() {
        if processed.contains(&tx.id) {
            continue;
        }

        let others: Vec<LedgerRecord> = transactions
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, t)| t.clone())
            .collect();

        let matches = detector.rank_duplicates(&tx.as_draft(), &others);
        if matches.is_empty() {
            continue;
        }

        let mut ids: Vec<i64> = matches.iter().filter_map(|m| m.matched_id).collect();
        ids.push(tx.id);
        processed.extend(ids.iter().copied());

        alerts.push(RiskAlert {
            severity: RiskSeverity::Medium,
            kind: RiskKind::DuplicateCharges,
            message: format!(
                "Potential duplicate transactions detected for {} with amount {}",
                tx.vendor.as_deref().unwrap_or("unknown vendor"),
                tx.amount
            ),
            transaction_ids: ids,
            recommended_action: "Review and merge duplicate transactions".to_string(),
        });
    }

    alerts
}

/// Flag transactions far above the batch average
pub(super) fn unusually_large(transactions: &[LedgerRecord]) -> Vec<RiskAlert> {
    let Some(mean) = mean_amount(transactions) else {
        return Vec::new();
    };
    let threshold = mean * LARGE_MULTIPLE;

    transactions
        .iter()
        .filter(|tx| tx.amount > threshold)
        .map(|tx| RiskAlert {
            severity: RiskSeverity::High,
            kind: RiskKind::UnusuallyLargeTransaction,
            message: format!(
                "Transaction amount {} is unusually large compared to the average of {:.2}",
                tx.amount,
                mean.to_f64().unwrap_or_default()
            ),
            transaction_ids: vec![tx.id],
            recommended_action: "Verify the transaction details and source".to_string(),
        })
        .collect()
}

/// Flag records whose extraction confidence was shaky even though they
/// made it into the ledger
pub(super) fn low_confidence_fields(transactions: &[LedgerRecord]) -> Vec<RiskAlert> {
    let mut alerts = Vec::new();

    for tx in transactions {
        let conf = tx.raw_confidence;
        let mut low = Vec::new();
        if conf.vendor < LOW_CONFIDENCE {
            low.push("vendor");
        }
        if conf.amount < LOW_CONFIDENCE {
            low.push("amount");
        }
        if conf.date < LOW_CONFIDENCE {
            low.push("date");
        }
        if conf.category < LOW_CONFIDENCE {
            low.push("category");
        }

        if !low.is_empty() {
            alerts.push(RiskAlert {
                severity: RiskSeverity::Medium,
                kind: RiskKind::LowConfidenceFields,
                message: format!(
                    "Low confidence in fields: {} for transaction {}",
                    low.join(", "),
                    tx.id
                ),
                transaction_ids: vec![tx.id],
                recommended_action: "Review and correct the low-confidence fields".to_string(),
            });
        }
    }

    alerts
}

/// Flag same-vendor same-amount charges recurring on a monthly cadence
pub(super) fn subscriptions(transactions: &[LedgerRecord]) -> Vec<RiskAlert> {
    let mut by_vendor: HashMap<&str, Vec<&LedgerRecord>> = HashMap::new();
    for tx in transactions {
        if let Some(vendor) = tx.vendor.as_deref() {
            by_vendor.entry(vendor).or_default().push(tx);
        }
    }

    let mut vendors: Vec<&str> = by_vendor.keys().copied().collect();
    vendors.sort_unstable();

    let mut alerts = Vec::new();
    for vendor in vendors {
        let txs = &by_vendor[vendor];
        if txs.len() < 3 {
            continue;
        }

        let amount = txs[0].amount;
        if !txs.iter().all(|tx| tx.amount == amount) {
            continue;
        }

        let mut dates: Vec<_> = txs.iter().filter_map(|tx| tx.parsed_date()).collect();
        if dates.len() != txs.len() {
            continue;
        }
        dates.sort_unstable();

        let intervals: Vec<i64> = dates.windows(2).map(|w| (w[1] - w[0]).num_days()).collect();
        let avg_interval = intervals.iter().sum::<i64>() as f64 / intervals.len() as f64;

        if MONTHLY_INTERVAL.contains(&avg_interval) {
            alerts.push(RiskAlert {
                severity: RiskSeverity::Low,
                kind: RiskKind::SubscriptionDetected,
                message: format!(
                    "Potential monthly subscription detected for {vendor} with amount {amount}"
                ),
                transaction_ids: txs.iter().map(|tx| tx.id).collect(),
                recommended_action: "Confirm if this is a subscription and categorize accordingly"
                    .to_string(),
            });
        }
    }

    alerts
}

/// Flag vendors seen exactly once with an unusually large charge
pub(super) fn first_time_high_value(transactions: &[LedgerRecord]) -> Vec<RiskAlert> {
    let Some(mean) = mean_amount(transactions) else {
        return Vec::new();
    };
    let threshold = mean * HIGH_VALUE_MULTIPLE;

    let mut counts: HashMap<&str, u32> = HashMap::new();
    for tx in transactions {
        if let Some(vendor) = tx.vendor.as_deref() {
            *counts.entry(vendor).or_default() += 1;
        }
    }

    transactions
        .iter()
        .filter(|tx| {
            tx.vendor
                .as_deref()
                .is_some_and(|v| counts.get(v) == Some(&1))
                && tx.amount > threshold
        })
        .map(|tx| RiskAlert {
            severity: RiskSeverity::Medium,
            kind: RiskKind::FirstTimeHighValueVendor,
            message: format!(
                "First-time vendor {} with high value transaction of {}",
                tx.vendor.as_deref().unwrap_or_default(),
                tx.amount
            ),
            transaction_ids: vec![tx.id],
            recommended_action: "Verify the legitimacy of this new vendor transaction".to_string(),
        })
        .collect()
}

/// Flag batches where weekend spending runs well above the weekday average
pub(super) fn weekend_spike(transactions: &[LedgerRecord]) -> Vec<RiskAlert> {
    let mut weekday = (Decimal::ZERO, 0u32);
    let mut weekend = (Decimal::ZERO, 0u32);
    let mut weekend_ids = Vec::new();

    for tx in transactions {
        let Some(date) = tx.parsed_date() else {
            continue;
        };
        if date.weekday().number_from_monday() >= 6 {
            weekend.0 += tx.amount;
            weekend.1 += 1;
            weekend_ids.push(tx.id);
        } else {
            weekday.0 += tx.amount;
            weekday.1 += 1;
        }
    }

    if weekday.1 == 0 || weekend.1 == 0 {
        return Vec::new();
    }

    let avg_weekday = weekday.0 / Decimal::from(weekday.1);
    let avg_weekend = weekend.0 / Decimal::from(weekend.1);

    if avg_weekend > avg_weekday * HIGH_VALUE_MULTIPLE {
        vec![RiskAlert {
            severity: RiskSeverity::Low,
            kind: RiskKind::WeekendSpendingSpike,
            message: format!(
                "Unusual spending spike on weekends: {:.2} vs weekday average {:.2}",
                avg_weekend.to_f64().unwrap_or_default(),
                avg_weekday.to_f64().unwrap_or_default()
            ),
            transaction_ids: weekend_ids,
            recommended_action: "Review weekend transactions for unusual activity".to_string(),
        }]
    } else {
        Vec::new()
    }
}

fn mean_amount(transactions: &[LedgerRecord]) -> Option<Decimal> {
    let positive: Vec<Decimal> = transactions
        .iter()
        .map(|tx| tx.amount)
        .filter(|a| *a > Decimal::ZERO)
        .collect();
    if positive.is_empty() {
        return None;
    }
    Some(positive.iter().sum::<Decimal>() / Decimal::from(positive.len()))
}
