//! Risk analysis integration tests

use rust_decimal::Decimal;
use tally_core::{RiskAnalyzer, RiskKind, RiskSeverity};
use tally_domain::{DraftRecord, FieldConfidence, LedgerRecord};

fn record(id: i64, vendor: &str, amount: i64, date: &str) -> LedgerRecord {
    let mut draft = DraftRecord::new(
        Some(vendor.to_string()),
        Decimal::from(amount),
        Some(date.to_string()),
    );
    draft.category = Some("Food".to_string());
    draft.raw_confidence = FieldConfidence::uniform(0.95);
    LedgerRecord::from_draft(id, &draft)
}

fn analyzer() -> RiskAnalyzer {
    RiskAnalyzer::new(RiskAnalyzer::recommended_config()).unwrap()
}

#[test]
fn test_empty_ledger_yields_no_alerts() {
    assert!(analyzer().analyze(&[]).is_empty());
}

#[test]
fn test_clean_ledger_yields_no_alerts() {
    let txs = vec![
        record(1, "KFC Gulberg", 1450, "2025-11-03"),
        record(2, "Shell Petrol", 1800, "2025-11-10"),
        record(3, "Careem", 950, "2025-11-17"),
    ];
    assert!(analyzer().analyze(&txs).is_empty());
}

#[test]
fn test_duplicate_charges_alert_groups_both_records() {
    let txs = vec![
        record(1, "KFC Gulberg", 1450, "2025-11-03"),
        record(2, "KFC Gulberg", 1450, "2025-11-03"),
        record(3, "Careem", 950, "2025-11-17"),
    ];
    let alerts = analyzer().analyze(&txs);

    let dup: Vec<_> = alerts
        .iter()
        .filter(|a| a.kind == RiskKind::DuplicateCharges)
        .collect();
    assert_eq!(dup.len(), 1, "one alert per duplicate group, got {alerts:?}");
    let mut ids = dup[0].transaction_ids.clone();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(dup[0].severity, RiskSeverity::Medium);
}

#[test]
fn test_large_transaction_alert() {
    let txs = vec![
        record(1, "Cafe One", 500, "2025-11-03"),
        record(2, "Cafe Two", 600, "2025-11-10"),
        record(3, "Mega Purchase Co", 90_000, "2025-11-17"),
    ];
    let alerts = analyzer().analyze(&txs);
    assert!(alerts
        .iter()
        .any(|a| a.kind == RiskKind::UnusuallyLargeTransaction
            && a.transaction_ids == vec![3]
            && a.severity == RiskSeverity::High));
}

#[test]
fn test_low_confidence_alert() {
    let mut shaky = record(1, "Blurry Receipt Inc", 700, "2025-11-03");
    shaky.raw_confidence = FieldConfidence {
        vendor: 0.5,
        amount: 0.95,
        date: 0.95,
        category: 0.95,
    };
    let txs = vec![shaky, record(2, "Careem", 950, "2025-11-17")];

    let alerts = analyzer().analyze(&txs);
    assert!(alerts
        .iter()
        .any(|a| a.kind == RiskKind::LowConfidenceFields && a.transaction_ids == vec![1]));
}

#[test]
fn test_subscription_alert() {
    let txs = vec![
        record(1, "Netflix", 1100, "2025-01-05"),
        record(2, "Netflix", 1100, "2025-02-04"),
        record(3, "Netflix", 1100, "2025-03-06"),
        record(4, "Careem", 950, "2025-02-17"),
    ];
    let alerts = analyzer().analyze(&txs);
    let sub = alerts
        .iter()
        .find(|a| a.kind == RiskKind::SubscriptionDetected)
        .expect("subscription alert");
    assert_eq!(sub.transaction_ids, vec![1, 2, 3]);
    assert_eq!(sub.severity, RiskSeverity::Low);
}

#[test]
fn test_analysis_is_deterministic() {
    let txs = vec![
        record(1, "Netflix", 1100, "2025-01-05"),
        record(2, "Netflix", 1100, "2025-02-04"),
        record(3, "Netflix", 1100, "2025-03-06"),
        record(4, "Mega Purchase Co", 90_000, "2025-01-04"),
        record(5, "Careem", 950, "2025-02-17"),
    ];
    let a = analyzer();
    assert_eq!(a.analyze(&txs), a.analyze(&txs));
}
