//! Heuristic review findings for extracted records
//!
//! These annotate a record with human-readable reasons a reviewer should
//! look at it: suspicious dates, amounts, or vendor text that raw
//! confidence numbers alone do not explain. The reference date is an
//! explicit parameter so the checks stay pure.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_domain::{DraftRecord, Field};

/// Findings above this age are suspicious for a freshly uploaded document
const STALE_DATE_DAYS: i64 = 730;

/// Amounts above this are unusual enough to call out
const LARGE_AMOUNT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Vendor names longer than this usually mean the OCR grabbed a whole line
const MAX_VENDOR_LEN: usize = 50;

/// Raw field confidence below this earns a warning of its own
const LOW_RAW_CONFIDENCE: f64 = 0.5;

/// Severity of a review finding
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

/// A single reason a reviewer should look at a record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub field: Field,
    pub message: String,
    pub severity: Severity,
}

impl Finding {
    fn error(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    fn warning(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

/// Collect review findings for a draft record
///
/// `today` anchors the future/stale date checks; pass the upload date.
pub fn review_findings(draft: &DraftRecord, today: NaiveDate) -> Vec<Finding> {
    let mut findings = Vec::new();

    check_date(draft, today, &mut findings);
    check_amount(draft, &mut findings);
    check_vendor(draft, &mut findings);
    check_raw_confidence(draft, &mut findings);

    findings
}

fn check_date(draft: &DraftRecord, today: NaiveDate, findings: &mut Vec<Finding>) {
    let Some(text) = draft.date.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
        findings.push(Finding::warning(Field::Date, "Date is missing"));
        return;
    };

    let Some(date) = tally_domain::parse_date(text) else {
        findings.push(Finding::error(
            Field::Date,
            format!("Date '{text}' does not match any supported format"),
        ));
        return;
    };

    if date > today {
        findings.push(Finding::warning(
            Field::Date,
            "Date is in the future; please verify",
        ));
    } else if (today - date).num_days() > STALE_DATE_DAYS {
        findings.push(Finding::warning(
            Field::Date,
            "Date is more than 2 years old; please verify",
        ));
    }
}

fn check_amount(draft: &DraftRecord, findings: &mut Vec<Finding>) {
    if draft.amount <= Decimal::ZERO {
        findings.push(Finding::error(Field::Amount, "Amount is zero or missing"));
    } else if draft.amount > LARGE_AMOUNT {
        findings.push(Finding::warning(
            Field::Amount,
            "Amount seems unusually high; please verify",
        ));
    }
}

fn check_vendor(draft: &DraftRecord, findings: &mut Vec<Finding>) {
    let Some(vendor) = draft.vendor_trimmed() else {
        findings.push(Finding::warning(
            Field::Vendor,
            "Vendor name is unknown or missing",
        ));
        return;
    };

    if vendor.eq_ignore_ascii_case("unknown") {
        findings.push(Finding::warning(
            Field::Vendor,
            "Vendor name is unknown or missing",
        ));
        return;
    }

    let total = vendor.chars().count();
    let special = vendor
        .chars()
        .filter(|c| !c.is_alphanumeric() && !c.is_whitespace())
        .count();
    if special as f64 > total as f64 * 0.3 {
        findings.push(Finding::warning(
            Field::Vendor,
            "Vendor name contains unusual characters; OCR may have failed",
        ));
    }

    if total > MAX_VENDOR_LEN {
        findings.push(Finding::warning(
            Field::Vendor,
            "Vendor name is unusually long; please verify",
        ));
    }
}

fn check_raw_confidence(draft: &DraftRecord, findings: &mut Vec<Finding>) {
    let conf = draft.raw_confidence;
    for (field, value) in [
        (Field::Vendor, conf.vendor),
        (Field::Amount, conf.amount),
        (Field::Date, conf.date),
        (Field::Category, conf.category),
    ] {
        if value < LOW_RAW_CONFIDENCE {
            findings.push(Finding::warning(
                field,
                format!("{field} has low extraction confidence ({:.0}%)", value * 100.0),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_domain::FieldConfidence;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    fn clean_draft() -> DraftRecord {
        let mut d = DraftRecord::new(
            Some("Shell".to_string()),
            Decimal::from(3200),
            Some("2025-12-20".to_string()),
        );
        d.category = Some("Fuel".to_string());
        d.raw_confidence = FieldConfidence::uniform(0.95);
        d
    }

    #[test]
    fn test_clean_record_has_no_findings() {
        assert!(review_findings(&clean_draft(), today()).is_empty());
    }

    #[test]
    fn test_missing_date_warns() {
        let mut d = clean_draft();
        d.date = None;
        let findings = review_findings(&d, today());
        assert!(findings
            .iter()
            .any(|f| f.field == Field::Date && f.severity == Severity::Warning));
    }

    #[test]
    fn test_unparseable_date_is_error() {
        let mut d = clean_draft();
        d.date = Some("soonish".to_string());
        let findings = review_findings(&d, today());
        assert!(findings
            .iter()
            .any(|f| f.field == Field::Date && f.severity == Severity::Error));
    }

    #[test]
    fn test_future_and_stale_dates_warn() {
        let mut d = clean_draft();
        d.date = Some("2027-01-01".to_string());
        assert!(!review_findings(&d, today()).is_empty());

        d.date = Some("2020-01-01".to_string());
        assert!(!review_findings(&d, today()).is_empty());
    }

    #[test]
    fn test_zero_amount_is_error() {
        let mut d = clean_draft();
        d.amount = Decimal::ZERO;
        let findings = review_findings(&d, today());
        assert!(findings
            .iter()
            .any(|f| f.field == Field::Amount && f.severity == Severity::Error));
    }

    #[test]
    fn test_huge_amount_warns() {
        let mut d = clean_draft();
        d.amount = Decimal::from(5_000_000);
        let findings = review_findings(&d, today());
        assert!(findings.iter().any(|f| f.field == Field::Amount));
    }

    #[test]
    fn test_gibberish_vendor_warns() {
        let mut d = clean_draft();
        d.vendor = Some("@@#$%^&*!!".to_string());
        let findings = review_findings(&d, today());
        assert!(findings.iter().any(|f| f.field == Field::Vendor));
    }

    #[test]
    fn test_unknown_vendor_warns() {
        let mut d = clean_draft();
        d.vendor = Some("Unknown".to_string());
        let findings = review_findings(&d, today());
        assert!(findings.iter().any(|f| f.field == Field::Vendor));
    }

    #[test]
    fn test_low_raw_confidence_warns_per_field() {
        let mut d = clean_draft();
        d.raw_confidence = FieldConfidence {
            vendor: 0.95,
            amount: 0.3,
            date: 0.95,
            category: 0.2,
        };
        let findings = review_findings(&d, today());
        assert!(findings.iter().any(|f| f.field == Field::Amount));
        assert!(findings.iter().any(|f| f.field == Field::Category));
        assert!(!findings.iter().any(|f| f.field == Field::Vendor));
    }
}
