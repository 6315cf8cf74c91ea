//! Transaction record domain models

use crate::confidence::FieldConfidence;
use crate::dates::parse_date;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of money movement
///
/// The amount on a record is always a non-negative magnitude; the sign is
/// carried here so "negative amount" and "expense" can never disagree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

/// An AI/OCR-extracted transaction not yet accepted into the ledger
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DraftRecord {
    pub vendor: Option<String>,
    /// Non-negative magnitude; direction lives in `transaction_type`
    pub amount: Decimal,
    /// Raw extracted date text, parsed lazily against the supported formats
    pub date: Option<String>,
    pub category: Option<String>,
    pub transaction_type: TransactionType,
    pub currency: String,
    pub notes: Option<String>,
    pub source_file: Option<String>,
    /// The extractor's own per-field certainty
    pub raw_confidence: FieldConfidence,
}

impl DraftRecord {
    /// Create a draft with the extracted core fields; metadata defaults empty
    pub fn new(vendor: Option<String>, amount: Decimal, date: Option<String>) -> Self {
        Self {
            vendor,
            amount,
            date,
            category: None,
            transaction_type: TransactionType::Expense,
            currency: "PKR".to_string(),
            notes: None,
            source_file: None,
            raw_confidence: FieldConfidence::default(),
        }
    }

    /// The extracted date, if it parses against any supported format
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_date)
    }

    /// Vendor text with surrounding whitespace removed, if non-blank
    pub fn vendor_trimmed(&self) -> Option<&str> {
        self.vendor
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

/// A previously accepted transaction stored as the system of record
///
/// Identifiers are assigned in insertion order, so a larger `id` means a
/// more recently accepted record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub id: i64,
    pub vendor: Option<String>,
    pub amount: Decimal,
    pub date: Option<String>,
    pub category: Option<String>,
    pub transaction_type: TransactionType,
    pub currency: String,
    pub raw_confidence: FieldConfidence,
}

impl LedgerRecord {
    /// Promote an accepted draft into the ledger under the given identifier
    pub fn from_draft(id: i64, draft: &DraftRecord) -> Self {
        Self {
            id,
            vendor: draft.vendor.clone(),
            amount: draft.amount,
            date: draft.date.clone(),
            category: draft.category.clone(),
            transaction_type: draft.transaction_type,
            currency: draft.currency.clone(),
            raw_confidence: draft.raw_confidence,
        }
    }

    /// The stored date, if it parses against any supported format
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_date)
    }

    /// View an accepted record as a draft, e.g. to re-score it or to probe
    /// it against the rest of the ledger
    pub fn as_draft(&self) -> DraftRecord {
        DraftRecord {
            vendor: self.vendor.clone(),
            amount: self.amount,
            date: self.date.clone(),
            category: self.category.clone(),
            transaction_type: self.transaction_type,
            currency: self.currency.clone(),
            notes: None,
            source_file: None,
            raw_confidence: self.raw_confidence,
        }
    }
}
