//! Per-field similarity scoring

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strsim::{jaro_winkler, normalized_levenshtein};
use tally_domain::{DraftRecord, LedgerRecord};

use super::normalization::{normalize_category, normalize_vendor};
use crate::config::SimilarityConfig;

/// Per-field similarity breakdown for a (draft, candidate) pair
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSimilarity {
    pub vendor: f64,
    pub amount: f64,
    pub date: f64,
    pub category: f64,
}

/// Weighted similarity of a draft against a ledger candidate
pub(crate) fn record_similarity(
    draft: &DraftRecord,
    candidate: &LedgerRecord,
    config: &SimilarityConfig,
) -> (f64, FieldSimilarity) {
    let breakdown = FieldSimilarity {
        vendor: vendor_similarity(draft.vendor.as_deref(), candidate.vendor.as_deref()),
        amount: amount_similarity(
            draft.amount,
            candidate.amount,
            config.minor_unit,
            config.amount_cutoff,
        ),
        date: date_similarity(
            draft.parsed_date(),
            candidate.parsed_date(),
            config.date_window_days,
        ),
        category: category_similarity(draft.category.as_deref(), candidate.category.as_deref()),
    };

    let weights = &config.weights;
    let score = weights.vendor * breakdown.vendor
        + weights.amount * breakdown.amount
        + weights.date * breakdown.date
        + weights.category * breakdown.category;

    (score, breakdown)
}

/// Vendor name similarity in [0.0, 1.0]
///
/// Exact match after normalization is 1.0; otherwise a Jaro-Winkler and
/// normalized-Levenshtein blend. Missing or blank on either side is 0.0.
pub fn vendor_similarity(a: Option<&str>, b: Option<&str>) -> f64 {
    let (Some(a), Some(b)) = (a, b) else {
        return 0.0;
    };

    let norm_a = normalize_vendor(a);
    let norm_b = normalize_vendor(b);
    if norm_a.is_empty() || norm_b.is_empty() {
        return 0.0;
    }
    if norm_a == norm_b {
        return 1.0;
    }

    jaro_winkler(&norm_a, &norm_b) * 0.6 + normalized_levenshtein(&norm_a, &norm_b) * 0.4
}

/// Amount similarity in [0.0, 1.0]
///
/// Equal amounts (or within one minor unit, for currency rounding) score
/// 1.0; otherwise similarity decays linearly with relative difference and
/// reaches 0.0 at `cutoff`. Models OCR digit noise without treating every
/// non-exact amount as a different transaction.
pub fn amount_similarity(a: Decimal, b: Decimal, minor_unit: Decimal, cutoff: f64) -> f64 {
    if a == b {
        return 1.0;
    }

    let diff = (a - b).abs();
    if diff <= minor_unit {
        return 1.0;
    }

    let larger = a.max(b);
    if larger <= Decimal::ZERO {
        return 0.0;
    }

    let relative = (diff / larger).to_f64().unwrap_or(1.0);
    if relative >= cutoff {
        0.0
    } else {
        1.0 - relative / cutoff
    }
}

/// Date similarity in [0.0, 1.0]
///
/// Same day is 1.0, decaying linearly to 0.0 beyond `window_days`; this
/// tolerates timezone and processing-date skew between the document date
/// and what OCR captured. Unparseable on either side is 0.0.
pub fn date_similarity(a: Option<NaiveDate>, b: Option<NaiveDate>, window_days: i64) -> f64 {
    let (Some(a), Some(b)) = (a, b) else {
        return 0.0;
    };

    let days = (a - b).num_days().abs();
    if days == 0 {
        1.0
    } else if days > window_days {
        0.0
    } else {
        1.0 - days as f64 / (window_days as f64 + 1.0)
    }
}

/// Category similarity: matching labels or either side unset is 1.0
///
/// A weak positive-only signal; categories are often auto-assigned after
/// the fact, so disagreement alone should not separate two records.
pub fn category_similarity(a: Option<&str>, b: Option<&str>) -> f64 {
    let (Some(a), Some(b)) = (a, b) else {
        return 1.0;
    };

    let norm_a = normalize_category(a);
    let norm_b = normalize_category(b);
    if norm_a.is_empty() || norm_b.is_empty() || norm_a == norm_b {
        1.0
    } else {
        0.0
    }
}
