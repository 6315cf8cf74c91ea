//! Duplicate detection for transaction records
//!
//! Compares a draft record against already-accepted ledger records using
//! weighted multi-field similarity and decides whether the draft
//! re-represents one of them.

mod detection;
mod normalization;
mod similarity;

pub use detection::{DuplicateDetector, SimilarityResult};
pub use similarity::{
    amount_similarity, category_similarity, date_similarity, vendor_similarity, FieldSimilarity,
};
