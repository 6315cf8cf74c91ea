//! Confidence scoring for extracted transaction records
//!
//! Normalizes the extractor's raw per-field confidences, aggregates them
//! into a single record confidence, and decides whether a human must
//! review the record before it is trusted.

mod checks;
mod scorer;

pub use checks::{review_findings, Finding, Severity};
pub use scorer::{ConfidenceScorer, ScoredRecord};
