//! Decision layer for AI-extracted bookkeeping records
//!
//! Two pure pipeline stages sit at the heart of this crate:
//! - Confidence scoring: per-field confidence normalization, a weighted
//!   aggregate, and a review flag for records a human must verify
//! - Duplicate detection: weighted multi-field similarity of a draft
//!   against already-accepted ledger records
//!
//! Around them sit the batch-level helpers the ingestion pipeline uses:
//! keyword categorization and risk analysis over the accepted ledger.
//!
//! Everything here is stateless and free of I/O. Thresholds and weights
//! are configuration data validated at construction, never process-wide
//! state, so independent calls are safe to run concurrently.

pub mod categorize;
pub mod config;
pub mod deduplication;
pub mod risk;
pub mod scoring;

pub use categorize::{CategoryGuess, CategoryRules};
pub use config::{ConfigError, FieldWeights, ScoringConfig, SimilarityConfig};
pub use deduplication::{DuplicateDetector, FieldSimilarity, SimilarityResult};
pub use risk::{RiskAlert, RiskAnalyzer, RiskKind, RiskSeverity};
pub use scoring::{ConfidenceScorer, Finding, ScoredRecord, Severity};
