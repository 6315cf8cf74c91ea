//! Transaction domain types shared across the tally suite
//!
//! This crate provides the canonical domain models for AI-extracted
//! bookkeeping records:
//! - DraftRecord: an extracted transaction not yet accepted into the ledger
//! - LedgerRecord: an accepted transaction with a stable identifier
//! - FieldConfidence: per-field extraction confidence in [0, 1]
//! - Field, TransactionType, ConfidenceLevel: supporting enums
//! - Date parsing against the formats the extractors emit

pub mod confidence;
pub mod dates;
pub mod transaction;

pub use confidence::*;
pub use dates::*;
pub use transaction::*;
