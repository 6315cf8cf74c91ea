//! Duplicate candidate selection

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tally_domain::{DraftRecord, LedgerRecord};

use super::similarity::{record_similarity, FieldSimilarity};
use crate::config::{ConfigError, SimilarityConfig};

/// Verdict for a draft compared against the candidate window
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// Weighted similarity in [0.0, 1.0] against the best candidate
    pub score: f64,
    /// Whether `score` reached the duplicate threshold
    pub is_duplicate: bool,
    /// Identifier of the matched ledger record; set only for duplicates
    pub matched_id: Option<i64>,
    /// Per-field similarity against the best candidate
    pub breakdown: FieldSimilarity,
}

/// Finds the ledger record a draft most likely re-represents
///
/// Pure function of its inputs: the caller supplies the candidate window
/// (already filtered to a sensible date range) and acts on the verdict;
/// the detector never touches the ledger.
#[derive(Clone, Debug)]
pub struct DuplicateDetector {
    config: SimilarityConfig,
}

impl DuplicateDetector {
    /// Rejects invalid weights, thresholds, or decay cutoffs up front
    pub fn new(config: SimilarityConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    /// Compare a draft against the candidate window and report the best match
    ///
    /// Returns `None` for an empty window. Ties at the best score break
    /// toward the most recently inserted candidate (highest id), the record
    /// a re-upload of the same document batch most likely re-derives.
    pub fn find_duplicate(
        &self,
        draft: &DraftRecord,
        candidates: &[LedgerRecord],
    ) -> Option<SimilarityResult> {
        let mut best: Option<(f64, FieldSimilarity, i64)> = None;

        for candidate in candidates {
            let (score, breakdown) = record_similarity(draft, candidate, &self.config);
            tracing::trace!(candidate_id = candidate.id, score, "scored candidate");

            let improves = match best {
                None => true,
                Some((best_score, _, best_id)) => {
                    score > best_score || (score == best_score && candidate.id > best_id)
                }
            };
            if improves {
                best = Some((score, breakdown, candidate.id));
            }
        }

        let (score, breakdown, id) = best?;
        let is_duplicate = score >= self.config.duplicate_threshold;
        if is_duplicate {
            tracing::debug!(matched_id = id, score, "draft matched an existing record");
        }

        Some(SimilarityResult {
            score,
            is_duplicate,
            matched_id: is_duplicate.then_some(id),
            breakdown,
        })
    }

    /// All candidates at or above the duplicate threshold, best first
    pub fn rank_duplicates(
        &self,
        draft: &DraftRecord,
        candidates: &[LedgerRecord],
    ) -> Vec<SimilarityResult> {
        let mut matches: Vec<(f64, FieldSimilarity, i64)> = candidates
            .iter()
            .filter_map(|candidate| {
                let (score, breakdown) = record_similarity(draft, candidate, &self.config);
                (score >= self.config.duplicate_threshold)
                    .then_some((score, breakdown, candidate.id))
            })
            .collect();

        matches.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then(b.2.cmp(&a.2))
        });

        matches
            .into_iter()
            .map(|(score, breakdown, id)| SimilarityResult {
                score,
                is_duplicate: true,
                matched_id: Some(id),
                breakdown,
            })
            .collect()
    }
}

impl Default for DuplicateDetector {
    fn default() -> Self {
        Self {
            config: SimilarityConfig::default(),
        }
    }
}
