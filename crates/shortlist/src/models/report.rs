//! Shortlist output types returned by the ranker.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::evaluation::{Evaluation, Grade};

/// A shortlisted candidate, collapsed to its best-fit persona result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based position in the shortlist, dense (1, 2, 3, ...).
    pub rank: usize,
    pub candidate_id: String,
    /// Persona the candidate scored highest against.
    pub persona_id: String,
    pub persona_name: String,
    pub score: f64,
    pub grade: Grade,
    /// Explanation carried over from the winning evaluation.
    pub why: String,
    /// Every persona the candidate was scored against, one record per
    /// persona, in first-seen order. Kept for audit and drill-down views.
    pub persona_results: Vec<Evaluation>,
}

/// Full ranking result: the shortlist plus summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingReport {
    /// Distinct candidates present in the input, shortlisted or not.
    pub total_evaluated: usize,
    pub shortlist: Vec<RankedEntry>,
    /// Best-fit persona id to shortlisted-candidate count. BTreeMap keeps
    /// serialized output byte-stable across runs.
    pub persona_distribution: BTreeMap<String, usize>,
    /// Human-readable summary, including any cap or availability caveat.
    pub notes: String,
}
