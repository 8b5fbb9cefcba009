//! Shortlist construction: validates evaluator output, reduces to best-fit
//! results, applies the persona diversity cap, and assembles the report.
//!
//! CRITICAL: ranking is pure and deterministic. Identical input produces a
//! byte-identical serialized report, regardless of process or run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ShortlistError;
use crate::models::{score_in_range, Evaluation, RankedEntry, RankingReport};

use super::diversity::{apply_persona_cap, max_per_persona};
use super::reduce::{reduce_best_per_candidate, BestMatch};

// ────────────────────────────────────────────────────────────────────────────
// Options
// ────────────────────────────────────────────────────────────────────────────

/// Shortlist size used when the caller does not specify one.
pub const DEFAULT_TOP_N: usize = 10;

/// Caller-supplied ranking parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankOptions {
    /// Maximum shortlist length. Zero is rejected, never clamped.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Persona ids in generation order, used only to break best-fit score
    /// ties. Empty when the ordering is unknown.
    #[serde(default)]
    pub persona_order: Vec<String>,
}

impl Default for RankOptions {
    fn default() -> Self {
        RankOptions {
            top_n: DEFAULT_TOP_N,
            persona_order: Vec::new(),
        }
    }
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

// ────────────────────────────────────────────────────────────────────────────
// Ranking
// ────────────────────────────────────────────────────────────────────────────

const EMPTY_INPUT_NOTE: &str = "No candidates were evaluated.";

/// Builds the candidate shortlist from per-(candidate, persona) evaluations.
///
/// Algorithm:
/// 1. Validate `top_n` and every record; any invalid record fails the whole
///    call before ranking starts
/// 2. Reduce rows to one best-fit result per candidate
/// 3. Stable-sort descending by best score
/// 4. Admit candidates under the persona diversity cap, stopping at `top_n`
/// 5. Assign dense 1-based ranks, then assemble distribution and notes
///
/// Empty input is not an error: it yields an empty, well-formed report.
pub fn rank_candidates(
    evaluations: &[Evaluation],
    options: &RankOptions,
) -> Result<RankingReport, ShortlistError> {
    validate_input(evaluations, options)?;

    if evaluations.is_empty() {
        return Ok(RankingReport {
            total_evaluated: 0,
            shortlist: Vec::new(),
            persona_distribution: BTreeMap::new(),
            notes: EMPTY_INPUT_NOTE.to_string(),
        });
    }

    let mut best_matches = reduce_best_per_candidate(evaluations, &options.persona_order);
    let total_evaluated = best_matches.len();

    // Stable sort: equal scores keep first-seen candidate order
    best_matches.sort_by(|a, b| {
        b.best
            .score
            .partial_cmp(&a.best.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let (admitted, held_back) = apply_persona_cap(best_matches, options.top_n);

    let shortlist: Vec<RankedEntry> = admitted
        .into_iter()
        .enumerate()
        .map(|(position, best_match)| to_entry(position + 1, best_match))
        .collect();

    let mut persona_distribution: BTreeMap<String, usize> = BTreeMap::new();
    for entry in &shortlist {
        *persona_distribution
            .entry(entry.persona_id.clone())
            .or_insert(0) += 1;
    }

    let notes = compose_notes(
        shortlist.len(),
        total_evaluated,
        persona_distribution.len(),
        options.top_n,
        held_back.len(),
    );

    debug!(
        "Ranked {} candidates from {} evaluation rows: {} shortlisted, {} held back by persona cap (top_n={})",
        total_evaluated,
        evaluations.len(),
        shortlist.len(),
        held_back.len(),
        options.top_n
    );

    Ok(RankingReport {
        total_evaluated,
        shortlist,
        persona_distribution,
        notes,
    })
}

/// Rejects the whole batch on the first unusable record, before any ranking
/// work starts.
fn validate_input(
    evaluations: &[Evaluation],
    options: &RankOptions,
) -> Result<(), ShortlistError> {
    if options.top_n == 0 {
        return Err(ShortlistError::InvalidTopN { got: options.top_n });
    }

    for (index, eval) in evaluations.iter().enumerate() {
        if eval.candidate_id.trim().is_empty() {
            return Err(ShortlistError::EmptyField {
                index,
                field: "candidate_id",
            });
        }
        if eval.persona_id.trim().is_empty() {
            return Err(ShortlistError::EmptyField {
                index,
                field: "persona_id",
            });
        }
        if !score_in_range(eval.score) {
            return Err(ShortlistError::InvalidScore {
                index,
                candidate_id: eval.candidate_id.clone(),
                persona_id: eval.persona_id.clone(),
                score: eval.score,
            });
        }
    }

    Ok(())
}

fn to_entry(rank: usize, best_match: BestMatch) -> RankedEntry {
    let BestMatch {
        best,
        persona_results,
    } = best_match;
    RankedEntry {
        rank,
        candidate_id: best.candidate_id,
        persona_id: best.persona_id,
        persona_name: best.persona_name,
        score: best.score,
        grade: best.grade,
        why: best.explanation,
        persona_results,
    }
}

/// Summary line plus at most one caveat; a cap-induced shortfall takes
/// precedence over the availability caveat.
fn compose_notes(
    shortlisted: usize,
    total_evaluated: usize,
    persona_kinds: usize,
    top_n: usize,
    held_back: usize,
) -> String {
    let mut notes = format!(
        "Top {} candidates selected from {} evaluated. Balanced across {} persona type(s).",
        shortlisted, total_evaluated, persona_kinds
    );

    if shortlisted < top_n {
        if held_back > 0 {
            notes.push_str(&format!(
                " {} candidate(s) were held back by the persona diversity cap ({} per persona).",
                held_back,
                max_per_persona(top_n)
            ));
        } else {
            notes.push_str(&format!(
                " Fewer candidates than the requested {} were available.",
                top_n
            ));
        }
    }

    notes
}
