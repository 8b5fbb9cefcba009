//! Persona diversity capping for the score-ordered shortlist walk.

use std::collections::HashMap;

use super::reduce::BestMatch;

/// Floor for the per-persona admission limit.
const MIN_PERSONA_CAP: usize = 4;

/// Per-persona admission limit for a shortlist of `top_n`.
pub fn max_per_persona(top_n: usize) -> usize {
    MIN_PERSONA_CAP.max(top_n / 2)
}

/// Walks best matches in score order, admitting at most `max_per_persona`
/// candidates per best-fit persona and at most `top_n` overall.
///
/// Returns the admitted matches plus the candidate ids the cap held back.
/// Matches past the `top_n` cutoff are neither admitted nor counted as
/// held back.
pub fn apply_persona_cap(
    sorted: Vec<BestMatch>,
    top_n: usize,
) -> (Vec<BestMatch>, Vec<String>) {
    let cap = max_per_persona(top_n);

    let mut admitted: Vec<BestMatch> = Vec::new();
    let mut held_back: Vec<String> = Vec::new();
    let mut per_persona: HashMap<String, usize> = HashMap::new();

    for candidate in sorted {
        if admitted.len() == top_n {
            break;
        }
        let count = per_persona
            .entry(candidate.best.persona_id.clone())
            .or_insert(0);
        if *count < cap {
            *count += 1;
            admitted.push(candidate);
        } else {
            held_back.push(candidate.best.candidate_id.clone());
        }
    }

    (admitted, held_back)
}
