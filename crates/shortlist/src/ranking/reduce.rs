//! Best-per-candidate reduction: collapses raw evaluation rows into one
//! best-fit result per candidate.

use std::collections::HashMap;

use crate::models::Evaluation;

/// A candidate collapsed to its strongest persona match.
#[derive(Debug, Clone)]
pub struct BestMatch {
    /// The winning evaluation row.
    pub best: Evaluation,
    /// One row per persona the candidate was scored against, highest score
    /// kept per persona, in first-seen persona order.
    pub persona_results: Vec<Evaluation>,
}

/// Collapses evaluation rows into one `BestMatch` per candidate, preserving
/// first-seen candidate order.
///
/// Duplicate (candidate, persona) rows keep the highest score; an exact
/// score tie keeps the earlier row. Best-fit score ties across personas
/// prefer the persona appearing earlier in `persona_order`; if either
/// persona is absent from that order, the first-seen persona wins.
pub fn reduce_best_per_candidate(
    evaluations: &[Evaluation],
    persona_order: &[String],
) -> Vec<BestMatch> {
    let persona_rank: HashMap<&str, usize> = persona_order
        .iter()
        .enumerate()
        .map(|(position, id)| (id.as_str(), position))
        .collect();

    let mut order: Vec<&str> = Vec::new();
    let mut grouped: HashMap<&str, Vec<Evaluation>> = HashMap::new();
    let mut slots: HashMap<(&str, &str), usize> = HashMap::new();

    for eval in evaluations {
        let candidate = eval.candidate_id.as_str();
        let persona = eval.persona_id.as_str();
        let rows = grouped.entry(candidate).or_insert_with(|| {
            order.push(candidate);
            Vec::new()
        });
        match slots.get(&(candidate, persona)) {
            Some(&slot) => {
                if eval.score > rows[slot].score {
                    rows[slot] = eval.clone();
                }
            }
            None => {
                slots.insert((candidate, persona), rows.len());
                rows.push(eval.clone());
            }
        }
    }

    order
        .into_iter()
        .filter_map(|candidate| grouped.remove(candidate))
        .map(|rows| {
            let mut best_slot = 0;
            for slot in 1..rows.len() {
                if rows[slot].score > rows[best_slot].score {
                    best_slot = slot;
                } else if rows[slot].score == rows[best_slot].score
                    && outranks(&rows[slot], &rows[best_slot], &persona_rank)
                {
                    best_slot = slot;
                }
            }
            BestMatch {
                best: rows[best_slot].clone(),
                persona_results: rows,
            }
        })
        .collect()
}

/// True when `challenger` beats the incumbent best on the persona-order
/// tie-break. Personas missing from the order never outrank anything.
fn outranks(
    challenger: &Evaluation,
    incumbent: &Evaluation,
    persona_rank: &HashMap<&str, usize>,
) -> bool {
    match (
        persona_rank.get(challenger.persona_id.as_str()),
        persona_rank.get(incumbent.persona_id.as_str()),
    ) {
        (Some(challenger_pos), Some(incumbent_pos)) => challenger_pos < incumbent_pos,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Grade;

    fn make_eval(candidate: &str, persona: &str, score: f64) -> Evaluation {
        Evaluation {
            candidate_id: candidate.to_string(),
            persona_id: persona.to_string(),
            persona_name: format!("{persona} persona"),
            score,
            grade: Grade::from_score(score),
            strengths: vec![],
            gaps: vec![],
            explanation: format!("{candidate} vs {persona}"),
        }
    }

    fn order(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_row_becomes_single_match() {
        let evals = vec![make_eval("alice", "P1", 80.0)];
        let reduced = reduce_best_per_candidate(&evals, &[]);
        assert_eq!(reduced.len(), 1);
        assert_eq!(reduced[0].best.candidate_id, "alice");
        assert_eq!(reduced[0].persona_results.len(), 1);
    }

    #[test]
    fn test_best_is_highest_scoring_persona() {
        let evals = vec![
            make_eval("alice", "P1", 60.0),
            make_eval("alice", "P2", 90.0),
            make_eval("alice", "P3", 75.0),
        ];
        let reduced = reduce_best_per_candidate(&evals, &[]);
        assert_eq!(reduced.len(), 1);
        assert_eq!(reduced[0].best.persona_id, "P2");
        assert_eq!(reduced[0].best.score, 90.0);
        assert_eq!(reduced[0].persona_results.len(), 3);
    }

    #[test]
    fn test_candidates_keep_first_seen_order() {
        let evals = vec![
            make_eval("bob", "P1", 50.0),
            make_eval("alice", "P1", 99.0),
            make_eval("bob", "P2", 70.0),
        ];
        let reduced = reduce_best_per_candidate(&evals, &[]);
        let ids: Vec<&str> = reduced.iter().map(|m| m.best.candidate_id.as_str()).collect();
        assert_eq!(ids, vec!["bob", "alice"], "reduction must not reorder candidates");
    }

    #[test]
    fn test_duplicate_pair_keeps_highest_score() {
        let evals = vec![
            make_eval("alice", "P1", 70.0),
            make_eval("alice", "P1", 85.0),
        ];
        let reduced = reduce_best_per_candidate(&evals, &[]);
        assert_eq!(reduced[0].persona_results.len(), 1, "duplicates collapse to one row");
        assert_eq!(reduced[0].best.score, 85.0);

        // Same rows, opposite arrival order
        let reversed = vec![
            make_eval("alice", "P1", 85.0),
            make_eval("alice", "P1", 70.0),
        ];
        let reduced_rev = reduce_best_per_candidate(&reversed, &[]);
        assert_eq!(reduced_rev[0].best.score, 85.0);
    }

    #[test]
    fn test_duplicate_pair_exact_tie_keeps_first_row() {
        let mut first = make_eval("alice", "P1", 80.0);
        first.explanation = "first row".to_string();
        let mut second = make_eval("alice", "P1", 80.0);
        second.explanation = "second row".to_string();

        let reduced = reduce_best_per_candidate(&[first, second], &[]);
        assert_eq!(reduced[0].best.explanation, "first row");
    }

    #[test]
    fn test_score_tie_prefers_persona_generation_order() {
        let evals = vec![
            make_eval("alice", "P2", 88.0),
            make_eval("alice", "P1", 88.0),
        ];
        let reduced = reduce_best_per_candidate(&evals, &order(&["P1", "P2", "P3"]));
        assert_eq!(
            reduced[0].best.persona_id, "P1",
            "P1 comes before P2 in the generation order"
        );
    }

    #[test]
    fn test_score_tie_without_order_keeps_first_seen_persona() {
        let evals = vec![
            make_eval("alice", "P2", 88.0),
            make_eval("alice", "P1", 88.0),
        ];
        let reduced = reduce_best_per_candidate(&evals, &[]);
        assert_eq!(reduced[0].best.persona_id, "P2");
    }

    #[test]
    fn test_score_tie_with_unlisted_persona_falls_back_to_first_seen() {
        let evals = vec![
            make_eval("alice", "PX", 88.0),
            make_eval("alice", "P1", 88.0),
        ];
        // PX is not in the generation order, so the order cannot place it
        let reduced = reduce_best_per_candidate(&evals, &order(&["P1", "P2"]));
        assert_eq!(reduced[0].best.persona_id, "PX");
    }

    #[test]
    fn test_persona_results_keep_first_seen_persona_order() {
        let evals = vec![
            make_eval("alice", "P3", 40.0),
            make_eval("alice", "P1", 50.0),
            make_eval("alice", "P2", 60.0),
        ];
        let reduced = reduce_best_per_candidate(&evals, &[]);
        let personas: Vec<&str> = reduced[0]
            .persona_results
            .iter()
            .map(|e| e.persona_id.as_str())
            .collect();
        assert_eq!(personas, vec!["P3", "P1", "P2"]);
    }

    #[test]
    fn test_keep_highest_replaces_in_place() {
        // The persona keeps its first-seen slot even when a later row wins it
        let evals = vec![
            make_eval("alice", "P1", 40.0),
            make_eval("alice", "P2", 55.0),
            make_eval("alice", "P1", 90.0),
        ];
        let reduced = reduce_best_per_candidate(&evals, &[]);
        let personas: Vec<&str> = reduced[0]
            .persona_results
            .iter()
            .map(|e| e.persona_id.as_str())
            .collect();
        assert_eq!(personas, vec!["P1", "P2"]);
        assert_eq!(reduced[0].persona_results[0].score, 90.0);
        assert_eq!(reduced[0].best.persona_id, "P1");
    }

    #[test]
    fn test_empty_input_reduces_to_nothing() {
        assert!(reduce_best_per_candidate(&[], &[]).is_empty());
    }
}
