//! Ranker: deterministic ordering of scored candidates.

use std::cmp::Ordering;

use crate::models::ScoredCandidate;

/// Sorts by `final_match_score` descending, then `candidate_name` ascending.
/// The sort is stable, so candidates equal on both keep their input order,
/// and ranking an already ranked list leaves it unchanged.
pub fn rank(mut scored: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    scored.sort_by(compare);
    scored
}

fn compare(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.final_match_score
        .total_cmp(&a.final_match_score)
        .then_with(|| a.candidate_name.cmp(&b.candidate_name))
}
