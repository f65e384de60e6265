//! Shortlister: threshold filter, top-N cut and a plain-language reason
//! for each candidate that made it.

use serde::{Deserialize, Serialize};

use crate::models::{ScoredCandidate, ShortlistEntry};

const EXCELLENT_SEMANTIC: f64 = 0.5;
const GOOD_SEMANTIC: f64 = 0.2;
const HIGH_KEYWORD: f64 = 0.5;
const SOME_KEYWORD: f64 = 0.1;
/// Below this final score the explanation carries a caveat.
const LOW_FINAL: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortlistCriteria {
    /// Minimum `final_match_score`, inclusive.
    pub threshold: f64,
    pub top_n: usize,
}

impl Default for ShortlistCriteria {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            top_n: 5,
        }
    }
}

/// Filters an already ranked list and explains each survivor. Order is kept.
pub fn shortlist(ranked: &[ScoredCandidate], criteria: &ShortlistCriteria) -> Vec<ShortlistEntry> {
    ranked
        .iter()
        .filter(|c| c.final_match_score >= criteria.threshold)
        .take(criteria.top_n)
        .map(|c| ShortlistEntry {
            explanation: explain(c),
            candidate: c.clone(),
        })
        .collect()
}

pub fn explain(candidate: &ScoredCandidate) -> String {
    let semantic = candidate.semantic_match_score;
    let keyword = candidate.keyword_match_score;
    let final_score = candidate.final_match_score;

    let mut clauses = vec![format!(
        "Shortlisted with a final match score of {final_score:.2}."
    )];

    if semantic > EXCELLENT_SEMANTIC {
        clauses.push(format!(
            "Excellent semantic alignment ({semantic:.2}) on experience."
        ));
    } else if semantic > GOOD_SEMANTIC {
        clauses.push(format!("Good semantic alignment ({semantic:.2}) on experience."));
    }

    if keyword > HIGH_KEYWORD {
        clauses.push(format!("Matches a high number of key skills ({keyword:.2})."));
    } else if keyword > SOME_KEYWORD {
        clauses.push(format!("Matches several key skills ({keyword:.2})."));
    }

    if final_score < LOW_FINAL {
        clauses.push("Considered a potential fit despite lower overall score.".to_string());
    }

    clauses.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(name: &str, keyword: f64, semantic: f64, final_score: f64) -> ScoredCandidate {
        ScoredCandidate {
            candidate_name: name.to_string(),
            keyword_match_score: keyword,
            semantic_match_score: semantic,
            final_match_score: final_score,
            ..Default::default()
        }
    }

    fn criteria(threshold: f64, top_n: usize) -> ShortlistCriteria {
        ShortlistCriteria { threshold, top_n }
    }

    #[test]
    fn test_tied_scores_keep_first_ranked() {
        let ranked = crate::matching::ranker::rank(vec![
            scored("Zoe", 0.8, 0.8, 0.8),
            scored("Adam", 0.8, 0.8, 0.8),
        ]);
        let list = shortlist(&ranked, &criteria(0.1, 1));
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].candidate.candidate_name, "Adam");
    }

    #[test]
    fn test_low_score_above_threshold_gets_caveat() {
        let list = shortlist(&[scored("Sam", 0.3, 0.05, 0.15)], &criteria(0.1, 5));
        assert_eq!(list.len(), 1);
        let explanation = &list[0].explanation;
        assert!(explanation.starts_with("Shortlisted with a final match score of 0.15."));
        assert!(explanation.contains("potential fit despite lower overall score"));
        assert!(explanation.contains("Matches several key skills (0.30)."));
        assert!(!explanation.contains("semantic alignment"));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let list = shortlist(
            &[scored("A", 0.0, 0.0, 0.1), scored("B", 0.0, 0.0, 0.099)],
            &criteria(0.1, 5),
        );
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].candidate.candidate_name, "A");
    }

    #[test]
    fn test_size_bounded_and_all_above_threshold() {
        let ranked: Vec<ScoredCandidate> = [0.9, 0.7, 0.5, 0.3, 0.2, 0.05, 0.01]
            .iter()
            .enumerate()
            .map(|(i, s)| scored(&format!("C{i}"), 0.0, 0.0, *s))
            .collect();

        for top_n in [0, 1, 3, 5, 10] {
            for threshold in [0.0, 0.1, 0.4, 0.95] {
                let list = shortlist(&ranked, &criteria(threshold, top_n));
                let filtered = ranked
                    .iter()
                    .filter(|c| c.final_match_score >= threshold)
                    .count();
                assert!(list.len() <= top_n.min(filtered));
                assert_eq!(list.len(), top_n.min(filtered));
                assert!(list
                    .iter()
                    .all(|e| e.candidate.final_match_score >= threshold));
            }
        }
    }

    #[test]
    fn test_order_is_preserved() {
        let ranked = vec![
            scored("A", 0.0, 0.0, 0.9),
            scored("B", 0.0, 0.0, 0.6),
            scored("C", 0.0, 0.0, 0.4),
        ];
        let list = shortlist(&ranked, &criteria(0.1, 2));
        let names: Vec<&str> = list
            .iter()
            .map(|e| e.candidate.candidate_name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_explanation_strong_candidate() {
        let text = explain(&scored("Ada", 0.75, 0.62, 0.67));
        assert_eq!(
            text,
            "Shortlisted with a final match score of 0.67. \
             Excellent semantic alignment (0.62) on experience. \
             Matches a high number of key skills (0.75)."
        );
    }

    #[test]
    fn test_explanation_mid_candidate() {
        let text = explain(&scored("Bo", 0.2, 0.3, 0.26));
        assert_eq!(
            text,
            "Shortlisted with a final match score of 0.26. \
             Good semantic alignment (0.30) on experience. \
             Matches several key skills (0.20)."
        );
    }

    #[test]
    fn test_band_edges_are_exclusive() {
        let text = explain(&scored("Cy", 0.5, 0.5, 0.5));
        assert!(text.contains("Good semantic alignment (0.50)"));
        assert!(text.contains("Matches several key skills (0.50)."));

        let text = explain(&scored("Di", 0.1, 0.2, 0.2));
        assert_eq!(text, "Shortlisted with a final match score of 0.20.");
    }

    #[test]
    fn test_empty_input() {
        assert!(shortlist(&[], &ShortlistCriteria::default()).is_empty());
    }
}
